//! # Domain Types
//!
//! Core domain types used throughout Tally.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Input side (gateway)             Stored side (server-assigned fields)  │
//! │  ─────────────────────            ──────────────────────────────────    │
//! │  CreateInvoiceRequest             Invoice                               │
//! │  └── LineItemInput[]              ├── invoice_number  (PK)              │
//! │           │                       ├── billing_currency, note            │
//! │           ▼ pricing / discount    └── created_at                        │
//! │  NewInvoice                       LineItem                              │
//! │  └── NewLineItem[]                ├── id (PK, ordering key)             │
//! │                                   └── invoice_number (FK)               │
//! │                                                                         │
//! │  InvoiceAggregate = Invoice + ordered LineItem[]                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;
use crate::rate::DiscountRate;

// =============================================================================
// Invoice Status
// =============================================================================

/// The status of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// Being prepared, not yet sent.
    Draft,
    /// Sent and awaiting payment.
    PendingPayment,
    /// Past its due date without payment.
    Overdue,
    /// Settled.
    Paid,
}

impl InvoiceStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [InvoiceStatus; 4] = [
        InvoiceStatus::Draft,
        InvoiceStatus::PendingPayment,
        InvoiceStatus::Overdue,
        InvoiceStatus::Paid,
    ];

    /// The stored / wire name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::PendingPayment => "pending_payment",
            InvoiceStatus::Overdue => "overdue",
            InvoiceStatus::Paid => "paid",
        }
    }
}

impl Default for InvoiceStatus {
    fn default() -> Self {
        InvoiceStatus::Draft
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InvoiceStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "status".to_string(),
                allowed: InvoiceStatus::ALL
                    .iter()
                    .map(|status| status.as_str().to_string())
                    .collect(),
            })
    }
}

// =============================================================================
// Gateway Input
// =============================================================================

/// A line item as entered by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemInput {
    pub description: String,
    pub quantity: i64,
    /// Decimal text in major units, e.g. `"58.99"`.
    pub unit_price: String,
}

/// The request handed over by the gateway to create an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateInvoiceRequest {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub sender_name: String,
    pub sender_email: String,
    pub sender_phone: String,
    pub sender_address: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: String,
    /// Percent text, e.g. `"5.80"`.
    pub discount_rate: String,
    pub payment_info: String,
    #[serde(default)]
    pub note: Option<String>,
    pub line_items: Vec<LineItemInput>,
}

// =============================================================================
// Write Side
// =============================================================================

/// A priced line item ready to be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLineItem {
    pub description: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    /// `unit_price_cents × quantity`.
    pub total_price_cents: i64,
}

/// A fully priced invoice ready to be written as one unit of work.
///
/// Amounts satisfy `subtotal_cents == discount_cents + total_cents`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewInvoice {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub sender_name: String,
    pub sender_email: String,
    pub sender_phone: String,
    pub sender_address: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
    pub subtotal_cents: i64,
    pub discount_rate_bps: i64,
    pub discount_cents: i64,
    pub total_cents: i64,
    pub payment_info: String,
    pub note: Option<String>,
    pub line_items: Vec<NewLineItem>,
}

// =============================================================================
// Stored Side
// =============================================================================

/// An invoice header as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Invoice {
    pub invoice_number: i64,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub sender_name: String,
    pub sender_email: String,
    pub sender_phone: String,
    pub sender_address: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
    pub subtotal_cents: i64,
    pub discount_rate_bps: i64,
    pub discount_cents: i64,
    pub total_cents: i64,
    pub billing_currency: String,
    pub payment_info: String,
    pub note: String,
    pub created_at: DateTime<Utc>,
}

impl Invoice {
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }

    #[inline]
    pub fn discount(&self) -> Money {
        Money::from_cents(self.discount_cents)
    }

    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// The stored rate; out-of-range values cannot pass the table's CHECK.
    pub fn discount_rate(&self) -> DiscountRate {
        DiscountRate::from_bps(self.discount_rate_bps.clamp(0, 10_000) as u32)
    }
}

/// A line item as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct LineItem {
    pub id: i64,
    pub invoice_number: i64,
    pub description: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub total_price_cents: i64,
}

impl LineItem {
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    #[inline]
    pub fn total_price(&self) -> Money {
        Money::from_cents(self.total_price_cents)
    }
}

/// An invoice header with its full, ordered set of line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceAggregate {
    #[serde(flatten)]
    pub invoice: Invoice,
    pub line_items: Vec<LineItem>,
}

/// What the caller gets back after a successful create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedInvoice {
    pub invoice_number: i64,
    pub created_at: DateTime<Utc>,
}

impl From<&InvoiceAggregate> for CreatedInvoice {
    fn from(aggregate: &InvoiceAggregate) -> Self {
        CreatedInvoice {
            invoice_number: aggregate.invoice.invoice_number,
            created_at: aggregate.invoice.created_at,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in InvoiceStatus::ALL {
            assert_eq!(status.as_str().parse::<InvoiceStatus>().unwrap(), status);
        }
        assert!("cancelled".parse::<InvoiceStatus>().is_err());
    }

    #[test]
    fn test_status_serde_name() {
        let json = serde_json::to_string(&InvoiceStatus::PendingPayment).unwrap();
        assert_eq!(json, "\"pending_payment\"");
    }

    #[test]
    fn test_status_default() {
        assert_eq!(InvoiceStatus::default(), InvoiceStatus::Draft);
    }

    #[test]
    fn test_request_deserializes_without_note() {
        let json = r#"{
            "customer_name": "Ada", "customer_email": "ada@example.com",
            "customer_phone": "+1 555", "customer_address": "1 Loop St",
            "sender_name": "Bob", "sender_email": "bob@example.com",
            "sender_phone": "+1 556", "sender_address": "2 Loop St",
            "issue_date": "2026-01-01", "due_date": "2026-01-31",
            "status": "draft", "discount_rate": "5.80", "payment_info": "IBAN",
            "line_items": [{"description": "Widget", "quantity": 2, "unit_price": "58.99"}]
        }"#;
        let request: CreateInvoiceRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.note, None);
        assert_eq!(request.line_items.len(), 1);
        assert_eq!(request.issue_date, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
    }
}
