//! # Invoice View
//!
//! Display rendering of a stored invoice for callers that show it to people.
//! Amounts become `$1,234.56`, the rate becomes `5.8%`, dates become
//! `YYYY-MM-DD` and the creation time is RFC 3339.

use chrono::SecondsFormat;
use serde::Serialize;

use crate::types::{InvoiceAggregate, LineItem};

/// A rendered invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceView {
    pub invoice_number: i64,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub sender_name: String,
    pub sender_email: String,
    pub sender_phone: String,
    pub sender_address: String,
    pub issue_date: String,
    pub due_date: String,
    pub status: String,
    pub subtotal: String,
    pub discount_rate: String,
    pub discount: String,
    pub total_amount: String,
    pub payment_info: String,
    pub billing_currency: String,
    pub note: String,
    pub created_at: String,
    pub items: Vec<LineItemView>,
}

/// A rendered line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItemView {
    pub id: i64,
    pub invoice_number: i64,
    pub description: String,
    pub quantity: i64,
    pub unit_price: String,
    pub total_price: String,
}

impl From<&LineItem> for LineItemView {
    fn from(item: &LineItem) -> Self {
        LineItemView {
            id: item.id,
            invoice_number: item.invoice_number,
            description: item.description.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price().to_string(),
            total_price: item.total_price().to_string(),
        }
    }
}

impl From<&InvoiceAggregate> for InvoiceView {
    fn from(aggregate: &InvoiceAggregate) -> Self {
        let invoice = &aggregate.invoice;
        InvoiceView {
            invoice_number: invoice.invoice_number,
            customer_name: invoice.customer_name.clone(),
            customer_email: invoice.customer_email.clone(),
            customer_phone: invoice.customer_phone.clone(),
            customer_address: invoice.customer_address.clone(),
            sender_name: invoice.sender_name.clone(),
            sender_email: invoice.sender_email.clone(),
            sender_phone: invoice.sender_phone.clone(),
            sender_address: invoice.sender_address.clone(),
            issue_date: invoice.issue_date.format("%Y-%m-%d").to_string(),
            due_date: invoice.due_date.format("%Y-%m-%d").to_string(),
            status: invoice.status.to_string(),
            subtotal: invoice.subtotal().to_string(),
            discount_rate: invoice.discount_rate().to_string(),
            discount: invoice.discount().to_string(),
            total_amount: invoice.total().to_string(),
            payment_info: invoice.payment_info.clone(),
            billing_currency: invoice.billing_currency.clone(),
            note: invoice.note.clone(),
            created_at: invoice.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            items: aggregate.line_items.iter().map(LineItemView::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Invoice, InvoiceStatus};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn aggregate() -> InvoiceAggregate {
        InvoiceAggregate {
            invoice: Invoice {
                invoice_number: 7,
                customer_name: "Ada".to_string(),
                customer_email: "ada@example.com".to_string(),
                customer_phone: "555-0100".to_string(),
                customer_address: "1 Loop St".to_string(),
                sender_name: "Engines Ltd".to_string(),
                sender_email: "billing@engines.example".to_string(),
                sender_phone: "555-0199".to_string(),
                sender_address: "2 Loop St".to_string(),
                issue_date: NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
                due_date: NaiveDate::from_ymd_opt(2026, 5, 15).unwrap(),
                status: InvoiceStatus::PendingPayment,
                subtotal_cents: 123456,
                discount_rate_bps: 580,
                discount_cents: 7160,
                total_cents: 116296,
                billing_currency: "USD".to_string(),
                payment_info: "Wire".to_string(),
                note: "Thank you for your business.".to_string(),
                created_at: Utc.with_ymd_and_hms(2026, 5, 1, 9, 30, 0).unwrap(),
            },
            line_items: vec![LineItem {
                id: 3,
                invoice_number: 7,
                description: "Engine".to_string(),
                quantity: 2,
                unit_price_cents: 61728,
                total_price_cents: 123456,
            }],
        }
    }

    #[test]
    fn test_renders_display_formats() {
        let view = InvoiceView::from(&aggregate());

        assert_eq!(view.subtotal, "$1,234.56");
        assert_eq!(view.discount_rate, "5.8%");
        assert_eq!(view.discount, "$71.60");
        assert_eq!(view.total_amount, "$1,162.96");
        assert_eq!(view.issue_date, "2026-05-01");
        assert_eq!(view.status, "pending_payment");
        assert_eq!(view.created_at, "2026-05-01T09:30:00Z");
        assert_eq!(view.items[0].unit_price, "$617.28");
    }
}
