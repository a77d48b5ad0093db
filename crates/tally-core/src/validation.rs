//! # Validation Module
//!
//! Request gateway rules for invoice creation.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                      │
//! │  ├── Field presence and types                                          │
//! │  └── Dates parse as YYYY-MM-DD                                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Required text, email shape, allowed status                        │
//! │  └── Rate / price text shape, quantities, date order                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── CHECK constraints on amounts and rate                             │
//! │  └── Foreign key from line_items to invoices                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::validation::{validate_discount_rate_text, validate_unit_price_text};
//!
//! validate_discount_rate_text("5.80").unwrap();
//! validate_unit_price_text("58.99").unwrap();
//! assert!(validate_unit_price_text("58.999").is_err());
//! ```

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidateEmail;

use crate::error::ValidationError;
use crate::types::{CreateInvoiceRequest, InvoiceStatus, LineItemInput};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Statuses a new invoice may be created with.
pub const CREATABLE_STATUSES: [InvoiceStatus; 3] = [
    InvoiceStatus::Draft,
    InvoiceStatus::PendingPayment,
    InvoiceStatus::Overdue,
];

// ASCII digits only; `\d` would also match other Unicode digits.
static RATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[0-9]|[1-9][0-9])(?:\.[0-9]+)?$").expect("valid rate pattern"));

static PRICE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+(?:\.[0-9]{1,2})?$").expect("valid price pattern"));

// =============================================================================
// String Validators
// =============================================================================

/// Validates that a text field is present.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates the shape of an email address (HTML5 / RFC 5322 subset, as
/// checked by `validator`).
///
/// ## Example
/// ```rust
/// use tally_core::validation::validate_email;
///
/// assert!(validate_email("customer_email", "ada@example.com").is_ok());
/// assert!(validate_email("customer_email", "<ada>@example.com").is_err());
/// ```
pub fn validate_email(field: &str, email: &str) -> ValidationResult<()> {
    validate_required(field, email)?;

    if !email.trim().validate_email() {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a valid email address".to_string(),
        });
    }
    Ok(())
}

/// Validates the status text and returns the parsed status.
///
/// Only [`CREATABLE_STATUSES`] are accepted; an invoice cannot be born paid.
pub fn validate_status(status: &str) -> ValidationResult<InvoiceStatus> {
    let not_allowed = || ValidationError::NotAllowed {
        field: "status".to_string(),
        allowed: CREATABLE_STATUSES
            .iter()
            .map(|s| s.as_str().to_string())
            .collect(),
    };

    let parsed: InvoiceStatus = status.trim().parse().map_err(|_| not_allowed())?;
    if !CREATABLE_STATUSES.contains(&parsed) {
        return Err(not_allowed());
    }
    Ok(parsed)
}

/// Validates discount rate text: one or two integer digits (no leading
/// zero on two), then an optional fraction of one or more digits.
///
/// `"0"`, `"5.80"`, `"99.999"` pass; `"100"`, `"05"`, `"5."`, `"-1"` fail.
pub fn validate_discount_rate_text(rate: &str) -> ValidationResult<()> {
    if !RATE_PATTERN.is_match(rate) {
        return Err(ValidationError::InvalidFormat {
            field: "discount_rate".to_string(),
            reason: "must be a percentage between 0 and 99 with optional decimals".to_string(),
        });
    }
    Ok(())
}

/// Validates unit price text: digits, then optionally `.` and one or two
/// digits. Negative values and signs are rejected by shape.
pub fn validate_unit_price_text(price: &str) -> ValidationResult<()> {
    if !PRICE_PATTERN.is_match(price) {
        return Err(ValidationError::InvalidFormat {
            field: "unit_price".to_string(),
            reason: "must be a non-negative amount with at most two decimals".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Numeric / Date Validators
// =============================================================================

/// Validates a line item quantity (> 0).
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    Ok(())
}

/// Validates that the due date falls strictly after the issue date.
pub fn validate_date_order(issue_date: NaiveDate, due_date: NaiveDate) -> ValidationResult<()> {
    if due_date <= issue_date {
        return Err(ValidationError::DueDateNotAfterIssueDate);
    }
    Ok(())
}

// =============================================================================
// Request Validators
// =============================================================================

/// Validates one line item input.
pub fn validate_line_item(item: &LineItemInput) -> ValidationResult<()> {
    validate_required("description", &item.description)?;
    validate_quantity(item.quantity)?;
    validate_unit_price_text(&item.unit_price)?;
    Ok(())
}

/// Validates a full create request and returns its parsed status.
///
/// ## Flow
/// ```text
/// contact fields ─► emails ─► status ─► rate ─► payment_info
///      ─► dates ─► line_items (non-empty, each item) ─► Ok(status)
/// ```
/// The first failing rule is returned.
pub fn validate_create_request(request: &CreateInvoiceRequest) -> ValidationResult<InvoiceStatus> {
    let required = [
        ("customer_name", &request.customer_name),
        ("customer_phone", &request.customer_phone),
        ("customer_address", &request.customer_address),
        ("sender_name", &request.sender_name),
        ("sender_phone", &request.sender_phone),
        ("sender_address", &request.sender_address),
    ];
    for (field, value) in required {
        validate_required(field, value)?;
    }

    validate_email("customer_email", &request.customer_email)?;
    validate_email("sender_email", &request.sender_email)?;

    let status = validate_status(&request.status)?;
    validate_discount_rate_text(&request.discount_rate)?;
    validate_required("payment_info", &request.payment_info)?;
    validate_date_order(request.issue_date, request.due_date)?;

    if request.line_items.is_empty() {
        return Err(ValidationError::Required {
            field: "line_items".to_string(),
        });
    }
    for item in &request.line_items {
        validate_line_item(item)?;
    }

    Ok(status)
}

// =============================================================================
// Unit Tests
// =============================================================================
