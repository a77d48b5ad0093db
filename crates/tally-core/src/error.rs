//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tally-core errors (this file)                                         │
//! │  ├── CoreError        - Pricing / rate / allocation failures           │
//! │  └── ValidationError  - Request gateway failures                       │
//! │                                                                         │
//! │  tally-db errors (separate crate)                                      │
//! │  └── DbError          - Storage failures, classified by ErrorKind      │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → (caller) ; DbError → (caller)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised while turning a request into a `NewInvoice`.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Discount rate text is not a decimal percentage in [0, 100].
    ///
    /// ## When This Occurs
    /// - Text does not parse as a decimal ("abc", "", "5.8.0")
    /// - Value is negative or above 100
    #[error("Invalid discount rate '{value}': {reason}")]
    InvalidDiscountRate { value: String, reason: String },

    /// A monetary amount cannot be represented in minor units.
    #[error("Invalid amount '{value}': {reason}")]
    InvalidAmount { value: String, reason: String },

    /// Line item quantity is zero or negative.
    #[error("Quantity must be positive, got {0}")]
    InvalidQuantity(i64),

    /// Integer minor-unit arithmetic overflowed.
    #[error("Amount overflow while computing {context}")]
    AmountOverflow { context: String },

    /// An invoice needs at least one line item.
    #[error("Invoice must have at least one line item")]
    EmptyInvoice,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    pub(crate) fn overflow(context: impl Into<String>) -> Self {
        CoreError::AmountOverflow {
            context: context.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These are produced by the request gateway rules in
/// [`crate::validation`], before the pricing pipeline runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed email, price with 3 decimals).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Due date is not strictly after the issue date.
    #[error("due_date must be later than issue_date")]
    DueDateNotAfterIssueDate,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidDiscountRate {
            value: "abc".to_string(),
            reason: "not a decimal number".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid discount rate 'abc': not a decimal number"
        );

        assert_eq!(
            CoreError::InvalidQuantity(0).to_string(),
            "Quantity must be positive, got 0"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "customer_name".to_string(),
        };
        assert_eq!(err.to_string(), "customer_name is required");

        let err = ValidationError::DueDateNotAfterIssueDate;
        assert_eq!(err.to_string(), "due_date must be later than issue_date");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "line_items".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
