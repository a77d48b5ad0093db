//! # tally-core: Pure Invoice Logic for Tally
//!
//! This crate turns a human-entered invoice request into internally
//! consistent integer amounts. It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Invoice Creation Pipeline                        │
//! │                                                                         │
//! │  CreateInvoiceRequest (validated by `validation`)                       │
//! │         │                                                               │
//! │  ┌──────▼──────────────────────────────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   pricing ──► subtotal                                          │   │
//! │  │   rate    ──► DiscountRate (basis points)                       │   │
//! │  │   discount ─► DiscountSplit { discount, total }                 │   │
//! │  │                     │                                           │   │
//! │  │                     ▼                                           │   │
//! │  │               NewInvoice                                        │   │
//! │  └─────────────────────┬───────────────────────────────────────────┘   │
//! │                        │                                                │
//! │  ┌─────────────────────▼───────────────────────────────────────────┐   │
//! │  │          tally-db: one unit of work, one-query reads            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Invoice, LineItem, requests)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`rate`] - Percent text ⇄ basis points
//! - [`discount`] - Discount allocation without losing minor units
//! - [`pricing`] - Line item pricing and subtotal accumulation
//! - [`invoice`] - The full request → `NewInvoice` pipeline
//! - [`validation`] - Request gateway rules
//! - [`view`] - Display rendering of a stored invoice
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::discount::allocate_discount;
//! use tally_core::money::Money;
//! use tally_core::rate::DiscountRate;
//!
//! let rate = DiscountRate::parse_percent("5.80").unwrap();
//! let split = allocate_discount(Money::from_cents(21798), rate);
//!
//! assert_eq!(split.discount.cents(), 1264);
//! assert_eq!(split.total.cents(), 20534);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod discount;
pub mod error;
pub mod invoice;
pub mod money;
pub mod pricing;
pub mod rate;
pub mod types;
pub mod validation;
pub mod view;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use discount::{allocate_discount, DiscountSplit};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::{price_line_items, PricedLineItems};
pub use rate::DiscountRate;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// The single billing currency of the system.
pub const BILLING_CURRENCY: &str = "USD";

/// Note stored on an invoice when the request carries none.
pub const DEFAULT_NOTE: &str = "Thank you for your business.";

/// Basis points in 100%.
pub const BPS_PER_WHOLE: u32 = 10_000;
