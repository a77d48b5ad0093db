//! # Discount Allocation
//!
//! Splits a subtotal into the discount and the amount left to pay.
//!
//! ## Why the total is a complement
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  subtotal = 21798, rate = 580 bps                                       │
//! │                                                                         │
//! │  discount = floor(21798 × 580 / 10000) = floor(1264.284) = 1264         │
//! │  total    = 21798 - 1264                                = 20534         │
//! │                                                                         │
//! │  Rounding discount and total independently can leave or invent a cent: │
//! │    floor(21798 × 9420 / 10000) = 20533, and 1264 + 20533 = 21797.       │
//! │  We round ONLY the discount and define total = subtotal - discount,    │
//! │  so discount + total == subtotal for every input.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::rate::DiscountRate;
use crate::BPS_PER_WHOLE;

/// The two parts of a subtotal after applying a discount rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountSplit {
    /// `floor(subtotal × bps / 10000)`.
    pub discount: Money,
    /// `subtotal - discount`.
    pub total: Money,
}

/// Allocates `subtotal` between discount and total.
///
/// `subtotal` is expected to be non-negative and `rate` within 0..=10000
/// bps; under those bounds both parts are non-negative and
/// `discount + total == subtotal` exactly. The product is computed in
/// `i128` so no subtotal representable as `i64` can overflow.
///
/// ## Example
/// ```rust
/// use tally_core::discount::allocate_discount;
/// use tally_core::money::Money;
/// use tally_core::rate::DiscountRate;
///
/// let split = allocate_discount(Money::from_cents(10000), DiscountRate::from_bps(1000));
/// assert_eq!(split.discount.cents(), 1000);
/// assert_eq!(split.total.cents(), 9000);
/// ```
pub fn allocate_discount(subtotal: Money, rate: DiscountRate) -> DiscountSplit {
    let discount_cents =
        (subtotal.cents() as i128 * rate.bps() as i128) / BPS_PER_WHOLE as i128;
    let discount = Money::from_cents(discount_cents as i64);

    DiscountSplit {
        discount,
        total: subtotal - discount,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
