//! # Discount Rates
//!
//! Converts between human-entered percentage text and basis points.
//!
//! ```text
//! "5.80" ──parse_percent──► DiscountRate(580) ──to_percent_text──► "5.8"
//! ```
//!
//! 1 basis point = 0.01% = 1/10000, so two decimal digits of percent are
//! representable. Extra digits are truncated toward zero.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};
use crate::BPS_PER_WHOLE;

/// Discount rate represented in basis points (bps), 0..=10000.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Creates a rate from basis points already known to be in range.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Creates a rate from a stored basis point value, checking the range.
    pub fn try_from_bps(bps: i64) -> CoreResult<Self> {
        if !(0..=BPS_PER_WHOLE as i64).contains(&bps) {
            return Err(CoreError::InvalidDiscountRate {
                value: bps.to_string(),
                reason: "basis points must be between 0 and 10000".to_string(),
            });
        }
        Ok(DiscountRate(bps as u32))
    }

    /// Parses percentage text into basis points.
    ///
    /// The text is parsed as an exact decimal, multiplied by 100 and
    /// truncated. Malformed text and values outside [0, 100] are rejected;
    /// there is no fallback to a zero rate.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::rate::DiscountRate;
    ///
    /// assert_eq!(DiscountRate::parse_percent("5.80").unwrap().bps(), 580);
    /// assert_eq!(DiscountRate::parse_percent("12.345").unwrap().bps(), 1234);
    /// assert!(DiscountRate::parse_percent("five").is_err());
    /// assert!(DiscountRate::parse_percent("100.01").is_err());
    /// ```
    pub fn parse_percent(text: &str) -> CoreResult<Self> {
        let invalid = |reason: String| CoreError::InvalidDiscountRate {
            value: text.to_string(),
            reason,
        };

        let percent = Decimal::from_str(text.trim()).map_err(|e| invalid(e.to_string()))?;

        if percent.is_sign_negative() && !percent.is_zero() {
            return Err(invalid("must not be negative".to_string()));
        }
        if percent > Decimal::ONE_HUNDRED {
            return Err(invalid("must not exceed 100".to_string()));
        }

        let bps = (percent * Decimal::ONE_HUNDRED)
            .trunc()
            .to_u32()
            .ok_or_else(|| invalid("out of range".to_string()))?;

        Ok(DiscountRate(bps))
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Renders the rate as the shortest decimal percentage.
    ///
    /// `1234` → `"12.34"`, `580` → `"5.8"`, `500` → `"5"`.
    pub fn to_percent_text(&self) -> String {
        let whole = self.0 / 100;
        match self.0 % 100 {
            0 => whole.to_string(),
            frac if frac % 10 == 0 => format!("{}.{}", whole, frac / 10),
            frac => format!("{}.{:02}", whole, frac),
        }
    }

    /// Zero discount.
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }
}

impl Default for DiscountRate {
    fn default() -> Self {
        DiscountRate::zero()
    }
}

/// Display form used on rendered invoices: `5.8%`.
impl fmt::Display for DiscountRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.to_percent_text())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
