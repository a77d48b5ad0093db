//! # Line Item Pricing
//!
//! Converts each submitted line item into minor units and accumulates the
//! invoice subtotal.
//!
//! ## Pricing Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  LineItemInput { "Punch cards", 2, "58.99" }                            │
//! │       │                                                                 │
//! │       ├── quantity <= 0?        → CoreError::InvalidQuantity            │
//! │       ├── parse "58.99"         → 5899 cents (ties away from zero)      │
//! │       ├── negative price?       → CoreError::InvalidAmount              │
//! │       ├── 5899 × 2 (checked)    → 11798                                 │
//! │       └── subtotal += 11798 (checked)                                   │
//! │                                                                         │
//! │  Output keeps submission order; it becomes line item id order.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{LineItemInput, NewLineItem};

/// Priced line items and their subtotal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedLineItems {
    pub items: Vec<NewLineItem>,
    pub subtotal: Money,
}

/// Prices a single line item. The description is stored trimmed.
pub fn price_line_item(input: &LineItemInput) -> CoreResult<NewLineItem> {
    if input.quantity <= 0 {
        return Err(CoreError::InvalidQuantity(input.quantity));
    }

    let unit_price = Money::parse_decimal(&input.unit_price)?;
    if unit_price.is_negative() {
        return Err(CoreError::InvalidAmount {
            value: input.unit_price.clone(),
            reason: "unit price must not be negative".to_string(),
        });
    }

    let total_price = unit_price
        .checked_mul_quantity(input.quantity)
        .ok_or_else(|| CoreError::overflow(format!("line total for '{}'", input.description)))?;

    Ok(NewLineItem {
        description: input.description.trim().to_string(),
        quantity: input.quantity,
        unit_price_cents: unit_price.cents(),
        total_price_cents: total_price.cents(),
    })
}

/// Prices every line item and sums the subtotal.
///
/// ## Example
/// ```rust
/// use tally_core::pricing::price_line_items;
/// use tally_core::types::LineItemInput;
///
/// let items = vec![
///     LineItemInput { description: "Engine".into(), quantity: 1, unit_price: "100.00".into() },
///     LineItemInput { description: "Cards".into(), quantity: 2, unit_price: "58.99".into() },
/// ];
/// let priced = price_line_items(&items).unwrap();
/// assert_eq!(priced.items[1].total_price_cents, 11798);
/// assert_eq!(priced.subtotal.cents(), 21798);
/// ```
pub fn price_line_items(inputs: &[LineItemInput]) -> CoreResult<PricedLineItems> {
    if inputs.is_empty() {
        return Err(CoreError::EmptyInvoice);
    }

    let mut items = Vec::with_capacity(inputs.len());
    let mut subtotal = Money::zero();

    for input in inputs {
        let item = price_line_item(input)?;
        subtotal = subtotal
            .checked_add(Money::from_cents(item.total_price_cents))
            .ok_or_else(|| CoreError::overflow("invoice subtotal"))?;
        items.push(item);
    }

    Ok(PricedLineItems { items, subtotal })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn input(description: &str, quantity: i64, unit_price: &str) -> LineItemInput {
        LineItemInput {
            description: description.to_string(),
            quantity,
            unit_price: unit_price.to_string(),
        }
    }

    #[test]
    fn test_single_item() {
        let item = price_line_item(&input("Engine", 1, "100.00")).unwrap();
        assert_eq!(item.unit_price_cents, 10000);
        assert_eq!(item.total_price_cents, 10000);
    }

    #[test]
    fn test_description_is_trimmed() {
        let item = price_line_item(&input("  Widget  ", 1, "1.00")).unwrap();
        assert_eq!(item.description, "Widget");
    }

    #[test]
    fn test_quantity_multiplies() {
        let item = price_line_item(&input("Cards", 2, "58.99")).unwrap();
        assert_eq!(item.unit_price_cents, 5899);
        assert_eq!(item.total_price_cents, 11798);
    }

    #[test]
    fn test_subtotal_and_order() {
        let priced = price_line_items(&[
            input("Engine", 1, "100.00"),
            input("Cards", 2, "58.99"),
        ])
        .unwrap();

        assert_eq!(priced.subtotal.cents(), 21798);
        let names: Vec<_> = priced.items.iter().map(|i| i.description.as_str()).collect();
        assert_eq!(names, vec!["Engine", "Cards"]);
    }

    #[test]
    fn test_no_float_drift() {
        // 0.29 × 100 is 28.999... in binary floating point
        let item = price_line_item(&input("Pin", 3, "0.29")).unwrap();
        assert_eq!(item.unit_price_cents, 29);
        assert_eq!(item.total_price_cents, 87);
    }

    #[test]
    fn test_rejects_bad_quantity() {
        assert!(matches!(
            price_line_item(&input("x", 0, "1.00")),
            Err(CoreError::InvalidQuantity(0))
        ));
        assert!(matches!(
            price_line_item(&input("x", -2, "1.00")),
            Err(CoreError::InvalidQuantity(-2))
        ));
    }

    #[test]
    fn test_rejects_negative_price() {
        assert!(matches!(
            price_line_item(&input("x", 1, "-1.00")),
            Err(CoreError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_empty_list() {
        assert!(matches!(price_line_items(&[]), Err(CoreError::EmptyInvoice)));
    }

    #[test]
    fn test_overflow_is_an_error() {
        let huge = input("x", i64::MAX, "2.00");
        assert!(matches!(
            price_line_item(&huge),
            Err(CoreError::AmountOverflow { .. })
        ));

        let max_cents = format!("{}", i64::MAX / 100);
        let result = price_line_items(&[input("a", 1, &max_cents), input("b", 1, &max_cents)]);
        assert!(matches!(result, Err(CoreError::AmountOverflow { .. })));
    }
}
