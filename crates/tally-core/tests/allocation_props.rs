use proptest::prelude::*;
use tally_core::discount::allocate_discount;
use tally_core::money::Money;
use tally_core::pricing::price_line_items;
use tally_core::rate::DiscountRate;
use tally_core::types::LineItemInput;

proptest! {
    // No minor unit is ever lost or invented by the split.
    #[test]
    fn discount_plus_total_is_subtotal(subtotal in 0i64..=i64::MAX, bps in 0u32..=10_000) {
        let split = allocate_discount(Money::from_cents(subtotal), DiscountRate::from_bps(bps));
        prop_assert_eq!(
            split.discount.cents() as i128 + split.total.cents() as i128,
            subtotal as i128
        );
        prop_assert!(split.discount.cents() >= 0);
        prop_assert!(split.total.cents() >= 0);
    }

    #[test]
    fn discount_is_floor_of_rate(subtotal in 0i64..1_000_000_000_000, bps in 0u32..=10_000) {
        let split = allocate_discount(Money::from_cents(subtotal), DiscountRate::from_bps(bps));
        let expected = (subtotal as i128 * bps as i128) / 10_000;
        prop_assert_eq!(split.discount.cents() as i128, expected);
    }

    // Any percent with at most two decimals survives percent -> bps -> percent.
    #[test]
    fn percent_text_round_trip(bps in 0u32..=10_000) {
        let text = DiscountRate::from_bps(bps).to_percent_text();
        let parsed = DiscountRate::parse_percent(&text).unwrap();
        prop_assert_eq!(parsed.bps(), bps);
    }

    #[test]
    fn parsed_rate_stays_in_range(whole in 0u32..=99, frac in 0u32..=999) {
        let text = format!("{}.{:03}", whole, frac);
        let bps = DiscountRate::parse_percent(&text).unwrap().bps();
        prop_assert!(bps <= 10_000);
        prop_assert_eq!(bps, whole * 100 + frac / 10);
    }

    // Subtotal equals the sum of exact line totals.
    #[test]
    fn subtotal_is_sum_of_lines(
        lines in prop::collection::vec((1i64..1_000, 0i64..10_000_000), 1..20)
    ) {
        let inputs: Vec<LineItemInput> = lines
            .iter()
            .enumerate()
            .map(|(i, (qty, cents))| LineItemInput {
                description: format!("item {}", i),
                quantity: *qty,
                unit_price: format!("{}.{:02}", cents / 100, cents % 100),
            })
            .collect();

        let priced = price_line_items(&inputs).unwrap();
        let expected: i64 = lines.iter().map(|(qty, cents)| qty * cents).sum();
        prop_assert_eq!(priced.subtotal.cents(), expected);
        prop_assert_eq!(priced.items.len(), lines.len());
    }
}

#[test]
fn reference_invoice_end_to_end() {
    let inputs = vec![
        LineItemInput {
            description: "Engine".to_string(),
            quantity: 1,
            unit_price: "100.00".to_string(),
        },
        LineItemInput {
            description: "Cards".to_string(),
            quantity: 2,
            unit_price: "58.99".to_string(),
        },
    ];

    let priced = price_line_items(&inputs).unwrap();
    assert_eq!(priced.items[0].total_price_cents, 10000);
    assert_eq!(priced.items[1].total_price_cents, 11798);
    assert_eq!(priced.subtotal.cents(), 21798);

    let rate = DiscountRate::parse_percent("5.80").unwrap();
    assert_eq!(rate.bps(), 580);

    let split = allocate_discount(priced.subtotal, rate);
    assert_eq!(split.discount.cents(), 1264);
    assert_eq!(split.total.cents(), 20534);
}
