//! Quantity-based discount policy for sale items.
//!
//! | Identical items | Discount |
//! |-----------------|----------|
//! | 1 - 3           | none     |
//! | 4 - 9           | 10 %     |
//! | 10 - 20         | 20 %     |
//! | more than 20    | rejected |

use crate::domain::foundation::{Money, ValidationError};

/// Largest quantity of one product a single sale may carry.
pub const MAX_IDENTICAL_ITEMS: u32 = 20;

/// Discount percentage for a quantity of identical items.
///
/// # Errors
///
/// - `OutOfRange` if quantity is 0 or above `MAX_IDENTICAL_ITEMS`
pub fn discount_percent(quantity: u32) -> Result<u32, ValidationError> {
    match quantity {
        0 => Err(quantity_error(quantity)),
        1..=3 => Ok(0),
        4..=9 => Ok(10),
        10..=MAX_IDENTICAL_ITEMS => Ok(20),
        _ => Err(ValidationError::invalid_format(
            "items.quantity",
            format!(
                "cannot sell more than {} identical items, got {}",
                MAX_IDENTICAL_ITEMS, quantity
            ),
        )),
    }
}

fn quantity_error(quantity: u32) -> ValidationError {
    ValidationError::out_of_range(
        "items.quantity",
        1,
        i64::from(MAX_IDENTICAL_ITEMS),
        i64::from(quantity),
    )
}

/// Priced line: gross amount, discount and what the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemPricing {
    pub gross: Money,
    pub discount: Money,
    pub total: Money,
}

/// Applies the discount policy to one line.
pub fn price_item(unit_price: Money, quantity: u32) -> Result<ItemPricing, ValidationError> {
    let percent = discount_percent(quantity)?;
    let gross = unit_price.times(quantity);
    let discount = gross.percentage(percent);
    Ok(ItemPricing {
        gross,
        discount,
        total: gross - discount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn tiers_match_table() {
        assert_eq!(discount_percent(1).unwrap(), 0);
        assert_eq!(discount_percent(3).unwrap(), 0);
        assert_eq!(discount_percent(4).unwrap(), 10);
        assert_eq!(discount_percent(9).unwrap(), 10);
        assert_eq!(discount_percent(10).unwrap(), 20);
        assert_eq!(discount_percent(20).unwrap(), 20);
    }

    #[test]
    fn rejects_zero_and_above_twenty() {
        assert!(discount_percent(0).is_err());
        assert!(discount_percent(21).is_err());
    }

    #[test]
    fn prices_ten_items_with_twenty_percent_off() {
        let pricing = price_item(Money::from_cents(1050).unwrap(), 10).unwrap();
        assert_eq!(pricing.gross.cents(), 10500);
        assert_eq!(pricing.discount.cents(), 2100);
        assert_eq!(pricing.total.cents(), 8400);
    }

    #[test]
    fn discount_rounds_half_up_to_the_cent() {
        // 4 x 0.99 = 3.96, 10% = 0.396 -> 0.40
        let pricing = price_item(Money::from_cents(99).unwrap(), 4).unwrap();
        assert_eq!(pricing.discount.cents(), 40);
        assert_eq!(pricing.total.cents(), 356);
    }

    proptest! {
        #[test]
        fn total_plus_discount_is_gross(cents in 1i64..1_000_000, qty in 1u32..=20) {
            let pricing = price_item(Money::from_cents(cents).unwrap(), qty).unwrap();
            prop_assert_eq!(pricing.total + pricing.discount, pricing.gross);
        }

        #[test]
        fn discount_never_exceeds_a_fifth(cents in 1i64..1_000_000, qty in 1u32..=20) {
            let pricing = price_item(Money::from_cents(cents).unwrap(), qty).unwrap();
            prop_assert!(pricing.discount.cents() * 5 <= pricing.gross.cents() + 2);
        }

        #[test]
        fn no_discount_below_four(cents in 1i64..1_000_000, qty in 1u32..4) {
            let pricing = price_item(Money::from_cents(cents).unwrap(), qty).unwrap();
            prop_assert!(pricing.discount.is_zero());
        }

        #[test]
        fn quantities_above_limit_are_rejected(qty in 21u32..10_000) {
            prop_assert!(discount_percent(qty).is_err());
        }
    }
}
