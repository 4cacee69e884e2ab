//! Price derivation.
//!
//! Every price shown to a buyer flows through [`derive`]: a product (or price
//! variant) carries an MRP plus at most one of an explicit sale price or an
//! explicit discount percentage, and the category/subcategory it belongs to
//! may carry its own configured markdown. The buyer gets whichever single
//! discount is larger - percentages are never summed or stacked.
//!
//! Derivation is a total function: incomplete catalog data (missing MRP,
//! missing discount) degrades to zero instead of failing, so listings stay
//! usable while the catalog is being cleaned up.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Rounding precision for derived prices and percentages.
const PRICE_DECIMALS: u32 = 2;

/// Pricing attributes read off a product or price-variant record.
#[derive(Debug, Clone, Copy, Default)]
pub struct PricingInput {
    /// Maximum retail price. Missing MRP is a data-integrity issue upstream;
    /// here it is treated as 0 so derivation never fails.
    pub mrp: Option<Decimal>,
    /// Explicit sale price, mutually optional with `discount_percent`.
    pub sale_price: Option<Decimal>,
    /// Explicit product-level discount percentage.
    pub discount_percent: Option<Decimal>,
}

/// Discounts configured on the product's category and subcategory.
#[derive(Debug, Clone, Copy, Default)]
pub struct PricingContext {
    pub category_discount: Decimal,
    pub subcategory_discount: Decimal,
}

impl PricingContext {
    /// Context with a single category-level discount.
    #[must_use]
    pub const fn with_category_discount(discount: Decimal) -> Self {
        Self {
            category_discount: discount,
            subcategory_discount: Decimal::ZERO,
        }
    }

    /// The larger of the two context discounts, clamped to [0, 100].
    #[must_use]
    pub fn best_discount(&self) -> Decimal {
        clamp_percent(self.category_discount).max(clamp_percent(self.subcategory_discount))
    }
}

/// The figures shown to the buyer for one product or variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedPricing {
    /// Final sale price after the winning discount.
    pub final_price: Decimal,
    /// The pre-discount reference price.
    pub mrp: Decimal,
    /// Effective discount percentage in [0, 100].
    pub discount_percentage: Decimal,
    /// `max(mrp - final_price, 0)`.
    pub discount_amount: Decimal,
}

/// Derive the displayed pricing for one record.
///
/// Policy:
/// - An explicit sale price wins over an explicit discount percentage; the
///   product discount is back-computed as `(mrp - sale_price) / mrp * 100`.
/// - The category/subcategory discount competes with the product discount by
///   `max`, never by addition.
/// - Guarantees on the output: `0 <= final_price <= mrp`,
///   `discount_percentage` in [0, 100], and
///   `final_price = mrp * (1 - discount_percentage / 100)` at 2 decimal
///   places.
#[must_use]
pub fn derive(input: &PricingInput, context: &PricingContext) -> DerivedPricing {
    let mrp = input.mrp.unwrap_or(Decimal::ZERO).max(Decimal::ZERO);

    let product_discount = match (input.sale_price, input.discount_percent) {
        (Some(sale_price), _) if !mrp.is_zero() => {
            ((mrp - sale_price) / mrp * Decimal::ONE_HUNDRED).round_dp(PRICE_DECIMALS)
        }
        (None, Some(percent)) => percent,
        _ => Decimal::ZERO,
    };

    let discount_percentage = clamp_percent(product_discount)
        .max(context.best_discount())
        .round_dp(PRICE_DECIMALS);

    let final_price = (mrp * (Decimal::ONE_HUNDRED - discount_percentage)
        / Decimal::ONE_HUNDRED)
        .round_dp(PRICE_DECIMALS)
        .clamp(Decimal::ZERO, mrp);

    DerivedPricing {
        final_price,
        mrp,
        discount_percentage,
        discount_amount: (mrp - final_price).max(Decimal::ZERO),
    }
}

/// Clamp a discount percentage into [0, 100].
fn clamp_percent(percent: Decimal) -> Decimal {
    percent.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn input(mrp: &str) -> PricingInput {
        PricingInput {
            mrp: Some(dec(mrp)),
            ..PricingInput::default()
        }
    }

    #[test]
    fn test_no_discount_keeps_mrp() {
        let derived = derive(&input("500"), &PricingContext::default());
        assert_eq!(derived.final_price, dec("500.00"));
        assert_eq!(derived.mrp, dec("500"));
        assert_eq!(derived.discount_percentage, Decimal::ZERO);
        assert_eq!(derived.discount_amount, Decimal::ZERO);
    }

    #[test]
    fn test_explicit_discount_percent() {
        let derived = derive(
            &PricingInput {
                discount_percent: Some(dec("20")),
                ..input("500")
            },
            &PricingContext::default(),
        );
        assert_eq!(derived.final_price, dec("400.00"));
        assert_eq!(derived.discount_percentage, dec("20"));
        assert_eq!(derived.discount_amount, dec("100.00"));
    }

    #[test]
    fn test_explicit_sale_price_back_computes_percentage() {
        let derived = derive(
            &PricingInput {
                sale_price: Some(dec("750")),
                ..input("1000")
            },
            &PricingContext::default(),
        );
        assert_eq!(derived.discount_percentage, dec("25.00"));
        assert_eq!(derived.final_price, dec("750.00"));
    }

    #[test]
    fn test_sale_price_percentage_rounds_to_two_places() {
        // (300 - 200) / 300 * 100 = 33.333...
        let derived = derive(
            &PricingInput {
                sale_price: Some(dec("200")),
                ..input("300")
            },
            &PricingContext::default(),
        );
        assert_eq!(derived.discount_percentage, dec("33.33"));
        // final price re-derived from the rounded percentage
        assert_eq!(derived.final_price, dec("200.01"));
    }

    #[test]
    fn test_category_discount_wins_by_max_not_sum() {
        // 10% product discount vs 25% category discount: buyer gets 25%, not 35%.
        let derived = derive(
            &PricingInput {
                discount_percent: Some(dec("10")),
                ..input("1000")
            },
            &PricingContext::with_category_discount(dec("25")),
        );
        assert_eq!(derived.discount_percentage, dec("25"));
        assert_eq!(derived.final_price, dec("750.00"));
    }

    #[test]
    fn test_product_discount_wins_when_larger() {
        let derived = derive(
            &PricingInput {
                discount_percent: Some(dec("40")),
                ..input("1000")
            },
            &PricingContext::with_category_discount(dec("25")),
        );
        assert_eq!(derived.discount_percentage, dec("40"));
        assert_eq!(derived.final_price, dec("600.00"));
    }

    #[test]
    fn test_subcategory_discount_participates() {
        let context = PricingContext {
            category_discount: dec("5"),
            subcategory_discount: dec("15"),
        };
        let derived = derive(&input("200"), &context);
        assert_eq!(derived.discount_percentage, dec("15"));
        assert_eq!(derived.final_price, dec("170.00"));
    }

    #[test]
    fn test_missing_mrp_degrades_to_zero() {
        let derived = derive(
            &PricingInput {
                discount_percent: Some(dec("20")),
                ..PricingInput::default()
            },
            &PricingContext::default(),
        );
        assert_eq!(derived.mrp, Decimal::ZERO);
        assert_eq!(derived.final_price, Decimal::ZERO);
        assert_eq!(derived.discount_amount, Decimal::ZERO);
    }

    #[test]
    fn test_negative_discount_clamps_to_zero() {
        let derived = derive(
            &PricingInput {
                discount_percent: Some(dec("-15")),
                ..input("500")
            },
            &PricingContext::with_category_discount(dec("-5")),
        );
        assert_eq!(derived.discount_percentage, Decimal::ZERO);
        assert_eq!(derived.final_price, dec("500.00"));
    }

    #[test]
    fn test_discount_above_hundred_clamps() {
        let derived = derive(
            &PricingInput {
                discount_percent: Some(dec("150")),
                ..input("500")
            },
            &PricingContext::default(),
        );
        assert_eq!(derived.discount_percentage, dec("100"));
        assert_eq!(derived.final_price, Decimal::ZERO);
        assert_eq!(derived.discount_amount, dec("500"));
    }

    #[test]
    fn test_sale_price_above_mrp_clamps_to_mrp() {
        // Bad data: sale price higher than MRP. Derived discount is negative,
        // clamps to 0, buyer pays MRP.
        let derived = derive(
            &PricingInput {
                sale_price: Some(dec("600")),
                ..input("500")
            },
            &PricingContext::default(),
        );
        assert_eq!(derived.discount_percentage, Decimal::ZERO);
        assert_eq!(derived.final_price, dec("500.00"));
    }

    #[test]
    fn test_output_invariants_hold_across_inputs() {
        let cases = [
            ("999.99", Some("899.99"), None, "0"),
            ("42", None, Some("7.5"), "12"),
            ("0.01", None, Some("99"), "0"),
            ("12345.67", None, None, "33.33"),
        ];

        for (mrp, sale, percent, category) in cases {
            let derived = derive(
                &PricingInput {
                    mrp: Some(dec(mrp)),
                    sale_price: sale.map(dec),
                    discount_percent: percent.map(dec),
                },
                &PricingContext::with_category_discount(dec(category)),
            );

            assert!(derived.final_price >= Decimal::ZERO);
            assert!(derived.final_price <= derived.mrp);
            assert!(derived.discount_percentage >= Decimal::ZERO);
            assert!(derived.discount_percentage <= Decimal::ONE_HUNDRED);
            assert_eq!(
                derived.discount_amount,
                (derived.mrp - derived.final_price).max(Decimal::ZERO)
            );
            // final_price = mrp * (1 - pct/100) at the rounding precision
            let recomputed = (derived.mrp
                * (Decimal::ONE_HUNDRED - derived.discount_percentage)
                / Decimal::ONE_HUNDRED)
                .round_dp(2);
            assert_eq!(derived.final_price, recomputed);
        }
    }

    #[test]
    fn test_derivation_is_idempotent() {
        let input = PricingInput {
            discount_percent: Some(dec("12.5")),
            ..input("840")
        };
        let context = PricingContext::with_category_discount(dec("10"));
        assert_eq!(derive(&input, &context), derive(&input, &context));
    }
}
