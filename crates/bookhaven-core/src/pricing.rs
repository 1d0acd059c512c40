//! # Pricing Engine
//!
//! Pure, stateless order pricing. Given cart line items and the shopper's
//! checkout selections, computes every derived amount the UI displays.
//!
//! ## Pipeline Order
//! The later terms depend on the earlier ones, so the order is fixed:
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. subtotal  = Σ(unit price × quantity)                                │
//! │  2. discount  = subtotal × promo rate                                   │
//! │  3. shipping  = method fee (standard free at subtotal ≥ $35)            │
//! │  4. gift wrap = flat fee if selected                                    │
//! │  5. tax       = (subtotal − discount) × 8%                              │
//! │                 (tax excludes shipping and gift wrap)                   │
//! │  6. total     = subtotal − discount + shipping + gift wrap + tax        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Totals are recomputed from raw state on every call - never cached - so a
//! displayed number can never drift from the cart it was derived from.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{Money, Rate};
use crate::types::{BookFormat, CartItem, ShippingMethod};

// =============================================================================
// Engine Constants
// =============================================================================
// Engine defaults, not user input. Configurable through PricingConfig.

/// Subtotal at or above which standard shipping is free: $35.00.
pub const FREE_SHIPPING_THRESHOLD: Money = Money::from_cents(3500);

/// Standard shipping flat fee below the threshold: $4.99.
pub const STANDARD_SHIPPING_FEE: Money = Money::from_cents(499);

/// Express shipping flat fee: $12.99.
pub const EXPRESS_SHIPPING_FEE: Money = Money::from_cents(1299);

/// Overnight shipping flat fee: $24.99.
pub const OVERNIGHT_SHIPPING_FEE: Money = Money::from_cents(2499);

/// Gift wrap flat fee: $4.99.
pub const GIFT_WRAP_FEE: Money = Money::from_cents(499);

/// Sales tax applied to the discounted subtotal: 8%.
pub const TAX_RATE: Rate = Rate::from_bps(800);

// =============================================================================
// Promo Codes
// =============================================================================

/// A named promo code mapping to a percentage discount.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PromoCode {
    /// Canonical uppercase code ("READER20").
    pub code: String,

    /// Discount applied to the subtotal.
    pub rate: Rate,
}

impl PromoCode {
    fn new(code: &str, bps: u32) -> Self {
        PromoCode {
            code: code.to_string(),
            rate: Rate::from_bps(bps),
        }
    }
}

// =============================================================================
// Pricing Configuration
// =============================================================================

/// The engine's configurable constants.
///
/// One canonical promo table serves both the cart panel and the checkout
/// flow; the codes are matched case-insensitively against trimmed input.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PricingConfig {
    pub free_shipping_threshold: Money,
    pub standard_shipping_fee: Money,
    pub express_shipping_fee: Money,
    pub overnight_shipping_fee: Money,
    pub gift_wrap_fee: Money,
    pub tax_rate: Rate,
    pub promo_codes: Vec<PromoCode>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            free_shipping_threshold: FREE_SHIPPING_THRESHOLD,
            standard_shipping_fee: STANDARD_SHIPPING_FEE,
            express_shipping_fee: EXPRESS_SHIPPING_FEE,
            overnight_shipping_fee: OVERNIGHT_SHIPPING_FEE,
            gift_wrap_fee: GIFT_WRAP_FEE,
            tax_rate: TAX_RATE,
            promo_codes: vec![
                PromoCode::new("SAVE10", 1000),
                PromoCode::new("BOOKWORM15", 1500),
                PromoCode::new("READER20", 2000),
                PromoCode::new("NEWUSER25", 2500),
            ],
        }
    }
}

impl PricingConfig {
    /// Looks up a user-entered promo code, case-insensitively on trimmed
    /// input. Returns the canonical code and its rate on a match.
    ///
    /// An unmatched code is not an error here - the caller surfaces an
    /// inline message and keeps the rate at zero.
    pub fn lookup_promo(&self, input: &str) -> Option<(&str, Rate)> {
        let wanted = input.trim();
        self.promo_codes
            .iter()
            .find(|p| p.code.eq_ignore_ascii_case(wanted))
            .map(|p| (p.code.as_str(), p.rate))
    }

    /// Shipping cost for a method, given the (undiscounted) subtotal.
    ///
    /// Standard is free at or above the threshold; express and overnight
    /// are flat fees regardless of subtotal; pickup is always free.
    pub fn shipping_cost(&self, method: ShippingMethod, subtotal: Money) -> Money {
        match method {
            ShippingMethod::Standard => {
                if subtotal >= self.free_shipping_threshold {
                    Money::zero()
                } else {
                    self.standard_shipping_fee
                }
            }
            ShippingMethod::Express => self.express_shipping_fee,
            ShippingMethod::Overnight => self.overnight_shipping_fee,
            ShippingMethod::Pickup => Money::zero(),
        }
    }
}

// =============================================================================
// Format Price Adjustment
// =============================================================================

/// Adjusts a book's base (Paperback) price for the chosen format.
///
/// Applied in the detail view *before* the item enters the cart - the cart
/// freezes the adjusted price, and the pipeline never sees the base price.
///
/// ## Deltas
/// ```text
/// Paperback  ±$0.00   (base)
/// Hardcover  +$8.00
/// E-Book     −$5.00
/// Audiobook  +$5.00
/// ```
pub const fn price_for_format(base: Money, format: BookFormat) -> Money {
    match format {
        BookFormat::Paperback => base,
        BookFormat::Hardcover => Money::from_cents(base.cents() + 800),
        BookFormat::EBook => Money::from_cents(base.cents() - 500),
        BookFormat::Audiobook => Money::from_cents(base.cents() + 500),
    }
}

// =============================================================================
// Quote
// =============================================================================

/// The shopper's selections that feed the pipeline alongside the cart.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckoutSelections {
    pub shipping: ShippingMethod,
    pub promo_rate: Rate,
    pub gift_wrap: bool,
}

/// Every derived amount for an order, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderTotals {
    pub subtotal: Money,
    pub discount: Money,
    pub shipping: Money,
    pub gift_wrap: Money,
    pub tax: Money,
    pub total: Money,
}

/// Runs the pricing pipeline over the cart.
pub fn quote(
    items: &[CartItem],
    selections: &CheckoutSelections,
    config: &PricingConfig,
) -> OrderTotals {
    let subtotal: Money = items.iter().map(CartItem::line_total).sum();
    let discount = subtotal.apply_rate(selections.promo_rate);
    let shipping = config.shipping_cost(selections.shipping, subtotal);
    let gift_wrap = if selections.gift_wrap {
        config.gift_wrap_fee
    } else {
        Money::zero()
    };
    let tax = (subtotal - discount).apply_rate(config.tax_rate);
    let total = subtotal - discount + shipping + gift_wrap + tax;

    OrderTotals {
        subtotal,
        discount,
        shipping,
        gift_wrap,
        tax,
        total,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn line_item(unit_price_cents: i64, quantity: i64) -> CartItem {
        CartItem {
            book_id: 1,
            title: "Test Book".to_string(),
            author: "Author".to_string(),
            unit_price_cents,
            selected_format: BookFormat::Paperback,
            quantity,
            added_at: Utc::now(),
        }
    }

    #[test]
    fn test_quote_with_promo_below_free_shipping() {
        // subtotal $20, READER20, standard shipping:
        // discount $4.00, shipping $4.99, tax (20-4)*8% = $1.28, total $22.27
        let items = vec![line_item(2000, 1)];
        let config = PricingConfig::default();
        let (_, rate) = config.lookup_promo("READER20").unwrap();
        let totals = quote(
            &items,
            &CheckoutSelections {
                shipping: ShippingMethod::Standard,
                promo_rate: rate,
                gift_wrap: false,
            },
            &config,
        );

        assert_eq!(totals.subtotal.cents(), 2000);
        assert_eq!(totals.discount.cents(), 400);
        assert_eq!(totals.shipping.cents(), 499);
        assert_eq!(totals.gift_wrap.cents(), 0);
        assert_eq!(totals.tax.cents(), 128);
        assert_eq!(totals.total.cents(), 2227);
    }

    #[test]
    fn test_quote_free_standard_shipping_at_threshold() {
        // subtotal $40, no promo, standard shipping:
        // shipping free, tax 40*8% = $3.20, total $43.20
        let items = vec![line_item(2000, 2)];
        let totals = quote(
            &items,
            &CheckoutSelections::default(),
            &PricingConfig::default(),
        );

        assert_eq!(totals.subtotal.cents(), 4000);
        assert_eq!(totals.discount.cents(), 0);
        assert_eq!(totals.shipping.cents(), 0);
        assert_eq!(totals.tax.cents(), 320);
        assert_eq!(totals.total.cents(), 4320);
    }

    #[test]
    fn test_standard_shipping_threshold_is_inclusive() {
        let config = PricingConfig::default();
        assert_eq!(
            config
                .shipping_cost(ShippingMethod::Standard, Money::from_cents(3500))
                .cents(),
            0
        );
        assert_eq!(
            config
                .shipping_cost(ShippingMethod::Standard, Money::from_cents(3499))
                .cents(),
            499
        );
    }

    #[test]
    fn test_flat_fee_methods_ignore_subtotal() {
        let config = PricingConfig::default();
        for subtotal in [0, 3400, 100_000] {
            let subtotal = Money::from_cents(subtotal);
            assert_eq!(
                config.shipping_cost(ShippingMethod::Express, subtotal).cents(),
                1299
            );
            assert_eq!(
                config
                    .shipping_cost(ShippingMethod::Overnight, subtotal)
                    .cents(),
                2499
            );
            assert_eq!(
                config.shipping_cost(ShippingMethod::Pickup, subtotal).cents(),
                0
            );
        }
    }

    #[test]
    fn test_gift_wrap_fee_excluded_from_tax() {
        // subtotal $10, gift wrap, pickup: tax is on the subtotal only.
        let items = vec![line_item(1000, 1)];
        let totals = quote(
            &items,
            &CheckoutSelections {
                shipping: ShippingMethod::Pickup,
                promo_rate: Rate::zero(),
                gift_wrap: true,
            },
            &PricingConfig::default(),
        );

        assert_eq!(totals.gift_wrap.cents(), 499);
        assert_eq!(totals.tax.cents(), 80);
        assert_eq!(totals.total.cents(), 1579);
    }

    #[test]
    fn test_promo_lookup_case_insensitive() {
        let config = PricingConfig::default();
        let (code, rate) = config.lookup_promo("  reader20 ").unwrap();
        assert_eq!(code, "READER20");
        assert_eq!(rate.bps(), 2000);

        assert!(config.lookup_promo("XYZ").is_none());
    }

    #[test]
    fn test_unified_promo_table_has_all_codes() {
        let config = PricingConfig::default();
        for (code, bps) in [
            ("SAVE10", 1000),
            ("BOOKWORM15", 1500),
            ("READER20", 2000),
            ("NEWUSER25", 2500),
        ] {
            let (_, rate) = config.lookup_promo(code).unwrap();
            assert_eq!(rate.bps(), bps, "rate mismatch for {code}");
        }
    }

    #[test]
    fn test_price_for_format_deltas() {
        let base = Money::from_cents(2000);
        assert_eq!(price_for_format(base, BookFormat::Paperback).cents(), 2000);
        assert_eq!(price_for_format(base, BookFormat::Hardcover).cents(), 2800);
        assert_eq!(price_for_format(base, BookFormat::EBook).cents(), 1500);
        assert_eq!(price_for_format(base, BookFormat::Audiobook).cents(), 2500);
    }

    #[test]
    fn test_empty_cart_quotes_to_shipping_only() {
        let totals = quote(
            &[],
            &CheckoutSelections {
                shipping: ShippingMethod::Standard,
                promo_rate: Rate::zero(),
                gift_wrap: false,
            },
            &PricingConfig::default(),
        );
        // Empty subtotal is below the threshold, so the flat fee applies.
        assert_eq!(totals.subtotal.cents(), 0);
        assert_eq!(totals.shipping.cents(), 499);
        assert_eq!(totals.total.cents(), 499);
    }
}
