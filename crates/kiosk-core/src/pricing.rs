//! # Pricing Engine
//!
//! Subtotal, tax, and total for a cart.
//!
//! ```text
//! subtotal = Σ (product.price + drink.price_delta)
//! tax      = subtotal × rate          (exact, micro-units)
//! total    = subtotal + tax
//! ```
//!
//! Nothing here rounds. Values are rounded to cents only when displayed,
//! so recomputing totals any number of times never drifts.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{CartLine, TaxRate};

/// Totals for the order review and the payment button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderTotals {
    pub line_count: usize,
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

/// Computes totals for the given lines.
///
/// Pure and order-independent: the subtotal is a sum, and tax is applied
/// once to that sum rather than per line.
///
/// ## Example
/// ```rust
/// use kiosk_core::pricing::compute_totals;
/// use kiosk_core::DEFAULT_TAX_RATE;
///
/// let totals = compute_totals(&[], DEFAULT_TAX_RATE);
/// assert!(totals.total.is_zero());
/// ```
pub fn compute_totals(lines: &[CartLine], rate: TaxRate) -> OrderTotals {
    let subtotal: Money = lines.iter().map(CartLine::price).sum();
    let tax = subtotal.calculate_tax(rate);

    OrderTotals {
        line_count: lines.len(),
        subtotal,
        tax,
        total: subtotal + tax,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::DEFAULT_TAX_RATE;

    fn line(catalog: &Catalog, product_id: &str, drink_id: &str) -> CartLine {
        CartLine::new(
            catalog.product(product_id).unwrap().clone(),
            catalog.drink(drink_id).unwrap().clone(),
        )
    }

    #[test]
    fn test_empty_cart_is_all_zero() {
        let totals = compute_totals(&[], DEFAULT_TAX_RATE);
        assert_eq!(totals, OrderTotals::default());
        assert_eq!(totals.line_count, 0);
    }

    #[test]
    fn test_big_mac_and_fries() {
        let catalog = Catalog::standard();
        let lines = vec![line(&catalog, "b2", "d1"), line(&catalog, "s1", "d2")];

        let totals = compute_totals(&lines, DEFAULT_TAX_RATE);

        assert_eq!(totals.subtotal, Money::from_cents(979));
        assert_eq!(totals.tax, Money::from_micros(783_200)); // 0.7832
        assert_eq!(totals.total, Money::from_micros(10_573_200)); // 10.5732
        assert_eq!(totals.total.to_string(), "10.57");
    }

    #[test]
    fn test_order_independent() {
        let catalog = Catalog::standard();
        let forward = vec![
            line(&catalog, "b1", "d1"),
            line(&catalog, "c3", "d2"),
            line(&catalog, "cf1", "d3"),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();
        let mut rotated = forward.clone();
        rotated.rotate_left(1);

        let expected = compute_totals(&forward, DEFAULT_TAX_RATE);
        assert_eq!(compute_totals(&reversed, DEFAULT_TAX_RATE), expected);
        assert_eq!(compute_totals(&rotated, DEFAULT_TAX_RATE), expected);
    }

    #[test]
    fn test_drink_delta_counts_toward_subtotal() {
        let catalog = Catalog::standard();
        let mut upsized = line(&catalog, "b6", "d2");
        upsized.drink.price_delta_cents = 75;

        let totals = compute_totals(&[upsized], TaxRate::zero());
        assert_eq!(totals.subtotal, Money::from_cents(355));
        assert_eq!(totals.total, totals.subtotal);
    }

    #[test]
    fn test_repeated_computation_is_stable() {
        let catalog = Catalog::standard();
        let lines = vec![line(&catalog, "s1", "d1"); 3];
        let first = compute_totals(&lines, DEFAULT_TAX_RATE);
        for _ in 0..10 {
            assert_eq!(compute_totals(&lines, DEFAULT_TAX_RATE), first);
        }
    }
}
