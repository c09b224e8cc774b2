//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Micro-Units?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE ROUNDING PROBLEM                                                   │
//! │                                                                         │
//! │  Floating point:                                                        │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Integer cents:                                                         │
//! │    $9.79 × 8% = $0.7832 → must round to $0.78 immediately               │
//! │    Repeated recomputation compounds the rounding                        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer micro-units (1/1,000,000 of a currency unit)     │
//! │    979 cents = 9_790_000 µ                                              │
//! │    × 800 bps = 783_200 µ  (exactly 0.7832)                              │
//! │    Rounded to cents ONLY when displayed                                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Any basis-point tax rate applied to a whole-cent amount is exact at this
//! resolution, so the pricing engine never rounds.
//!
//! ## Usage
//! ```rust
//! use kiosk_core::money::Money;
//!
//! let price = Money::from_cents(650); // 6.50
//! let total = price + Money::from_cents(329); // 9.79
//! assert_eq!(total.to_string(), "9.79");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};
use ts_rs::TS;

use crate::types::TaxRate;

/// Micro-units in one cent.
pub const MICROS_PER_CENT: i64 = 10_000;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in micro-units of the kiosk currency.
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative drink deltas (e.g., a cheaper drink),
///   bounded by the catalog so no line goes below zero
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **No float constructor**: Catalog prices are authored in cents
///
/// ## Where Money is Used
/// ```text
/// Product.price ──┬──► CartLine::price ──► OrderTotals.subtotal
/// DrinkOption ────┘                           │
///   .price_delta                              ▼
///                          Tax (exact) ──► OrderTotals.total ──► Payment
///                                                                  │
///                                   Displayed as "10.57" ◄─────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use kiosk_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.micros(), 10_990_000);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents * MICROS_PER_CENT)
    }

    /// Creates a Money value from micro-units.
    #[inline]
    pub const fn from_micros(micros: i64) -> Self {
        Money(micros)
    }

    /// Returns the exact value in micro-units.
    #[inline]
    pub const fn micros(&self) -> i64 {
        self.0
    }

    /// Returns the value rounded to whole cents, half away from zero.
    ///
    /// This is the presentation rounding; nothing inside the pricing
    /// engine calls it.
    ///
    /// ## Example
    /// ```rust
    /// use kiosk_core::money::Money;
    ///
    /// assert_eq!(Money::from_micros(10_573_200).rounded_cents(), 1057);
    /// assert_eq!(Money::from_micros(5_000).rounded_cents(), 1);
    /// assert_eq!(Money::from_micros(-5_000).rounded_cents(), -1);
    /// ```
    pub const fn rounded_cents(&self) -> i64 {
        let half = MICROS_PER_CENT / 2;
        if self.0 >= 0 {
            (self.0 + half) / MICROS_PER_CENT
        } else {
            (self.0 - half) / MICROS_PER_CENT
        }
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Calculates tax at the given rate without rounding.
    ///
    /// ## Implementation
    /// `micros * bps / 10_000` in i128. For amounts that are whole cents the
    /// division is exact, because a cent is 10_000 micro-units.
    ///
    /// ## Example
    /// ```rust
    /// use kiosk_core::money::Money;
    /// use kiosk_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(979);
    /// let tax = subtotal.calculate_tax(TaxRate::from_bps(800));
    /// assert_eq!(tax.micros(), 783_200); // 0.7832
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        let tax = self.0 as i128 * rate.bps() as i128 / 10_000;
        Money(tax as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount rounded to two fractional digits, without a currency
/// symbol. The console adds the configured symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cents = self.rounded_cents();
        let sign = if cents < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, (cents / 100).abs(), (cents % 100).abs())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(650);
        assert_eq!(money.micros(), 6_500_000);
        assert_eq!(money.rounded_cents(), 650);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
        assert_eq!(Money::from_micros(10_573_200).to_string(), "10.57");
        assert_eq!(Money::from_micros(-4_000).to_string(), "0.00");
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        assert_eq!(Money::from_micros(14_999).rounded_cents(), 1);
        assert_eq!(Money::from_micros(15_000).rounded_cents(), 2);
        assert_eq!(Money::from_micros(-15_000).rounded_cents(), -2);
    }

    #[test]
    fn test_tax_is_exact() {
        let tax = Money::from_cents(979).calculate_tax(TaxRate::from_bps(800));
        assert_eq!(tax, Money::from_micros(783_200));

        // 8.25% on 10.00 keeps the half cent
        let tax = Money::from_cents(1000).calculate_tax(TaxRate::from_bps(825));
        assert_eq!(tax.micros(), 825_000);
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(250);
        assert_eq!(a + b, Money::from_cents(1250));
        assert_eq!(a - b, Money::from_cents(750));

        let total: Money = [a, b, b].into_iter().sum();
        assert_eq!(total, Money::from_cents(1500));
    }

    #[test]
    fn test_zero_checks() {
        assert!(Money::zero().is_zero());
        assert!(!Money::zero().is_negative());
        assert!(Money::from_cents(-1).is_negative());
    }
}
