//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A receipt is a legal document. Its totals must be exact.               │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    €2.41 = 241 cents. Taxing and nickel-rounding become exact           │
//! │    integer arithmetic; "round to 2 decimals" is a no-op.                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bottega_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(241); // €2.41
//!
//! // Arithmetic operations
//! let line = price * 3;                         // €7.23
//! let total = line + Money::from_cents(50);     // €7.73
//!
//! // Floats only cross the boundary through the checked constructor
//! let wire = Money::from_euros(2.41).unwrap();
//! assert_eq!(wire, price);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::tax::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in euro cents (the smallest currency unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: subtraction (tax-by-difference) must not underflow a type
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: full serde support so documents persist cents, never floats
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use bottega_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // €10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from a euro amount as received on the wire.
    ///
    /// The JSON contract carries prices as decimal euros (`"prezzo_lordo": 2.41`),
    /// so this is the single place where a float is allowed in. The amount must
    /// be finite and non-negative; it is converted to cents with half-up
    /// rounding (`2.41 * 100` is `240.999…` in binary).
    pub fn from_euros(euros: f64) -> Result<Self, MoneyError> {
        if !euros.is_finite() {
            return Err(MoneyError::NotFinite);
        }
        if euros < 0.0 {
            return Err(MoneyError::Negative);
        }
        let cents = (euros * 100.0).round();
        if cents > i64::MAX as f64 {
            return Err(MoneyError::NotFinite);
        }
        Ok(Money(cents as i64))
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the value as decimal euros for the wire format.
    ///
    /// Only the HTTP boundary calls this; everything else stays in cents.
    #[inline]
    pub fn to_euros(&self) -> f64 {
        self.0 as f64 / 100.0
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

    /// Applies a tax rate and rounds DOWN to the nearest 5-cent step.
    ///
    /// ## The Nickel Rule
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  ROUND-DOWN-TO-NICKEL                                               │
    /// │                                                                     │
    /// │  taxed = gross × (1 + rate/100)                                     │
    /// │  final = floor(taxed × 20) / 20                                     │
    /// │                                                                     │
    /// │  Example: €2.41 at 4%                                               │
    /// │    taxed = 2.41 × 1.04 = 2.5064                                     │
    /// │    final = floor(50.128) / 20 = 50 / 20 = €2.50                     │
    /// │                                                                     │
    /// │  This NEVER rounds up: the shelf price can equal but never          │
    /// │  exceed the mathematically exact taxed amount.                      │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ## Implementation
    /// In cents the same formula is exact integer math:
    /// `5 * ((cents * (10000 + bps)) / 50000)`: the division floors, and
    /// multiplying back by 5 lands on a multiple of 5 cents.
    ///
    /// ## Example
    /// ```rust
    /// use bottega_core::money::Money;
    /// use bottega_core::tax::TaxRate;
    ///
    /// let gross = Money::from_cents(241);          // €2.41
    /// let rate = TaxRate::from_percentage(4.0);    // Alimentari
    /// assert_eq!(gross.with_tax_floor_nickel(rate).cents(), 250);
    /// ```
    pub fn with_tax_floor_nickel(&self, rate: TaxRate) -> Money {
        // i128 to prevent overflow on large amounts: cents * (10000 + bps)
        let scaled = self.0 as i128 * (10_000 + rate.bps() as i128);
        let nickels = scaled / 50_000;
        Money((nickels * 5) as i64)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use bottega_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(250); // €2.50
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 750); // €7.50
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Errors for the euro/cents wire conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoneyError {
    /// Amount is NaN or infinite.
    #[error("amount is not a finite number")]
    NotFinite,

    /// Amount is below zero.
    #[error("amount must not be negative")]
    Negative,
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for logs and debugging. The wire format uses [`Money::to_euros`].
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}€{}.{:02}", sign, (self.0 / 100).abs(), (self.0 % 100).abs())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
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
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
    }

    #[test]
    fn test_from_euros_rounds_binary_noise() {
        // 2.41 is not representable in binary; the conversion must still
        // land on exactly 241 cents.
        assert_eq!(Money::from_euros(2.41).unwrap().cents(), 241);
        assert_eq!(Money::from_euros(15.50).unwrap().cents(), 1550);
        assert_eq!(Money::from_euros(0.0).unwrap().cents(), 0);
    }

    #[test]
    fn test_from_euros_rejects_bad_input() {
        assert_eq!(Money::from_euros(-0.01), Err(MoneyError::Negative));
        assert_eq!(Money::from_euros(f64::NAN), Err(MoneyError::NotFinite));
        assert_eq!(Money::from_euros(f64::INFINITY), Err(MoneyError::NotFinite));
    }

    #[test]
    fn test_to_euros() {
        assert!((Money::from_cents(750).to_euros() - 7.5).abs() < 1e-9);
        assert!((Money::from_cents(27).to_euros() - 0.27).abs() < 1e-9);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "€10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "€5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-€5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "€0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        let result: Money = a * 3;
        assert_eq!(result.cents(), 3000);
    }

    #[test]
    fn test_nickel_floor_spec_scenario() {
        // €2.41 at 4%: taxed 2.5064 → floor(50.128)/20 = €2.50
        let gross = Money::from_cents(241);
        let rate = TaxRate::from_percentage(4.0);
        assert_eq!(gross.with_tax_floor_nickel(rate).cents(), 250);
    }

    #[test]
    fn test_nickel_floor_exact_multiple() {
        // €10.00 at 22%: taxed 12.20 is already a multiple of 0.05
        let gross = Money::from_cents(1000);
        let rate = TaxRate::from_percentage(22.0);
        assert_eq!(gross.with_tax_floor_nickel(rate).cents(), 1220);
    }

    #[test]
    fn test_nickel_floor_is_multiple_of_five() {
        let rates = [
            TaxRate::from_percentage(4.0),
            TaxRate::from_percentage(10.0),
            TaxRate::from_percentage(22.0),
        ];
        for cents in 1..=5000 {
            let gross = Money::from_cents(cents);
            for rate in rates {
                let taxed = gross.with_tax_floor_nickel(rate);
                assert_eq!(taxed.cents() % 5, 0, "gross {cents} rate {rate:?}");
            }
        }
    }

    #[test]
    fn test_nickel_floor_never_exceeds_exact_taxed_value() {
        let rates = [
            TaxRate::from_percentage(4.0),
            TaxRate::from_percentage(10.0),
            TaxRate::from_percentage(22.0),
        ];
        for cents in 1..=5000 {
            let gross = Money::from_cents(cents);
            for rate in rates {
                let taxed = gross.with_tax_floor_nickel(rate);
                // exact taxed value scaled by 10000 to stay in integers
                let exact_scaled = cents as i128 * (10_000 + rate.bps() as i128);
                assert!(taxed.cents() as i128 * 10_000 <= exact_scaled);
            }
        }
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_cents(299);
        let line_total = unit_price.multiply_quantity(3);
        assert_eq!(line_total.cents(), 897);
    }
}
