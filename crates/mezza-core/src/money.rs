//! # Money Module
//!
//! Provides the `Money` and `Rate` types for monetary values and surcharges.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    20 × 0.14 = 2.8000000000000003  ❌ WRONG!                            │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 decimals (rust_decimal)                          │
//! │    20 × 0.14 = 2.80  (exact, 28 significant digits available)           │
//! │                                                                         │
//! │  Totals keep full precision. Rounding to the currency's two places      │
//! │  happens only when a value is displayed.                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use mezza_core::money::{Money, Rate};
//! use rust_decimal::Decimal;
//!
//! let price = Money::from_minor(4550); // 45.50
//! let vat = Rate::from_percentage(Decimal::from(14)).unwrap();
//!
//! let tax = price.apply_rate(vat).unwrap();
//! assert_eq!(tax.amount(), Decimal::new(637, 2)); // 6.37
//! ```

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;

/// Decimal places of the currency's minor unit (piastres, cents).
pub const CURRENCY_DECIMALS: u32 = 2;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in the store's currency.
///
/// ## Design Decisions
/// - **Decimal (signed)**: negative values are representable so refunds and
///   differences can be expressed; the calculator itself rejects them on input
/// - **Single field tuple struct**: zero-cost wrapper over `Decimal`
/// - **Serde**: serialized as a decimal string ("24.80") so no precision is
///   lost in JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(#[ts(type = "string")] Decimal);

impl Money {
    /// Wraps a decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from minor units (piastres/cents).
    ///
    /// ## Example
    /// ```rust
    /// use mezza_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let price = Money::from_minor(1099);
    /// assert_eq!(price.amount(), Decimal::new(1099, 2)); // 10.99
    /// ```
    #[inline]
    pub fn from_minor(minor: i64) -> Self {
        Money(Decimal::new(minor, CURRENCY_DECIMALS))
    }

    /// Creates a Money value from whole currency units.
    #[inline]
    pub fn from_major(major: i64) -> Self {
        Money(Decimal::from(major))
    }

    /// Returns the underlying decimal amount at full precision.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Adds two amounts, `None` when the result leaves the decimal range.
    #[inline]
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Multiplies a unit price by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use mezza_core::money::Money;
    ///
    /// let unit_price = Money::from_minor(2999); // 29.99
    /// let line_total = unit_price.checked_mul_quantity(3).unwrap();
    /// assert_eq!(line_total, Money::from_minor(8997)); // 89.97
    /// ```
    #[inline]
    pub fn checked_mul_quantity(self, qty: i64) -> Option<Money> {
        self.0.checked_mul(Decimal::from(qty)).map(Money)
    }

    /// Applies a surcharge rate (VAT, service charge) to this amount.
    ///
    /// No rounding is performed: `20 × 0.14` is exactly `2.80`.
    #[inline]
    pub fn apply_rate(self, rate: Rate) -> Option<Money> {
        self.0.checked_mul(rate.0).map(Money)
    }

    /// Rounds to the currency's minor unit using Bankers Rounding.
    ///
    /// Only used at the edges (display, invoices). Totals are kept at full
    /// precision internally.
    ///
    /// ```rust
    /// use mezza_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// assert_eq!(Money::new(Decimal::new(2825, 3)).rounded(), Money::from_minor(282));
    /// assert_eq!(Money::new(Decimal::new(2835, 3)).rounded(), Money::from_minor(284));
    /// ```
    pub fn rounded(self) -> Money {
        Money(
            self.0
                .round_dp_with_strategy(CURRENCY_DECIMALS, RoundingStrategy::MidpointNearestEven),
        )
    }

    /// Divides by a count, used for averages. Zero count yields zero.
    pub fn average_over(self, count: usize) -> Money {
        if count == 0 {
            return Money::zero();
        }
        self.0
            .checked_div(Decimal::from(count))
            .map(Money)
            .unwrap_or_default()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount rounded to two places, without a currency symbol.
///
/// The currency code lives in the store settings.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.rounded().0)
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

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Rate
// =============================================================================

/// A fractional surcharge rate: `0.14` is 14 %.
///
/// ## Invariant
/// `0 ≤ fraction ≤ 1`, enforced by the constructors and on deserialize.
/// The calculator relies on this to guarantee `grand_total ≥ subtotal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(try_from = "Decimal")]
#[ts(export)]
pub struct Rate(#[ts(type = "string")] Decimal);

impl Rate {
    /// Creates a rate from a fraction (`0.14` for 14 %).
    ///
    /// ```rust
    /// use mezza_core::money::Rate;
    /// use rust_decimal::Decimal;
    ///
    /// assert!(Rate::from_fraction(Decimal::new(14, 2)).is_ok());
    /// assert!(Rate::from_fraction(Decimal::new(-1, 2)).is_err());
    /// assert!(Rate::from_fraction(Decimal::new(15, 1)).is_err());
    /// ```
    pub fn from_fraction(fraction: Decimal) -> Result<Self, ValidationError> {
        if fraction < Decimal::ZERO {
            return Err(ValidationError::Negative {
                field: "rate".to_string(),
            });
        }

        if fraction > Decimal::ONE {
            return Err(ValidationError::OutOfRange {
                field: "rate".to_string(),
                min: "0".to_string(),
                max: "1".to_string(),
            });
        }

        Ok(Rate(fraction))
    }

    /// Creates a rate from a percentage as entered in the settings (`14`).
    pub fn from_percentage(percent: Decimal) -> Result<Self, ValidationError> {
        crate::validation::validate_rate_percentage(percent)?;
        Rate::from_fraction(percent / Decimal::ONE_HUNDRED)
    }

    /// Zero rate (no surcharge).
    #[inline]
    pub const fn zero() -> Self {
        Rate(Decimal::ZERO)
    }

    /// Returns the rate as a fraction.
    #[inline]
    pub const fn fraction(&self) -> Decimal {
        self.0
    }

    /// Returns the rate as a percentage (for display).
    #[inline]
    pub fn percentage(&self) -> Decimal {
        self.0 * Decimal::ONE_HUNDRED
    }

    /// Checks if rate is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl TryFrom<Decimal> for Rate {
    type Error = ValidationError;

    fn try_from(fraction: Decimal) -> Result<Self, Self::Error> {
        Rate::from_fraction(fraction)
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::zero()
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percentage().normalize())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
