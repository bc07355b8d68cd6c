//! # Money Module
//!
//! Cent-precision helpers shared by every price computation.
//!
//! ## Two Representations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  WHERE EACH FORM IS USED                                                │
//! │                                                                         │
//! │  f64 amounts (wire + calculator)                                       │
//! │    The storefront sends and receives plain JSON numbers.               │
//! │    Every intermediate amount goes through round2() so the browser      │
//! │    and the server land on the same cent.                               │
//! │                                                                         │
//! │  Money (integer cents)                                                  │
//! │    Display strings for fee notes, exact comparisons, tax math.         │
//! │    1000 cents / 3 = 333 cents, no hidden float drift.                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use printshop_core::money::{round2, Money};
//!
//! assert_eq!(round2(19.99 * 3.0), 59.97);
//!
//! let fee = Money::from_amount(3.0);
//! assert_eq!(fee.cents(), 300);
//! assert_eq!(fee.to_string(), "$3.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Rounding
// =============================================================================

/// Rounds an amount to cent precision, half away from zero.
///
/// This is `round(x * 100) / 100`, the exact formula the storefront uses, so
/// results match bit for bit on both sides. Non-finite input yields `0.0`.
///
/// ## Example
/// ```rust
/// use printshop_core::money::round2;
///
/// assert_eq!(round2(10.125), 10.13);
/// assert_eq!(round2(0.1 + 0.2), 0.3);
/// assert_eq!(round2(f64::NAN), 0.0);
/// ```
#[inline]
pub fn round2(x: f64) -> f64 {
    if !x.is_finite() {
        return 0.0;
    }
    (x * 100.0).round() / 100.0
}

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for discount lines
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use printshop_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a decimal amount (as carried on the wire) to cents.
    ///
    /// Rounds half away from zero; non-finite amounts become zero.
    ///
    /// ## Example
    /// ```rust
    /// use printshop_core::money::Money;
    ///
    /// assert_eq!(Money::from_amount(40.0).cents(), 4000);
    /// assert_eq!(Money::from_amount(-5.5).cents(), -550);
    /// assert_eq!(Money::from_amount(f64::INFINITY).cents(), 0);
    /// ```
    #[inline]
    pub fn from_amount(amount: f64) -> Self {
        if !amount.is_finite() {
            return Money::zero();
        }
        Money((amount * 100.0).round() as i64)
    }

    /// Returns the value as a decimal amount for the wire.
    #[inline]
    pub fn to_amount(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
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

    /// Formats the amount without a currency symbol: `"3.00"`, `"-5.50"`.
    ///
    /// Used for fee notes, where the currency code is appended separately.
    pub fn amount_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }

    /// Calculates tax at the given rate, rounding half up on the cent.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`.
    ///
    /// ## Example
    /// ```rust
    /// use printshop_core::money::Money;
    /// use printshop_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(1000); // $10.00
    /// let tax = subtotal.calculate_tax(TaxRate::from_bps(825)); // 8.25%
    /// assert_eq!(tax.cents(), 83);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // i128 keeps large carts from overflowing
        let tax_cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(tax_cents.clamp(i64::MIN as i128, i64::MAX as i128) as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money as `$10.99` / `-$5.50`.
///
/// ## Note
/// This is for logs and debugging. The storefront formats for display
/// using the breakdown's currency code.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
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
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

/// Multiplication by a quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
