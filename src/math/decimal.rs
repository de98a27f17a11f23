//! Unsigned fixed-point decimal with 18 fractional digits.
//!
//! [`Decimal`] stores a non-negative rational as a `u128` numerator over
//! the implicit denominator [`Decimal::SCALE`] (`10^18`).  Every operation
//! is checked: additions and multiplications that would exceed `u128`
//! fail with [`AmmError::Overflow`], subtractions below zero fail with
//! [`AmmError::Underflow`], and a zero divisor fails with
//! [`AmmError::DivisionByZero`].
//!
//! Products and quotients are formed in a 256-bit intermediate and then
//! truncated, so results always round **toward zero**.
//!
//! # Examples
//!
//! ```
//! use hydra_weighted::math::Decimal;
//!
//! let fee = Decimal::from_ratio(3, 1_000).expect("non-zero denominator");
//! assert_eq!(fee.mul_int(1_000), Ok(3));
//!
//! let half = Decimal::from_ratio(1, 2).expect("ok");
//! let quarter = half.checked_mul(half).expect("no overflow");
//! assert_eq!(quarter, Decimal::from_ratio(1, 4).expect("ok"));
//! ```

use core::fmt;

use super::wide::U256;
use crate::domain::Amount;
use crate::error::{AmmError, Result};

/// `10^18`, the implicit denominator of every [`Decimal`].
const SCALE: u128 = 1_000_000_000_000_000_000;

/// Non-negative fixed-point number with 18 decimal places.
///
/// Equality and ordering compare the represented values; all decimals
/// share one scale, so this is a comparison of the raw numerators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use]
pub struct Decimal(u128);

impl Decimal {
    /// The implicit denominator (`10^18`).
    pub const SCALE: u128 = SCALE;

    /// Zero.
    pub const ZERO: Self = Self(0);

    /// One.
    pub const ONE: Self = Self(SCALE);

    /// Largest representable value.
    pub const MAX: Self = Self(u128::MAX);

    /// Creates a decimal from its raw numerator.
    pub const fn from_raw(raw: u128) -> Self {
        Self(raw)
    }

    /// Returns the raw numerator.
    #[must_use]
    pub const fn raw(&self) -> u128 {
        self.0
    }

    /// Returns `true` if the value is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Creates a decimal equal to the integer `value`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if `value * 10^18` exceeds `u128`.
    pub const fn from_int(value: u128) -> Result<Self> {
        match value.checked_mul(SCALE) {
            Some(raw) => Ok(Self(raw)),
            None => Err(AmmError::Overflow("decimal from integer")),
        }
    }

    /// Creates a decimal equal to the token amount `amount`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the amount is not representable.
    pub const fn from_amount(amount: Amount) -> Result<Self> {
        Self::from_int(amount.get())
    }

    /// Creates the decimal `numerator / denominator`, rounded toward zero.
    ///
    /// # Errors
    ///
    /// - [`AmmError::DivisionByZero`] if `denominator` is zero.
    /// - [`AmmError::Overflow`] if the quotient is not representable.
    pub fn from_ratio(numerator: u128, denominator: u128) -> Result<Self> {
        if denominator == 0 {
            return Err(AmmError::DivisionByZero);
        }
        let raw = U256::from(numerator) * U256::from(SCALE) / U256::from(denominator);
        narrow(raw, "decimal from ratio").map(Self)
    }

    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the sum exceeds [`Decimal::MAX`].
    pub const fn checked_add(self, other: Self) -> Result<Self> {
        match self.0.checked_add(other.0) {
            Some(raw) => Ok(Self(raw)),
            None => Err(AmmError::Overflow("decimal addition")),
        }
    }

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Underflow`] if `other > self`.
    pub const fn checked_sub(self, other: Self) -> Result<Self> {
        match self.0.checked_sub(other.0) {
            Some(raw) => Ok(Self(raw)),
            None => Err(AmmError::Underflow("decimal subtraction")),
        }
    }

    /// Subtraction clamped at zero.
    pub const fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Scaled multiplication, rounded toward zero.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the product exceeds [`Decimal::MAX`].
    pub fn checked_mul(self, other: Self) -> Result<Self> {
        let raw = U256::from(self.0) * U256::from(other.0) / U256::from(SCALE);
        narrow(raw, "decimal multiplication").map(Self)
    }

    /// Scaled division, rounded toward zero.
    ///
    /// # Errors
    ///
    /// - [`AmmError::DivisionByZero`] if `other` is zero.
    /// - [`AmmError::Overflow`] if the quotient exceeds [`Decimal::MAX`].
    pub fn checked_div(self, other: Self) -> Result<Self> {
        if other.is_zero() {
            return Err(AmmError::DivisionByZero);
        }
        let raw = U256::from(self.0) * U256::from(SCALE) / U256::from(other.0);
        narrow(raw, "decimal division").map(Self)
    }

    /// Multiplies by an integer, keeping the result as a decimal.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the product exceeds [`Decimal::MAX`].
    pub const fn checked_mul_int(self, n: u128) -> Result<Self> {
        match self.0.checked_mul(n) {
            Some(raw) => Ok(Self(raw)),
            None => Err(AmmError::Overflow("decimal times integer")),
        }
    }

    /// Divides by an integer, rounded toward zero.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DivisionByZero`] if `n` is zero.
    pub const fn checked_div_int(self, n: u128) -> Result<Self> {
        match self.0.checked_div(n) {
            Some(raw) => Ok(Self(raw)),
            None => Err(AmmError::DivisionByZero),
        }
    }

    /// Multiplies an integer by this decimal and truncates to an integer.
    ///
    /// This is the bridge from ratios back to token amounts: the result
    /// is `floor(self * n)`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the integer result exceeds `u128`.
    pub fn mul_int(self, n: u128) -> Result<u128> {
        let raw = U256::from(self.0) * U256::from(n) / U256::from(SCALE);
        narrow(raw, "decimal times integer")
    }

    /// Like [`mul_int`](Self::mul_int) but returns an [`Amount`].
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the result exceeds `u128`.
    pub fn mul_amount(self, amount: Amount) -> Result<Amount> {
        self.mul_int(amount.get()).map(Amount::new)
    }

    /// Returns the integer part, discarding the fraction.
    #[must_use]
    pub const fn floor(&self) -> u128 {
        self.0 / SCALE
    }

    /// Returns `1 - self`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Underflow`] if `self > 1`.
    pub const fn complement(self) -> Result<Self> {
        Self::ONE.checked_sub(self)
    }

    /// Converts to `f64`; intended for reporting and tests only.
    #[must_use]
    pub fn to_f64_lossy(&self) -> f64 {
        let int = (self.0 / SCALE) as f64;
        let frac = (self.0 % SCALE) as f64 / SCALE as f64;
        int + frac
    }
}

/// Narrows a 256-bit intermediate back to `u128`.
fn narrow(value: U256, context: &'static str) -> Result<u128> {
    if value.bits() > 128 {
        return Err(AmmError::Overflow(context));
    }
    Ok(value.low_u128())
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let int = self.0 / SCALE;
        let frac = self.0 % SCALE;
        if frac == 0 {
            return write!(f, "{int}");
        }
        let digits = format!("{frac:018}");
        write!(f, "{int}.{}", digits.trim_end_matches('0'))
    }
}
