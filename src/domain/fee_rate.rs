//! Swap fee rate as a fraction strictly below one.

use core::fmt;

use super::Amount;
use crate::error::{AmmError, Result};
use crate::math::Decimal;

/// Fraction of every swap input retained by the pool.
///
/// The rate is a [`Decimal`] in `[0, 1)`.  A rate of one or more would
/// swallow the entire input, so it is rejected at construction with
/// [`AmmError::FeeRateOutOfRange`].
///
/// # Examples
///
/// ```
/// use hydra_weighted::domain::{Amount, FeeRate};
///
/// let rate = FeeRate::from_ratio(3, 1_000).expect("0.3%");
/// assert_eq!(rate.apply(Amount::new(1_000)), Ok(Amount::new(3)));
/// assert!(FeeRate::from_ratio(1, 1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeeRate(Decimal);

impl FeeRate {
    /// No fee.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a fee rate.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::FeeRateOutOfRange`] if `rate >= 1`.
    pub const fn new(rate: Decimal) -> Result<Self> {
        if rate.raw() >= Decimal::SCALE {
            return Err(AmmError::FeeRateOutOfRange);
        }
        Ok(Self(rate))
    }

    /// Creates the fee rate `numerator / denominator`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::DivisionByZero`] if `denominator` is zero.
    /// - [`AmmError::FeeRateOutOfRange`] if the ratio is `>= 1`.
    pub fn from_ratio(numerator: u128, denominator: u128) -> Result<Self> {
        Self::new(Decimal::from_ratio(numerator, denominator)?)
    }

    /// Returns the rate as a decimal.
    pub const fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Returns `true` if the rate is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Fee charged on `amount`, rounded toward zero.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] only if the product is not
    /// representable, which cannot happen for a rate below one.
    pub fn apply(&self, amount: Amount) -> Result<Amount> {
        self.0.mul_amount(amount)
    }
}

impl fmt::Display for FeeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeeRate({})", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn zero_rate() {
        assert!(FeeRate::ZERO.is_zero());
        assert_eq!(FeeRate::ZERO.apply(Amount::new(1_000)), Ok(Amount::ZERO));
    }

    #[test]
    fn rejects_one_and_above() {
        assert_eq!(FeeRate::new(Decimal::ONE), Err(AmmError::FeeRateOutOfRange));
        assert_eq!(FeeRate::from_ratio(3, 2), Err(AmmError::FeeRateOutOfRange));
    }

    #[test]
    fn accepts_just_below_one() {
        assert!(FeeRate::new(Decimal::from_raw(Decimal::SCALE - 1)).is_ok());
    }

    #[test]
    fn apply_rounds_toward_zero() {
        let Ok(rate) = FeeRate::from_ratio(3, 1_000) else {
            panic!("valid rate");
        };
        assert_eq!(rate.apply(Amount::new(1_000)), Ok(Amount::new(3)));
        assert_eq!(rate.apply(Amount::new(333)), Ok(Amount::ZERO));
        assert_eq!(rate.apply(Amount::new(334)), Ok(Amount::new(1)));
    }

    #[test]
    fn apply_to_max_amount_does_not_overflow() {
        let Ok(rate) = FeeRate::from_ratio(1, 2) else {
            panic!("valid rate");
        };
        assert_eq!(rate.apply(Amount::MAX), Ok(Amount::new(u128::MAX / 2)));
    }

    #[test]
    fn display() {
        let Ok(rate) = FeeRate::from_ratio(3, 1_000) else {
            panic!("valid rate");
        };
        assert_eq!(rate.to_string(), "FeeRate(0.003)");
    }
}
