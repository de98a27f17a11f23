//! Checked arithmetic trait for amount and ratio types.
//!
//! The [`CheckedArithmetic`] trait provides fallible arithmetic that
//! returns [`Result<Self, AmmError>`](crate::error::AmmError) instead of
//! panicking or wrapping, with a distinct variant for each failure mode.
//!
//! # Examples
//!
//! ```
//! use hydra_weighted::domain::Amount;
//! use hydra_weighted::math::CheckedArithmetic;
//!
//! let a = Amount::new(100);
//! let b = Amount::new(200);
//! assert_eq!(a.safe_add(&b), Ok(Amount::new(300)));
//! assert!(a.safe_sub(&b).is_err());
//! ```

use super::Decimal;
use crate::domain::Amount;
use crate::error::AmmError;

/// Fallible arithmetic for pool quantities.
///
/// # Contract
///
/// - **No panics**: every error condition produces `Err`.
/// - **No saturation**: errors propagate instead.
/// - Division always rounds toward zero.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the result is not representable.
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Underflow`] if the result would be negative.
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError>;

    /// Checked multiplication.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the result is not representable.
    fn safe_mul(&self, other: &Self) -> Result<Self, AmmError>;

    /// Checked division, rounded toward zero.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DivisionByZero`] if `other` is zero.
    fn safe_div(&self, other: &Self) -> Result<Self, AmmError>;
}

// ---------------------------------------------------------------------------
// Amount
// ---------------------------------------------------------------------------

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_add(other)
            .ok_or(AmmError::Overflow("amount addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_sub(other)
            .ok_or(AmmError::Underflow("amount subtraction underflow"))
    }

    #[inline]
    fn safe_mul(&self, other: &Self) -> Result<Self, AmmError> {
        self.get()
            .checked_mul(other.get())
            .map(Amount::new)
            .ok_or(AmmError::Overflow("amount multiplication overflow"))
    }

    #[inline]
    fn safe_div(&self, other: &Self) -> Result<Self, AmmError> {
        self.get()
            .checked_div(other.get())
            .map(Amount::new)
            .ok_or(AmmError::DivisionByZero)
    }
}

// ---------------------------------------------------------------------------
// Decimal
// ---------------------------------------------------------------------------

impl CheckedArithmetic for Decimal {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_add(*other)
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_sub(*other)
    }

    #[inline]
    fn safe_mul(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_mul(*other)
    }

    #[inline]
    fn safe_div(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_div(*other)
    }
}
