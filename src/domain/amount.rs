//! Raw asset amount with checked arithmetic.

use core::fmt;

/// A raw asset amount in the smallest unit of its asset.
///
/// `Amount` is denomination-agnostic; all `u128` values are valid.
/// Arithmetic methods are checked and return `None` on overflow or
/// underflow.  [`CheckedArithmetic`](crate::math::CheckedArithmetic)
/// wraps them into typed errors.
///
/// # Examples
///
/// ```
/// use hydra_weighted::domain::Amount;
///
/// let a = Amount::new(100);
/// let b = Amount::new(200);
/// assert_eq!(a.checked_add(&b), Some(Amount::new(300)));
/// assert_eq!(a.checked_sub(&b), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use]
pub struct Amount(u128);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Maximum representable amount.
    pub const MAX: Self = Self(u128::MAX);

    /// Creates a new `Amount` from a raw `u128` value.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the underlying `u128` value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction. Returns `None` on underflow.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_and_get() {
        assert_eq!(Amount::new(42).get(), 42);
        assert_eq!(Amount::from(7u128), Amount::new(7));
    }

    #[test]
    fn zero_and_default() {
        assert!(Amount::ZERO.is_zero());
        assert_eq!(Amount::default(), Amount::ZERO);
        assert!(!Amount::new(1).is_zero());
    }

    #[test]
    fn checked_ops() {
        assert_eq!(Amount::MAX.checked_add(&Amount::new(1)), None);
        assert_eq!(Amount::new(1).checked_sub(&Amount::new(2)), None);
        assert_eq!(
            Amount::new(5).checked_sub(&Amount::new(2)),
            Some(Amount::new(3))
        );
    }

    #[test]
    fn ordering_and_display() {
        assert!(Amount::new(1) < Amount::new(2));
        assert_eq!(Amount::new(1_000_000).to_string(), "1000000");
    }
}
