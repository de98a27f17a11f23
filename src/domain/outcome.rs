//! Results of pool operations.
//!
//! The pool's `quote_*` methods return these values, and the exchange
//! returns them once the operation has been committed.

use core::fmt;

use super::{Amount, Side};
use crate::error::Result;
use crate::math::Decimal;

/// Amounts exchanged by a swap.
///
/// # Examples
///
/// ```
/// use hydra_weighted::domain::{Amount, Side, SwapOutcome};
///
/// let out = SwapOutcome::new(Side::A, Amount::new(1_000), Amount::new(996), Amount::new(3));
/// assert_eq!(out.return_side(), Side::B);
/// assert_eq!(out.adjusted_offer(), Amount::new(997));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapOutcome {
    offer_side: Side,
    offer_amount: Amount,
    return_amount: Amount,
    fee_amount: Amount,
}

impl SwapOutcome {
    /// Creates a swap outcome.
    #[must_use]
    pub const fn new(
        offer_side: Side,
        offer_amount: Amount,
        return_amount: Amount,
        fee_amount: Amount,
    ) -> Self {
        Self {
            offer_side,
            offer_amount,
            return_amount,
            fee_amount,
        }
    }

    /// Returns the side the trader paid in.
    #[must_use]
    pub const fn offer_side(&self) -> Side {
        self.offer_side
    }

    /// Returns the side the trader received.
    #[must_use]
    pub const fn return_side(&self) -> Side {
        self.offer_side.other()
    }

    /// Returns the full amount paid in, fee included.
    #[must_use]
    pub const fn offer_amount(&self) -> Amount {
        self.offer_amount
    }

    /// Returns the amount paid out.
    #[must_use]
    pub const fn return_amount(&self) -> Amount {
        self.return_amount
    }

    /// Returns the fee withheld from the offer.
    #[must_use]
    pub const fn fee_amount(&self) -> Amount {
        self.fee_amount
    }

    /// Returns the part of the offer that was priced, `offer - fee`.
    #[must_use]
    pub const fn adjusted_offer(&self) -> Amount {
        Amount::new(self.offer_amount.get().saturating_sub(self.fee_amount.get()))
    }

    /// Returns the realized price `return_amount / offer_amount`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DivisionByZero`](crate::error::AmmError::DivisionByZero)
    /// if the offer is zero.
    pub fn effective_price(&self) -> Result<Decimal> {
        Decimal::from_ratio(self.return_amount.get(), self.offer_amount.get())
    }
}

impl fmt::Display for SwapOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Swap({} {} -> {} {}, fee={})",
            self.offer_amount,
            self.offer_side,
            self.return_amount,
            self.offer_side.other(),
            self.fee_amount
        )
    }
}

/// Amounts taken and shares minted by a dual-asset provide.
///
/// `amount_a` and `amount_b` are what the pool actually absorbed; any
/// excess over the binding ratio stays with the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProvideOutcome {
    amount_a: Amount,
    amount_b: Amount,
    shares: Amount,
}

impl ProvideOutcome {
    /// Creates a provide outcome.
    #[must_use]
    pub const fn new(amount_a: Amount, amount_b: Amount, shares: Amount) -> Self {
        Self {
            amount_a,
            amount_b,
            shares,
        }
    }

    /// Returns the amount of asset A taken into the pool.
    #[must_use]
    pub const fn amount_a(&self) -> Amount {
        self.amount_a
    }

    /// Returns the amount of asset B taken into the pool.
    #[must_use]
    pub const fn amount_b(&self) -> Amount {
        self.amount_b
    }

    /// Returns the amount taken on `side`.
    #[must_use]
    pub const fn amount(&self, side: Side) -> Amount {
        match side {
            Side::A => self.amount_a,
            Side::B => self.amount_b,
        }
    }

    /// Returns the shares minted.
    #[must_use]
    pub const fn shares(&self) -> Amount {
        self.shares
    }
}

impl fmt::Display for ProvideOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Provide(a={}, b={}, shares={})",
            self.amount_a, self.amount_b, self.shares
        )
    }
}

/// Result of a single-asset provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SingleProvideOutcome {
    side: Side,
    amount: Amount,
    fee_amount: Amount,
    shares: Amount,
}

impl SingleProvideOutcome {
    /// Creates a single-asset provide outcome.
    #[must_use]
    pub const fn new(side: Side, amount: Amount, fee_amount: Amount, shares: Amount) -> Self {
        Self {
            side,
            amount,
            fee_amount,
            shares,
        }
    }

    /// Returns the deposited side.
    #[must_use]
    pub const fn side(&self) -> Side {
        self.side
    }

    /// Returns the full deposit, fee included.
    #[must_use]
    pub const fn amount(&self) -> Amount {
        self.amount
    }

    /// Returns the implied swap fee charged on the deposit.
    #[must_use]
    pub const fn fee_amount(&self) -> Amount {
        self.fee_amount
    }

    /// Returns the shares minted.
    #[must_use]
    pub const fn shares(&self) -> Amount {
        self.shares
    }
}

impl fmt::Display for SingleProvideOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SingleProvide({} {}, fee={}, shares={})",
            self.amount, self.side, self.fee_amount, self.shares
        )
    }
}

/// Shares burned and amounts paid out by a withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WithdrawOutcome {
    shares: Amount,
    amount_a: Amount,
    amount_b: Amount,
}

impl WithdrawOutcome {
    /// Creates a withdraw outcome.
    #[must_use]
    pub const fn new(shares: Amount, amount_a: Amount, amount_b: Amount) -> Self {
        Self {
            shares,
            amount_a,
            amount_b,
        }
    }

    /// Returns the shares burned.
    #[must_use]
    pub const fn shares(&self) -> Amount {
        self.shares
    }

    /// Returns the amount of asset A paid out.
    #[must_use]
    pub const fn amount_a(&self) -> Amount {
        self.amount_a
    }

    /// Returns the amount of asset B paid out.
    #[must_use]
    pub const fn amount_b(&self) -> Amount {
        self.amount_b
    }
}

impl fmt::Display for WithdrawOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Withdraw(shares={}, a={}, b={})",
            self.shares, self.amount_a, self.amount_b
        )
    }
}
