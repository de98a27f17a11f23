//! Unified error types for the weighted pool engine.
//!
//! All fallible operations across the crate return [`AmmError`] as their
//! error type.  Every error is raised before any state is committed, so a
//! failed operation leaves pools, the registry, and the ledger untouched.

use thiserror::Error;

/// Errors produced by pool math, pool accounting, and the pair registry.
///
/// Variants that carry a `&'static str` include a short description of
/// the exact computation that failed, e.g.
/// `Overflow("reserve_a overflow on provide")`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum AmmError {
    /// A checked addition or multiplication exceeded the backing integer.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// A checked subtraction would have produced a negative value.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// Division by a zero-valued divisor.
    #[error("division by zero")]
    DivisionByZero,

    /// An input lies outside the domain of a numeric routine, such as a
    /// power base outside `(0, 2)`.
    #[error("value out of range: {0}")]
    OutOfRange(&'static str),

    /// The requested pair is not registered.
    #[error("pair is not listed")]
    PairNotListed,

    /// A pair with the same key already exists.
    #[error("pair is already listed")]
    PairAlreadyListed,

    /// The pool has no liquidity on a side the operation depends on.
    #[error("pool has zero liquidity")]
    ZeroLiquidity,

    /// A slippage, minimum-share, or minimum-amount bound was violated.
    #[error("result below caller minimum: {0}")]
    BelowMinimum(&'static str),

    /// The liquidity bootstrapping schedule has not started yet.
    #[error("liquidity bootstrapping has not started")]
    LbpNotStarted,

    /// The liquidity bootstrapping schedule is still in progress.
    #[error("liquidity bootstrapping has not ended")]
    LbpNotEnded,

    /// A single-asset deposit is not strictly smaller than the pool balance.
    #[error("price impact too high")]
    PriceImpactTooHigh,

    /// The swap fee rate is not strictly below one.
    #[error("fee rate must be below 1")]
    FeeRateOutOfRange,

    /// The caller is not the registry administrator.
    #[error("caller is not authorized")]
    Unauthorized,

    /// A weight value is invalid.
    #[error("invalid weight: {0}")]
    InvalidWeight(&'static str),

    /// A quantity argument is invalid (typically zero).
    #[error("invalid quantity: {0}")]
    InvalidQuantity(&'static str),

    /// An asset value or asset type does not match what the operation expects.
    #[error("invalid asset: {0}")]
    InvalidAsset(&'static str),

    /// A configuration blueprint violates one of its invariants.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// The holder does not own enough of the requested asset.
    #[error("insufficient balance")]
    InsufficientBalance,

    /// The share token already has a mint authority.
    #[error("share token is already registered")]
    ShareTokenRegistered,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, AmmError>;
