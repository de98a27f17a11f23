//! Deterministic `ln`, `exp`, and `pow` on [`Decimal`] via Taylor series.
//!
//! No floating point is involved: every intermediate is a checked
//! [`Decimal`] operation, so identical inputs produce bit-identical
//! outputs on every platform.
//!
//! # Algorithm
//!
//! `pow(base, exponent) = exp(exponent * ln(base))` with
//!
//! ```text
//! ln(1 + a) = Σ (-1)^(n+1) · aⁿ / n        (base ≥ 1, a = base − 1)
//! ln(1 − a) = −Σ aⁿ / n                    (base < 1, a = 1 − base)
//! exp(k)    = Σ kⁿ / n!
//! ```
//!
//! Each series stops at the first term whose magnitude falls below
//! [`PRECISION`].  Terms are accumulated in two sums (one for terms that
//! add, one for terms that subtract) and the subtraction is applied once
//! at the end, never interleaved.  Results therefore carry an absolute
//! error on the order of [`PRECISION`].
//!
//! Both series run on reduced arguments: `ln` scales its base by a power
//! of two into `[0.75, 1.5)` and adds back `k · ln 2`; `exp` halves its
//! argument down to at most `1` and squares the result back up.  The
//! domain of `pow` is `0 < base < 2`; any other base is rejected with
//! [`AmmError::OutOfRange`].

use super::Decimal;
use crate::error::{AmmError, Result};

/// Series truncation threshold, `1e-10`.
pub const PRECISION: Decimal = Decimal::from_raw(100_000_000);

/// Hard cap on the number of series terms.
///
/// Both series run on reduced arguments (`|a| < 0.5` for the logarithm,
/// `x <= 1` for the exponential) and finish within a few dozen terms, so
/// reaching the cap means an internal error.
pub const MAX_SERIES_TERMS: u128 = 50_000;

const TWO: Decimal = Decimal::from_raw(2 * Decimal::SCALE);

/// `ln 2`, truncated to 18 decimals.
const LN_2: Decimal = Decimal::from_raw(693_147_180_559_945_309);

/// Reduced logarithm arguments lie in `[0.75, 1.5)`.
const REDUCED_LOW: Decimal = Decimal::from_raw(3 * Decimal::SCALE / 4);
const REDUCED_HIGH: Decimal = Decimal::from_raw(3 * Decimal::SCALE / 2);

/// Natural logarithm of `base`.
///
/// Returns `(magnitude, is_negative)`; `ln(base) = -magnitude` when the
/// flag is set (that is, when `base < 1`).
///
/// The base is first scaled by a power of two into `[0.75, 1.5)`, so
/// `ln(base) = ln(m) - k · ln 2` and the series always runs close to `1`.
/// This keeps the whole domain `(0, 2)` within a few dozen terms.
///
/// # Errors
///
/// - [`AmmError::OutOfRange`] if `base` is not in `(0, 2)`.
/// - Arithmetic errors from the underlying [`Decimal`] operations.
///
/// # Examples
///
/// ```
/// use hydra_weighted::math::{ln, Decimal};
///
/// let (value, negative) = ln(Decimal::ONE).expect("in range");
/// assert!(value.is_zero());
/// assert!(!negative);
/// ```
pub fn ln(base: Decimal) -> Result<(Decimal, bool)> {
    ensure_in_domain(base)?;

    let mut reduced = base;
    let mut doublings: u128 = 0;
    while reduced < REDUCED_LOW {
        reduced = reduced.checked_mul_int(2)?;
        doublings += 1;
    }
    let halved = reduced >= REDUCED_HIGH;
    if halved {
        reduced = reduced.checked_div_int(2)?;
    }

    let (series, series_negative) = ln_series(reduced)?;
    let (mut gains, mut losses) = if series_negative {
        (Decimal::ZERO, series)
    } else {
        (series, Decimal::ZERO)
    };
    if halved {
        gains = gains.checked_add(LN_2)?;
    }
    losses = losses.checked_add(LN_2.checked_mul_int(doublings)?)?;

    if gains >= losses {
        Ok((gains.checked_sub(losses)?, false))
    } else {
        Ok((losses.checked_sub(gains)?, true))
    }
}

/// `ln(1 ± a)` series for a base already reduced into `[0.75, 1.5)`.
fn ln_series(base: Decimal) -> Result<(Decimal, bool)> {
    let (a, negative) = if base >= Decimal::ONE {
        (base.checked_sub(Decimal::ONE)?, false)
    } else {
        (Decimal::ONE.checked_sub(base)?, true)
    };

    let mut odd_terms = Decimal::ZERO;
    let mut even_terms = Decimal::ZERO;
    let mut power = a;
    let mut n: u128 = 1;
    loop {
        let term = power.checked_div_int(n)?;
        if term < PRECISION {
            break;
        }
        // Below 1 every term carries the same sign, so everything lands in
        // one accumulator and the sign lives in the flag.
        if negative || n % 2 == 1 {
            odd_terms = odd_terms.checked_add(term)?;
        } else {
            even_terms = even_terms.checked_add(term)?;
        }
        n += 1;
        if n > MAX_SERIES_TERMS {
            return Err(AmmError::OutOfRange("ln series did not converge"));
        }
        power = power.checked_mul(a)?;
    }

    Ok((odd_terms.checked_sub(even_terms)?, negative))
}

/// `e^x` for `x ≥ 0`, or `e^-x` when `negative` is set.
///
/// Arguments above `1` are halved `m` times, the series is evaluated on
/// `x / 2^m`, and the result is squared `m` times.  Within the series,
/// odd-index terms of a negative argument are summed separately and
/// subtracted once.  If truncation leaves the subtracted sum larger than
/// the added one, the result is clamped to zero.
///
/// # Errors
///
/// - [`AmmError::Overflow`] if the result exceeds [`Decimal::MAX`]
///   (roughly `x > 46` without `negative`).
/// - Arithmetic errors from the underlying [`Decimal`] operations.
pub fn exp(x: Decimal, negative: bool) -> Result<Decimal> {
    let mut reduced = x;
    let mut squarings: u32 = 0;
    while reduced > Decimal::ONE {
        reduced = reduced.checked_div_int(2)?;
        squarings += 1;
    }

    let mut value = exp_series(reduced, negative)?;
    for _ in 0..squarings {
        if value.is_zero() {
            break;
        }
        value = value.checked_mul(value)?;
    }
    Ok(value)
}

/// `Σ xⁿ / n!` with additions and subtractions kept apart.
fn exp_series(x: Decimal, negative: bool) -> Result<Decimal> {
    let mut additions = Decimal::ONE;
    let mut subtractions = Decimal::ZERO;
    let mut term = Decimal::ONE;
    let mut n: u128 = 1;
    loop {
        term = term.checked_mul(x)?.checked_div_int(n)?;
        if term < PRECISION {
            break;
        }
        if negative && n % 2 == 1 {
            subtractions = subtractions.checked_add(term)?;
        } else {
            additions = additions.checked_add(term)?;
        }
        n += 1;
        if n > MAX_SERIES_TERMS {
            return Err(AmmError::OutOfRange("exp series did not converge"));
        }
    }

    Ok(additions.saturating_sub(subtractions))
}

/// `base ^ exponent` for `0 < base < 2`.
///
/// # Errors
///
/// - [`AmmError::OutOfRange`] if `base` is not in `(0, 2)`.
/// - Any error from [`ln`] or [`exp`].
///
/// # Examples
///
/// ```
/// use hydra_weighted::math::{pow, Decimal};
///
/// let half = Decimal::from_ratio(1, 2).expect("ok");
/// let two = Decimal::from_int(2).expect("ok");
/// let quarter = pow(half, two).expect("in range");
/// let expected = Decimal::from_ratio(1, 4).expect("ok");
/// assert!(quarter.raw().abs_diff(expected.raw()) < 1_000_000_000);
///
/// assert_eq!(pow(half, Decimal::ZERO), Ok(Decimal::ONE));
/// assert!(pow(two, two).is_err());
/// ```
pub fn pow(base: Decimal, exponent: Decimal) -> Result<Decimal> {
    ensure_in_domain(base)?;
    if exponent.is_zero() {
        return Ok(Decimal::ONE);
    }
    let (magnitude, negative) = ln(base)?;
    let k = magnitude.checked_mul(exponent)?;
    exp(k, negative)
}

fn ensure_in_domain(base: Decimal) -> Result<()> {
    if base.is_zero() || base >= TWO {
        return Err(AmmError::OutOfRange("power base must lie in (0, 2)"));
    }
    Ok(())
}
