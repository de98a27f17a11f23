//! Asset weights and their (possibly time-varying) schedule.
//!
//! A [`WeightSchedule`] has two endpoints.  Before the first endpoint the
//! pool trades at the starting weights, after the second at the final
//! weights, and in between each weight is the time-proportional average
//! of the two endpoints:
//!
//! ```text
//! w(t) = (w_before · (t_after − t) + w_after · (t − t_before)) / (t_after − t_before)
//! ```
//!
//! A static pool is the degenerate schedule whose endpoints are equal.

use core::fmt;

use super::{Side, Timestamp};
use crate::error::{AmmError, Result};
use crate::math::Decimal;

/// The pair of weights `(weight_a, weight_b)` of a two-asset pool.
///
/// Weights need not sum to one; formulas use the
/// [normalized](Self::normalized) weight where the invariant requires it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weights {
    weight_a: Decimal,
    weight_b: Decimal,
}

impl Weights {
    /// Equal unit weights, `(1, 1)`.
    pub const EQUAL: Self = Self {
        weight_a: Decimal::ONE,
        weight_b: Decimal::ONE,
    };

    /// Creates a weight pair.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidWeight`] if either weight is zero.
    pub const fn new(weight_a: Decimal, weight_b: Decimal) -> Result<Self> {
        if weight_a.is_zero() || weight_b.is_zero() {
            return Err(AmmError::InvalidWeight("weights must be greater than zero"));
        }
        Ok(Self { weight_a, weight_b })
    }

    /// Creates a weight pair from two ratios over a common denominator,
    /// e.g. `from_ratios(80, 20, 100)` for an 80/20 pool.
    ///
    /// # Errors
    ///
    /// - [`AmmError::DivisionByZero`] if `denominator` is zero.
    /// - [`AmmError::InvalidWeight`] if either weight is zero.
    pub fn from_ratios(a: u128, b: u128, denominator: u128) -> Result<Self> {
        Self::new(
            Decimal::from_ratio(a, denominator)?,
            Decimal::from_ratio(b, denominator)?,
        )
    }

    /// Returns the weight of asset A.
    pub const fn weight_a(&self) -> Decimal {
        self.weight_a
    }

    /// Returns the weight of asset B.
    pub const fn weight_b(&self) -> Decimal {
        self.weight_b
    }

    /// Returns the weight of `side`.
    pub const fn of(&self, side: Side) -> Decimal {
        match side {
            Side::A => self.weight_a,
            Side::B => self.weight_b,
        }
    }

    /// Returns `weight(side) / (weight_a + weight_b)`.
    ///
    /// # Errors
    ///
    /// Returns an arithmetic error if the sum overflows.
    pub fn normalized(&self, side: Side) -> Result<Decimal> {
        let total = self.weight_a.checked_add(self.weight_b)?;
        self.of(side).checked_div(total)
    }
}

impl fmt::Display for Weights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.weight_a, self.weight_b)
    }
}

/// Weights in force at a given timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightPoint {
    weights: Weights,
    timestamp: Timestamp,
}

impl WeightPoint {
    /// Creates a schedule endpoint.
    #[must_use]
    pub const fn new(weights: Weights, timestamp: Timestamp) -> Self {
        Self { weights, timestamp }
    }

    /// Returns the weights at this endpoint.
    #[must_use]
    pub const fn weights(&self) -> Weights {
        self.weights
    }

    /// Returns the endpoint timestamp.
    #[must_use]
    pub const fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}

/// Static or linearly interpolated weight schedule.
///
/// # Invariant
///
/// `after.timestamp() >= before.timestamp()`.
///
/// # Examples
///
/// ```
/// use hydra_weighted::domain::{Timestamp, WeightPoint, WeightSchedule, Weights};
///
/// let start = Weights::from_ratios(99, 1, 100).expect("valid");
/// let end = Weights::from_ratios(61, 39, 100).expect("valid");
/// let schedule = WeightSchedule::new(
///     WeightPoint::new(start, Timestamp::from_secs(2_000)),
///     WeightPoint::new(end, Timestamp::from_secs(3_000)),
/// )
/// .expect("ordered endpoints");
///
/// let mid = schedule.resolve(Timestamp::from_secs(2_500)).expect("ok");
/// assert_eq!(mid, Weights::from_ratios(80, 20, 100).expect("valid"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightSchedule {
    before: WeightPoint,
    after: WeightPoint,
}

impl WeightSchedule {
    /// Creates a schedule from its two endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if the end timestamp
    /// precedes the start timestamp.
    pub const fn new(before: WeightPoint, after: WeightPoint) -> Result<Self> {
        if after.timestamp.as_secs() < before.timestamp.as_secs() {
            return Err(AmmError::InvalidConfiguration(
                "weight schedule must end at or after its start",
            ));
        }
        Ok(Self { before, after })
    }

    /// A static schedule: the same weights at all times.
    #[must_use]
    pub const fn fixed(weights: Weights) -> Self {
        let point = WeightPoint::new(weights, Timestamp::ZERO);
        Self {
            before: point,
            after: point,
        }
    }

    /// Returns the starting endpoint.
    #[must_use]
    pub const fn before(&self) -> WeightPoint {
        self.before
    }

    /// Returns the final endpoint.
    #[must_use]
    pub const fn after(&self) -> WeightPoint {
        self.after
    }

    /// Returns `true` if the weights change over time.
    #[must_use]
    pub fn is_lbp(&self) -> bool {
        self.before != self.after
    }

    /// Returns `true` once `now` has reached the starting timestamp.
    #[must_use]
    pub fn has_started(&self, now: Timestamp) -> bool {
        now >= self.before.timestamp
    }

    /// Returns `true` once `now` has reached the final timestamp.
    #[must_use]
    pub fn has_ended(&self, now: Timestamp) -> bool {
        now >= self.after.timestamp
    }

    /// Resolves the weights in force at `now`.
    ///
    /// # Errors
    ///
    /// Returns an arithmetic error only if an interpolated weight
    /// overflows, which requires weights near [`Decimal::MAX`].
    pub fn resolve(&self, now: Timestamp) -> Result<Weights> {
        if now <= self.before.timestamp {
            return Ok(self.before.weights);
        }
        if now >= self.after.timestamp {
            return Ok(self.after.weights);
        }
        let elapsed = u128::from(now.saturating_since(self.before.timestamp));
        let remaining = u128::from(self.after.timestamp.saturating_since(now));
        let duration = elapsed + remaining;

        let lerp = |from: Decimal, to: Decimal| -> Result<Decimal> {
            from.checked_mul_int(remaining)?
                .checked_add(to.checked_mul_int(elapsed)?)?
                .checked_div_int(duration)
        };
        Weights::new(
            lerp(self.before.weights.weight_a, self.after.weights.weight_a)?,
            lerp(self.before.weights.weight_b, self.after.weights.weight_b)?,
        )
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn weights(a: u128, b: u128) -> Weights {
        let Ok(w) = Weights::from_ratios(a, b, 100) else {
            panic!("valid weights");
        };
        w
    }

    fn ts(secs: u64) -> Timestamp {
        Timestamp::from_secs(secs)
    }

    fn lbp() -> WeightSchedule {
        let Ok(s) = WeightSchedule::new(
            WeightPoint::new(weights(99, 1), ts(2_000)),
            WeightPoint::new(weights(61, 39), ts(3_000)),
        ) else {
            panic!("valid schedule");
        };
        s
    }

    // -- Weights ------------------------------------------------------------

    #[test]
    fn zero_weight_rejected() {
        assert!(matches!(
            Weights::new(Decimal::ZERO, Decimal::ONE),
            Err(AmmError::InvalidWeight(_))
        ));
    }

    #[test]
    fn normalized_weight() {
        let w = weights(80, 20);
        assert_eq!(w.normalized(Side::A), Decimal::from_ratio(4, 5));
        // Unnormalized inputs still normalize.
        let Ok(raw) = Weights::from_ratios(3, 1, 1) else {
            panic!("valid weights");
        };
        assert_eq!(raw.normalized(Side::B), Decimal::from_ratio(1, 4));
    }

    // -- schedule construction ---------------------------------------------

    #[test]
    fn end_before_start_rejected() {
        let r = WeightSchedule::new(
            WeightPoint::new(weights(50, 50), ts(10)),
            WeightPoint::new(weights(50, 50), ts(9)),
        );
        assert!(matches!(r, Err(AmmError::InvalidConfiguration(_))));
    }

    #[test]
    fn fixed_schedule_is_not_lbp() {
        let s = WeightSchedule::fixed(weights(80, 20));
        assert!(!s.is_lbp());
        assert_eq!(s.resolve(ts(0)), Ok(weights(80, 20)));
        assert_eq!(s.resolve(ts(u64::MAX)), Ok(weights(80, 20)));
    }

    // -- resolve ------------------------------------------------------------

    #[test]
    fn before_start_uses_initial_weights() {
        assert_eq!(lbp().resolve(ts(0)), Ok(weights(99, 1)));
        assert_eq!(lbp().resolve(ts(2_000)), Ok(weights(99, 1)));
    }

    #[test]
    fn after_end_uses_final_weights() {
        assert_eq!(lbp().resolve(ts(3_000)), Ok(weights(61, 39)));
        assert_eq!(lbp().resolve(ts(10_000)), Ok(weights(61, 39)));
    }

    #[test]
    fn midpoint_is_linear_interpolation() {
        assert_eq!(lbp().resolve(ts(2_500)), Ok(weights(80, 20)));
    }

    #[test]
    fn quarter_point() {
        // 0.99 * 0.75 + 0.61 * 0.25 = 0.895; 0.01 * 0.75 + 0.39 * 0.25 = 0.105
        let Ok(expected) = Weights::from_ratios(895, 105, 1_000) else {
            panic!("valid weights");
        };
        assert_eq!(lbp().resolve(ts(2_250)), Ok(expected));
    }

    #[test]
    fn instantaneous_switch() {
        let Ok(s) = WeightSchedule::new(
            WeightPoint::new(weights(90, 10), ts(100)),
            WeightPoint::new(weights(50, 50), ts(100)),
        ) else {
            panic!("valid schedule");
        };
        assert!(s.is_lbp());
        assert_eq!(s.resolve(ts(99)), Ok(weights(90, 10)));
        assert_eq!(s.resolve(ts(100)), Ok(weights(90, 10)));
        assert_eq!(s.resolve(ts(101)), Ok(weights(50, 50)));
    }

    #[test]
    fn started_and_ended() {
        let s = lbp();
        assert!(!s.has_started(ts(1_999)));
        assert!(s.has_started(ts(2_000)));
        assert!(!s.has_ended(ts(2_999)));
        assert!(s.has_ended(ts(3_000)));
    }
}
