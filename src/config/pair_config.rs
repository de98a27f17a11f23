//! Blueprint for creating a weighted pair.

use crate::domain::{Amount, FeeRate, PairKey, WeightSchedule};
use crate::error::AmmError;
use crate::math::Decimal;

/// Everything needed to create one pair.
///
/// # Validation
///
/// - The pair key names three distinct asset types.
/// - The fee rate is strictly below one.
/// - The schedule ends at or after its start and every weight is non-zero.
/// - Both initial amounts are non-zero.
///
/// # Examples
///
/// ```
/// use hydra_weighted::config::PairConfig;
/// use hydra_weighted::domain::{Amount, AssetType, FeeRate, PairKey, WeightSchedule, Weights};
///
/// let key = PairKey::new(
///     AssetType::new("ETH"),
///     AssetType::new("USDC"),
///     AssetType::new("LP<ETH,USDC>"),
/// )
/// .expect("distinct assets");
/// let weights = Weights::from_ratios(80, 20, 100).expect("valid weights");
/// let cfg = PairConfig::new(
///     key,
///     WeightSchedule::fixed(weights),
///     FeeRate::from_ratio(3, 1_000).expect("valid fee"),
///     Amount::new(80_000_000),
///     Amount::new(20_000_000),
/// );
/// assert!(cfg.is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PairConfig {
    key: PairKey,
    schedule: WeightSchedule,
    fee_rate: FeeRate,
    initial_a: Amount,
    initial_b: Amount,
}

impl PairConfig {
    /// Creates a validated `PairConfig`.
    ///
    /// # Errors
    ///
    /// Same as [`validate`](Self::validate).
    pub fn new(
        key: PairKey,
        schedule: WeightSchedule,
        fee_rate: FeeRate,
        initial_a: Amount,
        initial_b: Amount,
    ) -> Result<Self, AmmError> {
        let config = Self {
            key,
            schedule,
            fee_rate,
            initial_a,
            initial_b,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// Values built through the public constructors already satisfy most
    /// of these; the checks matter for configs that arrive deserialized.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAsset`] if the key repeats an asset type.
    /// - [`AmmError::FeeRateOutOfRange`] if the fee rate is not below one.
    /// - [`AmmError::InvalidConfiguration`] if the schedule ends before it starts.
    /// - [`AmmError::InvalidWeight`] if any scheduled weight is zero.
    /// - [`AmmError::InvalidQuantity`] if an initial amount is zero.
    pub fn validate(&self) -> Result<(), AmmError> {
        let key = &self.key;
        if key.asset_a() == key.asset_b()
            || key.share_token() == key.asset_a()
            || key.share_token() == key.asset_b()
        {
            return Err(AmmError::InvalidAsset(
                "pair key must name three distinct asset types",
            ));
        }
        if self.fee_rate.as_decimal() >= Decimal::ONE {
            return Err(AmmError::FeeRateOutOfRange);
        }

        let before = self.schedule.before();
        let after = self.schedule.after();
        if after.timestamp() < before.timestamp() {
            return Err(AmmError::InvalidConfiguration(
                "weight schedule must end at or after its start",
            ));
        }
        for point in [before, after] {
            let w = point.weights();
            if w.weight_a().is_zero() || w.weight_b().is_zero() {
                return Err(AmmError::InvalidWeight(
                    "all scheduled weights must be greater than zero",
                ));
            }
        }

        if self.initial_a.is_zero() || self.initial_b.is_zero() {
            return Err(AmmError::InvalidQuantity(
                "initial amounts must be non-zero",
            ));
        }
        Ok(())
    }

    /// Returns the pair key.
    #[must_use]
    pub const fn key(&self) -> &PairKey {
        &self.key
    }

    /// Returns the weight schedule.
    #[must_use]
    pub const fn schedule(&self) -> WeightSchedule {
        self.schedule
    }

    /// Returns the swap fee rate.
    #[must_use]
    pub const fn fee_rate(&self) -> FeeRate {
        self.fee_rate
    }

    /// Returns the initial deposit of asset A.
    #[must_use]
    pub const fn initial_a(&self) -> Amount {
        self.initial_a
    }

    /// Returns the initial deposit of asset B.
    #[must_use]
    pub const fn initial_b(&self) -> Amount {
        self.initial_b
    }
}
