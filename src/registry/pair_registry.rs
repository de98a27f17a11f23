//! Keyed store of weighted pools.

use std::collections::BTreeMap;

use super::cursor::next_page;
use crate::config::RegistryConfig;
use crate::domain::{Amount, FeeRate, PairKey, WeightSchedule};
use crate::error::{AmmError, Result};
use crate::math::Decimal;
use crate::pools::WeightedPool;

/// Read-only snapshot of a listed pair.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PairInfo {
    key: PairKey,
    schedule: WeightSchedule,
    fee_rate: FeeRate,
    balance_a: Amount,
    balance_b: Amount,
    share_supply: Amount,
}

impl PairInfo {
    fn of(pool: &WeightedPool) -> Self {
        Self {
            key: pool.key().clone(),
            schedule: pool.schedule(),
            fee_rate: pool.fee_rate(),
            balance_a: pool.balance_a(),
            balance_b: pool.balance_b(),
            share_supply: pool.share_supply(),
        }
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

    /// Returns the pooled balance of asset A.
    #[must_use]
    pub const fn balance_a(&self) -> Amount {
        self.balance_a
    }

    /// Returns the pooled balance of asset B.
    #[must_use]
    pub const fn balance_b(&self) -> Amount {
        self.balance_b
    }

    /// Returns the outstanding share supply.
    #[must_use]
    pub const fn share_supply(&self) -> Amount {
        self.share_supply
    }
}

/// One page of [`PairInfo`] in key order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PairPage {
    /// Pairs on this page.
    pub pairs: Vec<PairInfo>,
    /// `true` if pairs remain after the last one on this page.
    pub more: bool,
}

impl PairPage {
    /// Returns the cursor for the following page, if there is one.
    #[must_use]
    pub fn next_cursor(&self) -> Option<&PairKey> {
        if self.more {
            self.pairs.last().map(PairInfo::key)
        } else {
            None
        }
    }
}

/// Every pool ever created, keyed by `(asset A, asset B, share token)`.
///
/// Pools are never removed.  Iteration follows [`PairKey`] ordering:
/// lexicographic by asset A, then asset B, then share token.
///
/// # Examples
///
/// ```
/// use hydra_weighted::registry::PairRegistry;
///
/// let registry = PairRegistry::default();
/// let page = registry.get_pairs(None, None).expect("valid limit");
/// assert!(page.pairs.is_empty());
/// assert!(!page.more);
/// ```
#[derive(Debug, Default)]
pub struct PairRegistry {
    config: RegistryConfig,
    pools: BTreeMap<PairKey, WeightedPool>,
}

impl PairRegistry {
    /// Creates an empty registry.
    ///
    /// # Errors
    ///
    /// Propagates [`RegistryConfig::validate`] errors.
    pub fn new(config: RegistryConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            pools: BTreeMap::new(),
        })
    }

    /// Returns the pagination bounds.
    #[must_use]
    pub const fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Returns the number of listed pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    /// Returns `true` if no pair is listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// Returns `true` if `key` is listed.
    #[must_use]
    pub fn contains(&self, key: &PairKey) -> bool {
        self.pools.contains_key(key)
    }

    /// Returns a snapshot of one pair.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PairNotListed`] if `key` is unknown.
    pub fn get_pair(&self, key: &PairKey) -> Result<PairInfo> {
        self.pool(key).map(PairInfo::of)
    }

    /// Returns the pool listed under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PairNotListed`] if `key` is unknown.
    pub fn pool(&self, key: &PairKey) -> Result<&WeightedPool> {
        self.pools.get(key).ok_or(AmmError::PairNotListed)
    }

    pub(crate) fn pool_mut(&mut self, key: &PairKey) -> Result<&mut WeightedPool> {
        self.pools.get_mut(key).ok_or(AmmError::PairNotListed)
    }

    /// Lists up to `limit` pairs after `start_after`.
    ///
    /// `limit = None` uses the configured default page size; limits above
    /// the configured maximum are clamped to it.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidQuantity`] if `limit` is `Some(0)`.
    pub fn get_pairs(&self, start_after: Option<&PairKey>, limit: Option<usize>) -> Result<PairPage> {
        let limit = match limit {
            Some(0) => return Err(AmmError::InvalidQuantity("page limit must be non-zero")),
            Some(n) => n.min(self.config.max_page_size()),
            None => self.config.default_page_size(),
        };
        let (pairs, more) = next_page(&self.pools, start_after, limit, |_, pool| PairInfo::of(pool));
        Ok(PairPage { pairs, more })
    }

    /// Lists every pair by walking [`get_pairs`](Self::get_pairs) pages to
    /// the end.
    #[must_use]
    pub fn get_all_pairs(&self) -> Vec<PairInfo> {
        let mut all = Vec::with_capacity(self.pools.len());
        let mut cursor: Option<PairKey> = None;
        loop {
            let (pairs, more) = next_page(
                &self.pools,
                cursor.as_ref(),
                self.config.max_page_size(),
                |_, pool| PairInfo::of(pool),
            );
            cursor = pairs.last().map(|info| info.key.clone());
            all.extend(pairs);
            if !more {
                return all;
            }
        }
    }

    /// Changes a pair's swap fee, returning the previous rate.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PairNotListed`] if `key` is unknown.
    /// - [`AmmError::FeeRateOutOfRange`] if `fee_rate` is not below one.
    pub fn update_fee_rate(&mut self, key: &PairKey, fee_rate: FeeRate) -> Result<FeeRate> {
        if fee_rate.as_decimal() >= Decimal::ONE {
            return Err(AmmError::FeeRateOutOfRange);
        }
        let pool = self.pool_mut(key)?;
        let old = pool.fee_rate();
        pool.set_fee_rate(fee_rate);
        Ok(old)
    }

    /// Replaces a pair's weight schedule, returning the previous one.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PairNotListed`] if `key` is unknown.
    pub fn update_weight_schedule(
        &mut self,
        key: &PairKey,
        schedule: WeightSchedule,
    ) -> Result<WeightSchedule> {
        let pool = self.pool_mut(key)?;
        let old = pool.schedule();
        pool.set_schedule(schedule);
        Ok(old)
    }

    /// Lists a new pool.
    pub(crate) fn insert(&mut self, pool: WeightedPool) -> Result<()> {
        if self.pools.contains_key(pool.key()) {
            return Err(AmmError::PairAlreadyListed);
        }
        self.pools.insert(pool.key().clone(), pool);
        Ok(())
    }
}
