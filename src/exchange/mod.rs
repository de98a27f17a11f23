//! Transaction surface over the registry and its collaborators.
//!
//! [`Exchange`] is the single writer for every pool.  Each mutating call
//! takes `&mut self`, so operations on the same pool are linearizable by
//! construction; hosts with concurrent callers wrap the exchange in a
//! mutex.
//!
//! Every operation follows the same shape:
//!
//! 1. authorize the caller (privileged calls only),
//! 2. quote against the current pool state and check caller minimums,
//! 3. move assets through the [`AssetLedger`], rolling back any earlier
//!    ledger step if a later one fails,
//! 4. commit to the pool, log, and emit a [`PoolEvent`].
//!
//! A failure in any step leaves pools, registry and ledger unchanged.

use crate::config::{PairConfig, RegistryConfig};
use crate::domain::{
    Address, Amount, AssetType, FeeRate, PairKey, ProvideOutcome, Side, SingleProvideOutcome,
    SwapOutcome, WeightSchedule, Weights, WithdrawOutcome,
};
use crate::error::{AmmError, Result};
use crate::events::PoolEvent;
use crate::ledger::Coin;
use crate::math::Decimal;
use crate::pools::WeightedPool;
use crate::registry::{PairInfo, PairPage, PairRegistry};
use crate::traits::{AssetLedger, Clock, EventSink};

/// Weighted-pool exchange bound to a ledger, a clock and an event sink.
///
/// # Examples
///
/// ```
/// use hydra_weighted::config::PairConfig;
/// use hydra_weighted::domain::{
///     Address, Amount, AssetType, FeeRate, PairKey, Side, Timestamp, WeightSchedule, Weights,
/// };
/// use hydra_weighted::events::NoopSink;
/// use hydra_weighted::exchange::Exchange;
/// use hydra_weighted::ledger::InMemoryLedger;
/// use hydra_weighted::traits::ManualClock;
///
/// let admin = Address::from_bytes([1; 32]);
/// let (eth, usdc) = (AssetType::new("ETH"), AssetType::new("USDC"));
///
/// let mut ledger = InMemoryLedger::new();
/// ledger.credit(&admin, &eth, Amount::new(80_000_000)).expect("credit");
/// ledger.credit(&admin, &usdc, Amount::new(20_000_000)).expect("credit");
///
/// let clock = ManualClock::new(Timestamp::from_secs(0));
/// let mut exchange = Exchange::new(admin, ledger, clock, NoopSink);
///
/// let key = PairKey::new(eth, usdc, AssetType::new("LP")).expect("distinct");
/// let config = PairConfig::new(
///     key.clone(),
///     WeightSchedule::fixed(Weights::from_ratios(80, 20, 100).expect("weights")),
///     FeeRate::from_ratio(3, 1_000).expect("fee"),
///     Amount::new(80_000_000),
///     Amount::new(20_000_000),
/// )
/// .expect("valid config");
/// exchange.create_pair(&admin, config).expect("created");
///
/// let out = exchange
///     .swap(&admin, &key, Amount::new(1_000), Side::A, Amount::ZERO)
///     .expect("swapped");
/// assert_eq!(out.return_amount(), Amount::new(996));
/// assert_eq!(out.fee_amount(), Amount::new(3));
/// ```
#[derive(Debug)]
pub struct Exchange<L, C, S> {
    admin: Address,
    registry: PairRegistry,
    ledger: L,
    clock: C,
    sink: S,
}

impl<L, C, S> Exchange<L, C, S>
where
    L: AssetLedger,
    C: Clock,
    S: EventSink,
{
    /// Creates an exchange with the default registry configuration.
    pub fn new(admin: Address, ledger: L, clock: C, sink: S) -> Self {
        Self {
            admin,
            registry: PairRegistry::default(),
            ledger,
            clock,
            sink,
        }
    }

    /// Creates an exchange with custom pagination bounds.
    ///
    /// # Errors
    ///
    /// Propagates [`RegistryConfig::validate`] errors.
    pub fn with_registry_config(
        admin: Address,
        config: RegistryConfig,
        ledger: L,
        clock: C,
        sink: S,
    ) -> Result<Self> {
        Ok(Self {
            admin,
            registry: PairRegistry::new(config)?,
            ledger,
            clock,
            sink,
        })
    }

    /// Returns the current administrator.
    #[must_use]
    pub const fn admin(&self) -> Address {
        self.admin
    }

    /// Returns the pair registry.
    #[must_use]
    pub const fn registry(&self) -> &PairRegistry {
        &self.registry
    }

    /// Returns the ledger.
    #[must_use]
    pub const fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Returns the ledger mutably, e.g. to fund accounts.  Pool reserves
    /// are held by the pools themselves and are not reachable this way.
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    /// Returns the clock.
    #[must_use]
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Returns the event sink.
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Returns the event sink mutably.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    // -- privileged operations -------------------------------------------------

    /// Creates a pair, seeds it from the caller's balances and mints
    /// `max(initial_a, initial_b)` shares to the caller.
    ///
    /// The seed is provided at unit weights; the configured schedule is
    /// applied afterwards.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Unauthorized`] if `caller` is not the administrator.
    /// - [`AmmError::PairAlreadyListed`] if the key is taken.
    /// - [`AmmError::ShareTokenRegistered`] if the share token already exists.
    /// - [`AmmError::InsufficientBalance`] if the caller cannot fund the seed.
    /// - Validation errors from [`PairConfig::validate`].
    pub fn create_pair(&mut self, caller: &Address, config: PairConfig) -> Result<Amount> {
        self.ensure_admin(caller, "create_pair")?;
        config.validate()?;
        let key = config.key().clone();
        if self.registry.contains(&key) {
            return Err(AmmError::PairAlreadyListed);
        }
        let now = self.clock.now();

        let (mut coin_a, mut coin_b) = withdraw_two(
            &mut self.ledger,
            caller,
            (key.asset_a(), config.initial_a()),
            (key.asset_b(), config.initial_b()),
        )?;
        let cap = match self.ledger.register_share_token(key.share_token()) {
            Ok(cap) => cap,
            Err(e) => {
                refund(&mut self.ledger, caller, [coin_a, coin_b]);
                return Err(e);
            }
        };

        let seeded = WeightedPool::new(key.clone(), cap, config.fee_rate()).and_then(|pool| {
            let quote = pool.quote_provide(config.initial_a(), config.initial_b())?;
            Ok((pool, quote))
        });
        let (mut pool, quote) = match seeded {
            Ok(seeded) => seeded,
            Err(e) => {
                refund(&mut self.ledger, caller, [coin_a, coin_b]);
                return Err(e);
            }
        };
        let shares = match self.ledger.mint(pool.mint_capability(), quote.shares()) {
            Ok(shares) => shares,
            Err(e) => {
                refund(&mut self.ledger, caller, [coin_a, coin_b]);
                return Err(e);
            }
        };
        if let Err(e) = pool.apply_provide(&quote, &mut coin_a, &mut coin_b) {
            burn_or_log(&mut self.ledger, &pool, shares);
            refund(&mut self.ledger, caller, [coin_a, coin_b]);
            return Err(e);
        }
        pool.set_schedule(config.schedule());
        if let Err(e) = self.registry.insert(pool) {
            // Unreachable: the key was checked above and nothing ran in between.
            tracing::error!(%key, error = %e, "listing a freshly created pair failed");
            return Err(e);
        }

        self.ledger.deposit(caller, shares);
        tracing::debug!(
            %key,
            creator = %caller,
            initial_a = %config.initial_a(),
            initial_b = %config.initial_b(),
            shares = %quote.shares(),
            lbp = config.schedule().is_lbp(),
            "pair created"
        );
        self.sink.emit(PoolEvent::PairCreated {
            key,
            creator: *caller,
            schedule: config.schedule(),
            fee_rate: config.fee_rate(),
            amount_a: quote.amount_a(),
            amount_b: quote.amount_b(),
            shares: quote.shares(),
            timestamp: now,
        });
        Ok(quote.shares())
    }

    /// Changes a pair's swap fee rate.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Unauthorized`] if `caller` is not the administrator.
    /// - [`AmmError::PairNotListed`] if `key` is unknown.
    /// - [`AmmError::FeeRateOutOfRange`] if the rate is not below one.
    pub fn update_fee_rate(
        &mut self,
        caller: &Address,
        key: &PairKey,
        fee_rate: FeeRate,
    ) -> Result<()> {
        self.ensure_admin(caller, "update_fee_rate")?;
        let old_rate = self.registry.update_fee_rate(key, fee_rate)?;
        tracing::debug!(%key, %old_rate, new_rate = %fee_rate, "fee rate updated");
        self.sink.emit(PoolEvent::FeeRateUpdated {
            key: key.clone(),
            old_rate,
            new_rate: fee_rate,
            timestamp: self.clock.now(),
        });
        Ok(())
    }

    /// Replaces a pair's weight schedule.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Unauthorized`] if `caller` is not the administrator.
    /// - [`AmmError::PairNotListed`] if `key` is unknown.
    /// - [`AmmError::LbpNotEnded`] while the current LBP schedule has not
    ///   reached its final timestamp.
    /// - [`AmmError::InvalidWeight`] if the new schedule has a zero weight.
    pub fn update_weight_schedule(
        &mut self,
        caller: &Address,
        key: &PairKey,
        schedule: WeightSchedule,
    ) -> Result<()> {
        self.ensure_admin(caller, "update_weight_schedule")?;
        let now = self.clock.now();
        let current = self.registry.pool(key)?.schedule();
        if current.is_lbp() && !current.has_ended(now) {
            return Err(AmmError::LbpNotEnded);
        }
        for point in [schedule.before(), schedule.after()] {
            let w = point.weights();
            Weights::new(w.weight_a(), w.weight_b())?;
        }
        self.registry.update_weight_schedule(key, schedule)?;
        tracing::debug!(%key, lbp = schedule.is_lbp(), "weight schedule updated");
        self.sink.emit(PoolEvent::WeightScheduleUpdated {
            key: key.clone(),
            schedule,
            timestamp: now,
        });
        Ok(())
    }

    /// Hands administration to `new_admin`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Unauthorized`] if `caller` is not the administrator.
    pub fn set_admin(&mut self, caller: &Address, new_admin: Address) -> Result<()> {
        self.ensure_admin(caller, "set_admin")?;
        let old_admin = self.admin;
        self.admin = new_admin;
        tracing::debug!(%old_admin, %new_admin, "admin changed");
        self.sink.emit(PoolEvent::AdminChanged {
            old_admin,
            new_admin,
            timestamp: self.clock.now(),
        });
        Ok(())
    }

    // -- liquidity and trading -------------------------------------------------

    /// Adds liquidity on both sides at the pool's current ratio.
    ///
    /// Only the amounts in the returned [`ProvideOutcome`] leave the
    /// caller's balance; the excess of the non-binding side is never
    /// withdrawn.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PairNotListed`] if `key` is unknown.
    /// - [`AmmError::BelowMinimum`] if fewer than `min_shares` would be minted.
    /// - [`AmmError::InsufficientBalance`] if the caller cannot fund the deposit.
    /// - Errors from [`WeightedPool::quote_provide`].
    pub fn provide(
        &mut self,
        caller: &Address,
        key: &PairKey,
        amount_a: Amount,
        amount_b: Amount,
        min_shares: Amount,
    ) -> Result<ProvideOutcome> {
        let now = self.clock.now();
        let pool = self.registry.pool_mut(key)?;
        let quote = pool.quote_provide(amount_a, amount_b)?;
        if quote.shares() < min_shares {
            return Err(AmmError::BelowMinimum("minted shares below min_shares"));
        }

        let (mut coin_a, mut coin_b) = withdraw_two(
            &mut self.ledger,
            caller,
            (key.asset_a(), quote.amount_a()),
            (key.asset_b(), quote.amount_b()),
        )?;
        let shares = match self.ledger.mint(pool.mint_capability(), quote.shares()) {
            Ok(shares) => shares,
            Err(e) => {
                refund(&mut self.ledger, caller, [coin_a, coin_b]);
                return Err(e);
            }
        };
        if let Err(e) = pool.apply_provide(&quote, &mut coin_a, &mut coin_b) {
            burn_or_log(&mut self.ledger, pool, shares);
            refund(&mut self.ledger, caller, [coin_a, coin_b]);
            return Err(e);
        }
        refund(&mut self.ledger, caller, [coin_a, coin_b, shares]);

        tracing::debug!(
            %key,
            provider = %caller,
            amount_a = %quote.amount_a(),
            amount_b = %quote.amount_b(),
            shares = %quote.shares(),
            "liquidity provided"
        );
        self.sink.emit(PoolEvent::Provided {
            key: key.clone(),
            provider: *caller,
            amount_a: quote.amount_a(),
            amount_b: quote.amount_b(),
            shares: quote.shares(),
            timestamp: now,
        });
        Ok(quote)
    }

    /// Adds liquidity on one side only.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PairNotListed`] if `key` is unknown.
    /// - [`AmmError::BelowMinimum`] if fewer than `min_shares` would be minted.
    /// - [`AmmError::InsufficientBalance`] if the caller cannot fund the deposit.
    /// - Errors from [`WeightedPool::quote_single_asset_provide`], including
    ///   [`AmmError::PriceImpactTooHigh`] and [`AmmError::LbpNotStarted`].
    pub fn single_asset_provide(
        &mut self,
        caller: &Address,
        key: &PairKey,
        amount: Amount,
        side: Side,
        min_shares: Amount,
    ) -> Result<SingleProvideOutcome> {
        let now = self.clock.now();
        let pool = self.registry.pool_mut(key)?;
        let quote = pool.quote_single_asset_provide(amount, side, now)?;
        if quote.shares() < min_shares {
            return Err(AmmError::BelowMinimum("minted shares below min_shares"));
        }

        let mut coin = self.ledger.withdraw(caller, key.asset(side), amount)?;
        let shares = match self.ledger.mint(pool.mint_capability(), quote.shares()) {
            Ok(shares) => shares,
            Err(e) => {
                self.ledger.deposit(caller, coin);
                return Err(e);
            }
        };
        if let Err(e) = pool.apply_single_asset_provide(&quote, &mut coin) {
            burn_or_log(&mut self.ledger, pool, shares);
            self.ledger.deposit(caller, coin);
            return Err(e);
        }
        refund(&mut self.ledger, caller, [coin, shares]);

        tracing::debug!(
            %key,
            provider = %caller,
            %side,
            %amount,
            fee = %quote.fee_amount(),
            shares = %quote.shares(),
            "single-asset liquidity provided"
        );
        self.sink.emit(PoolEvent::SingleAssetProvided {
            key: key.clone(),
            provider: *caller,
            side,
            amount,
            fee_amount: quote.fee_amount(),
            shares: quote.shares(),
            timestamp: now,
        });
        Ok(quote)
    }

    /// Burns `shares` for a proportional slice of both balances.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PairNotListed`] if `key` is unknown.
    /// - [`AmmError::BelowMinimum`] if either payout is below its minimum.
    /// - [`AmmError::InsufficientBalance`] if the caller holds fewer shares.
    /// - Errors from [`WeightedPool::quote_withdraw`].
    pub fn withdraw(
        &mut self,
        caller: &Address,
        key: &PairKey,
        shares: Amount,
        min_a: Amount,
        min_b: Amount,
    ) -> Result<WithdrawOutcome> {
        let now = self.clock.now();
        let pool = self.registry.pool_mut(key)?;
        let quote = pool.quote_withdraw(shares)?;
        if quote.amount_a() < min_a {
            return Err(AmmError::BelowMinimum("asset A payout below min_a"));
        }
        if quote.amount_b() < min_b {
            return Err(AmmError::BelowMinimum("asset B payout below min_b"));
        }

        let share_coin = self.ledger.withdraw(caller, key.share_token(), shares)?;
        let (out_a, out_b) = match pool.apply_withdraw(&quote) {
            Ok(out) => out,
            Err(e) => {
                self.ledger.deposit(caller, share_coin);
                return Err(e);
            }
        };
        if let Err(e) = self.ledger.burn(pool.mint_capability(), share_coin) {
            if let Err(revert) = pool.revert_withdraw(&quote, out_a, out_b) {
                tracing::error!(%key, error = %revert, "reverting a withdrawal failed");
            }
            return Err(e);
        }
        refund(&mut self.ledger, caller, [out_a, out_b]);

        tracing::debug!(
            %key,
            provider = %caller,
            %shares,
            amount_a = %quote.amount_a(),
            amount_b = %quote.amount_b(),
            "liquidity withdrawn"
        );
        self.sink.emit(PoolEvent::Withdrawn {
            key: key.clone(),
            provider: *caller,
            shares,
            amount_a: quote.amount_a(),
            amount_b: quote.amount_b(),
            timestamp: now,
        });
        Ok(quote)
    }

    /// Swaps `offer` of `offer_side` for the other asset.
    ///
    /// `min_return = Amount::ZERO` disables the slippage check.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PairNotListed`] if `key` is unknown.
    /// - [`AmmError::BelowMinimum`] if the return is below `min_return`.
    /// - [`AmmError::InsufficientBalance`] if the caller cannot fund the offer.
    /// - Errors from [`WeightedPool::quote_swap`], including
    ///   [`AmmError::LbpNotStarted`].
    pub fn swap(
        &mut self,
        caller: &Address,
        key: &PairKey,
        offer: Amount,
        offer_side: Side,
        min_return: Amount,
    ) -> Result<SwapOutcome> {
        let now = self.clock.now();
        let pool = self.registry.pool_mut(key)?;
        let quote = pool.quote_swap(offer, offer_side, now)?;
        if quote.return_amount() < min_return {
            return Err(AmmError::BelowMinimum("swap return below min_return"));
        }

        let mut coin = self.ledger.withdraw(caller, key.asset(offer_side), offer)?;
        let paid = match pool.apply_swap(&quote, &mut coin) {
            Ok(paid) => paid,
            Err(e) => {
                self.ledger.deposit(caller, coin);
                return Err(e);
            }
        };
        refund(&mut self.ledger, caller, [coin, paid]);

        tracing::debug!(
            %key,
            trader = %caller,
            %offer_side,
            %offer,
            returned = %quote.return_amount(),
            fee = %quote.fee_amount(),
            "swap executed"
        );
        self.sink.emit(PoolEvent::Swapped {
            key: key.clone(),
            trader: *caller,
            offer_side,
            offer_amount: offer,
            return_amount: quote.return_amount(),
            fee_amount: quote.fee_amount(),
            timestamp: now,
        });
        Ok(quote)
    }

    // -- views -----------------------------------------------------------------

    /// Quotes a swap at the current time without executing it.
    ///
    /// # Errors
    ///
    /// Same as [`WeightedPool::quote_swap`], plus [`AmmError::PairNotListed`].
    pub fn quote_swap(&self, key: &PairKey, offer: Amount, offer_side: Side) -> Result<SwapOutcome> {
        self.registry
            .pool(key)?
            .quote_swap(offer, offer_side, self.clock.now())
    }

    /// Quotes a dual-asset provide.
    ///
    /// # Errors
    ///
    /// Same as [`WeightedPool::quote_provide`], plus [`AmmError::PairNotListed`].
    pub fn quote_provide(
        &self,
        key: &PairKey,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<ProvideOutcome> {
        self.registry.pool(key)?.quote_provide(amount_a, amount_b)
    }

    /// Quotes a single-asset provide at the current time.
    ///
    /// # Errors
    ///
    /// Same as [`WeightedPool::quote_single_asset_provide`], plus
    /// [`AmmError::PairNotListed`].
    pub fn quote_single_asset_provide(
        &self,
        key: &PairKey,
        amount: Amount,
        side: Side,
    ) -> Result<SingleProvideOutcome> {
        self.registry
            .pool(key)?
            .quote_single_asset_provide(amount, side, self.clock.now())
    }

    /// Quotes a withdrawal.
    ///
    /// # Errors
    ///
    /// Same as [`WeightedPool::quote_withdraw`], plus [`AmmError::PairNotListed`].
    pub fn quote_withdraw(&self, key: &PairKey, shares: Amount) -> Result<WithdrawOutcome> {
        self.registry.pool(key)?.quote_withdraw(shares)
    }

    /// Returns the current spot price of the return side in units of
    /// `offer_side`.
    ///
    /// # Errors
    ///
    /// Same as [`WeightedPool::spot_price`], plus [`AmmError::PairNotListed`].
    pub fn spot_price(&self, key: &PairKey, offer_side: Side) -> Result<Decimal> {
        self.registry
            .pool(key)?
            .spot_price(offer_side, self.clock.now())
    }

    /// Returns the weights in force now.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PairNotListed`] if `key` is unknown.
    pub fn current_weights(&self, key: &PairKey) -> Result<Weights> {
        self.registry.pool(key)?.current_weights(self.clock.now())
    }

    /// Returns a snapshot of one pair.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PairNotListed`] if `key` is unknown.
    pub fn pair_info(&self, key: &PairKey) -> Result<PairInfo> {
        self.registry.get_pair(key)
    }

    /// Lists pairs after `start_after`.
    ///
    /// # Errors
    ///
    /// Same as [`PairRegistry::get_pairs`].
    pub fn get_pairs(&self, start_after: Option<&PairKey>, limit: Option<usize>) -> Result<PairPage> {
        self.registry.get_pairs(start_after, limit)
    }

    /// Lists every pair.
    #[must_use]
    pub fn get_all_pairs(&self) -> Vec<PairInfo> {
        self.registry.get_all_pairs()
    }

    /// Returns the ledger supply of a pair's share token.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PairNotListed`] if `key` is unknown.
    pub fn share_supply(&self, key: &PairKey) -> Result<Amount> {
        let pool = self.registry.pool(key)?;
        Ok(self.ledger.supply(pool.key().share_token()))
    }

    fn ensure_admin(&self, caller: &Address, action: &'static str) -> Result<()> {
        if *caller != self.admin {
            tracing::warn!(%caller, action, "rejected privileged call");
            return Err(AmmError::Unauthorized);
        }
        Ok(())
    }
}

/// Withdraws two coins, returning the first to `holder` if the second
/// withdrawal fails.
fn withdraw_two<L: AssetLedger>(
    ledger: &mut L,
    holder: &Address,
    (asset_a, amount_a): (&AssetType, Amount),
    (asset_b, amount_b): (&AssetType, Amount),
) -> Result<(Coin, Coin)> {
    let coin_a = ledger.withdraw(holder, asset_a, amount_a)?;
    match ledger.withdraw(holder, asset_b, amount_b) {
        Ok(coin_b) => Ok((coin_a, coin_b)),
        Err(e) => {
            ledger.deposit(holder, coin_a);
            Err(e)
        }
    }
}

/// Deposits every coin back to `holder`.
fn refund<L: AssetLedger, const N: usize>(ledger: &mut L, holder: &Address, coins: [Coin; N]) {
    for coin in coins {
        ledger.deposit(holder, coin);
    }
}

/// Burns shares minted for a commit that then failed.
fn burn_or_log<L: AssetLedger>(ledger: &mut L, pool: &WeightedPool, shares: Coin) {
    if let Err(e) = ledger.burn(pool.mint_capability(), shares) {
        tracing::error!(key = %pool.key(), error = %e, "burning unused shares failed");
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{Timestamp, WeightPoint};
    use crate::events::RecordingSink;
    use crate::ledger::InMemoryLedger;
    use crate::traits::ManualClock;
    use std::sync::Arc;

    type TestExchange = Exchange<InMemoryLedger, Arc<ManualClock>, RecordingSink>;

    // -- helpers --------------------------------------------------------------

    fn admin() -> Address {
        Address::from_bytes([1; 32])
    }

    fn alice() -> Address {
        Address::from_bytes([2; 32])
    }

    fn key() -> PairKey {
        let Ok(k) = PairKey::new(AssetType::new("X"), AssetType::new("Y"), AssetType::new("LP"))
        else {
            panic!("valid key");
        };
        k
    }

    fn weights(a: u128, b: u128) -> Weights {
        let Ok(w) = Weights::from_ratios(a, b, 100) else {
            panic!("valid weights");
        };
        w
    }

    fn fee() -> FeeRate {
        let Ok(f) = FeeRate::from_ratio(3, 1_000) else {
            panic!("valid fee");
        };
        f
    }

    fn config(schedule: WeightSchedule) -> PairConfig {
        let Ok(cfg) = PairConfig::new(
            key(),
            schedule,
            fee(),
            Amount::new(80_000_000),
            Amount::new(20_000_000),
        ) else {
            panic!("valid config");
        };
        cfg
    }

    fn setup(schedule: WeightSchedule) -> (TestExchange, Arc<ManualClock>) {
        let mut ledger = InMemoryLedger::new();
        for (holder, amount) in [(admin(), 80_000_000), (alice(), 1_000_000)] {
            for asset in ["X", "Y"] {
                let Ok(()) = ledger.credit(&holder, &AssetType::new(asset), Amount::new(amount))
                else {
                    panic!("credit");
                };
            }
        }
        let clock = Arc::new(ManualClock::new(Timestamp::ZERO));
        let mut exchange = Exchange::new(admin(), ledger, Arc::clone(&clock), RecordingSink::new());
        let Ok(_) = exchange.create_pair(&admin(), config(schedule)) else {
            panic!("create pair");
        };
        exchange.sink_mut().take();
        (exchange, clock)
    }

    fn fixed() -> (TestExchange, Arc<ManualClock>) {
        setup(WeightSchedule::fixed(weights(80, 20)))
    }

    fn balance(exchange: &TestExchange, holder: &Address, asset: &str) -> Amount {
        exchange.ledger().balance(holder, &AssetType::new(asset))
    }

    // -- create_pair ----------------------------------------------------------

    #[test]
    fn create_pair_mints_max_initial_to_creator() {
        let (exchange, _) = fixed();
        assert_eq!(balance(&exchange, &admin(), "LP"), Amount::new(80_000_000));
        assert_eq!(balance(&exchange, &admin(), "X"), Amount::ZERO);
        assert_eq!(balance(&exchange, &admin(), "Y"), Amount::new(60_000_000));
        assert_eq!(exchange.share_supply(&key()), Ok(Amount::new(80_000_000)));
        assert_eq!(exchange.current_weights(&key()), Ok(weights(80, 20)));
    }

    #[test]
    fn create_pair_twice_rejected() {
        let (mut exchange, _) = fixed();
        assert_eq!(
            exchange.create_pair(&admin(), config(WeightSchedule::fixed(weights(50, 50)))),
            Err(AmmError::PairAlreadyListed)
        );
    }

    #[test]
    fn create_pair_requires_admin() {
        let mut exchange = Exchange::new(
            admin(),
            InMemoryLedger::new(),
            ManualClock::default(),
            RecordingSink::new(),
        );
        assert_eq!(
            exchange.create_pair(&alice(), config(WeightSchedule::fixed(weights(80, 20)))),
            Err(AmmError::Unauthorized)
        );
        assert!(exchange.registry().is_empty());
    }

    #[test]
    fn underfunded_create_pair_changes_nothing() {
        let mut ledger = InMemoryLedger::new();
        let Ok(()) = ledger.credit(&admin(), &AssetType::new("X"), Amount::new(80_000_000)) else {
            panic!("credit");
        };
        let mut exchange =
            Exchange::new(admin(), ledger, ManualClock::default(), RecordingSink::new());
        assert_eq!(
            exchange.create_pair(&admin(), config(WeightSchedule::fixed(weights(80, 20)))),
            Err(AmmError::InsufficientBalance)
        );
        assert_eq!(
            exchange.ledger().balance(&admin(), &AssetType::new("X")),
            Amount::new(80_000_000)
        );
        assert!(!exchange.ledger().is_share_token(&AssetType::new("LP")));
        assert!(exchange.sink().is_empty());
    }

    // -- provide / withdraw ---------------------------------------------------

    #[test]
    fn provide_takes_only_binding_amounts() {
        let (mut exchange, _) = fixed();
        let Ok(out) = exchange.provide(
            &alice(),
            &key(),
            Amount::new(800_000),
            Amount::new(1_000_000),
            Amount::ZERO,
        ) else {
            panic!("provide");
        };
        assert_eq!(out.amount_b(), Amount::new(200_000));
        assert_eq!(balance(&exchange, &alice(), "X"), Amount::new(200_000));
        assert_eq!(balance(&exchange, &alice(), "Y"), Amount::new(800_000));
        assert_eq!(balance(&exchange, &alice(), "LP"), Amount::new(800_000));
        assert_eq!(exchange.sink().len(), 1);
    }

    #[test]
    fn provide_below_min_shares_changes_nothing() {
        let (mut exchange, _) = fixed();
        let before = exchange.pair_info(&key());
        assert!(matches!(
            exchange.provide(
                &alice(),
                &key(),
                Amount::new(800_000),
                Amount::new(200_000),
                Amount::new(800_001),
            ),
            Err(AmmError::BelowMinimum(_))
        ));
        assert_eq!(exchange.pair_info(&key()), before);
        assert_eq!(balance(&exchange, &alice(), "X"), Amount::new(1_000_000));
        assert!(exchange.sink().is_empty());
    }

    #[test]
    fn underfunded_provide_refunds_first_asset() {
        let (mut exchange, _) = fixed();
        let bob = Address::from_bytes([3; 32]);
        let Ok(()) = exchange
            .ledger_mut()
            .credit(&bob, &AssetType::new("X"), Amount::new(800_000))
        else {
            panic!("credit");
        };
        assert_eq!(
            exchange.provide(&bob, &key(), Amount::new(800_000), Amount::new(200_000), Amount::ZERO),
            Err(AmmError::InsufficientBalance)
        );
        assert_eq!(balance(&exchange, &bob, "X"), Amount::new(800_000));
        assert_eq!(exchange.share_supply(&key()), Ok(Amount::new(80_000_000)));
    }

    #[test]
    fn withdraw_burns_shares() {
        let (mut exchange, _) = fixed();
        let Ok(out) = exchange.withdraw(
            &admin(),
            &key(),
            Amount::new(8_000_000),
            Amount::ZERO,
            Amount::ZERO,
        ) else {
            panic!("withdraw");
        };
        assert_eq!(out.amount_a(), Amount::new(8_000_000));
        assert_eq!(out.amount_b(), Amount::new(2_000_000));
        assert_eq!(exchange.share_supply(&key()), Ok(Amount::new(72_000_000)));
        assert_eq!(balance(&exchange, &admin(), "X"), Amount::new(8_000_000));
    }

    #[test]
    fn withdraw_without_shares_rejected() {
        let (mut exchange, _) = fixed();
        assert_eq!(
            exchange.withdraw(&alice(), &key(), Amount::new(1), Amount::ZERO, Amount::ZERO),
            Err(AmmError::InsufficientBalance)
        );
    }

    // -- swap -----------------------------------------------------------------

    #[test]
    fn swap_slippage_guard() {
        let (mut exchange, _) = fixed();
        assert!(matches!(
            exchange.swap(&alice(), &key(), Amount::new(1_000), Side::A, Amount::new(997)),
            Err(AmmError::BelowMinimum(_))
        ));
        assert_eq!(balance(&exchange, &alice(), "X"), Amount::new(1_000_000));
        let Ok(out) = exchange.swap(&alice(), &key(), Amount::new(1_000), Side::A, Amount::new(996))
        else {
            panic!("swap");
        };
        assert_eq!(out.return_amount(), Amount::new(996));
        assert_eq!(balance(&exchange, &alice(), "Y"), Amount::new(1_000_996));
    }

    #[test]
    fn lbp_swap_waits_for_launch() {
        let Ok(schedule) = WeightSchedule::new(
            WeightPoint::new(weights(99, 1), Timestamp::from_secs(2_000)),
            WeightPoint::new(weights(61, 39), Timestamp::from_secs(3_000)),
        ) else {
            panic!("valid schedule");
        };
        let (mut exchange, clock) = setup(schedule);
        assert_eq!(
            exchange.swap(&alice(), &key(), Amount::new(1_000), Side::B, Amount::ZERO),
            Err(AmmError::LbpNotStarted)
        );
        clock.set(Timestamp::from_secs(2_500));
        assert_eq!(exchange.current_weights(&key()), Ok(weights(80, 20)));
        assert!(exchange
            .swap(&alice(), &key(), Amount::new(1_000), Side::B, Amount::ZERO)
            .is_ok());
    }

    // -- administration -------------------------------------------------------

    #[test]
    fn fee_update_requires_admin() {
        let (mut exchange, _) = fixed();
        assert_eq!(
            exchange.update_fee_rate(&alice(), &key(), FeeRate::ZERO),
            Err(AmmError::Unauthorized)
        );
        assert_eq!(exchange.update_fee_rate(&admin(), &key(), FeeRate::ZERO), Ok(()));
        let Ok(out) = exchange.quote_swap(&key(), Amount::new(1_000), Side::A) else {
            panic!("quote");
        };
        assert_eq!(out.fee_amount(), Amount::ZERO);
        assert_eq!(exchange.sink().len(), 1);
    }

    #[test]
    fn schedule_update_blocked_until_lbp_ends() {
        let Ok(schedule) = WeightSchedule::new(
            WeightPoint::new(weights(99, 1), Timestamp::from_secs(2_000)),
            WeightPoint::new(weights(61, 39), Timestamp::from_secs(3_000)),
        ) else {
            panic!("valid schedule");
        };
        let (mut exchange, clock) = setup(schedule);
        let next = WeightSchedule::fixed(weights(50, 50));
        assert_eq!(
            exchange.update_weight_schedule(&admin(), &key(), next),
            Err(AmmError::LbpNotEnded)
        );
        clock.set(Timestamp::from_secs(3_000));
        assert_eq!(exchange.update_weight_schedule(&admin(), &key(), next), Ok(()));
        assert_eq!(exchange.current_weights(&key()), Ok(weights(50, 50)));
    }

    #[test]
    fn admin_handover() {
        let (mut exchange, _) = fixed();
        assert_eq!(exchange.set_admin(&alice(), alice()), Err(AmmError::Unauthorized));
        assert_eq!(exchange.set_admin(&admin(), alice()), Ok(()));
        assert_eq!(exchange.admin(), alice());
        assert_eq!(
            exchange.update_fee_rate(&admin(), &key(), FeeRate::ZERO),
            Err(AmmError::Unauthorized)
        );
    }
}
