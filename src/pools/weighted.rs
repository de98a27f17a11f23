//! Weighted two-asset pool (Balancer style) with optional liquidity
//! bootstrapping schedule.
//!
//! The pool invariant is
//!
//! ```text
//! B_a ^ w_a · B_b ^ w_b = k
//! ```
//!
//! where `B` are the balances and `w` the weights in force at the time
//! of the operation.  All amounts round **toward zero**, so rounding
//! never pays out more than the invariant allows.
//!
//! # Swap Algorithm (offer side `i`, return side `o`)
//!
//! 1. `fee = fee_rate × offer`
//! 2. `adjusted = offer − fee`
//! 3. `base = B_i / (B_i + adjusted)`, `exponent = w_i / w_o`
//! 4. `return = (1 − base ^ exponent) × B_o`
//! 5. `B_i += offer` (the fee stays in the pool), `B_o −= return`
//!
//! # Single-Asset Provide (side `i`)
//!
//! ```text
//! nw     = w_i / (w_a + w_b)
//! fee    = fee_rate × (1 − nw) × amount
//! ratio  = ((B_i + amount − fee) / B_i) ^ nw
//! shares = ratio × supply − supply
//! ```
//!
//! Every `quote_*` method is a pure function of the pool state and the
//! supplied timestamp.  The [`Exchange`](crate::exchange::Exchange)
//! quotes first, moves assets through the ledger, then commits with the
//! matching `apply_*` method; an `apply_*` call validates before it
//! mutates anything.

use crate::domain::{
    Amount, FeeRate, PairKey, ProvideOutcome, Side, SingleProvideOutcome, SwapOutcome, Timestamp,
    WeightSchedule, Weights, WithdrawOutcome,
};
use crate::error::{AmmError, Result};
use crate::ledger::{Coin, MintCapability};
use crate::math::{pow, Decimal};

/// A weighted pool holding two asset balances and the mint authority of
/// its share token.
///
/// # State
///
/// - `reserve_a` / `reserve_b`: the pooled assets (fees included)
/// - `share_supply`: outstanding shares, always equal to the ledger's
///   supply of the share token
/// - `schedule`: static or LBP weight schedule
/// - `fee_rate`: swap fee, strictly below one
#[derive(Debug, PartialEq, Eq)]
pub struct WeightedPool {
    key: PairKey,
    reserve_a: Coin,
    reserve_b: Coin,
    mint_cap: MintCapability,
    share_supply: Amount,
    schedule: WeightSchedule,
    fee_rate: FeeRate,
}

impl WeightedPool {
    /// Creates an empty pool with unit weights.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidAsset`] if the capability mints a
    /// different share token than the key names.
    pub(crate) fn new(key: PairKey, mint_cap: MintCapability, fee_rate: FeeRate) -> Result<Self> {
        if mint_cap.share_token() != key.share_token() {
            return Err(AmmError::InvalidAsset(
                "mint capability does not match the pair's share token",
            ));
        }
        Ok(Self {
            reserve_a: Coin::zero(key.asset_a().clone()),
            reserve_b: Coin::zero(key.asset_b().clone()),
            key,
            mint_cap,
            share_supply: Amount::ZERO,
            schedule: WeightSchedule::fixed(Weights::EQUAL),
            fee_rate,
        })
    }

    /// Returns the pair key.
    #[must_use]
    pub const fn key(&self) -> &PairKey {
        &self.key
    }

    /// Returns the balance of asset A.
    #[must_use]
    pub const fn balance_a(&self) -> Amount {
        self.reserve_a.value()
    }

    /// Returns the balance of asset B.
    #[must_use]
    pub const fn balance_b(&self) -> Amount {
        self.reserve_b.value()
    }

    /// Returns the balance of `side`.
    #[must_use]
    pub const fn balance(&self, side: Side) -> Amount {
        self.reserve(side).value()
    }

    /// Returns the outstanding share supply.
    #[must_use]
    pub const fn share_supply(&self) -> Amount {
        self.share_supply
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

    /// Returns `true` if the pool trades on a time-varying schedule.
    #[must_use]
    pub fn is_lbp(&self) -> bool {
        self.schedule.is_lbp()
    }

    /// Resolves the weights in force at `now`.
    ///
    /// # Errors
    ///
    /// Propagates arithmetic errors from [`WeightSchedule::resolve`].
    pub fn current_weights(&self, now: Timestamp) -> Result<Weights> {
        self.schedule.resolve(now)
    }

    /// Returns the spot price of the return side in units of the offer
    /// side: `(B_offer / w_offer) / (B_return / w_return)`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroLiquidity`] if either balance is zero.
    /// - [`AmmError::Overflow`] if the price is not representable.
    pub fn spot_price(&self, offer_side: Side, now: Timestamp) -> Result<Decimal> {
        let offer_pool = self.balance(offer_side);
        let return_pool = self.balance(offer_side.other());
        if offer_pool.is_zero() || return_pool.is_zero() {
            return Err(AmmError::ZeroLiquidity);
        }
        let weights = self.current_weights(now)?;
        Decimal::from_ratio(offer_pool.get(), return_pool.get())?
            .checked_mul(weights.of(offer_side.other()))?
            .checked_div(weights.of(offer_side))
    }

    // -- quotes ---------------------------------------------------------------

    /// Quotes a dual-asset provide.
    ///
    /// With no shares outstanding both amounts are taken in full and
    /// `max(amount_a, amount_b)` shares are minted.  Otherwise the smaller
    /// of `amount_a / B_a` and `amount_b / B_b` is binding: the other side
    /// is scaled down to match it and `binding_ratio × supply` shares are
    /// minted.  The excess stays with the caller.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidQuantity`] if both amounts are zero, if the
    ///   first provide is one-sided, or if no shares would be minted.
    /// - [`AmmError::ZeroLiquidity`] if a balance is zero while shares are
    ///   outstanding.
    /// - [`AmmError::Overflow`] if a balance or the supply would overflow.
    pub fn quote_provide(&self, amount_a: Amount, amount_b: Amount) -> Result<ProvideOutcome> {
        if amount_a.is_zero() && amount_b.is_zero() {
            return Err(AmmError::InvalidQuantity("provide amounts are both zero"));
        }

        let (take_a, take_b, shares) = if self.share_supply.is_zero() {
            if amount_a.is_zero() || amount_b.is_zero() {
                return Err(AmmError::InvalidQuantity(
                    "first provide requires both assets",
                ));
            }
            (amount_a, amount_b, amount_a.max(amount_b))
        } else {
            let (balance_a, balance_b) = (self.balance_a(), self.balance_b());
            if balance_a.is_zero() || balance_b.is_zero() {
                return Err(AmmError::ZeroLiquidity);
            }
            let ratio_a = Decimal::from_ratio(amount_a.get(), balance_a.get())?;
            let ratio_b = Decimal::from_ratio(amount_b.get(), balance_b.get())?;
            if ratio_a > ratio_b {
                (
                    ratio_b.mul_amount(balance_a)?,
                    amount_b,
                    ratio_b.mul_amount(self.share_supply)?,
                )
            } else {
                (
                    amount_a,
                    ratio_a.mul_amount(balance_b)?,
                    ratio_a.mul_amount(self.share_supply)?,
                )
            }
        };

        if shares.is_zero() {
            return Err(AmmError::InvalidQuantity("provide would mint zero shares"));
        }
        self.balance_a()
            .checked_add(&take_a)
            .ok_or(AmmError::Overflow("balance_a overflow on provide"))?;
        self.balance_b()
            .checked_add(&take_b)
            .ok_or(AmmError::Overflow("balance_b overflow on provide"))?;
        self.share_supply
            .checked_add(&shares)
            .ok_or(AmmError::Overflow("share supply overflow on provide"))?;

        Ok(ProvideOutcome::new(take_a, take_b, shares))
    }

    /// Quotes a single-asset provide of `amount` on `side` at `now`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidQuantity`] if `amount` is zero or no shares
    ///   would be minted.
    /// - [`AmmError::ZeroLiquidity`] if the pool has no shares or no
    ///   balance on `side`.
    /// - [`AmmError::PriceImpactTooHigh`] if `amount >= balance(side)`.
    /// - [`AmmError::LbpNotStarted`] before an LBP schedule starts.
    /// - Arithmetic errors from the power approximation.
    pub fn quote_single_asset_provide(
        &self,
        amount: Amount,
        side: Side,
        now: Timestamp,
    ) -> Result<SingleProvideOutcome> {
        if amount.is_zero() {
            return Err(AmmError::InvalidQuantity("provide amount is zero"));
        }
        let pool_balance = self.balance(side);
        if self.share_supply.is_zero() || pool_balance.is_zero() {
            return Err(AmmError::ZeroLiquidity);
        }
        if amount >= pool_balance {
            return Err(AmmError::PriceImpactTooHigh);
        }
        self.ensure_trading(now)?;

        let weights = self.current_weights(now)?;
        let normalized = weights.normalized(side)?;
        let fee = self
            .fee_rate
            .as_decimal()
            .checked_mul(normalized.complement()?)?
            .mul_amount(amount)?;
        let net = amount
            .checked_sub(&fee)
            .ok_or(AmmError::Underflow("single provide fee exceeds amount"))?;

        // net < amount < pool_balance, so the sum fits and base < 2
        let grown = pool_balance
            .checked_add(&net)
            .ok_or(AmmError::Overflow("balance overflow on single provide"))?;
        let base = Decimal::from_ratio(grown.get(), pool_balance.get())?;
        let pool_ratio = pow(base, normalized)?;
        let new_supply = pool_ratio.mul_amount(self.share_supply)?;
        let shares = new_supply
            .checked_sub(&self.share_supply)
            .unwrap_or(Amount::ZERO);

        if shares.is_zero() {
            return Err(AmmError::InvalidQuantity(
                "single provide would mint zero shares",
            ));
        }
        pool_balance
            .checked_add(&amount)
            .ok_or(AmmError::Overflow("balance overflow on single provide"))?;

        Ok(SingleProvideOutcome::new(side, amount, fee, shares))
    }

    /// Quotes burning `shares` for a proportional slice of both balances.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidQuantity`] if `shares` is zero.
    /// - [`AmmError::ZeroLiquidity`] if no shares are outstanding.
    /// - [`AmmError::InsufficientBalance`] if `shares` exceeds the supply.
    pub fn quote_withdraw(&self, shares: Amount) -> Result<WithdrawOutcome> {
        if shares.is_zero() {
            return Err(AmmError::InvalidQuantity("withdraw shares is zero"));
        }
        if self.share_supply.is_zero() {
            return Err(AmmError::ZeroLiquidity);
        }
        if shares > self.share_supply {
            return Err(AmmError::InsufficientBalance);
        }
        let share_ratio = Decimal::from_ratio(shares.get(), self.share_supply.get())?;
        Ok(WithdrawOutcome::new(
            shares,
            share_ratio.mul_amount(self.balance_a())?,
            share_ratio.mul_amount(self.balance_b())?,
        ))
    }

    /// Quotes swapping `offer` of `offer_side` at `now`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidQuantity`] if `offer` is zero or the swap
    ///   would return nothing.
    /// - [`AmmError::LbpNotStarted`] before an LBP schedule starts.
    /// - [`AmmError::ZeroLiquidity`] if either balance is zero or the swap
    ///   would drain the return side.
    /// - Arithmetic errors from the power approximation.
    pub fn quote_swap(&self, offer: Amount, offer_side: Side, now: Timestamp) -> Result<SwapOutcome> {
        if offer.is_zero() {
            return Err(AmmError::InvalidQuantity("offer amount is zero"));
        }
        self.ensure_trading(now)?;

        let return_side = offer_side.other();
        let offer_pool = self.balance(offer_side);
        let return_pool = self.balance(return_side);
        if offer_pool.is_zero() || return_pool.is_zero() {
            return Err(AmmError::ZeroLiquidity);
        }
        offer_pool
            .checked_add(&offer)
            .ok_or(AmmError::Overflow("offer balance overflow on swap"))?;

        let weights = self.current_weights(now)?;
        let fee = self.fee_rate.apply(offer)?;
        let adjusted = offer
            .checked_sub(&fee)
            .ok_or(AmmError::Underflow("swap fee exceeds offer"))?;

        let exponent = weights.of(offer_side).checked_div(weights.of(return_side))?;
        let grown = offer_pool
            .checked_add(&adjusted)
            .ok_or(AmmError::Overflow("offer balance overflow on swap"))?;
        let base = Decimal::from_ratio(offer_pool.get(), grown.get())?;
        let retained = pow(base, exponent)?;
        let return_amount = Decimal::ONE.saturating_sub(retained).mul_amount(return_pool)?;

        if return_amount >= return_pool {
            return Err(AmmError::ZeroLiquidity);
        }
        if return_amount.is_zero() {
            return Err(AmmError::InvalidQuantity("swap would return nothing"));
        }
        Ok(SwapOutcome::new(offer_side, offer, return_amount, fee))
    }

    // -- commits --------------------------------------------------------------

    /// Takes the quoted amounts out of `coin_a` and `coin_b` and records
    /// the minted shares.  Whatever the quote did not take stays in the
    /// coins.
    pub(crate) fn apply_provide(
        &mut self,
        outcome: &ProvideOutcome,
        coin_a: &mut Coin,
        coin_b: &mut Coin,
    ) -> Result<()> {
        self.check_incoming(Side::A, coin_a, outcome.amount_a())?;
        self.check_incoming(Side::B, coin_b, outcome.amount_b())?;
        let supply = self
            .share_supply
            .checked_add(&outcome.shares())
            .ok_or(AmmError::Overflow("share supply overflow on provide"))?;

        self.reserve_a.merge(coin_a.extract(outcome.amount_a())?)?;
        self.reserve_b.merge(coin_b.extract(outcome.amount_b())?)?;
        self.share_supply = supply;
        Ok(())
    }

    /// Takes the quoted deposit out of `coin` and records the minted shares.
    pub(crate) fn apply_single_asset_provide(
        &mut self,
        outcome: &SingleProvideOutcome,
        coin: &mut Coin,
    ) -> Result<()> {
        let side = outcome.side();
        self.check_incoming(side, coin, outcome.amount())?;
        let supply = self
            .share_supply
            .checked_add(&outcome.shares())
            .ok_or(AmmError::Overflow("share supply overflow on single provide"))?;

        self.reserve_mut(side).merge(coin.extract(outcome.amount())?)?;
        self.share_supply = supply;
        Ok(())
    }

    /// Pays out the quoted amounts and records the burned shares.
    pub(crate) fn apply_withdraw(&mut self, outcome: &WithdrawOutcome) -> Result<(Coin, Coin)> {
        let supply = self
            .share_supply
            .checked_sub(&outcome.shares())
            .ok_or(AmmError::InsufficientBalance)?;
        if outcome.amount_a() > self.balance_a() || outcome.amount_b() > self.balance_b() {
            return Err(AmmError::ZeroLiquidity);
        }

        let out_a = self.reserve_a.extract(outcome.amount_a())?;
        let out_b = self.reserve_b.extract(outcome.amount_b())?;
        self.share_supply = supply;
        Ok((out_a, out_b))
    }

    /// Reverses [`apply_withdraw`](Self::apply_withdraw) when the share
    /// burn that follows it fails.
    pub(crate) fn revert_withdraw(
        &mut self,
        outcome: &WithdrawOutcome,
        out_a: Coin,
        out_b: Coin,
    ) -> Result<()> {
        self.reserve_a.merge(out_a)?;
        self.reserve_b.merge(out_b)?;
        self.share_supply = self
            .share_supply
            .checked_add(&outcome.shares())
            .ok_or(AmmError::Overflow("share supply overflow on revert"))?;
        Ok(())
    }

    /// Takes the offer out of `offer` and pays out the quoted return.
    pub(crate) fn apply_swap(&mut self, outcome: &SwapOutcome, offer: &mut Coin) -> Result<Coin> {
        let offer_side = outcome.offer_side();
        let return_side = outcome.return_side();
        self.check_incoming(offer_side, offer, outcome.offer_amount())?;
        if outcome.return_amount() >= self.balance(return_side) {
            return Err(AmmError::ZeroLiquidity);
        }

        self.reserve_mut(offer_side)
            .merge(offer.extract(outcome.offer_amount())?)?;
        self.reserve_mut(return_side).extract(outcome.return_amount())
    }

    /// Returns the share token's mint authority.
    pub(crate) const fn mint_capability(&self) -> &MintCapability {
        &self.mint_cap
    }

    pub(crate) fn set_fee_rate(&mut self, fee_rate: FeeRate) {
        self.fee_rate = fee_rate;
    }

    pub(crate) fn set_schedule(&mut self, schedule: WeightSchedule) {
        self.schedule = schedule;
    }

    // -- helpers --------------------------------------------------------------

    const fn reserve(&self, side: Side) -> &Coin {
        match side {
            Side::A => &self.reserve_a,
            Side::B => &self.reserve_b,
        }
    }

    fn reserve_mut(&mut self, side: Side) -> &mut Coin {
        match side {
            Side::A => &mut self.reserve_a,
            Side::B => &mut self.reserve_b,
        }
    }

    /// LBP pools refuse price-moving operations before the schedule starts.
    fn ensure_trading(&self, now: Timestamp) -> Result<()> {
        if self.schedule.is_lbp() && !self.schedule.has_started(now) {
            return Err(AmmError::LbpNotStarted);
        }
        Ok(())
    }

    /// Checks that `coin` can supply `amount` of `side` without
    /// overflowing the reserve.
    fn check_incoming(&self, side: Side, coin: &Coin, amount: Amount) -> Result<()> {
        if coin.asset() != self.key.asset(side) {
            return Err(AmmError::InvalidAsset("coin does not match pool asset"));
        }
        if coin.value() < amount {
            return Err(AmmError::InsufficientBalance);
        }
        self.balance(side)
            .checked_add(&amount)
            .ok_or(AmmError::Overflow("pool balance overflow"))?;
        Ok(())
    }
}
