//! # Hydra Weighted
//!
//! Weighted constant-function market maker with liquidity bootstrapping
//! schedules and deterministic fixed-point math.
//!
//! Each pair holds two assets under weights `w_a + w_b = 1` and keeps the
//! weighted geometric mean `B_a^w_a · B_b^w_b` from decreasing across
//! swaps.  Weights are either fixed or interpolated linearly between two
//! timestamps, which turns the pool into a liquidity bootstrapping pool
//! (LBP): a token launch whose price decays as its weight falls.
//!
//! All arithmetic is unsigned 18-decimal fixed point over `u128` with
//! 256-bit intermediates.  There is no floating point anywhere in the
//! engine, so every quote is reproducible bit for bit.
//!
//! # Quick Start
//!
//! ```rust
//! use hydra_weighted::prelude::*;
//!
//! let admin = Address::from_bytes([1; 32]);
//! let trader = Address::from_bytes([2; 32]);
//! let (eth, usdc) = (AssetType::new("ETH"), AssetType::new("USDC"));
//!
//! // 1. Fund accounts on an in-memory ledger
//! let mut ledger = InMemoryLedger::new();
//! ledger.credit(&admin, &eth, Amount::new(80_000_000)).expect("credit");
//! ledger.credit(&admin, &usdc, Amount::new(20_000_000)).expect("credit");
//! ledger.credit(&trader, &eth, Amount::new(10_000)).expect("credit");
//!
//! // 2. List an 80/20 pair with a 0.3% swap fee
//! let mut exchange = Exchange::new(admin, ledger, SystemClock, NoopSink);
//! let key = PairKey::new(eth, usdc, AssetType::new("ETH-USDC-LP")).expect("distinct");
//! let config = PairConfig::new(
//!     key.clone(),
//!     WeightSchedule::fixed(Weights::from_ratios(80, 20, 100).expect("weights")),
//!     FeeRate::from_ratio(3, 1_000).expect("fee"),
//!     Amount::new(80_000_000),
//!     Amount::new(20_000_000),
//! )
//! .expect("valid config");
//! exchange.create_pair(&admin, config).expect("pair created");
//!
//! // 3. Swap 1 000 ETH for USDC
//! let out = exchange
//!     .swap(&trader, &key, Amount::new(1_000), Side::A, Amount::ZERO)
//!     .expect("swap succeeded");
//! assert_eq!(out.return_amount(), Amount::new(996));
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │   Caller     │  Address + Amounts + PairKey
//! └──────┬───────┘
//!        │ provide / withdraw / swap / admin calls
//!        ▼
//! ┌──────────────┐      ┌──────────────────────────────┐
//! │   Exchange   │─────▶│ AssetLedger · Clock · Sink   │
//! └──────┬───────┘      └──────────────────────────────┘
//!        │ quote → check → move coins → commit
//!        ▼
//! ┌──────────────┐
//! │ PairRegistry │  ordered map of pools, cursor pagination
//! └──────┬───────┘
//!        ▼
//! ┌──────────────┐
//! │ WeightedPool │  reserves, share supply, schedule, fee
//! └──────┬───────┘
//!        ▼
//! ┌──────────────┐
//! │     Math     │  Decimal, ln / exp / pow series
//! └──────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`math`] | [`Decimal`](math::Decimal) fixed point and the [`pow`](math::pow) / [`ln`](math::ln) / [`exp`](math::exp) series |
//! | [`domain`] | Value types: [`Amount`](domain::Amount), [`Weights`](domain::Weights), [`WeightSchedule`](domain::WeightSchedule), outcomes |
//! | [`pools`] | [`WeightedPool`](pools::WeightedPool) quoting and accounting |
//! | [`registry`] | [`PairRegistry`](registry::PairRegistry) listing and pagination |
//! | [`exchange`] | [`Exchange`](exchange::Exchange): authorized, all-or-nothing operations |
//! | [`ledger`] | [`Coin`](ledger::Coin), mint capabilities, [`InMemoryLedger`](ledger::InMemoryLedger) |
//! | [`traits`] | Host seams: [`AssetLedger`](traits::AssetLedger), [`Clock`](traits::Clock), [`EventSink`](traits::EventSink) |
//! | [`events`] | [`PoolEvent`](events::PoolEvent) and the bundled sinks |
//! | [`config`] | [`PairConfig`](config::PairConfig) and [`RegistryConfig`](config::RegistryConfig) |
//! | [`error`] | [`AmmError`](error::AmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports |
//!
//! # Logging
//!
//! The crate emits [`tracing`] events and never installs a subscriber.
//! Committed state changes log at `debug`, rejected privileged calls at
//! `warn`, and ledger movements at `trace`.  [`events::TracingSink`]
//! additionally forwards every [`events::PoolEvent`] at `info` under the
//! `hydra_weighted::events` target.

pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod exchange;
pub mod ledger;
pub mod math;
pub mod pools;
pub mod prelude;
pub mod registry;
pub mod traits;
