//! Notifications emitted after committed state transitions.
//!
//! Every mutating [`Exchange`](crate::exchange::Exchange) call emits one
//! [`PoolEvent`] to its [`EventSink`] once the transition has been
//! committed.  Indexers consume these; nothing in the engine reads them back.

use std::mem;

use crate::domain::{Address, Amount, FeeRate, PairKey, Side, Timestamp, WeightSchedule};
use crate::traits::EventSink;

/// A committed state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PoolEvent {
    /// A pair was created and seeded with its initial liquidity.
    PairCreated {
        /// The new pair.
        key: PairKey,
        /// Caller that created and seeded the pair.
        creator: Address,
        /// Weight schedule applied after seeding.
        schedule: WeightSchedule,
        /// Swap fee rate.
        fee_rate: FeeRate,
        /// Initial asset A deposit.
        amount_a: Amount,
        /// Initial asset B deposit.
        amount_b: Amount,
        /// Shares minted to the creator.
        shares: Amount,
        /// Clock reading at creation.
        timestamp: Timestamp,
    },
    /// Liquidity was added on both sides.
    Provided {
        /// Affected pair.
        key: PairKey,
        /// Liquidity provider.
        provider: Address,
        /// Asset A taken.
        amount_a: Amount,
        /// Asset B taken.
        amount_b: Amount,
        /// Shares minted.
        shares: Amount,
        /// Clock reading.
        timestamp: Timestamp,
    },
    /// Liquidity was added on one side.
    SingleAssetProvided {
        /// Affected pair.
        key: PairKey,
        /// Liquidity provider.
        provider: Address,
        /// Deposited side.
        side: Side,
        /// Amount deposited, fee included.
        amount: Amount,
        /// Implied swap fee.
        fee_amount: Amount,
        /// Shares minted.
        shares: Amount,
        /// Clock reading.
        timestamp: Timestamp,
    },
    /// Shares were burned for a proportional share of both balances.
    Withdrawn {
        /// Affected pair.
        key: PairKey,
        /// Liquidity provider.
        provider: Address,
        /// Shares burned.
        shares: Amount,
        /// Asset A paid out.
        amount_a: Amount,
        /// Asset B paid out.
        amount_b: Amount,
        /// Clock reading.
        timestamp: Timestamp,
    },
    /// A swap was executed.
    Swapped {
        /// Affected pair.
        key: PairKey,
        /// Trader.
        trader: Address,
        /// Side paid in.
        offer_side: Side,
        /// Amount paid in, fee included.
        offer_amount: Amount,
        /// Amount paid out.
        return_amount: Amount,
        /// Fee withheld.
        fee_amount: Amount,
        /// Clock reading.
        timestamp: Timestamp,
    },
    /// The administrator changed a pair's swap fee.
    FeeRateUpdated {
        /// Affected pair.
        key: PairKey,
        /// Previous rate.
        old_rate: FeeRate,
        /// New rate.
        new_rate: FeeRate,
        /// Clock reading.
        timestamp: Timestamp,
    },
    /// The administrator replaced a pair's weight schedule.
    WeightScheduleUpdated {
        /// Affected pair.
        key: PairKey,
        /// New schedule.
        schedule: WeightSchedule,
        /// Clock reading.
        timestamp: Timestamp,
    },
    /// Administration passed to another address.
    AdminChanged {
        /// Previous administrator.
        old_admin: Address,
        /// New administrator.
        new_admin: Address,
        /// Clock reading.
        timestamp: Timestamp,
    },
}

impl PoolEvent {
    /// Returns a short, stable name for the event kind.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::PairCreated { .. } => "pair_created",
            Self::Provided { .. } => "provided",
            Self::SingleAssetProvided { .. } => "single_asset_provided",
            Self::Withdrawn { .. } => "withdrawn",
            Self::Swapped { .. } => "swapped",
            Self::FeeRateUpdated { .. } => "fee_rate_updated",
            Self::WeightScheduleUpdated { .. } => "weight_schedule_updated",
            Self::AdminChanged { .. } => "admin_changed",
        }
    }

    /// Returns the affected pair, if the event concerns one.
    #[must_use]
    pub const fn key(&self) -> Option<&PairKey> {
        match self {
            Self::PairCreated { key, .. }
            | Self::Provided { key, .. }
            | Self::SingleAssetProvided { key, .. }
            | Self::Withdrawn { key, .. }
            | Self::Swapped { key, .. }
            | Self::FeeRateUpdated { key, .. }
            | Self::WeightScheduleUpdated { key, .. } => Some(key),
            Self::AdminChanged { .. } => None,
        }
    }

    /// Returns the clock reading at which the event was committed.
    #[must_use]
    pub const fn timestamp(&self) -> Timestamp {
        match self {
            Self::PairCreated { timestamp, .. }
            | Self::Provided { timestamp, .. }
            | Self::SingleAssetProvided { timestamp, .. }
            | Self::Withdrawn { timestamp, .. }
            | Self::Swapped { timestamp, .. }
            | Self::FeeRateUpdated { timestamp, .. }
            | Self::WeightScheduleUpdated { timestamp, .. }
            | Self::AdminChanged { timestamp, .. } => *timestamp,
        }
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn emit(&mut self, _event: PoolEvent) {}
}

/// Keeps every event in memory, in emission order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Vec<PoolEvent>,
}

impl RecordingSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded events.
    #[must_use]
    pub fn events(&self) -> &[PoolEvent] {
        &self.events
    }

    /// Removes and returns the recorded events.
    pub fn take(&mut self) -> Vec<PoolEvent> {
        mem::take(&mut self.events)
    }

    /// Returns the number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: PoolEvent) {
        self.events.push(event);
    }
}

/// Logs each event as a structured `tracing` record at `INFO` level,
/// target `hydra_weighted::events`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&mut self, event: PoolEvent) {
        let name = event.name();
        match &event {
            PoolEvent::PairCreated {
                key,
                creator,
                fee_rate,
                amount_a,
                amount_b,
                shares,
                timestamp,
                ..
            } => tracing::info!(
                target: "hydra_weighted::events",
                event = name, %key, %creator, %fee_rate, %amount_a, %amount_b, %shares, %timestamp
            ),
            PoolEvent::Provided {
                key,
                provider,
                amount_a,
                amount_b,
                shares,
                timestamp,
            } => tracing::info!(
                target: "hydra_weighted::events",
                event = name, %key, %provider, %amount_a, %amount_b, %shares, %timestamp
            ),
            PoolEvent::SingleAssetProvided {
                key,
                provider,
                side,
                amount,
                fee_amount,
                shares,
                timestamp,
            } => tracing::info!(
                target: "hydra_weighted::events",
                event = name, %key, %provider, %side, %amount, %fee_amount, %shares, %timestamp
            ),
            PoolEvent::Withdrawn {
                key,
                provider,
                shares,
                amount_a,
                amount_b,
                timestamp,
            } => tracing::info!(
                target: "hydra_weighted::events",
                event = name, %key, %provider, %shares, %amount_a, %amount_b, %timestamp
            ),
            PoolEvent::Swapped {
                key,
                trader,
                offer_side,
                offer_amount,
                return_amount,
                fee_amount,
                timestamp,
            } => tracing::info!(
                target: "hydra_weighted::events",
                event = name, %key, %trader, %offer_side, %offer_amount, %return_amount, %fee_amount, %timestamp
            ),
            PoolEvent::FeeRateUpdated {
                key,
                old_rate,
                new_rate,
                timestamp,
            } => tracing::info!(
                target: "hydra_weighted::events",
                event = name, %key, %old_rate, %new_rate, %timestamp
            ),
            PoolEvent::WeightScheduleUpdated {
                key,
                schedule,
                timestamp,
            } => tracing::info!(
                target: "hydra_weighted::events",
                event = name,
                %key,
                from = %schedule.before().weights(),
                to = %schedule.after().weights(),
                starts = %schedule.before().timestamp(),
                ends = %schedule.after().timestamp(),
                %timestamp
            ),
            PoolEvent::AdminChanged {
                old_admin,
                new_admin,
                timestamp,
            } => tracing::info!(
                target: "hydra_weighted::events",
                event = name, %old_admin, %new_admin, %timestamp
            ),
        }
    }
}
