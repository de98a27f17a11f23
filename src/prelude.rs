//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use hydra_weighted::prelude::*;
//! ```

pub use crate::config::{PairConfig, RegistryConfig};
pub use crate::domain::{
    Address, Amount, AssetType, FeeRate, PairKey, ProvideOutcome, Side, SingleProvideOutcome,
    SwapOutcome, Timestamp, WeightPoint, WeightSchedule, Weights, WithdrawOutcome,
};
pub use crate::error::{AmmError, Result};
pub use crate::events::{NoopSink, PoolEvent, RecordingSink, TracingSink};
pub use crate::exchange::Exchange;
pub use crate::ledger::{Coin, InMemoryLedger, MintCapability};
pub use crate::math::Decimal;
pub use crate::pools::WeightedPool;
pub use crate::registry::{PairInfo, PairPage, PairRegistry};
pub use crate::traits::{AssetLedger, Clock, EventSink, ManualClock, SystemClock};
