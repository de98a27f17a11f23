//! Domain value types for the weighted pool engine.
//!
//! These types model the pool domain: amounts, asset identifiers and pair
//! keys, timestamps, fee rates, weight schedules, and operation outcomes.
//! Constructors validate their invariants, so a value that exists is
//! well-formed.

mod address;
mod amount;
mod asset;
mod fee_rate;
mod outcome;
mod timestamp;
mod weights;

pub use address::Address;
pub use amount::Amount;
pub use asset::{AssetType, PairKey, Side};
pub use fee_rate::FeeRate;
pub use outcome::{ProvideOutcome, SingleProvideOutcome, SwapOutcome, WithdrawOutcome};
pub use timestamp::Timestamp;
pub use weights::{WeightPoint, WeightSchedule, Weights};
