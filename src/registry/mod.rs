//! The pair registry and its pagination.
//!
//! [`PairRegistry`] owns every [`WeightedPool`](crate::pools::WeightedPool)
//! and exposes them through snapshot listings ([`PairInfo`], [`PairPage`])
//! with a stable start-after cursor.

mod cursor;
mod pair_registry;

pub use pair_registry::{PairInfo, PairPage, PairRegistry};
