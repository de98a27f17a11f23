//! Pool pricing and accounting.
//!
//! [`WeightedPool`] is the one pool family this crate implements: a
//! two-asset Balancer-style pool whose weights are static or follow a
//! liquidity bootstrapping schedule.

pub mod weighted;

#[cfg(test)]
mod proptest_properties;

pub use weighted::WeightedPool;
