//! Asset values and the reference ledger.
//!
//! [`Coin`] and [`MintCapability`] are the values that cross the
//! [`AssetLedger`](crate::traits::AssetLedger) seam; [`InMemoryLedger`]
//! is a complete implementation for hosts without a ledger of their own.

mod coin;
mod memory;

pub use coin::{Coin, MintCapability};
pub use memory::InMemoryLedger;
