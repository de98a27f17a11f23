//! The fungible-asset ledger seam.
//!
//! The engine never touches ledger internals.  It withdraws opaque
//! [`Coin`] values from holders, merges and splits them, deposits them
//! back, and mints or burns share tokens through a [`MintCapability`]
//! obtained once per share token.

use crate::domain::{Address, Amount, AssetType};
use crate::error::AmmError;
use crate::ledger::{Coin, MintCapability};

/// Fungible-asset ledger consumed by the [`Exchange`](crate::exchange::Exchange).
///
/// # Implementors
///
/// - [`InMemoryLedger`](crate::ledger::InMemoryLedger): `BTreeMap`-backed
///   reference implementation.
///
/// # Contract
///
/// - A coin returned by [`withdraw`](Self::withdraw) or [`mint`](Self::mint)
///   is removed from (or added to) circulation exactly once; depositing it
///   returns the value to a holder.
/// - [`supply`](Self::supply) of a share token equals minted minus burned.
pub trait AssetLedger {
    /// Returns `holder`'s balance of `asset`.
    fn balance(&self, holder: &Address, asset: &AssetType) -> Amount;

    /// Takes `amount` of `asset` out of `holder`'s balance.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientBalance`] if the holder owns less
    /// than `amount`.
    fn withdraw(
        &mut self,
        holder: &Address,
        asset: &AssetType,
        amount: Amount,
    ) -> Result<Coin, AmmError>;

    /// Credits a coin to `holder`.
    fn deposit(&mut self, holder: &Address, coin: Coin);

    /// Creates the unique mint authority for a share token.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ShareTokenRegistered`] if `asset` already has one.
    fn register_share_token(&mut self, asset: &AssetType) -> Result<MintCapability, AmmError>;

    /// Mints `amount` new units of the capability's share token.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAsset`] if the capability is not recognized.
    /// - [`AmmError::Overflow`] if the supply would exceed `u128`.
    fn mint(&mut self, cap: &MintCapability, amount: Amount) -> Result<Coin, AmmError>;

    /// Destroys a coin of the capability's share token.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidAsset`] if the coin is of another asset
    /// or the capability is not recognized.
    fn burn(&mut self, cap: &MintCapability, coin: Coin) -> Result<(), AmmError>;

    /// Returns the circulating supply of `asset`.
    fn supply(&self, asset: &AssetType) -> Amount;
}
