//! Opaque asset values and share-token mint authority.

use core::fmt;

use crate::domain::{Amount, AssetType};
use crate::error::AmmError;

/// A quantity of one asset type that has left a holder's balance.
///
/// `Coin` is deliberately not `Clone`: a coin is moved from a ledger into
/// a pool and back, never duplicated.  Dropping a non-zero coin destroys
/// value, so the type is `#[must_use]`.
///
/// # Examples
///
/// ```
/// use hydra_weighted::domain::{Amount, AssetType};
/// use hydra_weighted::ledger::Coin;
///
/// let mut coin = Coin::new(AssetType::new("USDC"), Amount::new(100));
/// let part = coin.extract(Amount::new(40)).expect("enough value");
/// assert_eq!(coin.value(), Amount::new(60));
/// coin.merge(part).expect("same asset");
/// assert_eq!(coin.value(), Amount::new(100));
/// ```
#[derive(Debug, PartialEq, Eq)]
#[must_use]
pub struct Coin {
    asset: AssetType,
    amount: Amount,
}

impl Coin {
    /// Creates a coin.  Intended for [`AssetLedger`](crate::traits::AssetLedger)
    /// implementations; everything else obtains coins from a ledger.
    pub const fn new(asset: AssetType, amount: Amount) -> Self {
        Self { asset, amount }
    }

    /// Creates an empty coin of `asset`.
    pub const fn zero(asset: AssetType) -> Self {
        Self::new(asset, Amount::ZERO)
    }

    /// Returns the coin's value.
    #[must_use]
    pub const fn value(&self) -> Amount {
        self.amount
    }

    /// Returns the coin's asset type.
    #[must_use]
    pub const fn asset(&self) -> &AssetType {
        &self.asset
    }

    /// Absorbs `other` into this coin.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAsset`] if the asset types differ.
    /// - [`AmmError::Overflow`] if the merged value exceeds `u128`.
    pub fn merge(&mut self, other: Self) -> Result<(), AmmError> {
        if other.asset != self.asset {
            return Err(AmmError::InvalidAsset("cannot merge coins of different assets"));
        }
        self.amount = self
            .amount
            .checked_add(&other.amount)
            .ok_or(AmmError::Overflow("coin merge"))?;
        Ok(())
    }

    /// Splits `amount` off into a new coin.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientBalance`] if the coin holds less.
    pub fn extract(&mut self, amount: Amount) -> Result<Self, AmmError> {
        self.amount = self
            .amount
            .checked_sub(&amount)
            .ok_or(AmmError::InsufficientBalance)?;
        Ok(Self::new(self.asset.clone(), amount))
    }

    /// Consumes the coin, returning its asset type and value.
    #[must_use]
    pub fn into_parts(self) -> (AssetType, Amount) {
        (self.asset, self.amount)
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.asset)
    }
}

/// Authority to mint and burn one share token.
///
/// Issued exactly once per share token by
/// [`AssetLedger::register_share_token`](crate::traits::AssetLedger::register_share_token)
/// and then owned by the pool for its lifetime.  Not `Clone`.
#[derive(Debug, PartialEq, Eq)]
pub struct MintCapability {
    share_token: AssetType,
    id: u64,
}

impl MintCapability {
    /// Creates a capability.  Intended for ledger implementations, which
    /// use `id` to recognize the capabilities they issued.
    #[must_use]
    pub const fn new(share_token: AssetType, id: u64) -> Self {
        Self { share_token, id }
    }

    /// Returns the share token this capability mints.
    #[must_use]
    pub const fn share_token(&self) -> &AssetType {
        &self.share_token
    }

    /// Returns the issuing ledger's identifier for this capability.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }
}
