//! `BTreeMap`-backed reference ledger.

use std::collections::BTreeMap;

use super::{Coin, MintCapability};
use crate::domain::{Address, Amount, AssetType};
use crate::error::AmmError;
use crate::math::CheckedArithmetic;
use crate::traits::AssetLedger;

/// In-memory [`AssetLedger`].
///
/// Tracks per-holder balances and the circulating supply of every asset.
/// External assets enter circulation through [`credit`](Self::credit);
/// share tokens through [`mint`](AssetLedger::mint).  Since every balance
/// is bounded by its asset's supply, which is checked on the way in,
/// deposits cannot overflow.
///
/// # Examples
///
/// ```
/// use hydra_weighted::domain::{Address, Amount, AssetType};
/// use hydra_weighted::ledger::InMemoryLedger;
/// use hydra_weighted::traits::AssetLedger;
///
/// let alice = Address::from_bytes([1; 32]);
/// let usdc = AssetType::new("USDC");
/// let mut ledger = InMemoryLedger::new();
/// ledger.credit(&alice, &usdc, Amount::new(500)).expect("no overflow");
///
/// let coin = ledger.withdraw(&alice, &usdc, Amount::new(200)).expect("funded");
/// assert_eq!(ledger.balance(&alice, &usdc), Amount::new(300));
/// ledger.deposit(&alice, coin);
/// assert_eq!(ledger.balance(&alice, &usdc), Amount::new(500));
/// ```
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    balances: BTreeMap<(Address, AssetType), Amount>,
    supplies: BTreeMap<AssetType, Amount>,
    share_tokens: BTreeMap<AssetType, u64>,
    next_capability: u64,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues `amount` of an external asset directly to `holder`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAsset`] if `asset` is a registered share token;
    ///   share tokens are only issued through their mint capability.
    /// - [`AmmError::Overflow`] if the asset's supply would exceed `u128`.
    pub fn credit(
        &mut self,
        holder: &Address,
        asset: &AssetType,
        amount: Amount,
    ) -> Result<(), AmmError> {
        if self.share_tokens.contains_key(asset) {
            return Err(AmmError::InvalidAsset(
                "share tokens can only be minted by their pool",
            ));
        }
        self.increase_supply(asset, amount)?;
        self.deposit(holder, Coin::new(asset.clone(), amount));
        tracing::trace!(%holder, %asset, %amount, "credited");
        Ok(())
    }

    /// Returns `true` if `asset` has a mint capability.
    #[must_use]
    pub fn is_share_token(&self, asset: &AssetType) -> bool {
        self.share_tokens.contains_key(asset)
    }

    fn increase_supply(&mut self, asset: &AssetType, amount: Amount) -> Result<(), AmmError> {
        let supply = self.supplies.entry(asset.clone()).or_insert(Amount::ZERO);
        *supply = supply.safe_add(&amount)?;
        Ok(())
    }

    fn check_capability(&self, cap: &MintCapability) -> Result<(), AmmError> {
        match self.share_tokens.get(cap.share_token()) {
            Some(&id) if id == cap.id() => Ok(()),
            _ => Err(AmmError::InvalidAsset("mint capability not issued by this ledger")),
        }
    }
}

impl AssetLedger for InMemoryLedger {
    fn balance(&self, holder: &Address, asset: &AssetType) -> Amount {
        self.balances
            .get(&(*holder, asset.clone()))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    fn withdraw(
        &mut self,
        holder: &Address,
        asset: &AssetType,
        amount: Amount,
    ) -> Result<Coin, AmmError> {
        if amount.is_zero() {
            return Ok(Coin::zero(asset.clone()));
        }
        let balance = self
            .balances
            .get_mut(&(*holder, asset.clone()))
            .ok_or(AmmError::InsufficientBalance)?;
        *balance = balance
            .checked_sub(&amount)
            .ok_or(AmmError::InsufficientBalance)?;
        Ok(Coin::new(asset.clone(), amount))
    }

    fn deposit(&mut self, holder: &Address, coin: Coin) {
        let (asset, amount) = coin.into_parts();
        if amount.is_zero() {
            return;
        }
        let balance = self
            .balances
            .entry((*holder, asset))
            .or_insert(Amount::ZERO);
        *balance = balance.checked_add(&amount).unwrap_or(Amount::MAX);
    }

    fn register_share_token(&mut self, asset: &AssetType) -> Result<MintCapability, AmmError> {
        if self.share_tokens.contains_key(asset) || self.supplies.contains_key(asset) {
            return Err(AmmError::ShareTokenRegistered);
        }
        let id = self.next_capability;
        self.next_capability = self.next_capability.wrapping_add(1);
        self.share_tokens.insert(asset.clone(), id);
        self.supplies.insert(asset.clone(), Amount::ZERO);
        tracing::debug!(share_token = %asset, id, "share token registered");
        Ok(MintCapability::new(asset.clone(), id))
    }

    fn mint(&mut self, cap: &MintCapability, amount: Amount) -> Result<Coin, AmmError> {
        self.check_capability(cap)?;
        self.increase_supply(cap.share_token(), amount)?;
        Ok(Coin::new(cap.share_token().clone(), amount))
    }

    fn burn(&mut self, cap: &MintCapability, coin: Coin) -> Result<(), AmmError> {
        self.check_capability(cap)?;
        if coin.asset() != cap.share_token() {
            return Err(AmmError::InvalidAsset("burned coin is not the capability's share token"));
        }
        let (asset, amount) = coin.into_parts();
        let supply = self.supplies.entry(asset).or_insert(Amount::ZERO);
        *supply = supply.safe_sub(&amount)?;
        Ok(())
    }

    fn supply(&self, asset: &AssetType) -> Amount {
        self.supplies.get(asset).copied().unwrap_or(Amount::ZERO)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn alice() -> Address {
        Address::from_bytes([1; 32])
    }

    fn bob() -> Address {
        Address::from_bytes([2; 32])
    }

    fn usdc() -> AssetType {
        AssetType::new("USDC")
    }

    fn lp() -> AssetType {
        AssetType::new("LP")
    }

    fn funded() -> InMemoryLedger {
        let mut ledger = InMemoryLedger::new();
        let Ok(()) = ledger.credit(&alice(), &usdc(), Amount::new(1_000)) else {
            panic!("credit failed");
        };
        ledger
    }

    // -- balances -------------------------------------------------------------

    #[test]
    fn credit_increases_balance_and_supply() {
        let ledger = funded();
        assert_eq!(ledger.balance(&alice(), &usdc()), Amount::new(1_000));
        assert_eq!(ledger.balance(&bob(), &usdc()), Amount::ZERO);
        assert_eq!(ledger.supply(&usdc()), Amount::new(1_000));
    }

    #[test]
    fn transfer_via_withdraw_and_deposit() {
        let mut ledger = funded();
        let Ok(coin) = ledger.withdraw(&alice(), &usdc(), Amount::new(400)) else {
            panic!("withdraw failed");
        };
        ledger.deposit(&bob(), coin);
        assert_eq!(ledger.balance(&alice(), &usdc()), Amount::new(600));
        assert_eq!(ledger.balance(&bob(), &usdc()), Amount::new(400));
        assert_eq!(ledger.supply(&usdc()), Amount::new(1_000));
    }

    #[test]
    fn overdraw_rejected() {
        let mut ledger = funded();
        assert!(matches!(
            ledger.withdraw(&alice(), &usdc(), Amount::new(1_001)),
            Err(AmmError::InsufficientBalance)
        ));
        assert!(matches!(
            ledger.withdraw(&bob(), &usdc(), Amount::new(1)),
            Err(AmmError::InsufficientBalance)
        ));
        assert_eq!(ledger.balance(&alice(), &usdc()), Amount::new(1_000));
    }

    #[test]
    fn credit_overflow_rejected() {
        let mut ledger = funded();
        assert!(matches!(
            ledger.credit(&bob(), &usdc(), Amount::MAX),
            Err(AmmError::Overflow(_))
        ));
        assert_eq!(ledger.balance(&bob(), &usdc()), Amount::ZERO);
    }

    // -- share tokens ---------------------------------------------------------

    #[test]
    fn mint_and_burn_track_supply() {
        let mut ledger = InMemoryLedger::new();
        let Ok(cap) = ledger.register_share_token(&lp()) else {
            panic!("register failed");
        };
        let Ok(shares) = ledger.mint(&cap, Amount::new(50)) else {
            panic!("mint failed");
        };
        assert_eq!(ledger.supply(&lp()), Amount::new(50));
        let Ok(()) = ledger.burn(&cap, shares) else {
            panic!("burn failed");
        };
        assert_eq!(ledger.supply(&lp()), Amount::ZERO);
    }

    #[test]
    fn share_token_registers_once() {
        let mut ledger = InMemoryLedger::new();
        let Ok(_cap) = ledger.register_share_token(&lp()) else {
            panic!("register failed");
        };
        assert!(ledger.is_share_token(&lp()));
        assert!(matches!(
            ledger.register_share_token(&lp()),
            Err(AmmError::ShareTokenRegistered)
        ));
    }

    #[test]
    fn existing_asset_cannot_become_share_token() {
        let mut ledger = funded();
        assert!(matches!(
            ledger.register_share_token(&usdc()),
            Err(AmmError::ShareTokenRegistered)
        ));
    }

    #[test]
    fn share_token_cannot_be_credited() {
        let mut ledger = InMemoryLedger::new();
        let Ok(_cap) = ledger.register_share_token(&lp()) else {
            panic!("register failed");
        };
        assert!(matches!(
            ledger.credit(&alice(), &lp(), Amount::new(1)),
            Err(AmmError::InvalidAsset(_))
        ));
    }

    #[test]
    fn forged_capability_rejected() {
        let mut ledger = InMemoryLedger::new();
        let Ok(_cap) = ledger.register_share_token(&lp()) else {
            panic!("register failed");
        };
        let forged = MintCapability::new(lp(), 99);
        assert!(matches!(
            ledger.mint(&forged, Amount::new(1)),
            Err(AmmError::InvalidAsset(_))
        ));
    }

    #[test]
    fn burning_foreign_coin_rejected() {
        let mut ledger = funded();
        let Ok(cap) = ledger.register_share_token(&lp()) else {
            panic!("register failed");
        };
        let Ok(coin) = ledger.withdraw(&alice(), &usdc(), Amount::new(1)) else {
            panic!("withdraw failed");
        };
        assert!(matches!(
            ledger.burn(&cap, coin),
            Err(AmmError::InvalidAsset(_))
        ));
    }
}
