//! Asset identifiers and the pair key that indexes the registry.

use core::fmt;

use crate::error::AmmError;

/// Fully-qualified identifier of a fungible asset type.
///
/// Asset types order lexicographically by their identifier, which fixes
/// the iteration order of the [`PairRegistry`](crate::registry::PairRegistry).
///
/// # Examples
///
/// ```
/// use hydra_weighted::domain::AssetType;
///
/// let usdc = AssetType::new("0x1::usdc::USDC");
/// assert_eq!(usdc.as_str(), "0x1::usdc::USDC");
/// assert!(AssetType::new("a") < AssetType::new("b"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssetType(String);

impl AssetType {
    /// Creates an asset type from its identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One side of a two-asset pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// The first asset of the pair.
    A,
    /// The second asset of the pair.
    B,
}

impl Side {
    /// Returns the opposite side.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => f.write_str("A"),
            Self::B => f.write_str("B"),
        }
    }
}

/// The `(asset A, asset B, share token)` triple identifying one pool.
///
/// Field order defines the derived ordering: by asset A, then asset B,
/// then share token.  Pagination cursors rely on this ordering.
///
/// Unlike a canonical token pair, the two assets are **not** reordered:
/// `(X, Y, S)` and `(Y, X, S)` are different keys, matching how a pool
/// is created for an explicit ordered pair of asset types.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PairKey {
    asset_a: AssetType,
    asset_b: AssetType,
    share_token: AssetType,
}

impl PairKey {
    /// Creates a pair key.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidAsset`] if any two of the three asset
    /// types coincide.
    pub fn new(
        asset_a: AssetType,
        asset_b: AssetType,
        share_token: AssetType,
    ) -> Result<Self, AmmError> {
        if asset_a == asset_b {
            return Err(AmmError::InvalidAsset("pair requires two distinct assets"));
        }
        if share_token == asset_a || share_token == asset_b {
            return Err(AmmError::InvalidAsset(
                "share token must differ from the pooled assets",
            ));
        }
        Ok(Self {
            asset_a,
            asset_b,
            share_token,
        })
    }

    /// Returns asset A.
    #[must_use]
    pub const fn asset_a(&self) -> &AssetType {
        &self.asset_a
    }

    /// Returns asset B.
    #[must_use]
    pub const fn asset_b(&self) -> &AssetType {
        &self.asset_b
    }

    /// Returns the asset held on `side`.
    #[must_use]
    pub const fn asset(&self, side: Side) -> &AssetType {
        match side {
            Side::A => &self.asset_a,
            Side::B => &self.asset_b,
        }
    }

    /// Returns the share (liquidity) token type.
    #[must_use]
    pub const fn share_token(&self) -> &AssetType {
        &self.share_token
    }

    /// Returns the side holding `asset`, if any.
    #[must_use]
    pub fn side_of(&self, asset: &AssetType) -> Option<Side> {
        if *asset == self.asset_a {
            Some(Side::A)
        } else if *asset == self.asset_b {
            Some(Side::B)
        } else {
            None
        }
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}:{}", self.asset_a, self.asset_b, self.share_token)
    }
}
