//! Canonically ordered pair of distinct assets.

use serde::{Deserialize, Serialize};

use super::AssetHandle;
use crate::error::AmmError;

/// The unordered asset pair a pool trades, stored in canonical order.
///
/// Construction sorts the two handles so that `asset_a < asset_b`, which
/// makes `(X, Y)` and `(Y, X)` the same key.
///
/// # Examples
///
/// ```
/// use hydra_cpmm::domain::{AssetHandle, AssetPair};
///
/// let x = AssetHandle::from_bytes([1u8; 32]);
/// let y = AssetHandle::from_bytes([2u8; 32]);
///
/// let pair = AssetPair::new(y, x).expect("distinct assets");
/// assert_eq!(pair.asset_a(), x);
/// assert_eq!(pair.asset_b(), y);
/// assert_eq!(pair, AssetPair::new(x, y).expect("distinct assets"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssetPair {
    asset_a: AssetHandle,
    asset_b: AssetHandle,
}

impl AssetPair {
    /// Creates the canonical pair for two assets in either order.
    ///
    /// # Errors
    ///
    /// - [`AmmError::IdenticalAssets`] if both handles are equal.
    /// - [`AmmError::InvalidAsset`] if either handle is the null sentinel.
    pub fn new(asset_x: AssetHandle, asset_y: AssetHandle) -> Result<Self, AmmError> {
        if asset_x == asset_y {
            return Err(AmmError::IdenticalAssets);
        }
        if asset_x.is_null() || asset_y.is_null() {
            return Err(AmmError::InvalidAsset("null asset handle"));
        }

        let (asset_a, asset_b) = if asset_x < asset_y {
            (asset_x, asset_y)
        } else {
            (asset_y, asset_x)
        };

        Ok(Self { asset_a, asset_b })
    }

    /// Returns the lower-ordered asset.
    #[must_use]
    pub const fn asset_a(&self) -> AssetHandle {
        self.asset_a
    }

    /// Returns the higher-ordered asset.
    #[must_use]
    pub const fn asset_b(&self) -> AssetHandle {
        self.asset_b
    }

    /// Returns `true` if `asset` is one side of this pair.
    #[must_use]
    pub fn contains(&self, asset: &AssetHandle) -> bool {
        self.asset_a == *asset || self.asset_b == *asset
    }

    /// Returns the counterpart of `asset`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidAsset`] if `asset` is not in the pair.
    pub fn other(&self, asset: &AssetHandle) -> Result<AssetHandle, AmmError> {
        if *asset == self.asset_a {
            Ok(self.asset_b)
        } else if *asset == self.asset_b {
            Ok(self.asset_a)
        } else {
            Err(AmmError::InvalidAsset("asset is not part of this pool"))
        }
    }
}
