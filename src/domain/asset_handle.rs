//! Opaque identifier for a fungible asset.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A chain-agnostic handle naming one fungible asset.
///
/// Wraps a fixed-size `[u8; 32]` array. Handles are totally ordered
/// lexicographically on their bytes, which is what gives a pool its
/// canonical `(asset_a, asset_b)` orientation. The all-zero handle is the
/// null sentinel and is never accepted as a pool asset.
///
/// # Examples
///
/// ```
/// use hydra_cpmm::domain::AssetHandle;
///
/// let usdc = AssetHandle::from_bytes([1u8; 32]);
/// let weth = AssetHandle::from_bytes([2u8; 32]);
/// assert!(usdc < weth);
/// assert!(AssetHandle::NULL.is_null());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssetHandle([u8; 32]);

impl AssetHandle {
    /// The null sentinel.
    pub const NULL: Self = Self([0u8; 32]);

    /// Creates an `AssetHandle` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Returns `true` for the all-zero sentinel.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }
}

impl fmt::Display for AssetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_hex(f, &self.0)
    }
}

/// Writes `bytes` as lowercase hex.
pub(crate) fn write_hex(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    for b in bytes {
        write!(f, "{b:02x}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_is_all_zeros() {
        assert!(AssetHandle::NULL.is_null());
        assert!(!AssetHandle::from_bytes([7u8; 32]).is_null());
    }

    #[test]
    fn single_nonzero_byte_is_not_null() {
        let mut bytes = [0u8; 32];
        bytes[31] = 1;
        assert!(!AssetHandle::from_bytes(bytes).is_null());
    }

    #[test]
    fn ordering_is_lexicographic() {
        let mut lo = [9u8; 32];
        lo[0] = 1;
        let mut hi = [0u8; 32];
        hi[0] = 2;
        assert!(AssetHandle::from_bytes(lo) < AssetHandle::from_bytes(hi));
    }

    #[test]
    fn display_is_hex() {
        let text = AssetHandle::from_bytes([0xab; 32]).to_string();
        assert_eq!(text.len(), 64);
        assert!(text.starts_with("abab"));
    }
}
