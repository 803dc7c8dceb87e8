//! Owner identity for share balances and custody accounts.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::asset_handle::write_hex;
use super::AssetPair;

/// Domain separator for pool account derivation.
const POOL_ACCOUNT_DOMAIN: &[u8] = b"hydra-cpmm/pool-account/v2";

/// Identity of an account that can hold assets or pool shares.
///
/// Traders and liquidity providers are identified by whatever 32-byte
/// key the host uses. A pool's own custody account is derived from the
/// owning registry and its canonical pair with [`AccountId::for_pool`],
/// so two registries sharing one custody ledger never share a pool
/// account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId([u8; 32]);

impl AccountId {
    /// Creates an `AccountId` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Derives the custody account owned by the pool for `pair` in the
    /// registry identified by `registry`.
    ///
    /// `BLAKE3(domain ‖ registry_le ‖ asset_a ‖ asset_b)` over the
    /// canonical ordering.
    #[must_use]
    pub fn for_pool(registry: u64, pair: &AssetPair) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(POOL_ACCOUNT_DOMAIN);
        hasher.update(&registry.to_le_bytes());
        hasher.update(pair.asset_a().as_bytes());
        hasher.update(pair.asset_b().as_bytes());
        Self(*hasher.finalize().as_bytes())
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_hex(f, &self.0)
    }
}
