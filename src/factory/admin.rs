//! Administrative capability for a registry.

use core::sync::atomic::{AtomicU64, Ordering};

static NEXT_REGISTRY_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies one registry instance for capability checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct RegistryId(u64);

impl RegistryId {
    pub(crate) fn next() -> Self {
        Self(NEXT_REGISTRY_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub(crate) const fn get(self) -> u64 {
        self.0
    }
}

/// Proof of administrative authority over one
/// [`PoolRegistry`](super::PoolRegistry).
///
/// Minted exactly once, by the registry constructor, and neither `Clone`
/// nor constructible outside this crate. Holding it is the only way to
/// change registry-wide settings; a capability minted by a different
/// registry is rejected with
/// [`AmmError::Unauthorized`](crate::error::AmmError::Unauthorized).
#[derive(Debug, PartialEq, Eq)]
pub struct AdminCapability {
    registry: RegistryId,
}

impl AdminCapability {
    pub(crate) const fn new(registry: RegistryId) -> Self {
        Self { registry }
    }

    pub(crate) fn authorizes(&self, registry: RegistryId) -> bool {
        self.registry == registry
    }
}
