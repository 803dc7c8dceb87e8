//! Registry of constant-product pools keyed by unordered asset pair.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use super::admin::{AdminCapability, RegistryId};
use crate::config::{PoolConfig, RegistryConfig};
use crate::custody::AssetCustody;
use crate::domain::{AssetHandle, AssetPair, FeeTier};
use crate::error::AmmError;
use crate::events::{EventSink, NullSink, PoolEvent};
use crate::pools::ConstantProductPool;

/// Shared handle to a registered pool.
pub type PoolHandle<C> = Arc<ConstantProductPool<C>>;

struct RegistryState<C: AssetCustody> {
    /// Every pool is stored under both `(a, b)` and `(b, a)`.
    by_pair: HashMap<(AssetHandle, AssetHandle), PoolHandle<C>>,
    in_order: Vec<PoolHandle<C>>,
    default_fee_tier: FeeTier,
}

/// Creates, deduplicates, and enumerates pools.
///
/// The registry's lock covers only the map and list: it is held to look
/// up or insert a pool and released before any pool operation runs. Pool
/// operations lock the individual pool, so traffic on different pools
/// never contends.
///
/// All pools share the registry's custody collaborator and event sink.
pub struct PoolRegistry<C: AssetCustody> {
    id: RegistryId,
    custody: Arc<C>,
    events: Arc<dyn EventSink>,
    state: RwLock<RegistryState<C>>,
}

impl<C: AssetCustody> PoolRegistry<C> {
    /// Creates an empty registry and the capability that administers it.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] if the configured default fee is
    /// 100% or more.
    pub fn new(
        custody: Arc<C>,
        events: Arc<dyn EventSink>,
        config: RegistryConfig,
    ) -> Result<(Self, AdminCapability), AmmError> {
        config.validate()?;
        let id = RegistryId::next();
        let registry = Self {
            id,
            custody,
            events,
            state: RwLock::new(RegistryState {
                by_pair: HashMap::new(),
                in_order: Vec::new(),
                default_fee_tier: config.default_fee_tier,
            }),
        };
        Ok((registry, AdminCapability::new(id)))
    }

    /// Creates a registry with the default 30 bp fee that discards events.
    #[must_use]
    pub fn with_defaults(custody: Arc<C>) -> (Self, AdminCapability) {
        let id = RegistryId::next();
        let registry = Self {
            id,
            custody,
            events: Arc::new(NullSink),
            state: RwLock::new(RegistryState {
                by_pair: HashMap::new(),
                in_order: Vec::new(),
                default_fee_tier: FeeTier::default(),
            }),
        };
        (registry, AdminCapability::new(id))
    }

    /// Creates an empty pool for the unordered pair `{asset_x, asset_y}`
    /// using the registry's default fee tier.
    ///
    /// # Errors
    ///
    /// - [`AmmError::IdenticalAssets`] if both handles are equal.
    /// - [`AmmError::InvalidAsset`] if either handle is null.
    /// - [`AmmError::PoolAlreadyExists`] if the pair is already registered
    ///   in either order.
    pub fn create_pool(
        &self,
        asset_x: AssetHandle,
        asset_y: AssetHandle,
    ) -> Result<PoolHandle<C>, AmmError> {
        let fee_tier = self.state.read().default_fee_tier;
        self.create_pool_with_fee(asset_x, asset_y, fee_tier)
    }

    /// Creates an empty pool with an explicit fee tier.
    ///
    /// # Errors
    ///
    /// Everything [`create_pool`](Self::create_pool) returns, plus
    /// [`AmmError::InvalidFee`] for a fee of 100% or more.
    pub fn create_pool_with_fee(
        &self,
        asset_x: AssetHandle,
        asset_y: AssetHandle,
        fee_tier: FeeTier,
    ) -> Result<PoolHandle<C>, AmmError> {
        let pair = AssetPair::new(asset_x, asset_y)?;
        let config = PoolConfig::new(pair, fee_tier)?;

        let (pool, index) = {
            let mut state = self.state.write();
            let key = (pair.asset_a(), pair.asset_b());
            if state.by_pair.contains_key(&key) {
                return Err(AmmError::PoolAlreadyExists);
            }
            let pool = Arc::new(ConstantProductPool::new(
                self.id.get(),
                config,
                Arc::clone(&self.custody),
                Arc::clone(&self.events),
            ));
            state.by_pair.insert(key, Arc::clone(&pool));
            state
                .by_pair
                .insert((pair.asset_b(), pair.asset_a()), Arc::clone(&pool));
            state.in_order.push(Arc::clone(&pool));
            (pool, state.in_order.len() - 1)
        };

        info!(
            asset_a = %pair.asset_a(),
            asset_b = %pair.asset_b(),
            pool = %pool.account(),
            %fee_tier,
            index,
            "pool created"
        );
        self.events.emit(PoolEvent::PoolCreated {
            asset_a: pair.asset_a(),
            asset_b: pair.asset_b(),
            pool: pool.account(),
            index,
        });
        Ok(pool)
    }

    /// Returns the pool for `{asset_x, asset_y}` in either order.
    #[must_use]
    pub fn lookup_pool(&self, asset_x: AssetHandle, asset_y: AssetHandle) -> Option<PoolHandle<C>> {
        self.state.read().by_pair.get(&(asset_x, asset_y)).cloned()
    }

    /// Number of registered pools.
    #[must_use]
    pub fn pool_count(&self) -> usize {
        self.state.read().in_order.len()
    }

    /// Returns the `index`-th pool in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::IndexOutOfRange`] if `index >= pool_count()`.
    pub fn pool_at(&self, index: usize) -> Result<PoolHandle<C>, AmmError> {
        let state = self.state.read();
        state
            .in_order
            .get(index)
            .cloned()
            .ok_or(AmmError::IndexOutOfRange {
                index,
                len: state.in_order.len(),
            })
    }

    /// Snapshot of every pool in creation order.
    #[must_use]
    pub fn pools(&self) -> Vec<PoolHandle<C>> {
        self.state.read().in_order.clone()
    }

    /// Fee tier applied by [`create_pool`](Self::create_pool).
    #[must_use]
    pub fn default_fee_tier(&self) -> FeeTier {
        self.state.read().default_fee_tier
    }

    /// Changes the fee tier for pools created from now on. Existing
    /// pools keep theirs.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Unauthorized`] if `admin` was minted by another
    ///   registry.
    /// - [`AmmError::InvalidFee`] for a fee of 100% or more.
    pub fn set_default_fee_tier(
        &self,
        admin: &AdminCapability,
        fee_tier: FeeTier,
    ) -> Result<(), AmmError> {
        if !admin.authorizes(self.id) {
            return Err(AmmError::Unauthorized);
        }
        fee_tier.validate()?;
        let previous = {
            let mut state = self.state.write();
            core::mem::replace(&mut state.default_fee_tier, fee_tier)
        };
        info!(%previous, current = %fee_tier, "default fee tier changed");
        Ok(())
    }
}

impl<C: AssetCustody> fmt::Debug for PoolRegistry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoolRegistry")
            .field("pool_count", &self.pool_count())
            .field("default_fee_tier", &self.default_fee_tier())
            .finish_non_exhaustive()
    }
}
