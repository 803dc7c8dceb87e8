//! Pool creation and lookup.
//!
//! The [`PoolRegistry`] creates at most one pool per unordered asset
//! pair, finds it again under either ordering, and enumerates pools in
//! creation order. Registry-wide settings are guarded by the
//! [`AdminCapability`] its constructor returns.
//!
//! # Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use hydra_cpmm::custody::InMemoryCustody;
//! use hydra_cpmm::domain::AssetHandle;
//! use hydra_cpmm::factory::PoolRegistry;
//! use hydra_cpmm::traits::SwapPool;
//!
//! let (registry, _admin) = PoolRegistry::with_defaults(Arc::new(InMemoryCustody::new()));
//! let usdc = AssetHandle::from_bytes([1u8; 32]);
//! let weth = AssetHandle::from_bytes([2u8; 32]);
//!
//! let pool = registry.create_pool(weth, usdc).expect("pool created");
//! assert_eq!(pool.asset_pair().asset_a(), usdc);
//! assert!(registry.lookup_pool(usdc, weth).is_some());
//! assert_eq!(registry.pool_count(), 1);
//! ```

mod admin;
mod registry;

pub use admin::AdminCapability;
pub use registry::{PoolHandle, PoolRegistry};
