//! Pool and registry configuration structs.
//!
//! [`PoolConfig`] fixes the immutable parameters of one pool;
//! [`RegistryConfig`] holds the settings a registry applies to every pool
//! it creates and can be loaded from TOML.

mod pool_config;
mod registry_config;

pub use pool_config::PoolConfig;
pub use registry_config::RegistryConfig;
