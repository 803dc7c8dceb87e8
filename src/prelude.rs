//! Convenience re-exports for common types and traits.
//!
//! The prelude provides a single import to bring all commonly used items
//! into scope:
//!
//! ```rust
//! use hydra_cpmm::prelude::*;
//! ```

pub use crate::domain::{
    AccountId, Amount, AssetHandle, AssetPair, BasisPoints, FeeTier, Reserves, Shares,
};

pub use crate::traits::{LiquidityPool, SwapPool};

pub use crate::math::CheckedArithmetic;

pub use crate::config::{PoolConfig, RegistryConfig};

pub use crate::custody::{AssetCustody, InMemoryCustody};

pub use crate::events::{EventLog, EventSink, NullSink, PoolEvent};

pub use crate::error::{AmmError, Result, TransferError};

pub use crate::factory::{AdminCapability, PoolHandle, PoolRegistry};

pub use crate::pools::ConstantProductPool;
