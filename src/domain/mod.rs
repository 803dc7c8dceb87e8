//! Fundamental domain value types used throughout the engine.
//!
//! This module contains the value types that model the pool domain:
//! asset handles and pairs, owner identities, amounts, shares, fees, and
//! reserve snapshots. All types are newtypes so that an amount can never
//! be passed where a share count is expected.

mod account_id;
mod amount;
mod asset_handle;
mod asset_pair;
mod basis_points;
mod fee_tier;
mod reserves;
mod shares;

pub use account_id::AccountId;
pub use amount::Amount;
pub use asset_handle::AssetHandle;
pub use asset_pair::AssetPair;
pub use basis_points::{BasisPoints, BPS_DENOMINATOR};
pub use fee_tier::FeeTier;
pub use reserves::Reserves;
pub use shares::Shares;
