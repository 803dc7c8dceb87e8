//! Per-pool creation parameters.

use crate::domain::{AssetPair, FeeTier};
use crate::error::AmmError;

/// Immutable parameters of a constant-product pool (`x · y = k`).
///
/// Pools always start empty; the first provision sets the price. A
/// `PoolConfig` therefore carries only the canonical pair and the swap
/// fee that stays fixed for the pool's lifetime.
///
/// # Validation
///
/// - The fee must be below 100%.
/// - The pair is validated at [`AssetPair`] construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    pair: AssetPair,
    fee_tier: FeeTier,
}

impl PoolConfig {
    /// Creates a new `PoolConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] if the fee is 100% or more.
    pub fn new(pair: AssetPair, fee_tier: FeeTier) -> Result<Self, AmmError> {
        let config = Self { pair, fee_tier };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] if the fee is 100% or more.
    pub fn validate(&self) -> Result<(), AmmError> {
        self.fee_tier.validate()
    }

    /// Returns the canonical asset pair.
    #[must_use]
    pub const fn pair(&self) -> &AssetPair {
        &self.pair
    }

    /// Returns the fee tier.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.fee_tier
    }
}
