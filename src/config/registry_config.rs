//! Registry-wide settings, loadable from TOML.

use serde::{Deserialize, Serialize};

use crate::domain::FeeTier;
use crate::error::AmmError;

/// Settings shared by every pool a registry creates.
///
/// ```toml
/// # fee in basis points applied by `create_pool`
/// default_fee_tier = 30
/// ```
///
/// Missing keys fall back to [`RegistryConfig::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    /// Fee tier applied by [`PoolRegistry::create_pool`](crate::factory::PoolRegistry::create_pool).
    pub default_fee_tier: FeeTier,
}

impl RegistryConfig {
    /// Creates a validated config with the given default fee tier.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] if the fee is 100% or more.
    pub fn new(default_fee_tier: FeeTier) -> Result<Self, AmmError> {
        let config = Self { default_fee_tier };
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidConfiguration`] if the document does not parse.
    /// - [`AmmError::InvalidFee`] if the parsed fee is 100% or more.
    ///
    /// # Examples
    ///
    /// ```
    /// use hydra_cpmm::config::RegistryConfig;
    ///
    /// let cfg = RegistryConfig::from_toml_str("default_fee_tier = 5").expect("valid");
    /// assert_eq!(cfg.default_fee_tier.basis_points().get(), 5);
    /// ```
    pub fn from_toml_str(raw: &str) -> Result<Self, AmmError> {
        let config: Self = toml::from_str(raw)
            .map_err(|e| AmmError::InvalidConfiguration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] if the fee is 100% or more.
    pub fn validate(&self) -> Result<(), AmmError> {
        self.default_fee_tier.validate()
    }
}
