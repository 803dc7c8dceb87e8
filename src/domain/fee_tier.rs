//! Swap fee tiers built on [`BasisPoints`].

use core::fmt;

use serde::{Deserialize, Serialize};

use super::BasisPoints;
use crate::error::AmmError;

/// The swap fee a pool retains from every input, in basis points.
///
/// The fee never leaves the pool: it is kept in reserves and so accrues
/// to share holders. The constant-product pricing uses the retained
/// fraction `(10_000 - fee) / 10_000`; for the default 30 bp tier that is
/// exactly `997 / 1000`.
///
/// # Examples
///
/// ```
/// use hydra_cpmm::domain::FeeTier;
///
/// let tier = FeeTier::TIER_0_30_PERCENT;
/// assert_eq!(tier.basis_points().get(), 30);
/// assert_eq!(tier.retained_numerator(), Ok(9_970));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeeTier(BasisPoints);

impl FeeTier {
    /// No fee. Swaps keep the invariant constant up to rounding.
    pub const ZERO: Self = Self(BasisPoints::ZERO);

    /// 0.05% fee for correlated pairs (5 bp).
    pub const TIER_0_05_PERCENT: Self = Self(BasisPoints::new(5));

    /// 0.30% fee, the classic constant-product default (30 bp).
    pub const TIER_0_30_PERCENT: Self = Self(BasisPoints::new(30));

    /// 1.00% fee for volatile pairs (100 bp).
    pub const TIER_1_00_PERCENT: Self = Self(BasisPoints::new(100));

    /// Creates a new `FeeTier` from arbitrary [`BasisPoints`].
    ///
    /// Validity is checked by [`validate`](Self::validate), not here.
    #[must_use]
    pub const fn new(basis_points: BasisPoints) -> Self {
        Self(basis_points)
    }

    /// Returns the underlying [`BasisPoints`].
    #[must_use]
    pub const fn basis_points(&self) -> BasisPoints {
        self.0
    }

    /// Checks that swaps priced with this tier can produce output.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] for a fee of 100% or more.
    pub fn validate(&self) -> Result<(), AmmError> {
        if self.0.get() >= BasisPoints::MAX_PERCENT.get() {
            return Err(AmmError::InvalidFee("fee must be below 100%"));
        }
        Ok(())
    }

    /// Numerator of the retained input fraction over `10_000`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] if the tier is not valid.
    pub fn retained_numerator(&self) -> Result<u128, AmmError> {
        self.validate()?;
        self.0
            .complement()
            .map(|bp| u128::from(bp.get()))
            .ok_or(AmmError::InvalidFee("fee exceeds 100%"))
    }
}

impl Default for FeeTier {
    fn default() -> Self {
        Self::TIER_0_30_PERCENT
    }
}

impl fmt::Display for FeeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeeTier({})", self.0)
    }
}
