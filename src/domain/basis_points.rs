//! Basis-point representation for percentages.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Number of basis points in 100%.
pub const BPS_DENOMINATOR: u32 = 10_000;

/// A percentage expressed in basis points (1 bp = 0.01%, 10 000 bp = 100%).
///
/// All `u32` values are representable, but values above 10 000 are
/// nonsensical as percentages. Use [`is_valid_percent`](Self::is_valid_percent)
/// to check.
///
/// # Examples
///
/// ```
/// use hydra_cpmm::domain::BasisPoints;
///
/// let bp = BasisPoints::new(30);
/// assert_eq!(bp.get(), 30);
/// assert_eq!(bp.complement(), Some(BasisPoints::new(9_970)));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BasisPoints(u32);

impl BasisPoints {
    /// Zero basis points (0%).
    pub const ZERO: Self = Self(0);

    /// 100% expressed in basis points.
    pub const MAX_PERCENT: Self = Self(BPS_DENOMINATOR);

    /// Creates a new `BasisPoints` from a raw `u32` value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the underlying `u32` value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns `true` if the value is in the valid percentage range (`0..=10_000`).
    #[must_use]
    pub const fn is_valid_percent(&self) -> bool {
        self.0 <= BPS_DENOMINATOR
    }

    /// Returns `10_000 - self`, the share left after taking this percentage.
    ///
    /// `None` when the value exceeds 100%.
    #[must_use]
    pub const fn complement(&self) -> Option<Self> {
        match BPS_DENOMINATOR.checked_sub(self.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bp", self.0)
    }
}
