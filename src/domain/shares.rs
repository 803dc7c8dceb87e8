//! Pool ownership shares (LP units).

use core::fmt;

use serde::{Deserialize, Serialize};

use super::Amount;

/// A count of pool ownership shares.
///
/// Distinct from [`Amount`] because it measures a claim on a pool's
/// reserves rather than a quantity of any particular asset. Share counts
/// are minted on provision and burned on withdrawal; they never wrap.
///
/// # Examples
///
/// ```
/// use hydra_cpmm::domain::Shares;
///
/// let a = Shares::new(1_414);
/// let b = Shares::new(707);
/// assert_eq!(a.checked_add(&b), Some(Shares::new(2_121)));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Shares(u128);

impl Shares {
    /// No shares.
    pub const ZERO: Self = Self(0);

    /// Creates a new `Shares` value from a raw `u128`.
    #[must_use]
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the underlying `u128` value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if there are no shares.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction. Returns `None` on underflow.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Reinterprets the share count as a raw amount for mixed
    /// share × reserve arithmetic.
    pub const fn as_amount(&self) -> Amount {
        Amount::new(self.0)
    }
}

impl fmt::Display for Shares {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
