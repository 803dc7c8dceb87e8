//! Snapshot of a pool's two reserves.

use serde::{Deserialize, Serialize};

use super::Amount;
use crate::error::AmmError;

/// The pool's cached custody balances, oriented by the canonical pair.
///
/// `a` is the balance of [`AssetPair::asset_a`](super::AssetPair::asset_a),
/// `b` of [`AssetPair::asset_b`](super::AssetPair::asset_b).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Reserves {
    /// Reserve of the lower-ordered asset.
    pub a: Amount,
    /// Reserve of the higher-ordered asset.
    pub b: Amount,
}

impl Reserves {
    /// Both reserves zero.
    pub const EMPTY: Self = Self {
        a: Amount::ZERO,
        b: Amount::ZERO,
    };

    /// Creates a reserves snapshot.
    pub const fn new(a: Amount, b: Amount) -> Self {
        Self { a, b }
    }

    /// Returns `true` when both reserves are zero.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.a.is_zero() && self.b.is_zero()
    }

    /// Returns `true` when either reserve is zero, so no price exists.
    #[must_use]
    pub const fn is_one_sided(&self) -> bool {
        self.a.is_zero() || self.b.is_zero()
    }

    /// The constant-product invariant `k = a × b`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the product exceeds `u128`.
    pub fn invariant(&self) -> Result<u128, AmmError> {
        self.a
            .get()
            .checked_mul(self.b.get())
            .ok_or(AmmError::Overflow("invariant overflow"))
    }
}
