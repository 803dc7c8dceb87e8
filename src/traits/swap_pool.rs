//! Core swap pool trait for quoting and executing trades.
//!
//! [`SwapPool`] is the trading surface every pool exposes:
//!
//! 1. **Quote**: [`SwapPool::quote_output`] prices an exact-in trade
//!    without mutating anything.
//! 2. **Execute**: [`SwapPool::swap`] settles the trade through custody.
//! 3. **Inspect pair**: [`SwapPool::asset_pair`] returns the canonical pair.
//! 4. **Inspect fees**: [`SwapPool::fee_tier`] returns the pool's fee tier.
//!
//! # Fee Deduction Invariant
//!
//! The fee is withheld from the input **before** the pricing curve is
//! applied and stays in the pool:
//!
//! ```text
//! input_with_fee = amount_in × (10_000 − fee_bps)
//! amount_out     = price_curve(input_with_fee)
//! ```
//!
//! # Shared Access
//!
//! All methods take `&self`. Pools are shared across threads behind an
//! `Arc` and serialize their own mutations, so callers never need an
//! outer lock.

use crate::domain::{AccountId, Amount, AssetHandle, AssetPair, FeeTier};
use crate::error::AmmError;

/// Trading surface of a two-asset pool.
///
/// # Errors
///
/// Methods that can fail return [`Result<T, AmmError>`]. Common error
/// variants include:
///
/// - [`AmmError::InvalidAsset`]: input asset is not part of the pair
/// - [`AmmError::EmptyPool`]: one or both reserves are zero
/// - [`AmmError::SlippageExceeded`]: output below the caller's floor
/// - [`AmmError::Overflow`]: arithmetic overflow during calculation
pub trait SwapPool {
    /// Returns the output of trading `amount_in` of `asset_in` against
    /// the current reserves.
    ///
    /// Pure: repeated calls with unchanged reserves return the same value.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAsset`] if `asset_in` is not in the pair.
    /// - [`AmmError::ZeroAmount`] if `amount_in` is zero.
    /// - [`AmmError::EmptyPool`] if either reserve is zero.
    fn quote_output(&self, amount_in: Amount, asset_in: &AssetHandle) -> Result<Amount, AmmError>;

    /// Trades `amount_in` of `asset_in` from `caller` for the opposite
    /// asset, failing if the output is below `min_output`.
    ///
    /// Either completes fully or leaves all state unchanged.
    ///
    /// # Errors
    ///
    /// - Everything [`quote_output`](Self::quote_output) returns.
    /// - [`AmmError::InsufficientOutput`] if the output is zero.
    /// - [`AmmError::SlippageExceeded`] if the output is below `min_output`.
    /// - [`AmmError::TransferFailed`] if custody refuses a transfer.
    fn swap(
        &self,
        amount_in: Amount,
        asset_in: &AssetHandle,
        min_output: Amount,
        caller: &AccountId,
    ) -> Result<Amount, AmmError>;

    /// Returns the canonical pair managed by this pool.
    ///
    /// The ordering is immutable: `asset_a() < asset_b()`.
    #[must_use]
    fn asset_pair(&self) -> &AssetPair;

    /// Returns the fee tier applied to swaps.
    ///
    /// Constant for the lifetime of the pool.
    #[must_use]
    fn fee_tier(&self) -> FeeTier;
}
