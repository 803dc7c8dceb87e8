//! Liquidity management trait extending [`SwapPool`].
//!
//! [`LiquidityPool`] adds share issuance and redemption on top of the
//! trading surface provided by [`SwapPool`].
//!
//! # Share Accounting Invariant
//!
//! The total reported by [`LiquidityPool::total_shares`] **only** changes
//! through [`LiquidityPool::provide_liquidity`] and
//! [`LiquidityPool::withdraw_liquidity`]. Swaps grow the reserves behind
//! each share but never the share count itself.
//!
//! For a pool with holders `h₁ … hₙ`:
//!
//! ```text
//! total_shares = Σ share_balance_of(hᵢ)
//! ```

use super::SwapPool;
use crate::domain::{AccountId, Amount, Shares};
use crate::error::AmmError;

/// Trait for pools that issue proportional ownership shares.
///
/// # Errors
///
/// Methods that can fail return [`Result<T, AmmError>`]. Common error
/// variants include:
///
/// - [`AmmError::ZeroSharesMinted`]: deposit too small to mint a share
/// - [`AmmError::InsufficientShares`]: burning more than the caller holds
/// - [`AmmError::TransferFailed`]: custody refused a transfer
pub trait LiquidityPool: SwapPool {
    /// Deposits `amount_a` and `amount_b` from `caller` and credits the
    /// minted shares to `caller`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroAmount`] if either amount is zero.
    /// - [`AmmError::ZeroSharesMinted`] if the deposit mints nothing.
    /// - [`AmmError::TransferFailed`] if custody refuses a transfer.
    fn provide_liquidity(
        &self,
        amount_a: Amount,
        amount_b: Amount,
        caller: &AccountId,
    ) -> Result<Shares, AmmError>;

    /// Burns `shares` held by `caller` and returns the amounts of asset A
    /// and asset B paid out.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroAmount`] if `shares` is zero.
    /// - [`AmmError::EmptyPool`] if no shares exist.
    /// - [`AmmError::InsufficientShares`] if `caller` holds too few.
    /// - [`AmmError::InsufficientOutput`] if either payout is zero.
    fn withdraw_liquidity(
        &self,
        shares: Shares,
        caller: &AccountId,
    ) -> Result<(Amount, Amount), AmmError>;

    /// Returns the total outstanding shares.
    #[must_use]
    fn total_shares(&self) -> Shares;

    /// Returns the shares held by `owner`.
    #[must_use]
    fn share_balance_of(&self, owner: &AccountId) -> Shares;
}
