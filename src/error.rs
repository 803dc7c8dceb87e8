//! Unified error types for the Hydra CPMM library.
//!
//! All fallible operations across the crate return [`AmmError`] as their
//! error type, ensuring a consistent error handling experience for consumers.
//! Failures reported by the asset custody collaborator are carried as
//! [`TransferError`] inside [`AmmError::TransferFailed`].

use thiserror::Error;

use crate::domain::{Amount, Shares};

/// Convenience alias used by every fallible function in the crate.
pub type Result<T> = core::result::Result<T, AmmError>;

/// Error reported by an [`AssetCustody`](crate::custody::AssetCustody)
/// implementation when it refuses or fails to move funds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    /// The sending account does not hold enough of the asset.
    #[error("insufficient balance: available {available}, requested {requested}")]
    InsufficientBalance {
        /// Balance held by the sender.
        available: Amount,
        /// Amount the transfer tried to move.
        requested: Amount,
    },

    /// Crediting the receiver would overflow its balance.
    #[error("receiver balance overflow")]
    BalanceOverflow,

    /// The custody backend rejected the transfer for its own reasons.
    #[error("transfer rejected: {0}")]
    Rejected(String),
}

/// Every failure the engine can surface to a caller.
///
/// No variant is recovered internally: an operation that returns an
/// error leaves pool state, share balances, and custody balances exactly
/// as they were before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmmError {
    /// Both sides of a pair name the same asset.
    #[error("a pool requires two distinct assets")]
    IdenticalAssets,

    /// An asset handle is the null sentinel or is not part of the pool.
    #[error("invalid asset: {0}")]
    InvalidAsset(&'static str),

    /// A pool for this unordered pair is already registered.
    #[error("pool already exists for this asset pair")]
    PoolAlreadyExists,

    /// Enumeration index past the end of the pool list.
    #[error("pool index {index} out of range (pool count {len})")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of registered pools.
        len: usize,
    },

    /// An amount that must be positive was zero.
    #[error("amount must be positive: {0}")]
    ZeroAmount(&'static str),

    /// The deposit is too small to mint a single share at current scale.
    #[error("deposit too small to mint any shares")]
    ZeroSharesMinted,

    /// A burn exceeds the holder's share balance.
    #[error("insufficient shares: balance {available}, requested {requested}")]
    InsufficientShares {
        /// Shares held by the caller.
        available: Shares,
        /// Shares the caller tried to burn.
        requested: Shares,
    },

    /// A computed output amount is zero.
    #[error("computed output amount is zero")]
    InsufficientOutput,

    /// The computed output is below the caller's minimum.
    #[error("slippage exceeded: output {actual} below minimum {minimum}")]
    SlippageExceeded {
        /// Minimum the caller was willing to accept.
        minimum: Amount,
        /// Output the pool would have paid.
        actual: Amount,
    },

    /// The custody collaborator failed to move funds.
    #[error("asset transfer failed: {0}")]
    TransferFailed(#[from] TransferError),

    /// The operation needs reserves or shares the pool does not have.
    #[error("pool is empty")]
    EmptyPool,

    /// A mutating call entered a pool that is already mid-operation.
    #[error("reentrant call into a pool operation")]
    Reentrancy,

    /// An administrative call presented a capability this registry did
    /// not issue.
    #[error("caller is not authorized for this registry")]
    Unauthorized,

    /// Arithmetic overflow.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Arithmetic underflow.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// The fee tier cannot be used for swaps.
    #[error("invalid fee: {0}")]
    InvalidFee(&'static str),

    /// A configuration value is invalid or could not be parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}
