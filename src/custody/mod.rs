//! Asset custody boundary.
//!
//! Pools never hold balances themselves: every deposit, withdrawal, and
//! swap leg is an instruction to an [`AssetCustody`] implementation, and
//! a pool's reserves are always re-read from it afterwards. The trait is
//! the only seam between the accounting engine and whatever ledger,
//! token contract, or database the host uses.
//!
//! [`InMemoryCustody`] is a thread-safe reference ledger suitable for
//! tests, simulations, and hosts that keep balances in process.

mod memory;

pub use memory::InMemoryCustody;

use crate::domain::{AccountId, Amount, AssetHandle};
use crate::error::TransferError;

/// The external collaborator that owns asset balances.
///
/// Implementations must be `Send + Sync`: a registry shares one custody
/// handle between all of its pools, and pools on different threads call
/// into it concurrently.
///
/// Calls may re-enter the engine (a hostile token can call back into the
/// pool that is paying it). Pools detect and reject such nested mutating
/// calls, so implementations need no special care here.
pub trait AssetCustody: Send + Sync {
    /// Returns the balance of `asset` held by `owner`.
    fn balance_of(&self, asset: &AssetHandle, owner: &AccountId) -> Amount;

    /// Pulls `amount` of `asset` from `from` into `to`.
    ///
    /// Pools use this to collect deposits and swap inputs from a caller.
    ///
    /// # Errors
    ///
    /// Any [`TransferError`] aborts the surrounding pool operation.
    fn transfer_from(
        &self,
        asset: &AssetHandle,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), TransferError>;

    /// Pushes `amount` of `asset` out of an account the pool controls.
    ///
    /// `from` is always the pool's own account; pools use this to pay
    /// withdrawals and swap outputs.
    ///
    /// # Errors
    ///
    /// Any [`TransferError`] aborts the surrounding pool operation.
    fn transfer(
        &self,
        asset: &AssetHandle,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), TransferError>;
}
