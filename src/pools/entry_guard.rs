//! Lock-protected pool state and the single-entry guard.

use core::cell::{Cell, RefCell};

use crate::domain::Reserves;
use crate::error::AmmError;

use super::share_ledger::ShareLedger;

/// Mutable state of one pool.
#[derive(Debug, Default)]
pub(crate) struct PoolState {
    pub(crate) reserves: Reserves,
    pub(crate) shares: ShareLedger,
}

/// Contents of a pool's re-entrant lock.
///
/// The lock admits the owning thread more than once so that plain
/// accessors keep working from inside a custody callback. `entered`
/// marks a mutating operation in flight; a second one on the same thread
/// is refused by [`EntryGuard::enter`], and so is pricing, since cached
/// reserves lag custody until the operation commits.
///
/// `state` is only ever borrowed for short, non-overlapping sections and
/// never while custody is being called.
#[derive(Debug, Default)]
pub(crate) struct PoolCell {
    entered: Cell<bool>,
    pub(crate) state: RefCell<PoolState>,
}

/// Marks a pool as mid-operation until dropped.
///
/// Released on every exit path, including early `?` returns.
#[derive(Debug)]
pub(crate) struct EntryGuard<'a> {
    entered: &'a Cell<bool>,
}

impl PoolCell {
    /// True while a mutating operation holds the entry flag.
    pub(crate) fn in_flight(&self) -> bool {
        self.entered.get()
    }
}

impl<'a> EntryGuard<'a> {
    /// # Errors
    ///
    /// Returns [`AmmError::Reentrancy`] if an operation is already in
    /// flight on this cell.
    pub(crate) fn enter(cell: &'a PoolCell) -> Result<Self, AmmError> {
        if cell.entered.replace(true) {
            return Err(AmmError::Reentrancy);
        }
        Ok(Self {
            entered: &cell.entered,
        })
    }
}

impl Drop for EntryGuard<'_> {
    fn drop(&mut self) {
        self.entered.set(false);
    }
}
