//! Pool lifecycle events.
//!
//! Every committed state change emits one [`PoolEvent`] to the registry's
//! [`EventSink`]. Events are emitted only after an operation has fully
//! settled, so a failed or rolled-back call never produces one.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::domain::{AccountId, Amount, AssetHandle, Shares};

/// A committed change to a pool or the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PoolEvent {
    /// A new pool was registered.
    PoolCreated {
        /// Lower asset of the canonical pair.
        asset_a: AssetHandle,
        /// Higher asset of the canonical pair.
        asset_b: AssetHandle,
        /// The pool's custody account.
        pool: AccountId,
        /// Position in the registry's enumeration order.
        index: usize,
    },

    /// Shares were minted against a two-sided deposit.
    LiquidityAdded {
        /// The pool's custody account.
        pool: AccountId,
        /// Account credited with the shares.
        provider: AccountId,
        /// Requested deposit of asset A.
        amount_a: Amount,
        /// Requested deposit of asset B.
        amount_b: Amount,
        /// Shares credited to the provider.
        shares_minted: Shares,
    },

    /// Shares were burned and both assets paid out.
    LiquidityRemoved {
        /// The pool's custody account.
        pool: AccountId,
        /// Account whose shares were burned.
        provider: AccountId,
        /// Asset A paid to the provider.
        amount_a: Amount,
        /// Asset B paid to the provider.
        amount_b: Amount,
        /// Shares burned.
        shares_burned: Shares,
    },

    /// A trade executed against the pool.
    Swapped {
        /// The pool's custody account.
        pool: AccountId,
        /// Account that paid the input and received the output.
        trader: AccountId,
        /// Asset paid in.
        asset_in: AssetHandle,
        /// Amount paid in.
        amount_in: Amount,
        /// Asset paid out.
        asset_out: AssetHandle,
        /// Amount paid out.
        amount_out: Amount,
    },

    /// Cached reserves were re-read from custody.
    Synced {
        /// The pool's custody account.
        pool: AccountId,
        /// Reserve of asset A after the sync.
        reserve_a: Amount,
        /// Reserve of asset B after the sync.
        reserve_b: Amount,
    },
}

/// Receiver for committed [`PoolEvent`]s.
///
/// Called while the emitting pool still holds its operation lock, so an
/// implementation must not call back into a mutating pool method.
pub trait EventSink: Send + Sync {
    /// Records one event.
    fn emit(&self, event: PoolEvent);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: PoolEvent) {}
}

/// Collects events in memory, in emission order.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Mutex<Vec<PoolEvent>>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every event recorded so far.
    #[must_use]
    pub fn snapshot(&self) -> Vec<PoolEvent> {
        self.events.lock().clone()
    }

    /// Removes and returns every event recorded so far.
    pub fn drain(&self) -> Vec<PoolEvent> {
        core::mem::take(&mut *self.events.lock())
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl EventSink for EventLog {
    fn emit(&self, event: PoolEvent) {
        self.events.lock().push(event);
    }
}
