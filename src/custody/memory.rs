//! In-process reference implementation of [`AssetCustody`].

use std::collections::{HashMap, HashSet};

use parking_lot::Mutex;

use super::AssetCustody;
use crate::domain::{AccountId, Amount, AssetHandle, BasisPoints, BPS_DENOMINATOR};
use crate::error::TransferError;

#[derive(Debug, Default)]
struct Ledger {
    balances: HashMap<(AssetHandle, AccountId), Amount>,
    transfer_fees: HashMap<AssetHandle, BasisPoints>,
    frozen: HashSet<AssetHandle>,
}

impl Ledger {
    fn balance(&self, asset: &AssetHandle, owner: &AccountId) -> Amount {
        self.balances
            .get(&(*asset, *owner))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    fn credit(
        &mut self,
        asset: &AssetHandle,
        owner: &AccountId,
        amount: Amount,
    ) -> Result<(), TransferError> {
        let next = self
            .balance(asset, owner)
            .checked_add(&amount)
            .ok_or(TransferError::BalanceOverflow)?;
        self.balances.insert((*asset, *owner), next);
        Ok(())
    }

    /// Moves `amount` out of `from`; the receiver gets `amount` minus any
    /// transfer fee configured for the asset, and the fee is burned.
    fn move_funds(
        &mut self,
        asset: &AssetHandle,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), TransferError> {
        if self.frozen.contains(asset) {
            return Err(TransferError::Rejected(format!("asset {asset} is frozen")));
        }

        let available = self.balance(asset, from);
        let remaining = available
            .checked_sub(&amount)
            .ok_or(TransferError::InsufficientBalance {
                available,
                requested: amount,
            })?;

        let fee = match self.transfer_fees.get(asset) {
            Some(bps) => Amount::new(
                amount
                    .get()
                    .checked_mul(u128::from(bps.get()))
                    .ok_or(TransferError::BalanceOverflow)?
                    / u128::from(BPS_DENOMINATOR),
            ),
            None => Amount::ZERO,
        };
        let received = amount
            .checked_sub(&fee)
            .ok_or(TransferError::Rejected("transfer fee exceeds amount".to_owned()))?;

        // Credit first so an overflowing receiver leaves the sender intact.
        if from != to {
            self.credit(asset, to, received)?;
            self.balances.insert((*asset, *from), remaining);
        } else {
            self.balances
                .insert((*asset, *from), remaining.checked_add(&received).unwrap_or(available));
        }

        tracing::trace!(%asset, %from, %to, %amount, %fee, "custody transfer");
        Ok(())
    }
}

/// A thread-safe, in-memory asset ledger.
///
/// Every call takes the ledger lock for its own duration only, so a pool
/// holding its operation lock can call in freely and nested callbacks
/// never deadlock on the ledger.
///
/// Besides plain balances it can simulate two behaviours real tokens
/// exhibit:
///
/// - a per-asset **transfer fee** (the receiver is credited less than the
///   amount sent), which is why pools resynchronize reserves from
///   custody instead of adding the requested amounts;
/// - **frozen** assets whose transfers are rejected, used to exercise
///   rollback of partially settled operations.
///
/// # Examples
///
/// ```
/// use hydra_cpmm::custody::{AssetCustody, InMemoryCustody};
/// use hydra_cpmm::domain::{AccountId, Amount, AssetHandle};
///
/// let custody = InMemoryCustody::new();
/// let asset = AssetHandle::from_bytes([1u8; 32]);
/// let alice = AccountId::from_bytes([0xa1; 32]);
/// let bob = AccountId::from_bytes([0xb0; 32]);
///
/// custody.mint(&asset, &alice, Amount::new(100)).expect("mint");
/// custody.transfer_from(&asset, &alice, &bob, Amount::new(40)).expect("transfer");
/// assert_eq!(custody.balance_of(&asset, &bob), Amount::new(40));
/// ```
#[derive(Debug, Default)]
pub struct InMemoryCustody {
    ledger: Mutex<Ledger>,
}

impl InMemoryCustody {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates `amount` of `asset` out of thin air and credits it to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::BalanceOverflow`] if the balance overflows.
    pub fn mint(
        &self,
        asset: &AssetHandle,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), TransferError> {
        self.ledger.lock().credit(asset, to, amount)
    }

    /// Destroys `amount` of `asset` held by `from`.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::InsufficientBalance`] if `from` holds less
    /// than `amount`.
    pub fn burn(
        &self,
        asset: &AssetHandle,
        from: &AccountId,
        amount: Amount,
    ) -> Result<(), TransferError> {
        let mut ledger = self.ledger.lock();
        let available = ledger.balance(asset, from);
        let remaining = available
            .checked_sub(&amount)
            .ok_or(TransferError::InsufficientBalance {
                available,
                requested: amount,
            })?;
        ledger.balances.insert((*asset, *from), remaining);
        Ok(())
    }

    /// Sets the fee withheld from every transfer of `asset`.
    pub fn set_transfer_fee(&self, asset: &AssetHandle, fee: BasisPoints) {
        let mut ledger = self.ledger.lock();
        if fee == BasisPoints::ZERO {
            ledger.transfer_fees.remove(asset);
        } else {
            ledger.transfer_fees.insert(*asset, fee);
        }
    }

    /// Rejects every transfer of `asset` until [`thaw`](Self::thaw).
    pub fn freeze(&self, asset: &AssetHandle) {
        self.ledger.lock().frozen.insert(*asset);
    }

    /// Re-enables transfers of `asset`.
    pub fn thaw(&self, asset: &AssetHandle) {
        self.ledger.lock().frozen.remove(asset);
    }

    /// Sum of all balances of `asset` across every account, or `None` if
    /// the sum does not fit in `u128`.
    #[must_use]
    pub fn total_supply(&self, asset: &AssetHandle) -> Option<u128> {
        self.ledger
            .lock()
            .balances
            .iter()
            .filter(|((a, _), _)| a == asset)
            .try_fold(0u128, |total, (_, amount)| total.checked_add(amount.get()))
    }
}

impl AssetCustody for InMemoryCustody {
    fn balance_of(&self, asset: &AssetHandle, owner: &AccountId) -> Amount {
        self.ledger.lock().balance(asset, owner)
    }

    fn transfer_from(
        &self,
        asset: &AssetHandle,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), TransferError> {
        self.ledger.lock().move_funds(asset, from, to, amount)
    }

    fn transfer(
        &self,
        asset: &AssetHandle,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), TransferError> {
        self.ledger.lock().move_funds(asset, from, to, amount)
    }
}
