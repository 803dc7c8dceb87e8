//! Journaled settlement of one pool operation.
//!
//! A [`Settlement`] wraps every side effect an operation performs after
//! validation: share mints and burns, and custody transfers into or out
//! of the pool account. It is armed on creation. [`Settlement::commit`]
//! resynchronizes reserves from custody and disarms it; dropping it armed
//! (an early `?` return or a panic) reverses every journaled effect in
//! reverse order, so a failed operation leaves no partial state behind.

use core::cell::RefCell;

use tracing::{error, warn};

use crate::custody::AssetCustody;
use crate::domain::{AccountId, Amount, AssetHandle, AssetPair, Reserves, Shares};
use crate::error::AmmError;

use super::entry_guard::PoolState;

#[derive(Debug, Clone, Copy)]
enum Direction {
    /// Into the pool from `counterparty`.
    Pulled,
    /// Out of the pool to `counterparty`.
    Pushed,
}

/// One completed custody transfer.
///
/// `delivered` is the balance change the receiver actually observed, which
/// is less than the requested amount for assets that charge a transfer
/// fee. Reversal moves exactly that much back.
#[derive(Debug, Clone, Copy)]
struct Leg {
    asset: AssetHandle,
    counterparty: AccountId,
    delivered: Amount,
    direction: Direction,
}

#[derive(Debug, Clone, Copy)]
enum ShareEffect {
    Minted(AccountId, Shares),
    Burned(AccountId, Shares),
}

pub(crate) struct Settlement<'a, C: AssetCustody> {
    custody: &'a C,
    state: &'a RefCell<PoolState>,
    pool: AccountId,
    pair: AssetPair,
    legs: Vec<Leg>,
    share_effects: Vec<ShareEffect>,
    armed: bool,
}

impl<'a, C: AssetCustody> Settlement<'a, C> {
    pub(crate) fn new(
        custody: &'a C,
        state: &'a RefCell<PoolState>,
        pool: AccountId,
        pair: AssetPair,
    ) -> Self {
        Self {
            custody,
            state,
            pool,
            pair,
            legs: Vec::with_capacity(2),
            share_effects: Vec::with_capacity(2),
            armed: true,
        }
    }

    pub(crate) fn mint_shares(&mut self, owner: &AccountId, shares: Shares) -> Result<(), AmmError> {
        self.state.borrow_mut().shares.credit(owner, shares)?;
        self.share_effects.push(ShareEffect::Minted(*owner, shares));
        Ok(())
    }

    pub(crate) fn burn_shares(&mut self, owner: &AccountId, shares: Shares) -> Result<(), AmmError> {
        self.state.borrow_mut().shares.debit(owner, shares)?;
        self.share_effects.push(ShareEffect::Burned(*owner, shares));
        Ok(())
    }

    /// Pulls `amount` of `asset` from `from` into the pool account and
    /// returns what the pool actually received.
    pub(crate) fn pull(
        &mut self,
        asset: &AssetHandle,
        from: &AccountId,
        amount: Amount,
    ) -> Result<Amount, AmmError> {
        let before = self.custody.balance_of(asset, &self.pool);
        self.custody.transfer_from(asset, from, &self.pool, amount)?;
        let after = self.custody.balance_of(asset, &self.pool);
        let received = after.checked_sub(&before).unwrap_or(Amount::ZERO);
        self.legs.push(Leg {
            asset: *asset,
            counterparty: *from,
            delivered: received,
            direction: Direction::Pulled,
        });
        Ok(received)
    }

    /// Pushes `amount` of `asset` from the pool account to `to`.
    pub(crate) fn push(
        &mut self,
        asset: &AssetHandle,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), AmmError> {
        let before = self.custody.balance_of(asset, to);
        self.custody.transfer(asset, &self.pool, to, amount)?;
        let after = self.custody.balance_of(asset, to);
        self.legs.push(Leg {
            asset: *asset,
            counterparty: *to,
            delivered: after.checked_sub(&before).unwrap_or(Amount::ZERO),
            direction: Direction::Pushed,
        });
        Ok(())
    }

    /// Finalizes the operation and returns the resynchronized reserves.
    pub(crate) fn commit(mut self) -> Reserves {
        self.armed = false;
        self.resync()
    }

    fn resync(&self) -> Reserves {
        let reserves = Reserves::new(
            self.custody.balance_of(&self.pair.asset_a(), &self.pool),
            self.custody.balance_of(&self.pair.asset_b(), &self.pool),
        );
        if let Ok(mut state) = self.state.try_borrow_mut() {
            state.reserves = reserves;
        }
        reserves
    }

    fn reverse_leg(&self, leg: &Leg) {
        if leg.delivered.is_zero() {
            return;
        }
        let result = match leg.direction {
            Direction::Pulled => {
                self.custody
                    .transfer(&leg.asset, &self.pool, &leg.counterparty, leg.delivered)
            }
            Direction::Pushed => {
                self.custody
                    .transfer_from(&leg.asset, &leg.counterparty, &self.pool, leg.delivered)
            }
        };
        if let Err(err) = result {
            error!(
                pool = %self.pool,
                asset = %leg.asset,
                counterparty = %leg.counterparty,
                amount = %leg.delivered,
                %err,
                "failed to reverse settlement leg"
            );
        }
    }

    fn reverse_shares(&self, effect: ShareEffect) {
        let Ok(mut state) = self.state.try_borrow_mut() else {
            error!(pool = %self.pool, "pool state busy during rollback");
            return;
        };
        let result = match effect {
            ShareEffect::Minted(owner, shares) => state.shares.debit(&owner, shares),
            ShareEffect::Burned(owner, shares) => state.shares.credit(&owner, shares),
        };
        if let Err(err) = result {
            error!(pool = %self.pool, %err, "failed to restore share balance");
        }
    }
}

impl<C: AssetCustody> Drop for Settlement<'_, C> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if !self.legs.is_empty() || !self.share_effects.is_empty() {
            warn!(
                pool = %self.pool,
                legs = self.legs.len(),
                share_effects = self.share_effects.len(),
                "rolling back partially settled operation"
            );
        }
        let legs = core::mem::take(&mut self.legs);
        for leg in legs.iter().rev() {
            self.reverse_leg(leg);
        }
        let effects = core::mem::take(&mut self.share_effects);
        for effect in effects.into_iter().rev() {
            self.reverse_shares(effect);
        }
        self.resync();
    }
}
