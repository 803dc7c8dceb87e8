//! Per-holder share balances of one pool.

use std::collections::BTreeMap;

use crate::domain::{AccountId, Shares};
use crate::error::AmmError;
use crate::math::CheckedArithmetic;

/// Share balances keyed by owner, plus their running total.
///
/// `total` always equals the sum of all balances: both are updated by the
/// same call, and a call that would break either one fails before
/// touching anything. Zero balances are removed from the map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ShareLedger {
    balances: BTreeMap<AccountId, Shares>,
    total: Shares,
}

impl ShareLedger {
    pub(crate) fn total(&self) -> Shares {
        self.total
    }

    pub(crate) fn balance_of(&self, owner: &AccountId) -> Shares {
        self.balances.get(owner).copied().unwrap_or(Shares::ZERO)
    }

    /// Number of accounts holding a non-zero balance.
    pub(crate) fn holders(&self) -> usize {
        self.balances.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&AccountId, &Shares)> {
        self.balances.iter()
    }

    /// Mints `shares` to `owner`.
    pub(crate) fn credit(&mut self, owner: &AccountId, shares: Shares) -> Result<(), AmmError> {
        let total = self.total.safe_add(&shares)?;
        let balance = self.balance_of(owner).safe_add(&shares)?;
        if !balance.is_zero() {
            self.balances.insert(*owner, balance);
        }
        self.total = total;
        Ok(())
    }

    /// Burns `shares` from `owner`.
    pub(crate) fn debit(&mut self, owner: &AccountId, shares: Shares) -> Result<(), AmmError> {
        let available = self.balance_of(owner);
        let balance = available
            .checked_sub(&shares)
            .ok_or(AmmError::InsufficientShares {
                available,
                requested: shares,
            })?;
        let total = self.total.safe_sub(&shares)?;
        if balance.is_zero() {
            self.balances.remove(owner);
        } else {
            self.balances.insert(*owner, balance);
        }
        self.total = total;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn alice() -> AccountId {
        AccountId::from_bytes([0xa1; 32])
    }

    fn bob() -> AccountId {
        AccountId::from_bytes([0xb0; 32])
    }

    #[test]
    fn credit_and_debit_track_total() {
        let mut ledger = ShareLedger::default();
        let Ok(()) = ledger.credit(&alice(), Shares::new(1_414)) else {
            panic!("credit alice");
        };
        let Ok(()) = ledger.credit(&bob(), Shares::new(707)) else {
            panic!("credit bob");
        };
        assert_eq!(ledger.total(), Shares::new(2_121));

        let Ok(()) = ledger.debit(&alice(), Shares::new(414)) else {
            panic!("debit alice");
        };
        assert_eq!(ledger.balance_of(&alice()), Shares::new(1_000));
        assert_eq!(ledger.total(), Shares::new(1_707));
        let sum: u128 = ledger.iter().map(|(_, s)| s.get()).sum();
        assert_eq!(sum, ledger.total().get());
    }

    #[test]
    fn overdraw_rejected_without_change() {
        let mut ledger = ShareLedger::default();
        let Ok(()) = ledger.credit(&alice(), Shares::new(10)) else {
            panic!("credit");
        };
        let before = ledger.clone();
        assert_eq!(
            ledger.debit(&alice(), Shares::new(11)),
            Err(AmmError::InsufficientShares {
                available: Shares::new(10),
                requested: Shares::new(11),
            })
        );
        assert_eq!(ledger, before);
        assert!(ledger.debit(&bob(), Shares::new(1)).is_err());
    }

    #[test]
    fn emptied_holder_removed() {
        let mut ledger = ShareLedger::default();
        let Ok(()) = ledger.credit(&alice(), Shares::new(5)) else {
            panic!("credit");
        };
        let Ok(()) = ledger.debit(&alice(), Shares::new(5)) else {
            panic!("debit");
        };
        assert_eq!(ledger.holders(), 0);
        assert!(ledger.total().is_zero());
    }

    #[test]
    fn total_overflow_rejected() {
        let mut ledger = ShareLedger::default();
        let Ok(()) = ledger.credit(&alice(), Shares::new(u128::MAX)) else {
            panic!("credit");
        };
        assert!(matches!(
            ledger.credit(&bob(), Shares::new(1)),
            Err(AmmError::Overflow(_))
        ));
        assert_eq!(ledger.balance_of(&bob()), Shares::ZERO);
    }
}
