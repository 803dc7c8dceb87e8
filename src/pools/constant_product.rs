//! Constant Product pool implementation (Uniswap V2 style).
//!
//! The swap invariant is `x × y = k` where `x` and `y` are the reserves
//! of the two assets. The fee is withheld from the input **before** the
//! pricing formula is applied and stays in the pool, so `k` grows with
//! every trade.
//!
//! # Swap Algorithm (asset A → asset B, fee `f` basis points)
//!
//! 1. `input_with_fee = amount_in × (10 000 − f)`
//! 2. `numerator = input_with_fee × reserve_b`
//! 3. `denominator = reserve_a × 10 000 + input_with_fee`
//! 4. `amount_out = floor(numerator / denominator)`
//!
//! For the default 30 bp tier this is exactly the classic `997 / 1000`
//! formula.
//!
//! # Settlement
//!
//! Every mutating call follows the same order under the pool lock:
//! validate and price against the locked state, apply share effects,
//! move funds through custody, then re-read both reserves from custody.
//! Effects and transfers go through a
//! [`Settlement`](super::settlement::Settlement) that reverses them if
//! any later step fails.

use core::fmt;
use std::sync::Arc;

use parking_lot::ReentrantMutex;
use tracing::{debug, info, warn};

use super::entry_guard::{EntryGuard, PoolCell, PoolState};
use super::settlement::Settlement;
use crate::config::PoolConfig;
use crate::custody::AssetCustody;
use crate::domain::{
    AccountId, Amount, AssetHandle, AssetPair, FeeTier, Reserves, Shares, BPS_DENOMINATOR,
};
use crate::error::AmmError;
use crate::events::{EventSink, PoolEvent};
use crate::math::{isqrt, mul_div, CheckedArithmetic};
use crate::traits::{LiquidityPool, SwapPool};

/// Output of an exact-in trade of `amount_in` against the given reserves.
///
/// This is the pricing function behind [`SwapPool::quote_output`] and
/// [`SwapPool::swap`], exposed for callers that want to price against
/// reserves they already hold.
///
/// # Errors
///
/// - [`AmmError::ZeroAmount`] if `amount_in` is zero.
/// - [`AmmError::EmptyPool`] if either reserve is zero.
/// - [`AmmError::InvalidFee`] if the fee is 100% or more.
/// - [`AmmError::Overflow`] if an intermediate product exceeds `u128`.
///
/// # Examples
///
/// ```
/// use hydra_cpmm::domain::{Amount, FeeTier};
/// use hydra_cpmm::pools::output_for;
///
/// let out = output_for(
///     Amount::new(100),
///     Amount::new(1_500),
///     Amount::new(3_000),
///     FeeTier::TIER_0_30_PERCENT,
/// );
/// assert_eq!(out, Ok(Amount::new(186)));
/// ```
pub fn output_for(
    amount_in: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
    fee_tier: FeeTier,
) -> Result<Amount, AmmError> {
    if amount_in.is_zero() {
        return Err(AmmError::ZeroAmount("input amount"));
    }
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(AmmError::EmptyPool);
    }

    let retained = Amount::new(fee_tier.retained_numerator()?);
    let input_with_fee = amount_in
        .checked_mul(&retained)
        .ok_or(AmmError::Overflow("input with fee overflow"))?;
    let scaled_reserve = reserve_in
        .checked_mul(&Amount::new(u128::from(BPS_DENOMINATOR)))
        .ok_or(AmmError::Overflow("scaled reserve overflow"))?;
    let denominator = scaled_reserve
        .checked_add(&input_with_fee)
        .ok_or(AmmError::Overflow("denominator overflow"))?;

    mul_div(input_with_fee, reserve_out, denominator)
}

/// Shares minted for a deposit, priced against the pre-deposit state.
///
/// Bootstrap: `floor(√(a × b))`. Otherwise the smaller of the two
/// proportional claims; the excess of the over-supplied asset is absorbed
/// by the pool.
fn shares_for_deposit(
    reserves: Reserves,
    total: Shares,
    amount_a: Amount,
    amount_b: Amount,
) -> Result<Shares, AmmError> {
    if total.is_zero() {
        let product = amount_a
            .checked_mul(&amount_b)
            .ok_or(AmmError::Overflow("bootstrap product overflow"))?;
        return Ok(Shares::new(isqrt(product.get())));
    }
    if reserves.is_one_sided() {
        return Err(AmmError::EmptyPool);
    }
    let claim_a = mul_div(amount_a, total.as_amount(), reserves.a)?;
    let claim_b = mul_div(amount_b, total.as_amount(), reserves.b)?;
    Ok(Shares::new(core::cmp::min(claim_a, claim_b).get()))
}

fn check_output(output: Amount, minimum: Amount) -> Result<(), AmmError> {
    if output.is_zero() {
        return Err(AmmError::InsufficientOutput);
    }
    if output < minimum {
        return Err(AmmError::SlippageExceeded {
            minimum,
            actual: output,
        });
    }
    Ok(())
}

/// A Constant Product AMM pool (`x · y = k`) over two custodied assets.
///
/// Pools are created empty by
/// [`PoolRegistry`](crate::factory::PoolRegistry) and shared as
/// [`PoolHandle`](crate::factory::PoolHandle)s. All methods take `&self`:
/// each pool serializes its own mutating operations behind a re-entrant
/// lock, so operations on different pools never contend.
///
/// # State
///
/// - `reserves`: the pool account's custody balances, re-read after
///   every operation
/// - share balances per owner and their total
///
/// Balances themselves live in the [`AssetCustody`] collaborator under
/// the pool's [`account`](Self::account).
pub struct ConstantProductPool<C: AssetCustody> {
    config: PoolConfig,
    account: AccountId,
    custody: Arc<C>,
    events: Arc<dyn EventSink>,
    cell: ReentrantMutex<PoolCell>,
}

impl<C: AssetCustody> ConstantProductPool<C> {
    /// Creates an empty pool whose reserves start at the pool account's
    /// current custody balances. `registry` namespaces the pool account.
    pub(crate) fn new(
        registry: u64,
        config: PoolConfig,
        custody: Arc<C>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        let account = AccountId::for_pool(registry, config.pair());
        let reserves = Reserves::new(
            custody.balance_of(&config.pair().asset_a(), &account),
            custody.balance_of(&config.pair().asset_b(), &account),
        );
        let cell = PoolCell::default();
        cell.state.borrow_mut().reserves = reserves;
        Self {
            config,
            account,
            custody,
            events,
            cell: ReentrantMutex::new(cell),
        }
    }

    /// The pool's own custody account.
    #[must_use]
    pub const fn account(&self) -> AccountId {
        self.account
    }

    /// Current reserves, as of the last completed operation.
    ///
    /// Read from inside a custody callback, this is the state before the
    /// in-flight operation, not what custody holds at that moment. Use
    /// [`quote_output`](SwapPool::quote_output) for pricing; it refuses
    /// to quote mid-operation.
    #[must_use]
    pub fn reserves(&self) -> Reserves {
        self.read(|state| state.reserves)
    }

    /// Number of accounts holding shares.
    #[must_use]
    pub fn holder_count(&self) -> usize {
        self.read(|state| state.shares.holders())
    }

    /// Snapshot of every non-zero share balance, ordered by owner.
    #[must_use]
    pub fn share_balances(&self) -> Vec<(AccountId, Shares)> {
        self.read(|state| state.shares.iter().map(|(o, s)| (*o, *s)).collect())
    }

    /// Re-reads both reserves from custody.
    ///
    /// Balances sent straight to the pool account (donations) are not
    /// counted in pricing until a sync or the next operation picks them
    /// up.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Reentrancy`] when called from inside another
    /// operation on this pool.
    pub fn sync(&self) -> Result<Reserves, AmmError> {
        self.exclusive("sync", |cell| {
            let reserves = self.settlement(cell).commit();
            debug!(
                pool = %self.account,
                reserve_a = %reserves.a,
                reserve_b = %reserves.b,
                "synced reserves"
            );
            self.events.emit(PoolEvent::Synced {
                pool: self.account,
                reserve_a: reserves.a,
                reserve_b: reserves.b,
            });
            Ok(reserves)
        })
    }

    fn read<T>(&self, f: impl FnOnce(&PoolState) -> T) -> T {
        let cell = self.cell.lock();
        let state = cell.state.borrow();
        f(&state)
    }

    /// Like [`read`](Self::read), but refused while an operation on this
    /// pool is in flight: its reserves are not resynchronized yet.
    fn read_settled<T>(&self, f: impl FnOnce(&PoolState) -> T) -> Result<T, AmmError> {
        let cell = self.cell.lock();
        if cell.in_flight() {
            return Err(AmmError::Reentrancy);
        }
        let state = cell.state.borrow();
        Ok(f(&state))
    }

    /// Runs a mutating operation with the pool lock held and the entry
    /// flag set.
    fn exclusive<T>(
        &self,
        operation: &'static str,
        f: impl FnOnce(&PoolCell) -> Result<T, AmmError>,
    ) -> Result<T, AmmError> {
        let guard = self.cell.lock();
        let cell: &PoolCell = &guard;
        let result = EntryGuard::enter(cell).and_then(|_entry| f(cell));
        if let Err(err) = &result {
            warn!(pool = %self.account, operation, %err, "pool operation rejected");
        }
        result
    }

    fn settlement<'a>(&'a self, cell: &'a PoolCell) -> Settlement<'a, C> {
        Settlement::new(
            self.custody.as_ref(),
            &cell.state,
            self.account,
            *self.config.pair(),
        )
    }

    /// Returns `(asset_out, reserve_in, reserve_out)` for a trade paying
    /// in `asset_in`.
    fn orient(
        &self,
        reserves: Reserves,
        asset_in: &AssetHandle,
    ) -> Result<(AssetHandle, Amount, Amount), AmmError> {
        let pair = self.config.pair();
        let asset_out = pair.other(asset_in)?;
        if *asset_in == pair.asset_a() {
            Ok((asset_out, reserves.a, reserves.b))
        } else {
            Ok((asset_out, reserves.b, reserves.a))
        }
    }

    fn provide_locked(
        &self,
        cell: &PoolCell,
        amount_a: Amount,
        amount_b: Amount,
        caller: &AccountId,
    ) -> Result<Shares, AmmError> {
        if amount_a.is_zero() {
            return Err(AmmError::ZeroAmount("amount_a"));
        }
        if amount_b.is_zero() {
            return Err(AmmError::ZeroAmount("amount_b"));
        }

        let (before, total) = {
            let state = cell.state.borrow();
            (state.reserves, state.shares.total())
        };
        let minted = shares_for_deposit(before, total, amount_a, amount_b)?;
        if minted.is_zero() {
            return Err(AmmError::ZeroSharesMinted);
        }

        let pair = self.config.pair();
        let mut settlement = self.settlement(cell);
        settlement.mint_shares(caller, minted)?;
        let received_a = settlement.pull(&pair.asset_a(), caller, amount_a)?;
        let received_b = settlement.pull(&pair.asset_b(), caller, amount_b)?;

        // Assets with a transfer fee deliver less than requested; shares
        // are re-priced on what actually arrived.
        let minted = if received_a < amount_a || received_b < amount_b {
            let repriced = shares_for_deposit(before, total, received_a, received_b)?;
            if repriced.is_zero() {
                return Err(AmmError::ZeroSharesMinted);
            }
            let shortfall = minted.safe_sub(&repriced)?;
            if !shortfall.is_zero() {
                settlement.burn_shares(caller, shortfall)?;
            }
            repriced
        } else {
            minted
        };

        let after = settlement.commit();
        info!(
            pool = %self.account,
            provider = %caller,
            %amount_a,
            %amount_b,
            shares = %minted,
            reserve_a = %after.a,
            reserve_b = %after.b,
            "liquidity added"
        );
        self.events.emit(PoolEvent::LiquidityAdded {
            pool: self.account,
            provider: *caller,
            amount_a,
            amount_b,
            shares_minted: minted,
        });
        Ok(minted)
    }

    fn withdraw_locked(
        &self,
        cell: &PoolCell,
        shares: Shares,
        caller: &AccountId,
    ) -> Result<(Amount, Amount), AmmError> {
        if shares.is_zero() {
            return Err(AmmError::ZeroAmount("shares to burn"));
        }

        let (reserves, total, held) = {
            let state = cell.state.borrow();
            (
                state.reserves,
                state.shares.total(),
                state.shares.balance_of(caller),
            )
        };
        if total.is_zero() {
            return Err(AmmError::EmptyPool);
        }
        if shares > held {
            return Err(AmmError::InsufficientShares {
                available: held,
                requested: shares,
            });
        }

        let out_a = mul_div(shares.as_amount(), reserves.a, total.as_amount())?;
        let out_b = mul_div(shares.as_amount(), reserves.b, total.as_amount())?;
        if out_a.is_zero() || out_b.is_zero() {
            return Err(AmmError::InsufficientOutput);
        }

        let pair = self.config.pair();
        let mut settlement = self.settlement(cell);
        settlement.burn_shares(caller, shares)?;
        settlement.push(&pair.asset_a(), caller, out_a)?;
        settlement.push(&pair.asset_b(), caller, out_b)?;
        let after = settlement.commit();

        info!(
            pool = %self.account,
            provider = %caller,
            amount_a = %out_a,
            amount_b = %out_b,
            shares = %shares,
            reserve_a = %after.a,
            reserve_b = %after.b,
            "liquidity removed"
        );
        self.events.emit(PoolEvent::LiquidityRemoved {
            pool: self.account,
            provider: *caller,
            amount_a: out_a,
            amount_b: out_b,
            shares_burned: shares,
        });
        Ok((out_a, out_b))
    }

    fn swap_locked(
        &self,
        cell: &PoolCell,
        amount_in: Amount,
        asset_in: &AssetHandle,
        min_output: Amount,
        caller: &AccountId,
    ) -> Result<Amount, AmmError> {
        let reserves = cell.state.borrow().reserves;
        let (asset_out, reserve_in, reserve_out) = self.orient(reserves, asset_in)?;
        let fee_tier = self.config.fee_tier();
        let quoted = output_for(amount_in, reserve_in, reserve_out, fee_tier)?;
        check_output(quoted, min_output)?;

        let mut settlement = self.settlement(cell);
        let received = settlement.pull(asset_in, caller, amount_in)?;
        let amount_out = if received < amount_in {
            if received.is_zero() {
                return Err(AmmError::InsufficientOutput);
            }
            let repriced = output_for(received, reserve_in, reserve_out, fee_tier)?;
            check_output(repriced, min_output)?;
            repriced
        } else {
            quoted
        };
        settlement.push(&asset_out, caller, amount_out)?;
        let after = settlement.commit();

        info!(
            pool = %self.account,
            trader = %caller,
            asset_in = %asset_in,
            %amount_in,
            asset_out = %asset_out,
            %amount_out,
            reserve_a = %after.a,
            reserve_b = %after.b,
            "swap executed"
        );
        self.events.emit(PoolEvent::Swapped {
            pool: self.account,
            trader: *caller,
            asset_in: *asset_in,
            amount_in,
            asset_out,
            amount_out,
        });
        Ok(amount_out)
    }
}

impl<C: AssetCustody> SwapPool for ConstantProductPool<C> {
    /// Prices an exact-in trade against the current reserves.
    ///
    /// Takes the pool lock briefly and mutates nothing.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAsset`] if `asset_in` is not in the pair.
    /// - [`AmmError::ZeroAmount`] if `amount_in` is zero.
    /// - [`AmmError::EmptyPool`] if either reserve is zero.
    /// - [`AmmError::Reentrancy`] if called from inside another operation
    ///   on this pool, while custody and reserves disagree.
    fn quote_output(&self, amount_in: Amount, asset_in: &AssetHandle) -> Result<Amount, AmmError> {
        let reserves = self.read_settled(|state| state.reserves)?;
        let (_, reserve_in, reserve_out) = self.orient(reserves, asset_in)?;
        let output = output_for(amount_in, reserve_in, reserve_out, self.config.fee_tier())?;
        debug!(pool = %self.account, asset_in = %asset_in, %amount_in, %output, "quoted swap");
        Ok(output)
    }

    /// Executes an exact-in trade: pulls `amount_in` of `asset_in` from
    /// `caller` and pays the opposite asset back.
    ///
    /// # Errors
    ///
    /// Everything [`quote_output`](Self::quote_output) returns, plus:
    ///
    /// - [`AmmError::InsufficientOutput`] if the output rounds to zero.
    /// - [`AmmError::SlippageExceeded`] if the output is below `min_output`.
    /// - [`AmmError::TransferFailed`] if custody refuses either leg.
    /// - [`AmmError::Reentrancy`] if called from inside another operation
    ///   on this pool.
    fn swap(
        &self,
        amount_in: Amount,
        asset_in: &AssetHandle,
        min_output: Amount,
        caller: &AccountId,
    ) -> Result<Amount, AmmError> {
        self.exclusive("swap", |cell| {
            self.swap_locked(cell, amount_in, asset_in, min_output, caller)
        })
    }

    fn asset_pair(&self) -> &AssetPair {
        self.config.pair()
    }

    fn fee_tier(&self) -> FeeTier {
        self.config.fee_tier()
    }
}

impl<C: AssetCustody> LiquidityPool for ConstantProductPool<C> {
    /// Deposits both assets and mints shares to `caller`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroAmount`] if either amount is zero.
    /// - [`AmmError::EmptyPool`] if shares exist but a reserve is zero.
    /// - [`AmmError::ZeroSharesMinted`] if the deposit rounds to no shares.
    /// - [`AmmError::TransferFailed`] if custody refuses either pull.
    /// - [`AmmError::Reentrancy`] if called from inside another operation
    ///   on this pool.
    fn provide_liquidity(
        &self,
        amount_a: Amount,
        amount_b: Amount,
        caller: &AccountId,
    ) -> Result<Shares, AmmError> {
        self.exclusive("provide_liquidity", |cell| {
            self.provide_locked(cell, amount_a, amount_b, caller)
        })
    }

    /// Burns `shares` from `caller` and pays out the proportional part of
    /// both reserves.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroAmount`] if `shares` is zero.
    /// - [`AmmError::EmptyPool`] if no shares exist.
    /// - [`AmmError::InsufficientShares`] if `caller` holds fewer shares.
    /// - [`AmmError::InsufficientOutput`] if either payout rounds to zero.
    /// - [`AmmError::TransferFailed`] if custody refuses either push.
    /// - [`AmmError::Reentrancy`] if called from inside another operation
    ///   on this pool.
    fn withdraw_liquidity(
        &self,
        shares: Shares,
        caller: &AccountId,
    ) -> Result<(Amount, Amount), AmmError> {
        self.exclusive("withdraw_liquidity", |cell| {
            self.withdraw_locked(cell, shares, caller)
        })
    }

    fn total_shares(&self) -> Shares {
        self.read(|state| state.shares.total())
    }

    fn share_balance_of(&self, owner: &AccountId) -> Shares {
        self.read(|state| state.shares.balance_of(owner))
    }
}

impl<C: AssetCustody> fmt::Debug for ConstantProductPool<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstantProductPool")
            .field("pair", self.config.pair())
            .field("fee_tier", &self.config.fee_tier())
            .field("account", &self.account)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::custody::InMemoryCustody;
    use crate::domain::BasisPoints;
    use crate::events::EventLog;

    // -- helpers --------------------------------------------------------------

    fn asset_a() -> AssetHandle {
        AssetHandle::from_bytes([1u8; 32])
    }

    fn asset_b() -> AssetHandle {
        AssetHandle::from_bytes([2u8; 32])
    }

    fn alice() -> AccountId {
        AccountId::from_bytes([0xa1; 32])
    }

    fn bob() -> AccountId {
        AccountId::from_bytes([0xb0; 32])
    }

    fn trader() -> AccountId {
        AccountId::from_bytes([0x7e; 32])
    }

    struct Fixture {
        custody: Arc<InMemoryCustody>,
        events: Arc<EventLog>,
        pool: ConstantProductPool<InMemoryCustody>,
    }

    fn fixture(fee: FeeTier) -> Fixture {
        let custody = Arc::new(InMemoryCustody::new());
        for who in [alice(), bob(), trader()] {
            for asset in [asset_a(), asset_b()] {
                let Ok(()) = custody.mint(&asset, &who, Amount::new(1_000_000)) else {
                    panic!("mint");
                };
            }
        }
        let events = Arc::new(EventLog::new());
        let Ok(pair) = AssetPair::new(asset_b(), asset_a()) else {
            panic!("valid pair");
        };
        let Ok(config) = PoolConfig::new(pair, fee) else {
            panic!("valid config");
        };
        let pool = ConstantProductPool::new(0, config, Arc::clone(&custody), events.clone());
        Fixture {
            custody,
            events,
            pool,
        }
    }

    /// Scenarios 1 and 2: reserves 1500 / 3000, total 2121.
    fn seeded() -> Fixture {
        let f = fixture(FeeTier::TIER_0_30_PERCENT);
        let Ok(_) = f
            .pool
            .provide_liquidity(Amount::new(1_000), Amount::new(2_000), &alice())
        else {
            panic!("bootstrap");
        };
        let Ok(_) = f
            .pool
            .provide_liquidity(Amount::new(500), Amount::new(1_000), &bob())
        else {
            panic!("proportional");
        };
        f
    }

    fn assert_reserves_match_custody(f: &Fixture) {
        let reserves = f.pool.reserves();
        let account = f.pool.account();
        assert_eq!(reserves.a, f.custody.balance_of(&asset_a(), &account));
        assert_eq!(reserves.b, f.custody.balance_of(&asset_b(), &account));
    }

    // -- pricing ----------------------------------------------------------------

    #[test]
    fn output_matches_classic_formula_at_thirty_bp() {
        // 100 × 997 × 3000 / (1500 × 1000 + 100 × 997)
        let classic = 100u128 * 997 * 3_000 / (1_500 * 1_000 + 100 * 997);
        assert_eq!(
            output_for(
                Amount::new(100),
                Amount::new(1_500),
                Amount::new(3_000),
                FeeTier::TIER_0_30_PERCENT
            ),
            Ok(Amount::new(classic))
        );
        assert_eq!(classic, 186);
    }

    #[test]
    fn output_rejects_bad_inputs() {
        let fee = FeeTier::TIER_0_30_PERCENT;
        assert_eq!(
            output_for(Amount::ZERO, Amount::new(1), Amount::new(1), fee),
            Err(AmmError::ZeroAmount("input amount"))
        );
        assert_eq!(
            output_for(Amount::new(1), Amount::ZERO, Amount::new(1), fee),
            Err(AmmError::EmptyPool)
        );
        assert!(matches!(
            output_for(
                Amount::new(1),
                Amount::new(1),
                Amount::new(1),
                FeeTier::new(BasisPoints::new(10_000))
            ),
            Err(AmmError::InvalidFee(_))
        ));
    }

    #[test]
    fn zero_fee_output() {
        // 100 × 3000 / (1500 + 100) = 187.5
        assert_eq!(
            output_for(Amount::new(100), Amount::new(1_500), Amount::new(3_000), FeeTier::ZERO),
            Ok(Amount::new(187))
        );
    }

    // -- provide_liquidity ----------------------------------------------------

    #[test]
    fn bootstrap_mints_sqrt_of_product() {
        let f = fixture(FeeTier::TIER_0_30_PERCENT);
        let Ok(minted) = f
            .pool
            .provide_liquidity(Amount::new(1_000), Amount::new(2_000), &alice())
        else {
            panic!("expected Ok");
        };
        assert_eq!(minted, Shares::new(1_414));
        assert_eq!(
            f.pool.reserves(),
            Reserves::new(Amount::new(1_000), Amount::new(2_000))
        );
        assert_eq!(f.pool.total_shares(), Shares::new(1_414));
        assert_eq!(f.pool.share_balance_of(&alice()), Shares::new(1_414));
        assert_reserves_match_custody(&f);
    }

    #[test]
    fn proportional_deposit_mints_min_claim() {
        let f = seeded();
        assert_eq!(f.pool.share_balance_of(&bob()), Shares::new(707));
        assert_eq!(f.pool.total_shares(), Shares::new(2_121));
        assert_eq!(
            f.pool.reserves(),
            Reserves::new(Amount::new(1_500), Amount::new(3_000))
        );
    }

    #[test]
    fn excess_of_oversupplied_asset_absorbed() {
        let f = seeded();
        // claim_a = 150 × 2121 / 1500 = 212, claim_b = 3000 × 2121 / 3000 = 2121
        let Ok(minted) = f
            .pool
            .provide_liquidity(Amount::new(150), Amount::new(3_000), &trader())
        else {
            panic!("expected Ok");
        };
        assert_eq!(minted, Shares::new(212));
        assert_eq!(
            f.pool.reserves(),
            Reserves::new(Amount::new(1_650), Amount::new(6_000))
        );
    }

    #[test]
    fn zero_amounts_rejected() {
        let f = fixture(FeeTier::TIER_0_30_PERCENT);
        assert_eq!(
            f.pool
                .provide_liquidity(Amount::ZERO, Amount::new(1), &alice()),
            Err(AmmError::ZeroAmount("amount_a"))
        );
        assert_eq!(
            f.pool
                .provide_liquidity(Amount::new(1), Amount::ZERO, &alice()),
            Err(AmmError::ZeroAmount("amount_b"))
        );
        assert!(f.events.is_empty());
    }

    #[test]
    fn dust_deposit_mints_nothing() {
        let f = seeded();
        // 1 × 2121 / 3000 = 0
        assert_eq!(
            f.pool
                .provide_liquidity(Amount::new(1), Amount::new(1), &trader()),
            Err(AmmError::ZeroSharesMinted)
        );
        assert_eq!(f.pool.total_shares(), Shares::new(2_121));
    }

    #[test]
    fn failed_pull_rolls_back_shares_and_first_leg() {
        let f = seeded();
        f.custody.freeze(&asset_b());
        let result = f
            .pool
            .provide_liquidity(Amount::new(100), Amount::new(200), &trader());
        assert!(matches!(result, Err(AmmError::TransferFailed(_))));
        assert_eq!(f.pool.total_shares(), Shares::new(2_121));
        assert_eq!(f.pool.share_balance_of(&trader()), Shares::ZERO);
        assert_eq!(
            f.custody.balance_of(&asset_a(), &trader()),
            Amount::new(1_000_000)
        );
        assert_reserves_match_custody(&f);
    }

    #[test]
    fn fee_on_transfer_deposit_repriced_on_received() {
        let f = seeded();
        f.custody.set_transfer_fee(&asset_a(), BasisPoints::new(1_000));
        // received a = 450; claim_a = 450 × 2121 / 1500 = 636
        let Ok(minted) = f
            .pool
            .provide_liquidity(Amount::new(500), Amount::new(1_000), &trader())
        else {
            panic!("expected Ok");
        };
        assert_eq!(minted, Shares::new(636));
        assert_eq!(f.pool.total_shares(), Shares::new(2_757));
        assert_reserves_match_custody(&f);
    }

    // -- withdraw_liquidity ---------------------------------------------------

    #[test]
    fn withdraw_pays_proportional_share() {
        let f = seeded();
        let Ok((a, b)) = f.pool.withdraw_liquidity(Shares::new(707), &bob()) else {
            panic!("expected Ok");
        };
        // 707 × 1500 / 2121 = 500, 707 × 3000 / 2121 = 1000
        assert_eq!((a, b), (Amount::new(500), Amount::new(1_000)));
        assert_eq!(f.pool.total_shares(), Shares::new(1_414));
        assert_eq!(f.pool.share_balance_of(&bob()), Shares::ZERO);
        assert_reserves_match_custody(&f);
    }

    #[test]
    fn withdraw_errors() {
        let empty = fixture(FeeTier::TIER_0_30_PERCENT);
        assert_eq!(
            empty.pool.withdraw_liquidity(Shares::new(1), &alice()),
            Err(AmmError::EmptyPool)
        );

        let f = seeded();
        assert_eq!(
            f.pool.withdraw_liquidity(Shares::ZERO, &alice()),
            Err(AmmError::ZeroAmount("shares to burn"))
        );
        assert_eq!(
            f.pool.withdraw_liquidity(Shares::new(708), &bob()),
            Err(AmmError::InsufficientShares {
                available: Shares::new(707),
                requested: Shares::new(708),
            })
        );
        // 1 × 1500 / 2121 = 0
        assert_eq!(
            f.pool.withdraw_liquidity(Shares::new(1), &bob()),
            Err(AmmError::InsufficientOutput)
        );
    }

    #[test]
    fn failed_push_restores_shares_and_first_payout() {
        let f = seeded();
        f.custody.freeze(&asset_b());
        let result = f.pool.withdraw_liquidity(Shares::new(707), &bob());
        assert!(matches!(result, Err(AmmError::TransferFailed(_))));
        assert_eq!(f.pool.share_balance_of(&bob()), Shares::new(707));
        assert_eq!(
            f.pool.reserves(),
            Reserves::new(Amount::new(1_500), Amount::new(3_000))
        );
        assert_eq!(
            f.custody.balance_of(&asset_a(), &bob()),
            Amount::new(999_500)
        );
        assert_reserves_match_custody(&f);
    }

    #[test]
    fn full_withdrawal_empties_pool() {
        let f = seeded();
        let Ok(_) = f.pool.withdraw_liquidity(Shares::new(1_414), &alice()) else {
            panic!("alice out");
        };
        let Ok(_) = f.pool.withdraw_liquidity(Shares::new(707), &bob()) else {
            panic!("bob out");
        };
        assert!(f.pool.total_shares().is_zero());
        assert_eq!(f.pool.holder_count(), 0);
        assert!(f.pool.reserves().is_empty());
    }

    // -- swap -------------------------------------------------------------------

    #[test]
    fn swap_pays_quoted_output() {
        let f = seeded();
        let Ok(quote) = f.pool.quote_output(Amount::new(100), &asset_a()) else {
            panic!("quote");
        };
        assert_eq!(quote, Amount::new(186));
        let Ok(out) = f
            .pool
            .swap(Amount::new(100), &asset_a(), Amount::new(150), &trader())
        else {
            panic!("swap");
        };
        assert_eq!(out, quote);
        assert_eq!(
            f.pool.reserves(),
            Reserves::new(Amount::new(1_600), Amount::new(2_814))
        );
        assert_eq!(
            f.custody.balance_of(&asset_b(), &trader()),
            Amount::new(1_000_186)
        );
        assert_reserves_match_custody(&f);
    }

    #[test]
    fn swap_b_to_a() {
        let f = seeded();
        // 200 × 9970 × 1500 / (3000 × 10000 + 200 × 9970) = 93
        let Ok(out) = f
            .pool
            .swap(Amount::new(200), &asset_b(), Amount::ZERO, &trader())
        else {
            panic!("swap");
        };
        assert_eq!(out, Amount::new(93));
        assert_eq!(
            f.pool.reserves(),
            Reserves::new(Amount::new(1_407), Amount::new(3_200))
        );
    }

    #[test]
    fn slippage_floor_enforced_without_mutation() {
        let f = seeded();
        let before = f.pool.reserves();
        assert_eq!(
            f.pool
                .swap(Amount::new(100), &asset_a(), Amount::new(200), &trader()),
            Err(AmmError::SlippageExceeded {
                minimum: Amount::new(200),
                actual: Amount::new(186),
            })
        );
        assert_eq!(f.pool.reserves(), before);
        assert_eq!(
            f.custody.balance_of(&asset_a(), &trader()),
            Amount::new(1_000_000)
        );
    }

    #[test]
    fn swap_errors() {
        let f = seeded();
        let stranger = AssetHandle::from_bytes([9u8; 32]);
        assert!(matches!(
            f.pool.swap(Amount::new(1), &stranger, Amount::ZERO, &trader()),
            Err(AmmError::InvalidAsset(_))
        ));
        assert_eq!(
            f.pool.swap(Amount::ZERO, &asset_a(), Amount::ZERO, &trader()),
            Err(AmmError::ZeroAmount("input amount"))
        );
        // 1 × 9970 × 1500 / (3000 × 10000 + 9970) = 0
        assert_eq!(
            f.pool.swap(Amount::new(1), &asset_b(), Amount::ZERO, &trader()),
            Err(AmmError::InsufficientOutput)
        );

        let empty = fixture(FeeTier::TIER_0_30_PERCENT);
        assert_eq!(
            empty.pool.quote_output(Amount::new(1), &asset_a()),
            Err(AmmError::EmptyPool)
        );
    }

    #[test]
    fn invariant_grows_across_swaps() {
        let f = seeded();
        let Ok(mut k) = f.pool.reserves().invariant() else {
            panic!("k");
        };
        for (amount, asset) in [(100, asset_a()), (250, asset_b()), (7, asset_a())] {
            let Ok(_) = f
                .pool
                .swap(Amount::new(amount), &asset, Amount::ZERO, &trader())
            else {
                panic!("swap");
            };
            let Ok(next) = f.pool.reserves().invariant() else {
                panic!("k");
            };
            assert!(next > k);
            k = next;
        }
    }

    #[test]
    fn fee_on_transfer_input_repriced() {
        let f = seeded();
        f.custody.set_transfer_fee(&asset_a(), BasisPoints::new(1_000));
        let Ok(k) = f.pool.reserves().invariant() else {
            panic!("k");
        };
        // received 90: 90 × 9970 × 3000 / (1500 × 10000 + 90 × 9970) = 169
        let Ok(out) = f
            .pool
            .swap(Amount::new(100), &asset_a(), Amount::new(150), &trader())
        else {
            panic!("swap");
        };
        assert_eq!(out, Amount::new(169));
        let Ok(next) = f.pool.reserves().invariant() else {
            panic!("k");
        };
        assert!(next > k);
        assert_reserves_match_custody(&f);
    }

    // -- sync and events --------------------------------------------------------

    #[test]
    fn sync_picks_up_donations() {
        let f = seeded();
        let Ok(()) = f
            .custody
            .mint(&asset_a(), &f.pool.account(), Amount::new(500))
        else {
            panic!("donate");
        };
        assert_eq!(f.pool.reserves().a, Amount::new(1_500));
        let Ok(reserves) = f.pool.sync() else {
            panic!("sync");
        };
        assert_eq!(reserves.a, Amount::new(2_000));
        assert_eq!(f.pool.reserves(), reserves);
    }

    #[test]
    fn events_emitted_only_on_success() {
        let f = seeded();
        let _ = f
            .pool
            .swap(Amount::new(100), &asset_a(), Amount::new(200), &trader());
        let Ok(_) = f
            .pool
            .swap(Amount::new(100), &asset_a(), Amount::ZERO, &trader())
        else {
            panic!("swap");
        };
        let events = f.events.snapshot();
        assert_eq!(events.len(), 3);
        assert!(matches!(
            events[0],
            PoolEvent::LiquidityAdded { shares_minted, .. } if shares_minted == Shares::new(1_414)
        ));
        assert_eq!(
            events[2],
            PoolEvent::Swapped {
                pool: f.pool.account(),
                trader: trader(),
                asset_in: asset_a(),
                amount_in: Amount::new(100),
                asset_out: asset_b(),
                amount_out: Amount::new(186),
            }
        );
    }
}
