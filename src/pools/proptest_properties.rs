//! Property-based tests using `proptest` for pool invariant validation.
//!
//! Covers five properties:
//!
//! 1. **Invariant growth**: `k` strictly increases after every swap.
//! 2. **Share conservation**: holder balances always sum to the total.
//! 3. **Proportional withdrawal**: payouts never exceed the exact share.
//! 4. **Quote idempotence**: quoting twice gives the same answer and
//!    changes nothing.
//! 5. **No negative balances**: over-burns and over-spends fail cleanly.

#![allow(clippy::panic)]

use std::sync::Arc;

use proptest::prelude::*;

use crate::config::PoolConfig;
use crate::custody::{AssetCustody, InMemoryCustody};
use crate::domain::{AccountId, Amount, AssetHandle, AssetPair, FeeTier, Shares};
use crate::error::AmmError;
use crate::events::NullSink;
use crate::pools::ConstantProductPool;
use crate::traits::{LiquidityPool, SwapPool};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

const FUNDING: u128 = 1_000_000_000_000;

fn asset_a() -> AssetHandle {
    AssetHandle::from_bytes([1u8; 32])
}

fn asset_b() -> AssetHandle {
    AssetHandle::from_bytes([2u8; 32])
}

fn account(n: u8) -> AccountId {
    AccountId::from_bytes([n; 32])
}

fn make_pool(fee: FeeTier) -> (Arc<InMemoryCustody>, ConstantProductPool<InMemoryCustody>) {
    let custody = Arc::new(InMemoryCustody::new());
    for n in 1..=4u8 {
        for asset in [asset_a(), asset_b()] {
            let Ok(()) = custody.mint(&asset, &account(n), Amount::new(FUNDING)) else {
                panic!("mint");
            };
        }
    }
    let Ok(pair) = AssetPair::new(asset_a(), asset_b()) else {
        panic!("valid pair");
    };
    let Ok(config) = PoolConfig::new(pair, fee) else {
        panic!("valid config");
    };
    let pool = ConstantProductPool::new(0, config, Arc::clone(&custody), Arc::new(NullSink));
    (custody, pool)
}

fn seeded_pool(ra: u128, rb: u128) -> (Arc<InMemoryCustody>, ConstantProductPool<InMemoryCustody>) {
    let (custody, pool) = make_pool(FeeTier::TIER_0_30_PERCENT);
    let Ok(_) = pool.provide_liquidity(Amount::new(ra), Amount::new(rb), &account(1)) else {
        panic!("bootstrap");
    };
    (custody, pool)
}

fn share_sum(pool: &ConstantProductPool<InMemoryCustody>) -> u128 {
    pool.share_balances().iter().map(|(_, s)| s.get()).sum()
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Reserve values in range [10_000, 10_000_000] to avoid extremes.
fn reserve_strategy() -> impl Strategy<Value = u128> {
    10_000u128..=10_000_000u128
}

/// Fee tiers from zero up to 10%.
fn fee_strategy() -> impl Strategy<Value = FeeTier> {
    (0u32..=1_000u32).prop_map(|bps| FeeTier::new(crate::domain::BasisPoints::new(bps)))
}

#[derive(Debug, Clone)]
enum LiquidityOp {
    Provide { who: u8, a: u128, b: u128 },
    Withdraw { who: u8, permille: u128 },
}

fn liquidity_op_strategy() -> impl Strategy<Value = LiquidityOp> {
    prop_oneof![
        (1u8..=4, 1u128..=1_000_000, 1u128..=1_000_000)
            .prop_map(|(who, a, b)| LiquidityOp::Provide { who, a, b }),
        (1u8..=4, 1u128..=1_000).prop_map(|(who, permille)| LiquidityOp::Withdraw { who, permille }),
    ]
}

// ---------------------------------------------------------------------------
// Property 1: Invariant Growth
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_invariant_grows_with_nonzero_fee(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        swaps in prop::collection::vec((1u128..=100_000, any::<bool>()), 1..8),
    ) {
        let (_custody, pool) = seeded_pool(ra, rb);
        for (amount, a_to_b) in swaps {
            let asset = if a_to_b { asset_a() } else { asset_b() };
            let Ok(k_before) = pool.reserves().invariant() else {
                return Ok(());
            };
            match pool.swap(Amount::new(amount), &asset, Amount::ZERO, &account(2)) {
                Ok(_) => {
                    let Ok(k_after) = pool.reserves().invariant() else {
                        return Ok(());
                    };
                    prop_assert!(
                        k_after > k_before,
                        "k must strictly grow: before={} after={}",
                        k_before, k_after
                    );
                }
                Err(AmmError::InsufficientOutput) => {}
                Err(e) => prop_assert!(false, "unexpected swap error: {e}"),
            }
        }
    }

    #[test]
    fn prop_invariant_never_shrinks_for_any_fee(
        fee in fee_strategy(),
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        amount in 1u128..=1_000_000,
    ) {
        let (_custody, pool) = make_pool(fee);
        let Ok(_) = pool.provide_liquidity(Amount::new(ra), Amount::new(rb), &account(1)) else {
            return Ok(());
        };
        let Ok(k_before) = pool.reserves().invariant() else {
            return Ok(());
        };
        if pool.swap(Amount::new(amount), &asset_a(), Amount::ZERO, &account(2)).is_ok() {
            let Ok(k_after) = pool.reserves().invariant() else {
                return Ok(());
            };
            prop_assert!(k_after >= k_before);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 2: Share Conservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_share_balances_sum_to_total(
        ops in prop::collection::vec(liquidity_op_strategy(), 1..16),
    ) {
        let (custody, pool) = make_pool(FeeTier::TIER_0_30_PERCENT);
        for op in ops {
            match op {
                LiquidityOp::Provide { who, a, b } => {
                    let _ = pool.provide_liquidity(Amount::new(a), Amount::new(b), &account(who));
                }
                LiquidityOp::Withdraw { who, permille } => {
                    let held = pool.share_balance_of(&account(who)).get();
                    let burn = held * permille / 1_000;
                    let _ = pool.withdraw_liquidity(Shares::new(burn), &account(who));
                }
            }
            prop_assert_eq!(share_sum(&pool), pool.total_shares().get());
            let reserves = pool.reserves();
            prop_assert_eq!(reserves.a, custody.balance_of(&asset_a(), &pool.account()));
            prop_assert_eq!(reserves.b, custody.balance_of(&asset_b(), &pool.account()));
        }
    }
}

// ---------------------------------------------------------------------------
// Property 3: Proportional Withdrawal
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_withdrawal_never_exceeds_exact_share(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        second in (1_000u128..=1_000_000, 1_000u128..=1_000_000),
        permille in 1u128..=1_000,
    ) {
        let (_custody, pool) = seeded_pool(ra, rb);
        let _ = pool.provide_liquidity(Amount::new(second.0), Amount::new(second.1), &account(2));

        let held = pool.share_balance_of(&account(1)).get();
        let burn = (held * permille / 1_000).max(1);
        let reserves = pool.reserves();
        let total = pool.total_shares().get();

        match pool.withdraw_liquidity(Shares::new(burn), &account(1)) {
            Ok((out_a, out_b)) => {
                // out × total ≤ burn × reserve, with equality iff exact
                prop_assert!(out_a.get() * total <= burn * reserves.a.get());
                prop_assert!(out_b.get() * total <= burn * reserves.b.get());
                prop_assert!((out_a.get() + 1) * total > burn * reserves.a.get());
                prop_assert!((out_b.get() + 1) * total > burn * reserves.b.get());
            }
            Err(AmmError::InsufficientOutput) => {}
            Err(e) => prop_assert!(false, "unexpected withdraw error: {e}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Property 4: Quote Idempotence
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_quote_is_pure(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        amount in 1u128..=1_000_000,
        a_to_b in any::<bool>(),
    ) {
        let (_custody, pool) = seeded_pool(ra, rb);
        let asset = if a_to_b { asset_a() } else { asset_b() };
        let reserves = pool.reserves();
        let first = pool.quote_output(Amount::new(amount), &asset);
        let second = pool.quote_output(Amount::new(amount), &asset);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(pool.reserves(), reserves);

        // The executed swap pays exactly the quote.
        if let Ok(quoted) = first {
            if !quoted.is_zero() {
                let Ok(paid) = pool.swap(Amount::new(amount), &asset, quoted, &account(3)) else {
                    return Err(TestCaseError::fail("swap at quoted floor failed"));
                };
                prop_assert_eq!(paid, quoted);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Property 5: No Negative Balances
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_overburn_fails_without_change(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        extra in 1u128..=1_000,
    ) {
        let (_custody, pool) = seeded_pool(ra, rb);
        let held = pool.share_balance_of(&account(1));
        let reserves = pool.reserves();
        let result = pool.withdraw_liquidity(Shares::new(held.get() + extra), &account(1));
        let is_insufficient = matches!(result, Err(AmmError::InsufficientShares { .. }));
        prop_assert!(is_insufficient);
        prop_assert_eq!(pool.share_balance_of(&account(1)), held);
        prop_assert_eq!(pool.reserves(), reserves);
    }

    #[test]
    fn prop_overspend_fails_without_change(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
    ) {
        let (custody, pool) = seeded_pool(ra, rb);
        let poor = account(9);
        let Ok(()) = custody.mint(&asset_a(), &poor, Amount::new(10)) else {
            return Err(TestCaseError::fail("mint"));
        };
        let reserves = pool.reserves();
        let result = pool.swap(Amount::new(1_000_000), &asset_a(), Amount::ZERO, &poor);
        let is_transfer_failure = matches!(result, Err(AmmError::TransferFailed(_)));
        prop_assert!(is_transfer_failure);
        prop_assert_eq!(pool.reserves(), reserves);
        prop_assert_eq!(custody.balance_of(&asset_a(), &poor), Amount::new(10));
    }
}
