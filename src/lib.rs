//! # Hydra CPMM
//!
//! Constant-product AMM accounting engine: liquidity pools over two
//! custodied assets that issue proportional ownership shares and price
//! trades with `x · y = k` and a basis-point swap fee.
//!
//! The engine never holds balances itself. Every deposit, payout, and
//! swap leg is an instruction to an [`AssetCustody`](custody::AssetCustody)
//! implementation, and each pool re-reads its reserves from custody after
//! every operation.
//!
//! # Guarantees
//!
//! - **Invariant growth**: `reserve_in × reserve_out` never decreases
//!   across a swap, and strictly increases when the fee is non-zero.
//! - **Share conservation**: per-holder shares always sum to the total.
//! - **Atomicity**: an operation either completes fully or leaves
//!   reserves, shares, and custody balances exactly as they were.
//! - **Reentrancy safety**: a custody callback may inspect a pool it is
//!   being called from, but can neither quote against it nor start another
//!   mutating operation on it.
//!
//! # Quick Start
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! hydra-cpmm = "0.1"
//! ```
//!
//! ## Create a pool, provide liquidity, and swap
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use hydra_cpmm::custody::InMemoryCustody;
//! use hydra_cpmm::domain::{AccountId, Amount, AssetHandle};
//! use hydra_cpmm::factory::PoolRegistry;
//! use hydra_cpmm::traits::{LiquidityPool, SwapPool};
//!
//! let usdc = AssetHandle::from_bytes([1u8; 32]);
//! let weth = AssetHandle::from_bytes([2u8; 32]);
//! let alice = AccountId::from_bytes([0xa1; 32]);
//!
//! // 1. Fund an account in custody
//! let custody = Arc::new(InMemoryCustody::new());
//! custody.mint(&usdc, &alice, Amount::new(10_000)).expect("mint");
//! custody.mint(&weth, &alice, Amount::new(10_000)).expect("mint");
//!
//! // 2. Create the pool through the registry
//! let (registry, _admin) = PoolRegistry::with_defaults(Arc::clone(&custody));
//! let pool = registry.create_pool(usdc, weth).expect("pool created");
//!
//! // 3. Bootstrap liquidity: floor(√(1000 × 2000)) shares
//! let shares = pool
//!     .provide_liquidity(Amount::new(1_000), Amount::new(2_000), &alice)
//!     .expect("provided");
//! assert_eq!(shares.get(), 1_414);
//!
//! // 4. Swap with a slippage floor
//! let quote = pool.quote_output(Amount::new(100), &usdc).expect("quote");
//! let out = pool.swap(Amount::new(100), &usdc, quote, &alice).expect("swap");
//! assert_eq!(out, quote);
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Consumer   │  holds PoolRegistry + AdminCapability
//! └──────┬──────┘
//!        │ create_pool / lookup_pool
//!        ▼
//! ┌─────────────┐
//! │  Registry    │  one pool per unordered pair, creation order
//! └──────┬──────┘
//!        │ PoolHandle (Arc)
//!        ▼
//! ┌─────────────┐
//! │    Pools     │  per-pool lock, entry guard, settlement journal
//! └──────┬──────┘
//!        │ transfer_from / transfer / balance_of
//!        ▼
//! ┌─────────────┐
//! │   Custody    │  external ledger (InMemoryCustody for tests)
//! └─────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Newtype value types: [`Amount`](domain::Amount), [`Shares`](domain::Shares), [`AssetPair`](domain::AssetPair), etc. |
//! | [`traits`] | Core abstractions: [`SwapPool`](traits::SwapPool), [`LiquidityPool`](traits::LiquidityPool) |
//! | [`config`] | [`PoolConfig`](config::PoolConfig) and TOML-loadable [`RegistryConfig`](config::RegistryConfig) |
//! | [`pools`]  | [`ConstantProductPool`](pools::ConstantProductPool) and its pricing function |
//! | [`factory`] | [`PoolRegistry`](factory::PoolRegistry) and [`AdminCapability`](factory::AdminCapability) |
//! | [`custody`] | [`AssetCustody`](custody::AssetCustody) boundary and [`InMemoryCustody`](custody::InMemoryCustody) |
//! | [`events`] | [`PoolEvent`](events::PoolEvent) and [`EventSink`](events::EventSink) |
//! | [`math`]   | Checked arithmetic, `mul_div`, integer square root |
//! | [`error`]  | [`AmmError`](error::AmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |
//!
//! # Logging
//!
//! State changes are reported through [`tracing`]: `info` for committed
//! operations, `debug` for quotes and syncs, `warn` for rejected or
//! rolled-back operations, `error` if a rollback step itself fails. The
//! library never installs a subscriber.

pub mod config;
pub mod custody;
pub mod domain;
pub mod error;
pub mod events;
pub mod factory;
pub mod math;
pub mod pools;
pub mod prelude;
pub mod traits;
