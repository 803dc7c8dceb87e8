//! Core trait abstractions for pool operations.
//!
//! This module defines the traits every pool implementation satisfies:
//! [`SwapPool`] for quoting and executing trades and [`LiquidityPool`]
//! for issuing and redeeming shares.

mod liquidity_pool;
mod swap_pool;

pub use liquidity_pool::LiquidityPool;
pub use swap_pool::SwapPool;
