//! Arithmetic utilities for pool accounting.
//!
//! [`CheckedArithmetic`] gives overflow-safe add/sub on domain types,
//! [`mul_div`] is the floor `a × b / c` used by every share and withdrawal
//! formula, and [`isqrt`] prices the bootstrap deposit.
//!
//! # Convention
//!
//! **Always round against the user.** Every quotient the engine computes
//! is something paid out or credited (shares minted, assets withdrawn,
//! swap output), so all division floors.

mod checked;
mod sqrt;

pub use checked::{mul_div, CheckedArithmetic};
pub use sqrt::isqrt;
