//! Pool implementations.
//!
//! [`ConstantProductPool`] is the `x · y = k` pool. Its lock-protected
//! state, share ledger, and rollback journal live in private submodules.

pub mod constant_product;
mod entry_guard;
mod settlement;
mod share_ledger;

#[cfg(test)]
mod proptest_properties;

pub use constant_product::{output_for, ConstantProductPool};
