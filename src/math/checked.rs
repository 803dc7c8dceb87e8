//! Checked arithmetic trait for domain wrapper types.
//!
//! The [`CheckedArithmetic`] trait provides fallible arithmetic operations
//! that return [`Result<Self, AmmError>`](crate::error::AmmError) instead
//! of panicking or wrapping on overflow, underflow, or division by zero.
//!
//! # Examples
//!
//! ```
//! use hydra_cpmm::domain::Amount;
//! use hydra_cpmm::math::CheckedArithmetic;
//!
//! let a = Amount::new(100);
//! assert_eq!(a.safe_add(&Amount::new(200)), Ok(Amount::new(300)));
//! assert!(a.safe_sub(&Amount::new(101)).is_err());
//! ```

use crate::domain::{Amount, Shares};
use crate::error::AmmError;

/// Fallible arithmetic for domain wrapper types.
///
/// # Contract
///
/// - **No panics**: every error condition produces `Err`.
/// - **No saturation**: saturation hides bugs; errors propagate instead.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the result exceeds `u128`.
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Underflow`] if the result would be negative.
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError>;
}

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_add(other)
            .ok_or(AmmError::Overflow("amount addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_sub(other)
            .ok_or(AmmError::Underflow("amount subtraction underflow"))
    }
}

impl CheckedArithmetic for Shares {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_add(other)
            .ok_or(AmmError::Overflow("share addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_sub(other)
            .ok_or(AmmError::Underflow("share subtraction underflow"))
    }
}

/// Computes `floor(a × b / c)` with overflow and zero-divisor checks.
///
/// # Errors
///
/// - [`AmmError::Overflow`] if `a × b` exceeds `u128`.
/// - [`AmmError::DivisionByZero`] if `c` is zero.
///
/// # Examples
///
/// ```
/// use hydra_cpmm::domain::Amount;
/// use hydra_cpmm::math::mul_div;
///
/// // 500 × 1414 / 1000 = 707
/// let q = mul_div(Amount::new(500), Amount::new(1_414), Amount::new(1_000));
/// assert_eq!(q, Ok(Amount::new(707)));
/// ```
pub fn mul_div(a: Amount, b: Amount, c: Amount) -> Result<Amount, AmmError> {
    a.checked_mul(&b)
        .ok_or(AmmError::Overflow("mul_div product overflow"))?
        .checked_div(&c)
        .ok_or(AmmError::DivisionByZero)
}
