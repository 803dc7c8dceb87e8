//! Integer square root.

/// Returns `floor(√n)` using Newton's method.
///
/// Converges from above: the first guess is `ceil(n / 2)` and every
/// iteration strictly decreases until the floor root is reached.
///
/// # Examples
///
/// ```
/// use hydra_cpmm::math::isqrt;
///
/// assert_eq!(isqrt(2_000_000), 1_414);
/// assert_eq!(isqrt(16), 4);
/// assert_eq!(isqrt(0), 0);
/// ```
#[must_use]
pub const fn isqrt(n: u128) -> u128 {
    if n < 2 {
        return n;
    }
    let mut x = n;
    let mut y = n.div_ceil(2);
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    x
}
