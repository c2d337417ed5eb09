//! Functional (zero-cycle) reference multiplier.
//!
//! Used as the golden model: every timed variant must match it bit-for-bit.

/// Returns the low 32 bits of `a * b`.
#[inline]
pub const fn multiply(a: u32, b: u32) -> u32 {
    a.wrapping_mul(b)
}
