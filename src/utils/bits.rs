//! Widening-multiply and rejection-threshold arithmetic.
//!
//! Every helper here takes `range > 0` as a precondition. The samplers reject
//! a zero range before calling into this module, so the checks below are
//! `debug_assert!`s only.

/// Multiplies a 32-bit draw by `range` in 64 bits.
///
/// # Returns
/// `(hi, lo)`: the high word is the candidate in `[0, range)`, the low word
/// is the leftover used by the multiplicative rejection test.
#[inline]
pub fn mul_hi_lo(draw: u32, range: u32) -> (u32, u32) {
    let product = (draw as u64) * (range as u64);
    ((product >> 32) as u32, product as u32)
}

/// Largest multiple of `range` not exceeding `2^32`, minus one.
///
/// Leftovers above this value fall in the excess tail and must be rejected.
/// Computed in 64 bits so a power-of-two `range` yields `u32::MAX` instead
/// of overflowing.
#[inline]
pub fn mult_threshold(range: u32) -> u32 {
    debug_assert!(range > 0);
    let span = 1u64 << 32;
    (span / range as u64 * range as u64 - 1) as u32
}

/// Cheap lower bound on [`mult_threshold`]: `2^32 - range`.
///
/// A leftover at or below this bound is always accepted, so the exact
/// threshold only needs computing when the bound is exceeded.
#[inline]
pub fn lazy_bound(range: u32) -> u32 {
    range.wrapping_neg()
}

/// Upper limit on `draw - draw % range` for an accepted modulo draw.
///
/// Equals `U32MAX - range + 1`, kept in 64 bits so `range == 1` gives
/// `2^32 - 1` without wrapping.
#[inline]
pub fn mod_limit(range: u32) -> u64 {
    u32::MAX as u64 - range as u64 + 1
}

/// Minimum accepted draw for the PCG bounded mapping: `2^32 mod range`.
#[inline]
pub fn pcg_threshold(range: u32) -> u32 {
    debug_assert!(range > 0);
    range.wrapping_neg() % range
}
