//! 32-bit Mersenne Twister (MT19937) with the compact reload recurrence.
//!
//! Seeding fills the state vector with successive powers of the multiplier
//! 69069 applied to an odd seed. Output words are tempered before being
//! returned, so a fixed seed reproduces the published reference sequence
//! (seed 4357 starts with 3510405877).

use log::{debug, trace};

use super::engine::UniformEngine;

/// Length of the state vector.
const N: usize = 624;

/// Period parameter of the recurrence.
const M: usize = 397;

/// Twist matrix constant.
const MATRIX_A: u32 = 0x9908_B0DF;

/// Multiplier used to expand a seed into the state vector.
const SEED_MULTIPLIER: u32 = 69069;

/// Seed applied when an unseeded engine is first reloaded.
pub const DEFAULT_SEED: u32 = 4357;

#[inline]
fn hi_bit(u: u32) -> u32 {
    u & 0x8000_0000
}

#[inline]
fn lo_bits(u: u32) -> u32 {
    u & 0x7FFF_FFFF
}

/// Combines the high bit of `u` with the low 31 bits of `v`, shifts right by
/// one, and folds in the twist constant when `v` is odd.
#[inline]
fn twist(u: u32, v: u32) -> u32 {
    let mag = if v & 1 == 1 { MATRIX_A } else { 0 };
    ((hi_bit(u) | lo_bits(v)) >> 1) ^ mag
}

#[inline]
fn temper(mut y: u32) -> u32 {
    y ^= y >> 11;
    y ^= (y << 7) & 0x9D2C_5680;
    y ^= (y << 15) & 0xEFC6_0000;
    y ^ (y >> 18)
}

/// 32-bit Mersenne Twister with period 2^19937-1.
///
/// The engine starts UNSEEDED. Call [`seed`](Self::seed) or construct with
/// [`with_seed`](Self::with_seed) for a reproducible stream. An engine drawn
/// from without seeding silently seeds itself with [`DEFAULT_SEED`]; this is a
/// fallback, not a guarantee.
pub struct MersenneTwister {
    state: [u32; N],
    next: usize,
    /// Words remaining before the next reload. `-1` means unseeded until the
    /// first draw pushes it below `-1`.
    left: i32,
}

impl Default for MersenneTwister {
    fn default() -> Self {
        Self::new()
    }
}

impl MersenneTwister {
    /// Creates an unseeded engine.
    pub fn new() -> Self {
        MersenneTwister {
            state: [0u32; N],
            next: 0,
            left: -1,
        }
    }

    /// Creates an engine seeded with `seed`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rangedrand::{MersenneTwister, UniformEngine};
    ///
    /// let mut mt = MersenneTwister::with_seed(4357);
    /// assert_eq!(mt.next_u32(), 3510405877);
    /// ```
    pub fn with_seed(seed: u32) -> Self {
        let mut mt = Self::new();
        mt.seed(seed);
        mt
    }

    /// Reseeds the engine.
    ///
    /// The low bit of `seed` is forced to 1, so `0` and `1` produce the same
    /// stream. The next draw triggers a reload.
    pub fn seed(&mut self, seed: u32) {
        let mut x = seed | 1;
        self.state[0] = x;
        for word in self.state.iter_mut().skip(1) {
            x = x.wrapping_mul(SEED_MULTIPLIER);
            *word = x;
        }
        self.left = 0;
    }

    /// Returns true once the engine has been seeded, explicitly or by fallback.
    pub fn is_seeded(&self) -> bool {
        self.left >= 0
    }

    /// Regenerates the whole state vector and returns the tempered first word.
    fn reload(&mut self) -> u32 {
        if self.left < -1 {
            debug!("mersenne twister drawn before seeding, using seed {}", DEFAULT_SEED);
            self.seed(DEFAULT_SEED);
        }
        trace!("mersenne twister reload");

        let s = &mut self.state;
        for k in 0..(N - M) {
            s[k] = s[k + M] ^ twist(s[k], s[k + 1]);
        }
        for k in (N - M)..(N - 1) {
            s[k] = s[k + M - N] ^ twist(s[k], s[k + 1]);
        }
        s[N - 1] = s[M - 1] ^ twist(s[N - 1], s[0]);

        self.left = (N - 1) as i32;
        self.next = 1;
        temper(self.state[0])
    }
}

impl UniformEngine for MersenneTwister {
    fn next_u32(&mut self) -> u32 {
        self.left -= 1;
        if self.left < 0 {
            return self.reload();
        }
        let y = self.state[self.next];
        self.next += 1;
        temper(y)
    }
}
