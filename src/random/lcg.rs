//! Linear-congruential fallback generator.
//!
//! `x = (x * 1103515245 + 12345) mod 2^31`. Only 31 bits of each output are
//! populated, so the stream is not uniform over the full 32-bit span; it is
//! kept as the cheapest baseline engine.

use super::engine::UniformEngine;

const MULTIPLIER: u32 = 1_103_515_245;
const INCREMENT: u32 = 12345;
const MASK: u32 = 0x7FFF_FFFF;

/// Linear-congruential generator with 31-bit state starting at 0.
#[derive(Debug, Default)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    /// Creates a generator in the reference starting state (0).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a generator starting from `state`, masked to 31 bits.
    pub fn with_state(state: u32) -> Self {
        Lcg {
            state: state & MASK,
        }
    }
}

impl UniformEngine for Lcg {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(MULTIPLIER)
            .wrapping_add(INCREMENT)
            & MASK;
        self.state
    }
}
