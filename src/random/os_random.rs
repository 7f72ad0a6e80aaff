//! Adapter over the `rand` crate's generators.
//!
//! Stands in for the operating system's `rand()`: the default instance is a
//! `StdRng` seeded from OS entropy, so its stream is never reproducible.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use super::engine::UniformEngine;

/// Uniform engine drawing from any [`RngCore`] implementation.
pub struct OsRandom<R: RngCore = StdRng> {
    rng: R,
}

impl OsRandom<StdRng> {
    /// Creates an engine seeded from operating-system entropy.
    pub fn from_entropy() -> Self {
        OsRandom {
            rng: StdRng::from_entropy(),
        }
    }
}

impl<R: RngCore> OsRandom<R> {
    /// Wraps an existing generator.
    pub fn from_rng(rng: R) -> Self {
        OsRandom { rng }
    }

    /// Releases the wrapped generator.
    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: RngCore> UniformEngine for OsRandom<R> {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }
}
