//! Uniform 32-bit engine subsystem.
//!
//! Provides the [`UniformEngine`](engine::UniformEngine) interface and its
//! concrete variants: Mersenne Twister, linear-congruential fallback,
//! hardware entropy, an adapter over the `rand` crate, and PCG32.

pub mod engine;
pub mod hardware;
pub mod lcg;
pub mod mersenne_twister;
pub mod os_random;
pub mod pcg32;
