//! Pluggable 32-bit uniform generators and unbiased bounded-range sampling.
//!
//! Mapping a uniform 32-bit draw onto `[0, range)` with `draw % range` or a
//! multiply-high is biased whenever `2^32` is not a multiple of `range`. This
//! crate provides several rejection-sampling strategies that remove the bias
//! at different costs in extra draws, extra arithmetic, or recycled bits,
//! together with the engines that feed them.
//!
//! # Architecture
//!
//! ```text
//! UniformEngine    (next_u32: MersenneTwister, Lcg, HardwareRandom, OsRandom, Pcg32)
//!     ↓ borrowed per draw
//! sample           (Strategy: Mult, MultLazy, Mod, RecycleMult, RecycleMod, Delegated)
//!     ↓ owned by
//! BoundedSampler   (engine chosen once from SamplerConfig)
//! ```
//!
//! # Examples
//!
//! Roll a die with an explicitly seeded Mersenne Twister:
//!
//! ```
//! use rangedrand::{sample, MersenneTwister, Strategy};
//!
//! let mut mt = MersenneTwister::with_seed(4357);
//! let roll = sample(&mut mt, 6, Strategy::Mod).unwrap() + 1;
//! assert!((1..=6).contains(&roll));
//! ```
//!
//! Select the engine at runtime:
//!
//! ```
//! use rangedrand::{BoundedSampler, EngineKind, SamplerConfig, Strategy};
//!
//! let config = SamplerConfig::new("pcg32".parse::<EngineKind>().unwrap(), Strategy::Delegated)
//!     .with_seed(42);
//! let mut sampler = BoundedSampler::from_config(&config).unwrap();
//! assert!(sampler.sample(100).unwrap() < 100);
//! ```
//!
//! A zero range is a precondition violation and is reported, not divided by:
//!
//! ```
//! use rangedrand::{sample, Lcg, RangedRandError, Strategy};
//!
//! let mut lcg = Lcg::new();
//! assert_eq!(sample(&mut lcg, 0, Strategy::Mult), Err(RangedRandError::ZeroRange));
//! ```

#![deny(clippy::all)]

pub mod bounded;
pub mod config;
pub mod error;
pub mod random;
pub mod sampler;
pub mod utils;

pub use bounded::{sample, sample_with_report, SampleReport, Strategy};
pub use config::{EngineKind, SamplerConfig};
pub use error::RangedRandError;
pub use random::engine::UniformEngine;
pub use random::hardware::HardwareRandom;
pub use random::lcg::Lcg;
pub use random::mersenne_twister::MersenneTwister;
pub use random::os_random::OsRandom;
pub use random::pcg32::Pcg32;
pub use sampler::BoundedSampler;
