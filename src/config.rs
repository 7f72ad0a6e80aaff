//! Runtime selection of the engine variant and sampling strategy.
//!
//! The engine backing a sampler is chosen once, when the sampler is built,
//! and stays fixed for its lifetime.

use std::fmt;
use std::str::FromStr;

use crate::bounded::Strategy;
use crate::error::RangedRandError;
use crate::random::engine::UniformEngine;
use crate::random::hardware::HardwareRandom;
use crate::random::lcg::Lcg;
use crate::random::mersenne_twister::{MersenneTwister, DEFAULT_SEED};
use crate::random::os_random::OsRandom;
use crate::random::pcg32::Pcg32;

/// Available uniform engine variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EngineKind {
    /// 31-bit linear-congruential fallback.
    Lcg,
    /// 32-bit Mersenne Twister.
    #[default]
    MersenneTwister,
    /// CPU hardware entropy instruction.
    Hardware,
    /// `rand::rngs::StdRng` seeded by the operating system.
    OsRandom,
    /// PCG32 generator.
    Pcg32,
}

impl EngineKind {
    /// All engine kinds.
    pub const ALL: [EngineKind; 5] = [
        EngineKind::Lcg,
        EngineKind::MersenneTwister,
        EngineKind::Hardware,
        EngineKind::OsRandom,
        EngineKind::Pcg32,
    ];

    /// Short configuration name.
    pub fn name(self) -> &'static str {
        match self {
            EngineKind::Lcg => "lcg",
            EngineKind::MersenneTwister => "mt",
            EngineKind::Hardware => "hardware",
            EngineKind::OsRandom => "os",
            EngineKind::Pcg32 => "pcg32",
        }
    }

    /// Returns true if the engine accepts an explicit seed.
    pub fn is_seedable(self) -> bool {
        matches!(
            self,
            EngineKind::Lcg | EngineKind::MersenneTwister | EngineKind::Pcg32
        )
    }

    /// Builds a boxed engine of this kind.
    ///
    /// A `seed` sets the Mersenne Twister seed, the LCG starting state, or the
    /// PCG32 initial state (stream 0). Without a seed each engine starts in
    /// its reference state; the Mersenne Twister starts unseeded and falls
    /// back to its default seed on first draw.
    ///
    /// # Errors
    /// - [`RangedRandError::SeedNotSupported`] if a seed is given for the
    ///   hardware or OS engine.
    /// - [`RangedRandError::HardwareUnavailable`] if the hardware engine is
    ///   selected on a CPU without it.
    pub fn build(self, seed: Option<u32>) -> Result<Box<dyn UniformEngine>, RangedRandError> {
        if seed.is_some() && !self.is_seedable() {
            return Err(RangedRandError::SeedNotSupported);
        }
        let engine: Box<dyn UniformEngine> = match (self, seed) {
            (EngineKind::Lcg, None) => Box::new(Lcg::new()),
            (EngineKind::Lcg, Some(state)) => Box::new(Lcg::with_state(state)),
            (EngineKind::MersenneTwister, None) => Box::new(MersenneTwister::new()),
            (EngineKind::MersenneTwister, Some(s)) => Box::new(MersenneTwister::with_seed(s)),
            (EngineKind::Pcg32, None) => Box::new(Pcg32::new()),
            (EngineKind::Pcg32, Some(s)) => Box::new(Pcg32::with_seed(s as u64, 0)),
            (EngineKind::Hardware, _) => Box::new(HardwareRandom::new()?),
            (EngineKind::OsRandom, _) => Box::new(OsRandom::from_entropy()),
        };
        Ok(engine)
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EngineKind {
    type Err = RangedRandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lcg" | "generic" => Ok(EngineKind::Lcg),
            "mt" | "mersenne" | "mersenne_twister" => Ok(EngineKind::MersenneTwister),
            "hardware" | "rdrand" => Ok(EngineKind::Hardware),
            "os" | "rand" => Ok(EngineKind::OsRandom),
            "pcg32" | "pcg" => Ok(EngineKind::Pcg32),
            _ => Err(RangedRandError::UnknownEngine(s.to_string())),
        }
    }
}

/// Engine, strategy and seed used to build a
/// [`BoundedSampler`](crate::sampler::BoundedSampler).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerConfig {
    /// Engine variant backing the sampler.
    pub engine: EngineKind,
    /// Debiasing strategy.
    pub strategy: Strategy,
    /// Optional seed; only valid for seedable engines.
    pub seed: Option<u32>,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        SamplerConfig {
            engine: EngineKind::MersenneTwister,
            strategy: Strategy::Mult,
            seed: Some(DEFAULT_SEED),
        }
    }
}

impl SamplerConfig {
    /// Creates a config with no seed.
    pub fn new(engine: EngineKind, strategy: Strategy) -> Self {
        SamplerConfig {
            engine,
            strategy,
            seed: None,
        }
    }

    /// Sets the seed.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks the engine/seed combination without building anything.
    ///
    /// # Errors
    /// Returns [`RangedRandError::SeedNotSupported`] if a seed is set for an
    /// engine that cannot take one.
    pub fn validate(&self) -> Result<(), RangedRandError> {
        if self.seed.is_some() && !self.engine.is_seedable() {
            return Err(RangedRandError::SeedNotSupported);
        }
        Ok(())
    }
}
