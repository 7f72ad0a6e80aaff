//! BoundedSampler: an owned engine paired with one debiasing strategy.

use log::debug;

use crate::bounded::{sample, sample_with_report, SampleReport, Strategy};
use crate::config::SamplerConfig;
use crate::error::RangedRandError;
use crate::random::engine::UniformEngine;

/// Draws bounded values from an engine it owns exclusively.
///
/// # Examples
///
/// ```
/// use rangedrand::{BoundedSampler, MersenneTwister, Strategy};
///
/// let mut sampler = BoundedSampler::new(MersenneTwister::with_seed(1), Strategy::MultLazy);
/// let mut rolls = [0u32; 8];
/// sampler.fill(6, &mut rolls).unwrap();
/// assert!(rolls.iter().all(|&r| r < 6));
/// ```
pub struct BoundedSampler<E: UniformEngine + ?Sized = dyn UniformEngine> {
    strategy: Strategy,
    engine: Box<E>,
}

impl<E: UniformEngine> BoundedSampler<E> {
    /// Creates a sampler around `engine`.
    pub fn new(engine: E, strategy: Strategy) -> Self {
        BoundedSampler {
            strategy,
            engine: Box::new(engine),
        }
    }
}

impl BoundedSampler<dyn UniformEngine> {
    /// Builds the engine described by `config` and wraps it.
    ///
    /// # Errors
    /// Propagates configuration and engine construction errors.
    pub fn from_config(config: &SamplerConfig) -> Result<Self, RangedRandError> {
        config.validate()?;
        let engine = config.engine.build(config.seed)?;
        debug!(
            "sampler built: engine={} strategy={} seed={:?}",
            config.engine, config.strategy, config.seed
        );
        Ok(BoundedSampler {
            strategy: config.strategy,
            engine,
        })
    }
}

impl<E: UniformEngine + ?Sized> BoundedSampler<E> {
    /// The strategy this sampler applies.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Mutable access to the owned engine, e.g. to reseed it.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Draws one value in `[0, range)`.
    ///
    /// # Errors
    /// See [`sample`].
    pub fn sample(&mut self, range: u32) -> Result<u32, RangedRandError> {
        sample(&mut *self.engine, range, self.strategy)
    }

    /// Draws one value and reports its entropy cost.
    pub fn sample_with_report(&mut self, range: u32) -> Result<SampleReport, RangedRandError> {
        sample_with_report(&mut *self.engine, range, self.strategy)
    }

    /// Fills `out` with values in `[0, range)`.
    pub fn fill(&mut self, range: u32, out: &mut [u32]) -> Result<(), RangedRandError> {
        for slot in out.iter_mut() {
            *slot = self.sample(range)?;
        }
        Ok(())
    }

    /// Fills `out[i]` with a value in `[0, base_range + i)`.
    ///
    /// Sweeping the range keeps a tight loop from settling on one threshold.
    ///
    /// # Errors
    /// - [`RangedRandError::RangeOverflow`] if `base_range + i` exceeds `u32::MAX`.
    /// - [`RangedRandError::ZeroRange`] if `base_range` is 0.
    pub fn fill_sweep(&mut self, base_range: u32, out: &mut [u32]) -> Result<(), RangedRandError> {
        for (i, slot) in out.iter_mut().enumerate() {
            let offset = u32::try_from(i).map_err(|_| RangedRandError::RangeOverflow)?;
            let range = base_range
                .checked_add(offset)
                .ok_or(RangedRandError::RangeOverflow)?;
            *slot = self.sample(range)?;
        }
        Ok(())
    }
}
