//! Hardware entropy engine backed by the x86-64 `RDRAND` instruction.
//!
//! The instruction signals success through the carry flag; a failed step is
//! retried until it succeeds. Availability is checked once at construction.

use log::trace;

use super::engine::UniformEngine;
use crate::error::RangedRandError;

/// Calls `step` until it yields a value.
///
/// Each `None` models one failed instruction (carry flag clear). The loop
/// is assumed to terminate because hardware failures are transient.
pub fn retry_until_success<F>(mut step: F) -> u32
where
    F: FnMut() -> Option<u32>,
{
    let mut retries = 0u32;
    loop {
        if let Some(value) = step() {
            if retries > 0 {
                trace!("rdrand succeeded after {} retries", retries);
            }
            return value;
        }
        retries = retries.wrapping_add(1);
    }
}

/// Uniform engine reading the CPU's hardware random number generator.
#[derive(Debug)]
pub struct HardwareRandom {
    _private: (),
}

impl HardwareRandom {
    /// Creates the engine after confirming the instruction is supported.
    ///
    /// # Errors
    /// Returns [`RangedRandError::HardwareUnavailable`] on CPUs without
    /// `RDRAND` and on non-x86-64 targets.
    pub fn new() -> Result<Self, RangedRandError> {
        if Self::is_available() {
            Ok(HardwareRandom { _private: () })
        } else {
            Err(RangedRandError::HardwareUnavailable)
        }
    }

    /// Returns true if the running CPU exposes `RDRAND`.
    pub fn is_available() -> bool {
        #[cfg(target_arch = "x86_64")]
        {
            is_x86_feature_detected!("rdrand")
        }
        #[cfg(not(target_arch = "x86_64"))]
        {
            false
        }
    }
}

/// One `RDRAND` attempt.
///
/// # Safety
/// The CPU must support `RDRAND`; callers check `is_available` first.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "rdrand")]
unsafe fn rdrand_step() -> Option<u32> {
    let mut value = 0u32;
    let ok = core::arch::x86_64::_rdrand32_step(&mut value);
    (ok == 1).then_some(value)
}

impl UniformEngine for HardwareRandom {
    #[cfg(target_arch = "x86_64")]
    fn next_u32(&mut self) -> u32 {
        // SAFETY: a HardwareRandom only exists when RDRAND was detected.
        retry_until_success(|| unsafe { rdrand_step() })
    }

    #[cfg(not(target_arch = "x86_64"))]
    fn next_u32(&mut self) -> u32 {
        unreachable!("HardwareRandom cannot be constructed on this target")
    }
}
