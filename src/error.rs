//! Error types for the rangedrand library.

use std::fmt;

/// Errors produced by the rangedrand library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangedRandError {
    /// A bounded draw was requested with `range == 0`.
    ZeroRange,
    /// The rejection loop exceeded its fresh-draw budget without accepting.
    UnboundedRetry {
        /// Fresh draws consumed before giving up.
        draws: u32,
    },
    /// The hardware entropy instruction is not available on this CPU.
    HardwareUnavailable,
    /// The engine name is not recognized.
    UnknownEngine(String),
    /// The strategy name is not recognized.
    UnknownStrategy(String),
    /// The selected engine cannot be seeded explicitly.
    SeedNotSupported,
    /// A swept range `base + i` does not fit in 32 bits.
    RangeOverflow,
}

impl fmt::Display for RangedRandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangedRandError::ZeroRange => {
                write!(f, "Range must be greater than zero")
            }
            RangedRandError::UnboundedRetry { draws } => {
                write!(f, "Rejection loop did not accept after {} draws", draws)
            }
            RangedRandError::HardwareUnavailable => {
                write!(f, "Hardware random instruction is not available")
            }
            RangedRandError::UnknownEngine(name) => {
                write!(f, "Unknown engine: {}", name)
            }
            RangedRandError::UnknownStrategy(name) => {
                write!(f, "Unknown strategy: {}", name)
            }
            RangedRandError::SeedNotSupported => {
                write!(f, "Engine does not accept an explicit seed")
            }
            RangedRandError::RangeOverflow => {
                write!(f, "Swept range exceeds the 32-bit limit")
            }
        }
    }
}

impl std::error::Error for RangedRandError {}
