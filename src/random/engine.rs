//! The uniform 32-bit generator interface.
//!
//! Every engine variant implements [`UniformEngine`]; the bounded samplers in
//! [`crate::bounded`] borrow one for the duration of a single draw.

/// A stateful source of uniformly-distributed 32-bit integers.
///
/// Engines are exclusively owned. Callers that need concurrency give each
/// thread its own instance; no engine synchronizes access to its state.
pub trait UniformEngine {
    /// Returns the next uniformly-distributed 32-bit value and advances the state.
    fn next_u32(&mut self) -> u32;
}

impl<E: UniformEngine + ?Sized> UniformEngine for &mut E {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }
}

impl<E: UniformEngine + ?Sized> UniformEngine for Box<E> {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }
}
