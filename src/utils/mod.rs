//! Shared numeric helpers for the bounded-range samplers.

pub mod bits;
