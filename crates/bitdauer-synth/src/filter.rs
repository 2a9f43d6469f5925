//! Core [`Filter`] trait.
//!
//! Filters process one scalar sample at a time. Each instance owns its own
//! delay line (previous inputs / outputs); coefficients are configuration and
//! survive [`Filter::reset`].
//!
//! The trait is object-safe so heterogeneous filters can be collected into a
//! [`FilterChain`](crate::FilterChain).

use alloc::boxed::Box;

/// Single-sample IIR filter.
///
/// # Example
///
/// ```rust
/// use bitdauer_synth::{Filter, LowPassIir};
///
/// let mut lp = LowPassIir::new(44100);
/// lp.set_cutoff(1000.0);
/// let out = lp.process(1.0);
/// assert!(out > 0.0 && out < 1.0);
/// ```
pub trait Filter {
    /// Filter one input sample and return the output sample.
    fn process(&mut self, input: f64) -> f64;

    /// Clear the delay line, keeping coefficients.
    fn reset(&mut self);
}

impl<F: Filter + ?Sized> Filter for Box<F> {
    #[inline]
    fn process(&mut self, input: f64) -> f64 {
        (**self).process(input)
    }

    fn reset(&mut self) {
        (**self).reset();
    }
}

/// Clamp a first-order filter output into `[-1, 1]`.
#[inline]
pub(crate) fn clamp_unit(value: f64) -> f64 {
    value.clamp(-1.0, 1.0)
}
