//! The [`Generator`] capability and the trivial [`Flat`] source.
//!
//! A generator owns all of its state (phase, PRNG, filter delay lines) and
//! advances it through `&mut self`, so every call continues exactly where the
//! previous one stopped.

use alloc::boxed::Box;

/// Anything that produces one sample per call at a fixed sample rate.
///
/// The trait is object-safe: the [`Oscillator`](crate::Oscillator) stores its
/// modulators as `Box<dyn Generator>`.
///
/// # Example
///
/// ```rust
/// use bitdauer_synth::Generator;
///
/// struct Counter {
///     n: f64,
/// }
///
/// impl Generator for Counter {
///     fn sample_rate(&self) -> u32 {
///         1000
///     }
///
///     fn next_sample(&mut self) -> f64 {
///         self.n += 1.0;
///         self.n
///     }
///
///     fn reset(&mut self) {
///         self.n = 0.0;
///     }
/// }
///
/// let mut c = Counter { n: 0.0 };
/// assert_eq!(c.next_sample(), 1.0);
/// c.reset();
/// assert_eq!(c.next_sample(), 1.0);
/// ```
pub trait Generator {
    /// Sample rate in Hz, fixed at construction.
    fn sample_rate(&self) -> u32;

    /// Produce the next sample and advance internal state by one step.
    fn next_sample(&mut self) -> f64;

    /// Rewind to the starting state. Call before every new playback.
    fn reset(&mut self);
}

impl<G: Generator + ?Sized> Generator for Box<G> {
    fn sample_rate(&self) -> u32 {
        (**self).sample_rate()
    }

    #[inline]
    fn next_sample(&mut self) -> f64 {
        (**self).next_sample()
    }

    fn reset(&mut self) {
        (**self).reset();
    }
}

/// A generator that always returns zero.
///
/// Used as the neutral frequency and volume modulator of an
/// [`Oscillator`](crate::Oscillator).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flat {
    sample_rate: u32,
}

impl Flat {
    /// Create a flat source reporting `sample_rate`.
    pub fn new(sample_rate: u32) -> Self {
        Self { sample_rate }
    }
}

impl Generator for Flat {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    #[inline]
    fn next_sample(&mut self) -> f64 {
        0.0
    }

    fn reset(&mut self) {}
}
