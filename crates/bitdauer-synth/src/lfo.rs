//! Low frequency oscillator for parameter modulation.

use crate::{FunctionGenerator, Generator, Waveform};

/// A [`FunctionGenerator`] whose output is multiplied by a deviation.
///
/// Plugged into an [`Oscillator`](crate::Oscillator) as a frequency modulator
/// the deviation is in Hz (vibrato depth); as a volume modulator it is a gain
/// offset (tremolo depth).
///
/// # Example
///
/// ```rust
/// use bitdauer_synth::{Generator, Lfo, Waveform};
///
/// let mut vibrato = Lfo::new(44100, Waveform::Sine, 5.0, 12.0);
/// let offset_hz = vibrato.next_sample();
/// assert!(offset_hz.abs() <= 12.0);
/// ```
#[derive(Debug, Clone)]
pub struct Lfo {
    generator: FunctionGenerator,
    deviation: f64,
}

impl Lfo {
    /// Create an LFO with the given shape, rate in Hz and deviation.
    pub fn new(sample_rate: u32, waveform: Waveform, rate_hz: f64, deviation: f64) -> Self {
        Self {
            generator: FunctionGenerator::with_waveform(sample_rate, waveform, rate_hz),
            deviation,
        }
    }

    /// Set the output multiplier.
    pub fn set_deviation(&mut self, deviation: f64) {
        self.deviation = deviation;
    }

    /// Output multiplier.
    pub fn deviation(&self) -> f64 {
        self.deviation
    }

    /// The underlying function generator (rate, shape, phase shift).
    pub fn generator(&self) -> &FunctionGenerator {
        &self.generator
    }

    /// Mutable access to the underlying function generator.
    pub fn generator_mut(&mut self) -> &mut FunctionGenerator {
        &mut self.generator
    }
}

impl Generator for Lfo {
    fn sample_rate(&self) -> u32 {
        self.generator.sample_rate()
    }

    #[inline]
    fn next_sample(&mut self) -> f64 {
        self.deviation * self.generator.next_sample()
    }

    fn reset(&mut self) {
        self.generator.reset();
    }
}
