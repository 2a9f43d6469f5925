//! Phase-accumulator generator driving a wave function.

use libm::{floor, fmod};

use crate::waveform::{WaveFunction, Waveform, flatline};
use crate::{Generator, TAU};

/// Wrap an angle into `[0, 2π)`.
///
/// The common case (one step past the end of the cycle) is a single
/// subtraction; larger or negative excursions fall back to a modulo.
#[inline]
pub(crate) fn wrap_angle(angle: f64) -> f64 {
    if (0.0..TAU).contains(&angle) {
        return angle;
    }
    let stepped = angle - TAU;
    if (0.0..TAU).contains(&stepped) {
        return stepped;
    }
    let r = fmod(angle, TAU);
    if r >= 0.0 {
        return r;
    }
    // a tiny negative remainder rounds up to exactly 2π
    let wrapped = r + TAU;
    if wrapped < TAU { wrapped } else { 0.0 }
}

/// Function generator: emits `wave(angle)` and advances `angle` by
/// `2π / sample_rate · frequency` every sample.
///
/// The wave function defaults to [`Waveform::Flatline`], so a freshly built
/// generator is silent until a shape is chosen.
///
/// # Example
///
/// ```rust
/// use bitdauer_synth::{FunctionGenerator, Generator, Waveform};
///
/// let mut fg = FunctionGenerator::new(8000);
/// fg.set_waveform(Waveform::Square);
/// fg.set_frequency(1000.0);
///
/// assert_eq!(fg.next_sample(), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct FunctionGenerator {
    frequency: f64,
    sample_rate: u32,
    /// Radians per sample at 1 Hz
    angle_step: f64,
    current_angle: f64,
    /// Angle restored by `reset`
    phase_shift_angle: f64,
    wave: WaveFunction,
}

impl FunctionGenerator {
    /// Create a silent generator at `sample_rate` Hz.
    ///
    /// A zero sample rate is treated as 1 Hz so the angle step stays finite.
    pub fn new(sample_rate: u32) -> Self {
        let sample_rate = sample_rate.max(1);
        Self {
            frequency: 0.0,
            sample_rate,
            angle_step: TAU / f64::from(sample_rate),
            current_angle: 0.0,
            phase_shift_angle: 0.0,
            wave: flatline,
        }
    }

    /// Create a generator with a waveform and frequency already set.
    pub fn with_waveform(sample_rate: u32, waveform: Waveform, frequency: f64) -> Self {
        let mut fg = Self::new(sample_rate);
        fg.set_waveform(waveform);
        fg.set_frequency(frequency);
        fg
    }

    /// Set the frequency in Hz. Takes effect on the next sample.
    #[inline]
    pub fn set_frequency(&mut self, frequency: f64) {
        self.frequency = frequency;
    }

    /// Current frequency in Hz.
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Select one of the built-in wave shapes.
    pub fn set_waveform(&mut self, waveform: Waveform) {
        self.wave = waveform.function();
    }

    /// Use an arbitrary wave function.
    pub fn set_function(&mut self, wave: WaveFunction) {
        self.wave = wave;
    }

    /// Set the phase shift in degrees.
    ///
    /// The angle is normalized to `[0°, 360°)`, converted to radians and added
    /// on top of the running angle. The result becomes the starting angle that
    /// the next [`reset`](Generator::reset) restores; the running phase is not
    /// moved.
    pub fn shift_phase(&mut self, degrees: f64) {
        let normalized = degrees - 360.0 * floor(degrees / 360.0);
        let normalized = if normalized >= 360.0 { 0.0 } else { normalized };
        self.phase_shift_angle = wrap_angle(self.current_angle + normalized / 360.0 * TAU);
    }

    /// Angle that `reset` restores, in radians.
    pub fn phase_shift_angle(&self) -> f64 {
        self.phase_shift_angle
    }

    /// Current accumulator angle in radians, always in `[0, 2π)`.
    pub fn angle(&self) -> f64 {
        self.current_angle
    }
}

impl Generator for FunctionGenerator {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    #[inline]
    fn next_sample(&mut self) -> f64 {
        let sample = (self.wave)(self.current_angle);
        self.current_angle = wrap_angle(self.current_angle + self.angle_step * self.frequency);
        sample
    }

    fn reset(&mut self) {
        self.current_angle = self.phase_shift_angle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::PI;

    #[test]
    fn wrap_angle_handles_all_ranges() {
        assert_eq!(wrap_angle(1.0), 1.0);
        assert!((wrap_angle(TAU + 0.5) - 0.5).abs() < 1e-12);
        assert!((wrap_angle(3.0 * TAU + 0.25) - 0.25).abs() < 1e-9);
        assert!((wrap_angle(-0.5) - (TAU - 0.5)).abs() < 1e-12);
        assert_eq!(wrap_angle(TAU), 0.0);
    }

    #[test]
    fn default_waveform_is_flatline() {
        let mut fg = FunctionGenerator::new(8000);
        fg.set_frequency(440.0);
        for _ in 0..100 {
            assert_eq!(fg.next_sample(), 0.0);
        }
    }

    #[test]
    fn first_sample_is_at_angle_zero() {
        let mut fg = FunctionGenerator::with_waveform(8000, Waveform::Sawtooth, 100.0);
        assert!((fg.next_sample() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn returns_to_start_after_one_period() {
        let mut fg = FunctionGenerator::with_waveform(8000, Waveform::Sine, 100.0);
        for _ in 0..80 {
            fg.next_sample();
        }
        let angle = fg.angle();
        assert!(
            angle < 1e-9 || (TAU - angle) < 1e-9,
            "expected full cycle, angle = {angle}"
        );
    }

    #[test]
    fn phase_shift_applies_on_reset() {
        let mut fg = FunctionGenerator::with_waveform(8000, Waveform::Sine, 100.0);
        fg.shift_phase(90.0);
        assert_eq!(fg.angle(), 0.0, "running phase must not move");

        fg.reset();
        assert!((fg.angle() - PI / 2.0).abs() < 1e-12);
        assert!((fg.next_sample() - 1.0).abs() < 1e-12);

        // Reset restores the stored shift rather than zeroing it
        fg.next_sample();
        fg.reset();
        assert!((fg.angle() - PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn phase_shift_normalizes_degrees() {
        let mut fg = FunctionGenerator::new(8000);
        fg.shift_phase(450.0);
        assert!((fg.phase_shift_angle() - PI / 2.0).abs() < 1e-12);

        let mut fg = FunctionGenerator::new(8000);
        fg.shift_phase(-90.0);
        assert!((fg.phase_shift_angle() - 1.5 * PI).abs() < 1e-12);
    }

    #[test]
    fn custom_function_is_used() {
        fn half(_: f64) -> f64 {
            0.5
        }
        let mut fg = FunctionGenerator::new(100);
        fg.set_function(half);
        assert_eq!(fg.next_sample(), 0.5);
    }

    #[test]
    fn zero_sample_rate_stays_finite() {
        let mut fg = FunctionGenerator::with_waveform(0, Waveform::Sine, 10.0);
        assert_eq!(fg.sample_rate(), 1);
        for _ in 0..10 {
            assert!(fg.next_sample().is_finite());
        }
    }
}
