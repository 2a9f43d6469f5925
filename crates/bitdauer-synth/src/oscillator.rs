//! Oscillator: the composition root of the synthesis core.
//!
//! An [`Oscillator`] owns one generator of every kind and reads the one picked
//! by its [`GeneratorKind`]. Per sample it
//!
//! 1. emits silence while the start delay runs,
//! 2. retunes the wave generator to `frequency + frequency_mod` (wave only),
//! 3. scales the raw sample by `volume + volume_mod`,
//! 4. scales again by the envelope level when the envelope is enabled.

use alloc::boxed::Box;
use alloc::string::ToString;
use core::fmt;
use core::str::FromStr;

use crate::buffer::sample_length;
use crate::{Envelope, Flat, FunctionGenerator, Generator, NoiseGenerator, SynthError};

/// Which of the oscillator's generators produces the raw signal.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GeneratorKind {
    /// The function generator.
    #[default]
    Wave,
    /// Reserved for a pulse generator; currently silent.
    Pulse,
    /// The noise generator.
    Noise,
}

impl GeneratorKind {
    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            GeneratorKind::Wave => "wave",
            GeneratorKind::Pulse => "pulse",
            GeneratorKind::Noise => "noise",
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GeneratorKind {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wave" | "function" => Ok(GeneratorKind::Wave),
            "pulse" => Ok(GeneratorKind::Pulse),
            "noise" => Ok(GeneratorKind::Noise),
            _ => Err(SynthError::UnknownGeneratorKind(s.to_string())),
        }
    }
}

/// Modulated, enveloped, optionally delayed signal source.
///
/// Defaults: wave generator with a flatline shape, frequency 0, volume 1,
/// [`Flat`] modulators, envelope disabled, no delay.
///
/// # Example
///
/// ```rust
/// use bitdauer_synth::{Generator, Lfo, Oscillator, Waveform};
///
/// let mut osc = Oscillator::new(44100);
/// osc.wave_mut().set_waveform(Waveform::Triangle);
/// osc.set_frequency(220.0);
/// osc.set_volume(0.5);
/// osc.set_frequency_modulator(Lfo::new(44100, Waveform::Sine, 6.0, 3.0));
///
/// osc.envelope_mut().set_attack_ms(5);
/// osc.envelope_mut().set_release_ms(200);
/// osc.set_envelope_enabled(true);
///
/// let first = osc.next_sample();
/// assert_eq!(first, 0.0);
/// ```
pub struct Oscillator {
    sample_rate: u32,
    kind: GeneratorKind,
    wave: FunctionGenerator,
    noise: NoiseGenerator,
    frequency: f64,
    frequency_mod: Box<dyn Generator>,
    volume: f64,
    volume_mod: Box<dyn Generator>,
    envelope: Envelope,
    use_envelope: bool,
    delay_len: usize,
    delay_elapsed: usize,
}

impl Oscillator {
    /// Create an oscillator, rejecting a zero sample rate.
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::ZeroSampleRate`] when `sample_rate` is 0.
    pub fn try_new(sample_rate: u32) -> Result<Self, SynthError> {
        if sample_rate == 0 {
            return Err(SynthError::ZeroSampleRate);
        }
        Ok(Self::new(sample_rate))
    }

    /// Create an oscillator with default settings. A zero sample rate is
    /// clamped to 1; use [`Oscillator::try_new`] to reject it instead.
    pub fn new(sample_rate: u32) -> Self {
        let sample_rate = sample_rate.max(1);
        Self {
            sample_rate,
            kind: GeneratorKind::Wave,
            wave: FunctionGenerator::new(sample_rate),
            noise: NoiseGenerator::new(sample_rate),
            frequency: 0.0,
            frequency_mod: Box::new(Flat::new(sample_rate)),
            volume: 1.0,
            volume_mod: Box::new(Flat::new(sample_rate)),
            envelope: Envelope::new(sample_rate),
            use_envelope: false,
            delay_len: 0,
            delay_elapsed: 0,
        }
    }

    /// Delay the start of the signal by `ms` milliseconds of silence.
    pub fn set_delay_ms(&mut self, ms: u32) {
        self.delay_len = sample_length(self.sample_rate, ms);
        #[cfg(feature = "tracing")]
        tracing::debug!("osc_delay: {ms} ms = {} samples", self.delay_len);
    }

    /// Start delay in samples.
    pub fn delay_samples(&self) -> usize {
        self.delay_len
    }

    /// Select the active generator. Takes effect on the next sample; no
    /// generator state is touched.
    pub fn switch_generator(&mut self, kind: GeneratorKind) {
        self.kind = kind;
        #[cfg(feature = "tracing")]
        tracing::debug!("osc_generator: {kind}");
    }

    /// Active generator kind.
    pub fn generator_kind(&self) -> GeneratorKind {
        self.kind
    }

    /// Base frequency of the wave generator in Hz.
    pub fn set_frequency(&mut self, frequency: f64) {
        self.frequency = frequency;
    }

    /// Base frequency in Hz.
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Base output gain.
    pub fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
    }

    /// Base output gain.
    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Replace the generator whose output is added to the base frequency.
    pub fn set_frequency_modulator<G: Generator + 'static>(&mut self, modulator: G) {
        self.frequency_mod = Box::new(modulator);
    }

    /// Replace the generator whose output is added to the base volume.
    pub fn set_volume_modulator<G: Generator + 'static>(&mut self, modulator: G) {
        self.volume_mod = Box::new(modulator);
    }

    /// Turn envelope shaping on or off.
    pub fn set_envelope_enabled(&mut self, enabled: bool) {
        self.use_envelope = enabled;
    }

    /// Whether the envelope shapes the output.
    pub fn envelope_enabled(&self) -> bool {
        self.use_envelope
    }

    /// The function generator used by [`GeneratorKind::Wave`].
    pub fn wave(&self) -> &FunctionGenerator {
        &self.wave
    }

    /// Mutable access to the function generator.
    pub fn wave_mut(&mut self) -> &mut FunctionGenerator {
        &mut self.wave
    }

    /// The noise generator used by [`GeneratorKind::Noise`].
    pub fn noise(&self) -> &NoiseGenerator {
        &self.noise
    }

    /// Mutable access to the noise generator.
    pub fn noise_mut(&mut self) -> &mut NoiseGenerator {
        &mut self.noise
    }

    /// The amplitude envelope.
    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    /// Mutable access to the amplitude envelope.
    pub fn envelope_mut(&mut self) -> &mut Envelope {
        &mut self.envelope
    }
}

impl fmt::Debug for Oscillator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Oscillator")
            .field("sample_rate", &self.sample_rate)
            .field("kind", &self.kind)
            .field("frequency", &self.frequency)
            .field("volume", &self.volume)
            .field("use_envelope", &self.use_envelope)
            .field("delay_len", &self.delay_len)
            .finish_non_exhaustive()
    }
}

impl Generator for Oscillator {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn next_sample(&mut self) -> f64 {
        if self.delay_elapsed < self.delay_len {
            self.delay_elapsed += 1;
            return 0.0;
        }

        let raw = match self.kind {
            GeneratorKind::Wave => {
                let freq = self.frequency + self.frequency_mod.next_sample();
                self.wave.set_frequency(freq);
                self.wave.next_sample()
            }
            GeneratorKind::Pulse => 0.0,
            GeneratorKind::Noise => self.noise.next_sample(),
        };

        let mut sample = raw * (self.volume + self.volume_mod.next_sample());
        if self.use_envelope {
            sample *= self.envelope.next_sample();
        }
        sample
    }

    /// Restart the delay, the wave and noise generators and both modulators.
    /// The envelope is left as is; call [`Envelope::retrigger`] through
    /// [`Oscillator::envelope_mut`] to start a new note.
    fn reset(&mut self) {
        self.delay_elapsed = 0;
        self.wave.reset();
        self.noise.reset();
        self.frequency_mod.reset();
        self.volume_mod.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Lfo, NoiseColor, Waveform, generate};
    use alloc::vec;

    fn sine(sample_rate: u32, freq: f64) -> Oscillator {
        let mut osc = Oscillator::new(sample_rate);
        osc.wave_mut().set_waveform(Waveform::Sine);
        osc.set_frequency(freq);
        osc
    }

    #[test]
    fn sine_at_440_over_one_second() {
        let mut osc = sine(8000, 440.0);
        let buffer = generate(1000, &mut osc);
        assert_eq!(buffer.len(), 8000);
        assert!(buffer[0].abs() < 1e-12);
        // quarter period at 8000 / (4 · 440) ≈ 4.5 samples
        assert!((buffer[5] - 1.0).abs() < 0.05, "peak {}", buffer[5]);
    }

    #[test]
    fn try_new_rejects_zero_sample_rate() {
        assert!(matches!(
            Oscillator::try_new(0),
            Err(SynthError::ZeroSampleRate)
        ));
        let osc = Oscillator::try_new(8000).unwrap();
        assert_eq!(osc.sample_rate(), 8000);
    }

    #[test]
    fn default_oscillator_is_silent() {
        let mut osc = Oscillator::new(44100);
        osc.set_frequency(440.0);
        assert!(generate(10, &mut osc).iter().all(|&s| s == 0.0));
    }

    #[test]
    fn delay_emits_leading_silence() {
        let mut osc = Oscillator::new(1000);
        osc.wave_mut().set_waveform(Waveform::Square);
        osc.set_frequency(100.0);
        osc.set_delay_ms(3);
        assert_eq!(osc.delay_samples(), 3);
        let out = generate(5, &mut osc);
        assert_eq!(out, vec![0.0, 0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn volume_scales_and_modulates() {
        let mut osc = Oscillator::new(1000);
        osc.wave_mut().set_waveform(Waveform::Square);
        osc.set_volume(0.25);
        assert_eq!(osc.next_sample(), 0.25);

        // square LFO adds +0.5 on its first half period
        osc.set_volume_modulator(Lfo::new(1000, Waveform::Square, 1.0, 0.5));
        osc.reset();
        assert_eq!(osc.next_sample(), 0.75);
    }

    #[test]
    fn frequency_modulator_retunes_wave() {
        let mut plain = sine(8000, 440.0);
        let mut offset = sine(8000, 400.0);
        let mut constant = Lfo::new(8000, Waveform::Square, 1.0, 40.0);
        constant.generator_mut().set_frequency(0.0);
        offset.set_frequency_modulator(constant);

        let a = generate(50, &mut plain);
        let b = generate(50, &mut offset);
        for (x, y) in a.iter().zip(&b) {
            assert!((x - y).abs() < 1e-12);
        }
        assert_eq!(offset.wave().frequency(), 440.0);
    }

    #[test]
    fn pulse_is_silent() {
        let mut osc = sine(8000, 440.0);
        osc.switch_generator(GeneratorKind::Pulse);
        assert!(generate(100, &mut osc).iter().all(|&s| s == 0.0));
    }

    #[test]
    fn noise_kind_reads_noise_generator() {
        let mut osc = Oscillator::new(44100);
        osc.switch_generator(GeneratorKind::Noise);
        osc.noise_mut().set_seed(5);
        osc.noise_mut().set_noise_color(NoiseColor::White);

        let mut reference = NoiseGenerator::new(44100);
        reference.set_seed(5);

        assert_eq!(generate(64, &mut osc), generate(64, &mut reference));
    }

    #[test]
    fn envelope_shapes_output() {
        let mut osc = Oscillator::new(1000);
        osc.wave_mut().set_waveform(Waveform::Square);
        osc.envelope_mut().set_attack_ms(4);
        osc.envelope_mut().set_release_ms(2);
        osc.set_envelope_enabled(true);

        let out = generate(8, &mut osc);
        assert_eq!(out, vec![0.0, 0.25, 0.5, 0.75, 1.0, 0.5, 0.0, 0.0]);
    }

    #[test]
    fn reset_leaves_envelope_running() {
        let mut osc = Oscillator::new(1000);
        osc.wave_mut().set_waveform(Waveform::Square);
        osc.envelope_mut().set_attack_ms(2);
        osc.envelope_mut().set_release_ms(2);
        osc.set_envelope_enabled(true);

        let first = generate(4, &mut osc);
        let second = generate(4, &mut osc);
        assert_eq!(first, vec![0.0, 0.5, 1.0, 0.5]);
        assert!(second.iter().all(|&s| s == 0.0));

        osc.envelope_mut().retrigger();
        assert_eq!(generate(4, &mut osc), first);
    }

    #[test]
    fn kind_names_parse() {
        for kind in [GeneratorKind::Wave, GeneratorKind::Pulse, GeneratorKind::Noise] {
            assert_eq!(kind.name().parse::<GeneratorKind>(), Ok(kind));
        }
        assert!("saw".parse::<GeneratorKind>().is_err());
    }
}
