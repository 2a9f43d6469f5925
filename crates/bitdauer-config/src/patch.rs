//! Patch file format and operations.

use bitdauer_synth::noise::DEFAULT_SEED;
use bitdauer_synth::notes::CONCERT_A4;
use bitdauer_synth::{
    Easing, Envelope, Generator, GeneratorKind, Lfo, NoiseColor, Note, NoteTable, Oscillator,
    Waveform,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::validation::validate_patch;

/// A complete description of one oscillator voice.
///
/// Patches are stored as TOML files. Every field except `name` has a
/// default, so a patch only needs to spell out what differs from a plain
/// full-volume wave at 44.1 kHz.
///
/// # TOML Format
///
/// ```toml
/// name = "Soft Saw"
/// description = "A4 sawtooth with a slow swell"
/// sample_rate = 44100
/// duration_ms = 2000
/// generator = "wave"
/// waveform = "sawtooth"
///
/// [pitch]
/// note = "a"
/// octave = 4
///
/// [envelope]
/// attack_ms = 1000
/// release_ms = 1000
/// attack_curve = { curve = "exponential", factor = 10.0 }
///
/// [frequency_lfo]
/// waveform = "sine"
/// rate_hz = 5.0
/// deviation = 3.0
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patch {
    /// Name of the patch.
    pub name: String,

    /// Optional description of the patch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Output sample rate in Hz (defaults to 44100).
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Render length in milliseconds (defaults to 1000).
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u32,

    /// Which source the oscillator plays.
    #[serde(default)]
    pub generator: GeneratorKind,

    /// Wave shape used by the wave generator.
    #[serde(default = "default_waveform")]
    pub waveform: Waveform,

    /// Base frequency in Hz. Mutually exclusive with `pitch`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<f64>,

    /// Frequency of A4 used to resolve `pitch` (defaults to 440).
    #[serde(default = "default_tuning")]
    pub tuning: f64,

    /// Base volume before modulation.
    #[serde(default = "default_volume")]
    pub volume: f64,

    /// Silence before the first audible sample.
    #[serde(default)]
    pub delay_ms: u32,

    /// Starting phase of the wave in degrees.
    #[serde(default)]
    pub phase_shift: f64,

    /// Base frequency as a note name and octave.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch: Option<Pitch>,

    /// Noise source settings, used when `generator = "noise"`.
    #[serde(default)]
    pub noise: NoiseConfig,

    /// ADSR envelope. Absent means the envelope is disabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub envelope: Option<EnvelopeConfig>,

    /// LFO added to the base frequency (vibrato).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_lfo: Option<LfoConfig>,

    /// LFO added to the base volume (tremolo).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_lfo: Option<LfoConfig>,
}

fn default_sample_rate() -> u32 {
    44100
}

fn default_duration_ms() -> u32 {
    1000
}

fn default_waveform() -> Waveform {
    Waveform::Sine
}

fn default_tuning() -> f64 {
    CONCERT_A4
}

fn default_volume() -> f64 {
    1.0
}

fn default_sustain() -> f64 {
    1.0
}

fn default_lfo_rate() -> f64 {
    5.0
}

/// A note in the 9-octave table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pitch {
    /// Pitch class.
    pub note: Note,
    /// Octave number, 0 through 8.
    pub octave: u8,
}

/// Noise source settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct NoiseConfig {
    /// Spectral color.
    #[serde(default)]
    pub color: NoiseColor,
    /// PRNG seed; the same seed always renders the same noise.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            color: NoiseColor::default(),
            seed: DEFAULT_SEED,
        }
    }
}

/// ADSR envelope settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct EnvelopeConfig {
    /// Attack length in milliseconds.
    #[serde(default)]
    pub attack_ms: u32,
    /// Decay length in milliseconds.
    #[serde(default)]
    pub decay_ms: u32,
    /// Sustain length in milliseconds, ignored with `manual_sustain`.
    #[serde(default)]
    pub sustain_ms: u32,
    /// Release length in milliseconds.
    #[serde(default)]
    pub release_ms: u32,
    /// Sustain level in `[0, 1]`.
    #[serde(default = "default_sustain")]
    pub sustain: f64,
    /// Hold sustain until a release is triggered.
    #[serde(default)]
    pub manual_sustain: bool,
    /// Shape of the attack ramp.
    #[serde(default)]
    pub attack_curve: Easing,
    /// Shape of the decay ramp.
    #[serde(default)]
    pub decay_curve: Easing,
    /// Shape of the release ramp.
    #[serde(default)]
    pub release_curve: Easing,
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self {
            attack_ms: 0,
            decay_ms: 0,
            sustain_ms: 0,
            release_ms: 0,
            sustain: 1.0,
            manual_sustain: false,
            attack_curve: Easing::Linear,
            decay_curve: Easing::Linear,
            release_curve: Easing::Linear,
        }
    }
}

impl EnvelopeConfig {
    /// Copy these settings onto a live envelope and re-arm it.
    pub fn apply(&self, envelope: &mut Envelope) {
        envelope.set_attack_ms(self.attack_ms);
        envelope.set_decay_ms(self.decay_ms);
        envelope.set_sustain_ms(self.sustain_ms);
        envelope.set_release_ms(self.release_ms);
        envelope.set_sustain(self.sustain);
        envelope.set_manual_sustain(self.manual_sustain);
        envelope.set_attack_curve(self.attack_curve);
        envelope.set_decay_curve(self.decay_curve);
        envelope.set_release_curve(self.release_curve);
        envelope.retrigger();
    }
}

/// Low-frequency modulator settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LfoConfig {
    /// LFO wave shape.
    #[serde(default = "default_waveform")]
    pub waveform: Waveform,
    /// LFO rate in Hz.
    #[serde(default = "default_lfo_rate")]
    pub rate_hz: f64,
    /// Peak output: Hz for a frequency LFO, volume units for a volume LFO.
    #[serde(default)]
    pub deviation: f64,
    /// Starting phase in degrees.
    #[serde(default)]
    pub phase_shift: f64,
}

impl Default for LfoConfig {
    fn default() -> Self {
        Self {
            waveform: Waveform::Sine,
            rate_hz: 5.0,
            deviation: 0.0,
            phase_shift: 0.0,
        }
    }
}

impl LfoConfig {
    /// Build a live LFO at `sample_rate`.
    pub fn build(&self, sample_rate: u32) -> Lfo {
        let mut lfo = Lfo::new(sample_rate, self.waveform, self.rate_hz, self.deviation);
        lfo.generator_mut().shift_phase(self.phase_shift);
        lfo.reset();
        lfo
    }
}

impl Patch {
    /// Create a patch with every field at its default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            sample_rate: default_sample_rate(),
            duration_ms: default_duration_ms(),
            generator: GeneratorKind::Wave,
            waveform: default_waveform(),
            frequency: None,
            tuning: CONCERT_A4,
            volume: 1.0,
            delay_ms: 0,
            phase_shift: 0.0,
            pitch: None,
            noise: NoiseConfig::default(),
            envelope: None,
            frequency_lfo: None,
            volume_lfo: None,
        }
    }

    /// Create a patch with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the sample rate.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Set the render length.
    pub fn with_duration_ms(mut self, duration_ms: u32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Select the generator kind.
    pub fn with_generator(mut self, generator: GeneratorKind) -> Self {
        self.generator = generator;
        self
    }

    /// Select the wave shape.
    pub fn with_waveform(mut self, waveform: Waveform) -> Self {
        self.waveform = waveform;
        self
    }

    /// Set the base frequency in Hz, replacing any pitch.
    pub fn with_frequency(mut self, frequency: f64) -> Self {
        self.frequency = Some(frequency);
        self.pitch = None;
        self
    }

    /// Set the base frequency as a note, replacing any explicit frequency.
    pub fn with_pitch(mut self, note: Note, octave: u8) -> Self {
        self.pitch = Some(Pitch { note, octave });
        self.frequency = None;
        self
    }

    /// Set the A4 reference used to resolve the pitch.
    pub fn with_tuning(mut self, tuning: f64) -> Self {
        self.tuning = tuning;
        self
    }

    /// Set the base volume.
    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = volume;
        self
    }

    /// Set the start delay.
    pub fn with_delay_ms(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Set the starting phase in degrees.
    pub fn with_phase_shift(mut self, degrees: f64) -> Self {
        self.phase_shift = degrees;
        self
    }

    /// Set the noise color and seed.
    pub fn with_noise(mut self, color: NoiseColor, seed: u64) -> Self {
        self.noise = NoiseConfig { color, seed };
        self
    }

    /// Enable the envelope.
    pub fn with_envelope(mut self, envelope: EnvelopeConfig) -> Self {
        self.envelope = Some(envelope);
        self
    }

    /// Add a vibrato LFO.
    pub fn with_frequency_lfo(mut self, lfo: LfoConfig) -> Self {
        self.frequency_lfo = Some(lfo);
        self
    }

    /// Add a tremolo LFO.
    pub fn with_volume_lfo(mut self, lfo: LfoConfig) -> Self {
        self.volume_lfo = Some(lfo);
        self
    }

    /// Load a patch from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let patch: Patch = toml::from_str(&content)?;
        Ok(patch)
    }

    /// Load a patch from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the patch to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the patch to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every field, see [`validate_patch`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_patch(self)?;
        Ok(())
    }

    /// Base frequency in Hz.
    ///
    /// An explicit `frequency` wins; otherwise `pitch` is looked up in a
    /// table tuned to `tuning`. `None` when neither is set or the octave is
    /// outside the table.
    pub fn resolve_frequency(&self) -> Option<f64> {
        if let Some(freq) = self.frequency {
            return Some(freq);
        }
        let pitch = self.pitch?;
        NoteTable::new(self.tuning).frequency(pitch.octave, pitch.note)
    }

    /// Validate the patch and build a ready-to-render oscillator.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bitdauer_config::Patch;
    /// use bitdauer_synth::generate;
    ///
    /// let patch = Patch::new("beep").with_sample_rate(8000).with_frequency(440.0);
    /// let mut osc = patch.build().unwrap();
    /// let samples = generate(patch.duration_ms, &mut osc);
    /// assert_eq!(samples.len(), 8000);
    /// ```
    pub fn build(&self) -> Result<Oscillator, ConfigError> {
        self.validate()?;

        let mut osc = Oscillator::try_new(self.sample_rate)?;
        osc.switch_generator(self.generator);
        osc.set_frequency(self.resolve_frequency().unwrap_or(0.0));
        osc.set_volume(self.volume);
        osc.set_delay_ms(self.delay_ms);

        let wave = osc.wave_mut();
        wave.set_waveform(self.waveform);
        wave.shift_phase(self.phase_shift);

        let noise = osc.noise_mut();
        noise.set_seed(self.noise.seed);
        noise.set_noise_color(self.noise.color);

        if let Some(envelope) = &self.envelope {
            envelope.apply(osc.envelope_mut());
            osc.set_envelope_enabled(true);
        }
        if let Some(lfo) = &self.frequency_lfo {
            osc.set_frequency_modulator(lfo.build(self.sample_rate));
        }
        if let Some(lfo) = &self.volume_lfo {
            osc.set_volume_modulator(lfo.build(self.sample_rate));
        }

        osc.reset();
        Ok(osc)
    }
}
