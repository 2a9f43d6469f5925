//! Shared CLI helpers used across multiple commands.

use anyhow::Context;
use bitdauer_config::{EnvelopeConfig, LfoConfig, Patch, find_patch, get_factory_patch};
use bitdauer_synth::{Easing, Waveform, generate};
use clap::{Args, ValueEnum};
use std::path::PathBuf;

use crate::wav::{BitDepth, write_wav};

/// Where and how to write the rendered samples.
#[derive(Args, Debug)]
pub struct OutputArgs {
    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Sample encoding of the output file
    #[arg(long, value_enum, default_value = "float")]
    pub bits: BitDepth,
}

/// Envelope shape for the quick `tone` and `noise` commands.
#[derive(Args, Debug)]
pub struct EnvelopeArgs {
    /// Attack length in milliseconds
    #[arg(long, default_value = "0")]
    pub attack_ms: u32,

    /// Decay length in milliseconds
    #[arg(long, default_value = "0")]
    pub decay_ms: u32,

    /// Sustain length in milliseconds
    #[arg(long, default_value = "0")]
    pub sustain_ms: u32,

    /// Release length in milliseconds
    #[arg(long, default_value = "0")]
    pub release_ms: u32,

    /// Sustain level (0-1)
    #[arg(long, default_value = "1.0")]
    pub sustain: f64,

    /// Attack curve
    #[arg(long, value_enum, default_value = "linear")]
    pub attack_curve: CliCurve,

    /// Decay curve
    #[arg(long, value_enum, default_value = "linear")]
    pub decay_curve: CliCurve,

    /// Release curve
    #[arg(long, value_enum, default_value = "linear")]
    pub release_curve: CliCurve,
}

impl EnvelopeArgs {
    /// `None` when every phase length is zero, so a bare command renders
    /// without an envelope.
    pub fn to_config(&self) -> Option<EnvelopeConfig> {
        if self.attack_ms == 0 && self.decay_ms == 0 && self.sustain_ms == 0 && self.release_ms == 0
        {
            return None;
        }
        Some(EnvelopeConfig {
            attack_ms: self.attack_ms,
            decay_ms: self.decay_ms,
            sustain_ms: self.sustain_ms,
            release_ms: self.release_ms,
            sustain: self.sustain,
            manual_sustain: false,
            attack_curve: self.attack_curve.into(),
            decay_curve: self.decay_curve.into(),
            release_curve: self.release_curve.into(),
        })
    }
}

/// Tremolo (volume LFO) options.
#[derive(Args, Debug)]
pub struct TremoloArgs {
    /// Tremolo rate in Hz
    #[arg(long, default_value = "5.0")]
    pub tremolo_hz: f64,

    /// Tremolo depth in volume units; 0 disables it
    #[arg(long, default_value = "0.0")]
    pub tremolo_depth: f64,
}

impl TremoloArgs {
    /// The volume LFO, if the depth is non-zero.
    pub fn to_config(&self) -> Option<LfoConfig> {
        (self.tremolo_depth != 0.0).then_some(LfoConfig {
            waveform: Waveform::Sine,
            rate_hz: self.tremolo_hz,
            deviation: self.tremolo_depth,
            phase_shift: 0.0,
        })
    }
}

/// Easing curves for the CLI, each with its stock parameter.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum CliCurve {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    Exponential,
    InverseExponential,
    Logarithmic,
    InverseLogarithmic,
    SCurve,
}

impl From<CliCurve> for Easing {
    fn from(curve: CliCurve) -> Self {
        match curve {
            CliCurve::Linear => Easing::Linear,
            CliCurve::EaseIn => Easing::EaseIn { power: 2.0 },
            CliCurve::EaseOut => Easing::EaseOut { power: 2.0 },
            CliCurve::EaseInOut => Easing::ease_in_out(),
            CliCurve::Exponential => Easing::exponential(),
            CliCurve::InverseExponential => Easing::inverse_exponential(),
            CliCurve::Logarithmic => Easing::logarithmic(),
            CliCurve::InverseLogarithmic => Easing::inverse_logarithmic(),
            CliCurve::SCurve => Easing::SCurve {
                sharpness: 10.0,
                midpoint: 0.5,
            },
        }
    }
}

/// Load a patch by path, user patch name or factory patch name.
///
/// Files on disk take precedence over factory patches of the same name.
pub fn load_patch(name: &str) -> anyhow::Result<Patch> {
    if let Some(path) = find_patch(name) {
        return Patch::load(&path).with_context(|| format!("failed to load {}", path.display()));
    }

    if let Some(patch) = get_factory_patch(name) {
        return Ok(patch);
    }

    anyhow::bail!(
        "Patch '{}' not found. Use 'bitdauer patches list' to see available patches.",
        name
    )
}

/// Build, render and write a patch.
pub fn render_patch(patch: &Patch, output: &OutputArgs) -> anyhow::Result<()> {
    let mut osc = patch
        .build()
        .with_context(|| format!("patch '{}' cannot be rendered", patch.name))?;
    let samples = generate(patch.duration_ms, &mut osc);

    write_wav(&output.output, &samples, patch.sample_rate, output.bits)?;

    let peak = samples.iter().fold(0.0_f64, |m, s| m.max(s.abs()));
    tracing::info!(
        patch = %patch.name,
        samples = samples.len(),
        sample_rate = patch.sample_rate,
        peak,
        "rendered"
    );
    println!(
        "Wrote {} samples to {}",
        samples.len(),
        output.output.display()
    );
    Ok(())
}

/// Write the patch next to the render when asked to.
pub fn maybe_save_patch(patch: &Patch, path: Option<&PathBuf>) -> anyhow::Result<()> {
    if let Some(path) = path {
        patch.save(path)?;
        println!("Saved patch to {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(attack_ms: u32, release_ms: u32) -> EnvelopeArgs {
        EnvelopeArgs {
            attack_ms,
            decay_ms: 0,
            sustain_ms: 0,
            release_ms,
            sustain: 1.0,
            attack_curve: CliCurve::Exponential,
            decay_curve: CliCurve::Linear,
            release_curve: CliCurve::SCurve,
        }
    }

    #[test]
    fn zero_lengths_disable_envelope() {
        assert!(envelope(0, 0).to_config().is_none());
    }

    #[test]
    fn envelope_args_map_curves() {
        let config = envelope(10, 20).to_config().unwrap();
        assert_eq!(config.attack_ms, 10);
        assert_eq!(config.release_ms, 20);
        assert_eq!(config.attack_curve, Easing::Exponential { factor: 5.0 });
        assert!(matches!(config.release_curve, Easing::SCurve { .. }));
    }

    #[test]
    fn tremolo_off_at_zero_depth() {
        let off = TremoloArgs {
            tremolo_hz: 5.0,
            tremolo_depth: 0.0,
        };
        assert!(off.to_config().is_none());

        let on = TremoloArgs {
            tremolo_hz: 3.0,
            tremolo_depth: 0.2,
        };
        let lfo = on.to_config().unwrap();
        assert_eq!(lfo.rate_hz, 3.0);
        assert_eq!(lfo.deviation, 0.2);
    }

    #[test]
    fn load_patch_falls_back_to_factory() {
        let patch = load_patch("pluck").unwrap();
        assert_eq!(patch.name, "Pluck");
        assert!(load_patch("no_such_patch_12345").is_err());
    }
}
