//! Quick colored noise render.

use bitdauer_config::Patch;
use bitdauer_synth::noise::DEFAULT_SEED;
use bitdauer_synth::{GeneratorKind, NoiseColor};
use clap::Args;
use std::path::PathBuf;

use super::common::{EnvelopeArgs, OutputArgs, TremoloArgs, maybe_save_patch, render_patch};

#[derive(Args, Debug)]
pub struct NoiseArgs {
    #[command(flatten)]
    output: OutputArgs,

    /// Noise color (red, pink, white, blue, violet)
    #[arg(long, default_value = "white")]
    color: NoiseColor,

    /// PRNG seed; the same seed renders the same noise
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Duration in milliseconds
    #[arg(long, default_value = "1000")]
    duration_ms: u32,

    /// Sample rate
    #[arg(long, default_value = "44100")]
    sample_rate: u32,

    /// Volume
    #[arg(long, default_value = "0.5")]
    volume: f64,

    /// Silence before the noise starts, in milliseconds
    #[arg(long, default_value = "0")]
    delay_ms: u32,

    #[command(flatten)]
    tremolo: TremoloArgs,

    #[command(flatten)]
    envelope: EnvelopeArgs,

    /// Also write the equivalent patch file
    #[arg(long, value_name = "PATCH")]
    save_patch: Option<PathBuf>,
}

impl NoiseArgs {
    fn to_patch(&self) -> Patch {
        let mut patch = Patch::new("Noise")
            .with_generator(GeneratorKind::Noise)
            .with_noise(self.color, self.seed)
            .with_sample_rate(self.sample_rate)
            .with_duration_ms(self.duration_ms)
            .with_volume(self.volume)
            .with_delay_ms(self.delay_ms);

        if let Some(lfo) = self.tremolo.to_config() {
            patch = patch.with_volume_lfo(lfo);
        }
        if let Some(envelope) = self.envelope.to_config() {
            patch = patch.with_envelope(envelope);
        }
        patch
    }
}

pub fn run(args: NoiseArgs) -> anyhow::Result<()> {
    let patch = args.to_patch();

    println!("Generating {} noise...", patch.noise.color);
    println!(
        "  {} ms at {} Hz, seed {}",
        patch.duration_ms, patch.sample_rate, patch.noise.seed
    );

    render_patch(&patch, &args.output)?;
    maybe_save_patch(&patch, args.save_patch.as_ref())
}
