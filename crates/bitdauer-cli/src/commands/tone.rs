//! Quick wave tone without a patch file.

use bitdauer_config::{LfoConfig, Patch};
use bitdauer_synth::notes::CONCERT_A4;
use bitdauer_synth::{Note, Waveform};
use clap::Args;
use std::path::PathBuf;

use super::common::{EnvelopeArgs, OutputArgs, TremoloArgs, maybe_save_patch, render_patch};

#[derive(Args, Debug)]
pub struct ToneArgs {
    #[command(flatten)]
    output: OutputArgs,

    /// Wave shape (sine, square, sawtooth, reverse_sawtooth, triangle, flatline)
    #[arg(long, default_value = "sine")]
    waveform: Waveform,

    /// Frequency in Hz
    #[arg(long, conflicts_with = "note")]
    freq: Option<f64>,

    /// Note name, e.g. A, C#, Eb
    #[arg(long)]
    note: Option<Note>,

    /// Octave of the note (0-8)
    #[arg(long, default_value = "4")]
    octave: u8,

    /// Frequency of A4 used to resolve notes
    #[arg(long, default_value_t = CONCERT_A4)]
    tuning: f64,

    /// Duration in milliseconds
    #[arg(long, default_value = "1000")]
    duration_ms: u32,

    /// Sample rate
    #[arg(long, default_value = "44100")]
    sample_rate: u32,

    /// Volume
    #[arg(long, default_value = "1.0")]
    volume: f64,

    /// Silence before the tone starts, in milliseconds
    #[arg(long, default_value = "0")]
    delay_ms: u32,

    /// Starting phase in degrees
    #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
    phase: f64,

    /// Vibrato rate in Hz
    #[arg(long, default_value = "5.0")]
    vibrato_hz: f64,

    /// Vibrato depth in Hz; 0 disables it
    #[arg(long, default_value = "0.0")]
    vibrato_depth: f64,

    #[command(flatten)]
    tremolo: TremoloArgs,

    #[command(flatten)]
    envelope: EnvelopeArgs,

    /// Also write the equivalent patch file
    #[arg(long, value_name = "PATCH")]
    save_patch: Option<PathBuf>,
}

impl ToneArgs {
    fn to_patch(&self) -> Patch {
        let mut patch = Patch::new("Tone")
            .with_sample_rate(self.sample_rate)
            .with_duration_ms(self.duration_ms)
            .with_waveform(self.waveform)
            .with_tuning(self.tuning)
            .with_volume(self.volume)
            .with_delay_ms(self.delay_ms)
            .with_phase_shift(self.phase);

        patch = match (self.note, self.freq) {
            (Some(note), _) => patch.with_pitch(note, self.octave),
            (None, Some(freq)) => patch.with_frequency(freq),
            (None, None) => patch.with_frequency(CONCERT_A4),
        };

        if self.vibrato_depth != 0.0 {
            patch = patch.with_frequency_lfo(LfoConfig {
                waveform: Waveform::Sine,
                rate_hz: self.vibrato_hz,
                deviation: self.vibrato_depth,
                phase_shift: 0.0,
            });
        }
        if let Some(lfo) = self.tremolo.to_config() {
            patch = patch.with_volume_lfo(lfo);
        }
        if let Some(envelope) = self.envelope.to_config() {
            patch = patch.with_envelope(envelope);
        }
        patch
    }
}

pub fn run(args: ToneArgs) -> anyhow::Result<()> {
    let patch = args.to_patch();

    println!("Generating {} tone...", patch.waveform);
    if let Some(freq) = patch.resolve_frequency() {
        println!("  {:.2} Hz for {} ms", freq, patch.duration_ms);
    }

    render_patch(&patch, &args.output)?;
    maybe_save_patch(&patch, args.save_patch.as_ref())
}
