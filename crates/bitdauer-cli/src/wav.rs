//! Mono WAV output.

use anyhow::Context;
use clap::ValueEnum;
use hound::{SampleFormat, WavWriter};
use std::path::Path;

/// Sample encoding of the written file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum BitDepth {
    /// 16-bit integer PCM
    #[value(name = "16")]
    Int16,
    /// 24-bit integer PCM
    #[value(name = "24")]
    Int24,
    /// 32-bit IEEE float
    #[default]
    #[value(name = "float")]
    Float32,
}

impl BitDepth {
    fn bits(self) -> u16 {
        match self {
            BitDepth::Int16 => 16,
            BitDepth::Int24 => 24,
            BitDepth::Float32 => 32,
        }
    }

    fn spec(self, sample_rate: u32) -> hound::WavSpec {
        hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: self.bits(),
            sample_format: match self {
                BitDepth::Float32 => SampleFormat::Float,
                BitDepth::Int16 | BitDepth::Int24 => SampleFormat::Int,
            },
        }
    }
}

/// Write mono samples to a WAV file.
///
/// Integer formats clamp to the representable range; float output is
/// written as is.
pub fn write_wav(
    path: impl AsRef<Path>,
    samples: &[f64],
    sample_rate: u32,
    depth: BitDepth,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    let mut writer = WavWriter::create(path, depth.spec(sample_rate))
        .with_context(|| format!("failed to create {}", path.display()))?;

    if depth == BitDepth::Float32 {
        for &sample in samples {
            writer.write_sample(sample as f32)?;
        }
    } else {
        let max_val = f64::from(1i32 << (depth.bits() - 1));
        for &sample in samples {
            let int_sample = (sample * max_val).clamp(-max_val, max_val - 1.0) as i32;
            writer.write_sample(int_sample)?;
        }
    }

    writer
        .finalize()
        .with_context(|| format!("failed to finalize {}", path.display()))?;
    Ok(())
}
