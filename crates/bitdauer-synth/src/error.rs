//! Error types for synthesis configuration.
//!
//! Only configuration calls can fail. The per-sample path (`next_sample`,
//! `process`, easing lookups) is infallible by construction.

use alloc::string::String;
use thiserror::Error;

/// Errors raised while configuring generators and filters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SynthError {
    /// Numeric noise color selector outside the known set.
    #[error("invalid noise type: {0}")]
    UnknownNoiseColor(u8),

    /// Noise color name that matches no known color.
    #[error("unknown noise color: {0}")]
    UnknownNoiseColorName(String),

    /// Waveform name that matches no built-in wave function.
    #[error("unknown waveform: {0}")]
    UnknownWaveform(String),

    /// Oscillator generator kind that matches no known variant.
    #[error("unknown generator kind: {0}")]
    UnknownGeneratorKind(String),

    /// Note name that matches no pitch class.
    #[error("unknown note: {0}")]
    UnknownNote(String),

    /// A sample rate of zero cannot drive any generator.
    #[error("sample rate must be greater than zero")]
    ZeroSampleRate,
}
