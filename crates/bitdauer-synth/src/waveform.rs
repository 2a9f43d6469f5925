//! Stateless wave functions mapping a phase angle to an amplitude.
//!
//! Every function takes an angle in radians in `[0, 2π)` and returns a value
//! in `[-1, 1]`. A [`FunctionGenerator`](crate::FunctionGenerator) accepts any
//! [`WaveFunction`], so callers can plug in their own shapes next to the
//! built-in ones listed in [`Waveform`].

use core::f64::consts::PI;
use core::fmt;
use core::str::FromStr;

use alloc::string::ToString;
use libm::{fabs, sin};

use crate::{SynthError, TAU};

/// Signature shared by all wave functions.
pub type WaveFunction = fn(f64) -> f64;

/// `sin(angle)`.
#[inline]
pub fn sine(angle: f64) -> f64 {
    sin(angle)
}

/// `+1` up to and including `π`, `-1` afterwards.
#[inline]
pub fn square(angle: f64) -> f64 {
    if angle <= PI { 1.0 } else { -1.0 }
}

/// Linear ramp from `-1` to `+1` across the full period.
#[inline]
pub fn sawtooth(angle: f64) -> f64 {
    2.0 * (angle / TAU) - 1.0
}

/// Linear ramp from `+1` down to `-1`.
#[inline]
pub fn reverse_sawtooth(angle: f64) -> f64 {
    -sawtooth(angle)
}

/// Folded sawtooth: starts at `+1`, reaches `-1` at `π`.
#[inline]
pub fn triangle(angle: f64) -> f64 {
    2.0 * fabs(sawtooth(angle)) - 1.0
}

/// Constant silence.
#[inline]
pub fn flatline(_angle: f64) -> f64 {
    0.0
}

/// Built-in wave shapes.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Waveform {
    /// Pure sine.
    Sine,
    /// Asymmetric square, high through `π` inclusive.
    Square,
    /// Rising ramp.
    Sawtooth,
    /// Falling ramp.
    ReverseSawtooth,
    /// Triangle derived from the sawtooth.
    Triangle,
    /// Always zero.
    #[default]
    Flatline,
}

impl Waveform {
    /// All built-in shapes, in declaration order.
    pub const ALL: [Waveform; 6] = [
        Waveform::Sine,
        Waveform::Square,
        Waveform::Sawtooth,
        Waveform::ReverseSawtooth,
        Waveform::Triangle,
        Waveform::Flatline,
    ];

    /// The function implementing this shape.
    pub fn function(self) -> WaveFunction {
        match self {
            Waveform::Sine => sine,
            Waveform::Square => square,
            Waveform::Sawtooth => sawtooth,
            Waveform::ReverseSawtooth => reverse_sawtooth,
            Waveform::Triangle => triangle,
            Waveform::Flatline => flatline,
        }
    }

    /// Evaluate the shape at `angle` radians.
    #[inline]
    pub fn value(self, angle: f64) -> f64 {
        (self.function())(angle)
    }

    /// Canonical lowercase name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Square => "square",
            Waveform::Sawtooth => "sawtooth",
            Waveform::ReverseSawtooth => "reverse_sawtooth",
            Waveform::Triangle => "triangle",
            Waveform::Flatline => "flatline",
        }
    }
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Waveform {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sine" | "sin" => Ok(Waveform::Sine),
            "square" => Ok(Waveform::Square),
            "sawtooth" | "saw" => Ok(Waveform::Sawtooth),
            "reverse_sawtooth" | "reverse-sawtooth" | "revsaw" => Ok(Waveform::ReverseSawtooth),
            "triangle" | "tri" => Ok(Waveform::Triangle),
            "flatline" | "flat" => Ok(Waveform::Flatline),
            _ => Err(SynthError::UnknownWaveform(s.to_string())),
        }
    }
}
