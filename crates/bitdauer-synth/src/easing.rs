//! Easing curves for envelope segments.
//!
//! Every curve maps a sample position inside `start ..= end` to a shaped
//! progress value. The normalised position
//!
//! ```text
//! t = (curr - start) / (end - start)
//! ```
//!
//! is not clamped, so positions outside the range extrapolate the curve.
//! An empty range (`start == end`) yields `t = 0`, and any shape evaluation
//! that leaves the finite range (fractional powers of negative `t`, a
//! sigmoid with a zero denominator) returns `0` so the sample stream never
//! carries NaN or infinity.

use libm::{exp, log, pow};

/// Normalised position of `curr` between `start` and `end`.
///
/// Returns `0.0` for an empty range.
///
/// ```rust
/// use bitdauer_synth::normalise_position;
///
/// assert_eq!(normalise_position(0, 100, 25), 0.25);
/// assert_eq!(normalise_position(10, 20, 30), 2.0);
/// assert_eq!(normalise_position(5, 5, 5), 0.0);
/// ```
#[inline]
pub fn normalise_position(start: u32, end: u32, curr: u32) -> f64 {
    let span = f64::from(end) - f64::from(start);
    if span == 0.0 {
        return 0.0;
    }
    (f64::from(curr) - f64::from(start)) / span
}

/// Inverse of [`normalise_position`]: the sample position at progress
/// `value`, truncated toward zero and saturated to the `u32` range.
#[inline]
pub fn denormalise_position(value: f64, start: u32, end: u32) -> u32 {
    let span = f64::from(end) - f64::from(start);
    // `as` saturates and maps NaN to zero
    (value * span + f64::from(start)) as u32
}

/// Shape of an envelope segment.
///
/// Parameter conventions:
/// - powers should be `>= 1` (2-3 gives a smooth curve, above 5 a steep one)
/// - logarithm bases should be `> 1` (10 is a good start)
/// - S-curve sharpness should be positive, midpoint in `[0, 1]`
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "curve", rename_all = "snake_case")
)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    /// `t`
    #[default]
    Linear,
    /// `t^p`: slow start.
    EaseIn {
        /// Exponent.
        power: f64,
    },
    /// `1 - (1-t)^p`: slow end.
    EaseOut {
        /// Exponent.
        power: f64,
    },
    /// Slow start and end, fast middle.
    EaseInOut {
        /// Exponent.
        power: f64,
    },
    /// `1 - e^(-t·f)`: fast rise that settles.
    Exponential {
        /// Steepness.
        factor: f64,
    },
    /// `e^(t·f) / e^f - 1`
    InverseExponential {
        /// Steepness.
        factor: f64,
    },
    /// `ln(1 + t·(b-1)) / ln(b)`
    Logarithmic {
        /// Logarithm base.
        base: f64,
    },
    /// `(b^t - 1) / b - 1`
    InverseLogarithmic {
        /// Exponent base.
        base: f64,
    },
    /// Sigmoid around an adjustable inflection point.
    SCurve {
        /// Steepness of the transition.
        sharpness: f64,
        /// Position of the inflection in `[0, 1]`.
        midpoint: f64,
    },
}

impl Easing {
    /// Ease-in-out with power 2.
    pub const fn ease_in_out() -> Self {
        Easing::EaseInOut { power: 2.0 }
    }

    /// Exponential with factor 5.
    pub const fn exponential() -> Self {
        Easing::Exponential { factor: 5.0 }
    }

    /// Inverse exponential with factor 5.
    pub const fn inverse_exponential() -> Self {
        Easing::InverseExponential { factor: 5.0 }
    }

    /// Logarithmic with base 10.
    pub const fn logarithmic() -> Self {
        Easing::Logarithmic { base: 10.0 }
    }

    /// Inverse logarithmic with base 10.
    pub const fn inverse_logarithmic() -> Self {
        Easing::InverseLogarithmic { base: 10.0 }
    }

    /// Shaped progress of `curr` between `start` and `end`.
    pub fn value(&self, start: u32, end: u32, curr: u32) -> f64 {
        let t = normalise_position(start, end, curr);
        let v = self.shape(t);
        if v.is_finite() { v } else { 0.0 }
    }

    /// Apply the curve to an already normalised position.
    pub fn shape(&self, t: f64) -> f64 {
        match *self {
            Easing::Linear => t,
            Easing::EaseIn { power } => pow(t, power),
            Easing::EaseOut { power } => 1.0 - pow(1.0 - t, power),
            Easing::EaseInOut { power } => {
                if t < 0.5 {
                    0.5 * pow(2.0 * t, power)
                } else {
                    1.0 - 0.5 * pow(2.0 * (1.0 - t), power)
                }
            }
            Easing::Exponential { factor } => 1.0 - exp(-t * factor),
            Easing::InverseExponential { factor } => exp(t * factor) / exp(factor) - 1.0,
            Easing::Logarithmic { base } => log(1.0 + t * (base - 1.0)) / log(base),
            Easing::InverseLogarithmic { base } => (pow(base, t) - 1.0) / base - 1.0,
            Easing::SCurve {
                sharpness,
                midpoint,
            } => {
                let u = if t < midpoint {
                    t / midpoint
                } else {
                    (t - midpoint) / (1.0 - midpoint)
                };
                let rising = pow(u, sharpness);
                rising / (rising + pow(1.0 - u, sharpness))
            }
        }
    }
}
