//! Second-order notch filter.
//!
//! Removes a band of frequencies around a center frequency. There is no gain
//! control; use a [`PeakingIir`](crate::PeakingIir) for boost or cut.
//!
//! With the bilinear pre-warped center `wc = 2·fs·tan(π·fc/fs)` and the notch
//! width `bw` in Hz:
//!
//! ```text
//! alpha = 4 + wc² / fs²
//! beta  = 2 · (2π · bw) / fs
//!
//! y[n] = ( alpha·x[n] + 2(alpha-8)·x[n-1] + alpha·x[n-2]
//!        - 2(alpha-8)·y[n-1] - (alpha-beta)·y[n-2] ) / (alpha + beta)
//! ```
//!
//! The output is not clamped.

use core::f64::consts::PI;
use libm::tan;

use crate::{Filter, TAU};

/// Smallest quality factor accepted; keeps the notch width finite.
const MIN_Q: f64 = 1e-3;

/// Second-order notch IIR filter.
///
/// Defaults to a 100 Hz wide notch at 1 kHz.
#[derive(Debug, Clone)]
pub struct NotchIir {
    sample_rate: f64,
    center_hz: f64,
    notch_width_hz: f64,
    alpha: f64,
    beta: f64,
    /// x[n], x[n-1], x[n-2]
    inputs: [f64; 3],
    /// y[n], y[n-1], y[n-2]
    outputs: [f64; 3],
}

impl NotchIir {
    /// Create a notch filter at 1 kHz with a 100 Hz width.
    pub fn new(sample_rate: u32) -> Self {
        let mut notch = Self {
            sample_rate: f64::from(sample_rate.max(1)),
            center_hz: 0.0,
            notch_width_hz: 0.0,
            alpha: 0.0,
            beta: 0.0,
            inputs: [0.0; 3],
            outputs: [0.0; 3],
        };
        notch.set_center(1000.0);
        notch.set_notch_width(100.0);
        notch
    }

    /// Set the center frequency in Hz.
    ///
    /// The notch width in Hz is kept; a width previously derived from a
    /// quality factor is not re-derived.
    pub fn set_center(&mut self, freq_hz: f64) {
        self.center_hz = freq_hz;
        let wc = 2.0 * self.sample_rate * tan(PI * freq_hz / self.sample_rate);
        self.alpha = 4.0 + wc * wc / (self.sample_rate * self.sample_rate);
    }

    /// Set the width of the rejected band in Hz.
    pub fn set_notch_width(&mut self, width_hz: f64) {
        self.notch_width_hz = width_hz.max(0.0);
        let ww = TAU * self.notch_width_hz;
        self.beta = 2.0 * ww / self.sample_rate;
    }

    /// Set the width through a quality factor: `width = center / q`.
    pub fn set_quality_factor(&mut self, q: f64) {
        self.set_notch_width(self.center_hz / q.max(MIN_Q));
    }

    /// Center frequency in Hz.
    pub fn center(&self) -> f64 {
        self.center_hz
    }

    /// Notch width in Hz.
    pub fn notch_width(&self) -> f64 {
        self.notch_width_hz
    }
}

impl Filter for NotchIir {
    #[inline]
    fn process(&mut self, input: f64) -> f64 {
        self.inputs = [input, self.inputs[0], self.inputs[1]];
        let y1 = self.outputs[0];
        let y2 = self.outputs[1];
        let a = self.alpha;
        let b = self.beta;

        let out = (a * self.inputs[0] + 2.0 * (a - 8.0) * self.inputs[1] + a * self.inputs[2]
            - (2.0 * (a - 8.0) * y1 + (a - b) * y2))
            / (a + b);

        self.outputs = [out, y1, y2];
        out
    }

    fn reset(&mut self) {
        self.inputs = [0.0; 3];
        self.outputs = [0.0; 3];
    }
}
