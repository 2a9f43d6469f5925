//! Second-order peaking (bell) filter.
//!
//! Boosts (`gain > 1`) or cuts (`gain < 1`) a band around a center frequency.
//! With the pre-warped, sample-time scaled center `w = 2·tan(π·fc/fs)`:
//!
//! ```text
//! b0 = 4 + 2(g/q)·w + w²      a0 = 1 / (4 + 2/q·w + w²)
//! b1 = 2w² - 8                a1 = -(2w² - 8)
//! b2 = 4 - 2(g/q)·w + w²      a2 = -(4 - 2/q·w + w²)
//!
//! y[n] = (b0·x[n] + b1·x[n-1] + b2·x[n-2] + a1·y[n-1] + a2·y[n-2]) · a0
//! ```
//!
//! The output is not clamped.

use core::f64::consts::PI;
use libm::{pow, tan};

use crate::Filter;

/// Smallest quality factor used in coefficient math.
const MIN_Q: f64 = 1e-3;

/// Second-order peaking IIR filter.
///
/// The band can be given as a width in Hz ([`set_bandwidth`](Self::set_bandwidth))
/// or as a quality factor ([`set_quality_factor`](Self::set_quality_factor)),
/// the gain as linear or decibels.
///
/// # Example
///
/// ```rust
/// use bitdauer_synth::{Filter, PeakingIir};
///
/// let mut bell = PeakingIir::new(44100);
/// bell.set_center(1000.0);
/// bell.set_quality_factor(0.45);
/// bell.set_gain_db(6.0);
/// let _ = bell.process(0.5);
/// ```
#[derive(Debug, Clone)]
pub struct PeakingIir {
    sample_time: f64,
    center_hz: f64,
    bandwidth_hz: f64,
    q: f64,
    gain: f64,
    /// Pre-warped center times sample time
    wc_t: f64,
    /// x[n], x[n-1], x[n-2]
    inputs: [f64; 3],
    /// y[n], y[n-1], y[n-2]
    outputs: [f64; 3],
    in_coeff: [f64; 3],
    out_coeff: [f64; 3],
}

impl PeakingIir {
    /// Create a unity-gain peaking filter at 1 Hz with a 1 Hz bandwidth.
    pub fn new(sample_rate: u32) -> Self {
        let mut peak = Self {
            sample_time: 1.0 / f64::from(sample_rate.max(1)),
            center_hz: 0.0,
            bandwidth_hz: 1.0,
            q: 1.0,
            gain: 1.0,
            wc_t: 0.0,
            inputs: [0.0; 3],
            outputs: [0.0; 3],
            in_coeff: [0.0; 3],
            out_coeff: [0.0; 3],
        };
        peak.set_center(1.0);
        peak
    }

    /// Create a peaking filter from center, quality factor and gain in dB.
    pub fn with_q_db(sample_rate: u32, center_hz: f64, q: f64, gain_db: f64) -> Self {
        let mut peak = Self::new(sample_rate);
        peak.set_center(center_hz);
        peak.set_quality_factor(q);
        peak.set_gain_db(gain_db);
        peak
    }

    /// Set the center frequency in Hz. The bandwidth in Hz is kept and the
    /// quality factor re-derived from it.
    pub fn set_center(&mut self, freq_hz: f64) {
        self.center_hz = freq_hz;
        self.wc_t = 2.0 * tan(PI * freq_hz * self.sample_time);
        self.set_bandwidth(self.bandwidth_hz);
    }

    /// Set the band width in Hz: `q = center / bandwidth`.
    pub fn set_bandwidth(&mut self, bandwidth_hz: f64) {
        self.bandwidth_hz = bandwidth_hz;
        self.q = self.center_hz / bandwidth_hz;
        self.set_gain_linear(self.gain);
    }

    /// Set the quality factor: `bandwidth = center / q`.
    pub fn set_quality_factor(&mut self, q: f64) {
        self.q = q;
        self.bandwidth_hz = self.center_hz / q;
        self.set_gain_linear(self.gain);
    }

    /// Set a linear gain: above 1 boosts, below 1 cuts.
    pub fn set_gain_linear(&mut self, gain: f64) {
        self.gain = gain;
        self.calc_coefficients();
    }

    /// Set the gain in decibels.
    pub fn set_gain_db(&mut self, gain_db: f64) {
        self.gain = pow(10.0, gain_db / 20.0);
        self.calc_coefficients();
    }

    /// Center frequency in Hz.
    pub fn center(&self) -> f64 {
        self.center_hz
    }

    /// Quality factor.
    pub fn quality_factor(&self) -> f64 {
        self.q
    }

    /// Bandwidth in Hz.
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth_hz
    }

    /// Linear gain.
    pub fn gain(&self) -> f64 {
        self.gain
    }

    fn calc_coefficients(&mut self) {
        // NaN fails the comparison in `max`. An infinite q (zero bandwidth)
        // is kept: the g/q terms vanish and the filter passes input through.
        let q = if self.q.is_nan() { MIN_Q } else { self.q.max(MIN_Q) };
        let w = self.wc_t;
        let w2 = w * w;
        let g = self.gain;

        self.in_coeff[0] = 4.0 + 2.0 * (g / q) * w + w2;
        self.in_coeff[1] = 2.0 * w2 - 8.0;
        self.in_coeff[2] = 4.0 - 2.0 * (g / q) * w + w2;

        self.out_coeff[0] = 1.0 / (4.0 + 2.0 / q * w + w2);
        self.out_coeff[1] = -(2.0 * w2 - 8.0);
        self.out_coeff[2] = -(4.0 - 2.0 / q * w + w2);
    }
}

impl Filter for PeakingIir {
    #[inline]
    fn process(&mut self, input: f64) -> f64 {
        self.inputs = [input, self.inputs[0], self.inputs[1]];
        let y1 = self.outputs[0];
        let y2 = self.outputs[1];

        let out = (self.in_coeff[0] * self.inputs[0]
            + self.in_coeff[1] * self.inputs[1]
            + self.in_coeff[2] * self.inputs[2]
            + (self.out_coeff[1] * y1 + self.out_coeff[2] * y2))
            * self.out_coeff[0];

        self.outputs = [out, y1, y2];
        out
    }

    fn reset(&mut self) {
        self.inputs = [0.0; 3];
        self.outputs = [0.0; 3];
    }
}
