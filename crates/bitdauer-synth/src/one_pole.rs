//! First-order IIR high-pass, low-pass and band-pass filters.
//!
//! Both basic sections derive their coefficients from
//!
//! ```text
//! alpha = 2π · cutoff / sample_rate
//! ```
//!
//! and clamp their output to `[-1, 1]`:
//!
//! ```text
//! high-pass:  y[n] = 1/(1+alpha) · ((x[n] - x[n-1]) + y[n-1])
//! low-pass:   y[n] = alpha/(1+alpha) · x[n] + 1/(1+alpha) · y[n-1]
//! ```
//!
//! Valid cutoffs are `0 ..= sample_rate / 2`.

use crate::filter::clamp_unit;
use crate::{Filter, TAU};

#[inline]
fn alpha(cutoff_hz: f64, sample_rate: u32) -> f64 {
    TAU * cutoff_hz / f64::from(sample_rate.max(1))
}

/// First-order high-pass: passes content above the cutoff.
///
/// A fresh filter has a zero coefficient (silent) until
/// [`set_cutoff`](Self::set_cutoff) is called.
#[derive(Debug, Clone)]
pub struct HighPassIir {
    sample_rate: u32,
    coeff: f64,
    last_in: f64,
    last_out: f64,
}

impl HighPassIir {
    /// Create an unconfigured high-pass filter.
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            coeff: 0.0,
            last_in: 0.0,
            last_out: 0.0,
        }
    }

    /// Create a high-pass filter with its cutoff already set.
    pub fn with_cutoff(sample_rate: u32, cutoff_hz: f64) -> Self {
        let mut hp = Self::new(sample_rate);
        hp.set_cutoff(cutoff_hz);
        hp
    }

    /// Recalculate the coefficient for `cutoff_hz`.
    pub fn set_cutoff(&mut self, cutoff_hz: f64) {
        self.coeff = 1.0 / (1.0 + alpha(cutoff_hz, self.sample_rate));
    }

    /// Current coefficient.
    pub fn coefficient(&self) -> f64 {
        self.coeff
    }
}

impl Filter for HighPassIir {
    #[inline]
    fn process(&mut self, input: f64) -> f64 {
        let out = clamp_unit(self.coeff * ((input - self.last_in) + self.last_out));
        self.last_in = input;
        self.last_out = out;
        out
    }

    fn reset(&mut self) {
        self.last_in = 0.0;
        self.last_out = 0.0;
    }
}

/// First-order low-pass: passes content below the cutoff.
#[derive(Debug, Clone)]
pub struct LowPassIir {
    sample_rate: u32,
    /// Input and feedback coefficients
    coeff: [f64; 2],
    last_out: f64,
}

impl LowPassIir {
    /// Create an unconfigured low-pass filter.
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            coeff: [0.0; 2],
            last_out: 0.0,
        }
    }

    /// Create a low-pass filter with its cutoff already set.
    pub fn with_cutoff(sample_rate: u32, cutoff_hz: f64) -> Self {
        let mut lp = Self::new(sample_rate);
        lp.set_cutoff(cutoff_hz);
        lp
    }

    /// Recalculate the coefficients for `cutoff_hz`.
    pub fn set_cutoff(&mut self, cutoff_hz: f64) {
        let alpha = alpha(cutoff_hz, self.sample_rate);
        self.coeff[0] = alpha / (1.0 + alpha);
        self.coeff[1] = 1.0 / (1.0 + alpha);
    }

    /// Current `[input, feedback]` coefficients.
    pub fn coefficients(&self) -> [f64; 2] {
        self.coeff
    }
}

impl Filter for LowPassIir {
    #[inline]
    fn process(&mut self, input: f64) -> f64 {
        let out = clamp_unit(self.coeff[0] * input + self.coeff[1] * self.last_out);
        self.last_out = out;
        out
    }

    fn reset(&mut self) {
        self.last_out = 0.0;
    }
}

/// Band-pass built from a high-pass followed by a low-pass sharing one cutoff.
#[derive(Debug, Clone)]
pub struct BandPassIir {
    hp: HighPassIir,
    lp: LowPassIir,
}

impl BandPassIir {
    /// Create an unconfigured band-pass filter.
    pub fn new(sample_rate: u32) -> Self {
        Self {
            hp: HighPassIir::new(sample_rate),
            lp: LowPassIir::new(sample_rate),
        }
    }

    /// Create a band-pass filter with its cutoff already set.
    pub fn with_cutoff(sample_rate: u32, cutoff_hz: f64) -> Self {
        let mut bp = Self::new(sample_rate);
        bp.set_cutoff(cutoff_hz);
        bp
    }

    /// Set the same cutoff on both sections.
    pub fn set_cutoff(&mut self, cutoff_hz: f64) {
        self.hp.set_cutoff(cutoff_hz);
        self.lp.set_cutoff(cutoff_hz);
    }
}

impl Filter for BandPassIir {
    #[inline]
    fn process(&mut self, input: f64) -> f64 {
        let out = self.hp.process(input);
        self.lp.process(out)
    }

    fn reset(&mut self) {
        self.hp.reset();
        self.lp.reset();
    }
}
