//! Seeded noise generator with colored variants.
//!
//! A uniform `[-1, 1]` stream from a PCG generator is either emitted directly
//! (white) or shaped by a fixed filter bank: a low-pass at 22.05 kHz, a
//! high-pass at 0 Hz, then ten peaking bands on the standard octave centers
//! with gains following `start + index · step` dB.
//!
//! | Color  | start dB | step dB |
//! |--------|----------|---------|
//! | Red    | 15       | -6      |
//! | Pink   | 15       | -3      |
//! | Blue   | 15       | 3       |
//! | Violet | 51       | 6       |
//!
//! Shaped output is divided by 4 to offset the gain the bank accumulates.

use core::fmt;
use core::str::FromStr;

use alloc::string::ToString;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::{Filter, FilterChain, Generator, HighPassIir, LowPassIir, PeakingIir, SynthError};

/// Seed used until [`NoiseGenerator::set_seed`] is called.
pub const DEFAULT_SEED: u64 = 0x0B17_DA0E;

/// Octave band centers of the coloring bank, in Hz.
const OCTAVE_CENTERS: [f64; 10] = [
    31.0, 62.0, 125.0, 250.0, 500.0, 1000.0, 2000.0, 4000.0, 8000.0, 16000.0,
];

const BAND_Q: f64 = 0.45;

/// Compensates the gain accumulated by the coloring bank.
const SHAPED_ATTENUATION: f64 = 4.0;

/// Spectral color of the generated noise.
///
/// The numeric selectors used by [`TryFrom<u8>`] are
/// `0 = Red, 1 = Pink, 2 = White, 3 = Blue, 4 = Violet`.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NoiseColor {
    /// Falling 6 dB per octave.
    Red,
    /// Falling 3 dB per octave.
    Pink,
    /// Flat spectrum, no filtering.
    #[default]
    White,
    /// Rising 3 dB per octave.
    Blue,
    /// Rising 6 dB per octave.
    Violet,
}

impl NoiseColor {
    /// All colors in selector order.
    pub const ALL: [NoiseColor; 5] = [
        NoiseColor::Red,
        NoiseColor::Pink,
        NoiseColor::White,
        NoiseColor::Blue,
        NoiseColor::Violet,
    ];

    /// `(start, step)` in dB for the peaking bank, `None` for white.
    pub fn band_gains(self) -> Option<(i32, i32)> {
        match self {
            NoiseColor::Red => Some((15, -6)),
            NoiseColor::Pink => Some((15, -3)),
            NoiseColor::White => None,
            NoiseColor::Blue => Some((15, 3)),
            NoiseColor::Violet => Some((51, 6)),
        }
    }

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            NoiseColor::Red => "red",
            NoiseColor::Pink => "pink",
            NoiseColor::White => "white",
            NoiseColor::Blue => "blue",
            NoiseColor::Violet => "violet",
        }
    }
}

impl TryFrom<u8> for NoiseColor {
    type Error = SynthError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        NoiseColor::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(SynthError::UnknownNoiseColor(value))
    }
}

impl fmt::Display for NoiseColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NoiseColor {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red" | "brown" | "brownian" => Ok(NoiseColor::Red),
            "pink" => Ok(NoiseColor::Pink),
            "white" => Ok(NoiseColor::White),
            "blue" => Ok(NoiseColor::Blue),
            "violet" | "purple" => Ok(NoiseColor::Violet),
            _ => Err(SynthError::UnknownNoiseColorName(s.to_string())),
        }
    }
}

/// Build the coloring bank for a `(start, step)` dB progression.
fn coloring_chain(sample_rate: u32, start_db: i32, step_db: i32) -> FilterChain {
    let mut chain = FilterChain::new();
    chain.push(LowPassIir::with_cutoff(sample_rate, 22050.0));
    chain.push(HighPassIir::with_cutoff(sample_rate, 0.0));

    let mut gain_db = start_db;
    for center in OCTAVE_CENTERS {
        chain.push(PeakingIir::with_q_db(
            sample_rate,
            center,
            BAND_Q,
            f64::from(gain_db),
        ));
        gain_db += step_db;
    }
    chain
}

/// Reproducible noise source.
///
/// [`reset`](Generator::reset) reseeds the PRNG with the stored seed, so a
/// reset generator replays the same raw sequence. The coloring bank keeps its
/// delay lines across a reset; clear them through
/// [`filter_mut`](Self::filter_mut) when a clean restart is needed.
///
/// # Example
///
/// ```rust
/// use bitdauer_synth::{Filter, Generator, NoiseColor, NoiseGenerator};
///
/// let mut noise = NoiseGenerator::new(44100);
/// noise.set_seed(7);
/// noise.set_noise_color(NoiseColor::Pink);
///
/// let first = noise.next_sample();
/// noise.reset();
/// noise.filter_mut().map(|bank| bank.reset());
/// assert_eq!(noise.next_sample(), first);
/// ```
#[derive(Debug)]
pub struct NoiseGenerator {
    sample_rate: u32,
    color: NoiseColor,
    seed: u64,
    rng: Pcg32,
    filter: Option<FilterChain>,
}

impl NoiseGenerator {
    /// Create a white noise generator seeded with [`DEFAULT_SEED`].
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate: sample_rate.max(1),
            color: NoiseColor::White,
            seed: DEFAULT_SEED,
            rng: Pcg32::seed_from_u64(DEFAULT_SEED),
            filter: None,
        }
    }

    /// Replace the seed and restart the PRNG from it.
    pub fn set_seed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        #[cfg(feature = "tracing")]
        tracing::debug!("noise_seed: {seed}");
    }

    /// Current seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Select the noise color, rebuilding the coloring bank.
    pub fn set_noise_color(&mut self, color: NoiseColor) {
        self.filter = color
            .band_gains()
            .map(|(start, step)| coloring_chain(self.sample_rate, start, step));
        self.color = color;
        #[cfg(feature = "tracing")]
        tracing::debug!("noise_color: {color}");
    }

    /// Select the noise color from its numeric selector.
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::UnknownNoiseColor`] for selectors above 4; the
    /// current color is left unchanged.
    pub fn set_noise_color_index(&mut self, selector: u8) -> Result<(), SynthError> {
        let color = NoiseColor::try_from(selector)?;
        self.set_noise_color(color);
        Ok(())
    }

    /// Current noise color.
    pub fn noise_color(&self) -> NoiseColor {
        self.color
    }

    /// The coloring bank, absent for white noise.
    pub fn filter_mut(&mut self) -> Option<&mut FilterChain> {
        self.filter.as_mut()
    }

    #[inline]
    fn next_uniform(&mut self) -> f64 {
        self.rng.random::<f64>() * 2.0 - 1.0
    }
}

impl Generator for NoiseGenerator {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    #[inline]
    fn next_sample(&mut self) -> f64 {
        let value = self.next_uniform();
        match self.filter.as_mut() {
            Some(bank) => bank.process(value) / SHAPED_ATTENUATION,
            None => value,
        }
    }

    fn reset(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed);
    }
}
