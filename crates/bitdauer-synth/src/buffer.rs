//! Rendering generators into sample buffers.

use alloc::vec;
use alloc::vec::Vec;

use crate::Generator;

/// Number of samples covering `duration_ms` at `sample_rate`, rounded up:
/// `ceil(sample_rate · duration_ms / 1000)`.
///
/// ```rust
/// use bitdauer_synth::sample_length;
///
/// assert_eq!(sample_length(44100, 1000), 44100);
/// assert_eq!(sample_length(44100, 1), 45);
/// assert_eq!(sample_length(8000, 0), 0);
/// ```
pub fn sample_length(sample_rate: u32, duration_ms: u32) -> usize {
    let samples = (u64::from(sample_rate) * u64::from(duration_ms)).div_ceil(1000);
    usize::try_from(samples).unwrap_or(usize::MAX)
}

/// Reset `generator` once, then overwrite every slot of `buffer` with its
/// next sample.
pub fn fill<G: Generator + ?Sized>(buffer: &mut [f64], generator: &mut G) {
    generator.reset();
    for slot in buffer.iter_mut() {
        *slot = generator.next_sample();
    }
}

/// Allocate a buffer of [`sample_length`] samples at the generator's sample
/// rate and [`fill`] it.
pub fn generate<G: Generator + ?Sized>(duration_ms: u32, generator: &mut G) -> Vec<f64> {
    let mut buffer = vec![0.0; sample_length(generator.sample_rate(), duration_ms)];
    fill(&mut buffer, generator);
    #[cfg(feature = "tracing")]
    tracing::debug!(
        "generate: {} samples at {} Hz",
        buffer.len(),
        generator.sample_rate()
    );
    buffer
}
