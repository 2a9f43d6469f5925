//! Bitdauer Synth - sample-by-sample synthesis core
//!
//! This crate produces a deterministic stream of `f64` samples, one call at a
//! time, from a fixed configuration. Everything is built from three independent
//! capability families that compose by ownership:
//!
//! - [`Generator`] - anything that produces the next sample
//! - [`Filter`] - anything that maps one input sample to one output sample
//! - [`Easing`] - shape functions that animate envelope ramps
//!
//! # Generators
//!
//! - [`FunctionGenerator`] - phase accumulator driving a [`WaveFunction`]
//! - [`NoiseGenerator`] - seeded uniform noise, optionally colored by a filter bank
//! - [`Flat`] - always zero, the default modulator
//! - [`Lfo`] - a function generator scaled by a deviation factor
//! - [`Envelope`] - four-phase ADSR amplitude envelope
//! - [`Oscillator`] - the composition root tying the above together
//!
//! ```rust
//! use bitdauer_synth::{Generator, Oscillator, Waveform, generate};
//!
//! let mut osc = Oscillator::new(8000);
//! osc.wave_mut().set_waveform(Waveform::Sine);
//! osc.set_frequency(440.0);
//!
//! let samples = generate(1000, &mut osc);
//! assert_eq!(samples.len(), 8000);
//! ```
//!
//! # Filters
//!
//! First-order [`HighPassIir`] / [`LowPassIir`] / [`BandPassIir`], second-order
//! [`NotchIir`] / [`PeakingIir`], sequential [`FilterChain`] and parallel
//! [`CompositeFilter`].
//!
//! # Envelopes
//!
//! ```rust
//! use bitdauer_synth::{Easing, Envelope, Generator};
//!
//! let mut env = Envelope::new(48000);
//! env.set_attack_ms(10);
//! env.set_decay_ms(50);
//! env.set_sustain(0.6);
//! env.set_sustain_ms(200);
//! env.set_release_ms(100);
//! env.set_attack_curve(Easing::EaseIn { power: 2.0 });
//!
//! let level = env.next_sample();
//! assert_eq!(level, 0.0);
//! ```
//!
//! # no_std Support
//!
//! The crate is `no_std` + `alloc` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! bitdauer-synth = { version = "0.1", default-features = false }
//! ```
//!
//! # Design Principles
//!
//! - **Caller driven**: one call per sample, no internal threads or clocks
//! - **Allocation-free hot path**: allocation happens only while configuring
//! - **Never NaN**: degenerate ranges resolve to defined values

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod buffer;
pub mod chain;
pub mod easing;
pub mod envelope;
pub mod error;
pub mod filter;
pub mod function_generator;
pub mod generator;
pub mod lfo;
pub mod noise;
pub mod notch;
pub mod notes;
pub mod one_pole;
pub mod oscillator;
pub mod peaking;
pub mod waveform;

// Re-export main types at crate root
pub use buffer::{fill, generate, sample_length};
pub use chain::{CompositeFilter, FilterChain};
pub use easing::{Easing, denormalise_position, normalise_position};
pub use envelope::{Envelope, EnvelopePhase};
pub use error::SynthError;
pub use filter::Filter;
pub use function_generator::FunctionGenerator;
pub use generator::{Flat, Generator};
pub use lfo::Lfo;
pub use noise::{NoiseColor, NoiseGenerator};
pub use notch::NotchIir;
pub use notes::{Note, NoteTable};
pub use one_pole::{BandPassIir, HighPassIir, LowPassIir};
pub use oscillator::{GeneratorKind, Oscillator};
pub use peaking::PeakingIir;
pub use waveform::{WaveFunction, Waveform};

/// One full turn in radians.
pub const TAU: f64 = core::f64::consts::TAU;
