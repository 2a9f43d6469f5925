//! Patch files for the bitdauer synthesizer.
//!
//! A [`Patch`] describes one oscillator voice in TOML: generator kind, wave
//! shape, pitch, volume, start delay, noise color, envelope and LFOs. Patches
//! are validated up front and turned into a live
//! [`Oscillator`](bitdauer_synth::Oscillator) with [`Patch::build`].
//!
//! # Features
//!
//! - **Patch files**: load and save patches as TOML
//! - **Validation**: every bad field reported by name
//! - **Paths**: platform-specific user patch directory
//! - **Factory patches**: built-in sounds, including the genex saw render
//!
//! # Example
//!
//! ```rust,no_run
//! use bitdauer_config::{EnvelopeConfig, Patch, user_patches_dir};
//! use bitdauer_synth::{Note, Waveform, generate};
//!
//! let patch = Patch::new("Soft Square")
//!     .with_waveform(Waveform::Square)
//!     .with_pitch(Note::D, 4)
//!     .with_envelope(EnvelopeConfig {
//!         attack_ms: 50,
//!         release_ms: 200,
//!         ..EnvelopeConfig::default()
//!     });
//!
//! let mut osc = patch.build().unwrap();
//! let samples = generate(patch.duration_ms, &mut osc);
//!
//! patch.save(user_patches_dir().join("soft_square.toml")).unwrap();
//! ```

mod error;
mod patch;

/// Platform-specific paths for user patches.
pub mod paths;

/// Patch validation.
pub mod validation;

/// Factory patches bundled with the library.
pub mod factory_patches;

pub use error::ConfigError;
pub use factory_patches::{
    FACTORY_PATCH_NAMES, factory_patch_names, factory_patches, get_factory_patch,
    is_factory_patch,
};
pub use patch::{EnvelopeConfig, LfoConfig, NoiseConfig, Patch, Pitch};
pub use paths::{
    ensure_user_patches_dir, find_patch, list_user_patches, patch_name_from_path,
    user_patches_dir,
};
pub use validation::{ValidationError, ValidationResult, validate_easing, validate_patch};
