//! Patch validation.
//!
//! The synthesis core accepts any numeric setting and turns degenerate input
//! into silence or a flat line. Patches are checked up front instead, so a
//! typo in a TOML file is reported by field name rather than rendered as a
//! second of nothing.
//!
//! # Example
//!
//! ```rust
//! use bitdauer_config::{Patch, validate_patch};
//!
//! let patch = Patch::new("tone").with_frequency(440.0);
//! assert!(validate_patch(&patch).is_ok());
//!
//! let broken = Patch::new("tone").with_frequency(-1.0);
//! assert!(validate_patch(&broken).is_err());
//! ```

use bitdauer_synth::{Easing, GeneratorKind, notes::OCTAVES};
use thiserror::Error;

use crate::patch::{EnvelopeConfig, LfoConfig, Patch};

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// A single field holds an unusable value.
    #[error("invalid field '{field}': {reason}")]
    InvalidField {
        /// Dotted path of the field, e.g. `envelope.sustain`.
        field: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

impl ValidationError {
    /// Create an invalid field error.
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Number of individual problems carried by this error.
    pub fn count(&self) -> usize {
        match self {
            ValidationError::InvalidField { .. } => 1,
            ValidationError::Multiple(errors) => errors.iter().map(Self::count).sum(),
        }
    }
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Collects field errors while walking a patch.
#[derive(Default)]
struct Report {
    errors: Vec<ValidationError>,
}

impl Report {
    fn check(&mut self, ok: bool, field: &str, reason: &str) {
        if !ok {
            self.errors.push(ValidationError::invalid(field, reason));
        }
    }

    fn finite(&mut self, value: f64, field: &str) {
        self.check(value.is_finite(), field, "must be a finite number");
    }

    fn finish(mut self) -> ValidationResult<()> {
        match self.errors.len() {
            0 => Ok(()),
            1 => Err(self.errors.remove(0)),
            _ => Err(ValidationError::Multiple(self.errors)),
        }
    }
}

/// Validate a whole patch, reporting every problem found.
pub fn validate_patch(patch: &Patch) -> ValidationResult<()> {
    let mut report = Report::default();

    report.check(patch.sample_rate > 0, "sample_rate", "must be greater than zero");
    report.finite(patch.volume, "volume");
    report.finite(patch.phase_shift, "phase_shift");
    report.check(
        patch.tuning.is_finite() && patch.tuning > 0.0,
        "tuning",
        "must be a positive frequency",
    );

    let nyquist = f64::from(patch.sample_rate) / 2.0;
    if let Some(freq) = patch.frequency {
        report.check(
            freq.is_finite() && (0.0..=nyquist).contains(&freq),
            "frequency",
            "must be between 0 and half the sample rate",
        );
        report.check(
            patch.pitch.is_none(),
            "pitch",
            "conflicts with an explicit frequency",
        );
    }
    if let Some(pitch) = &patch.pitch {
        report.check(
            pitch.octave < OCTAVES,
            "pitch.octave",
            "must be between 0 and 8",
        );
    }
    report.check(
        i64::try_from(patch.noise.seed).is_ok(),
        "noise.seed",
        "must fit in a signed 64-bit TOML integer",
    );
    if patch.generator == GeneratorKind::Wave {
        report.check(
            patch.frequency.is_some() || patch.pitch.is_some(),
            "frequency",
            "a wave patch needs a frequency or a pitch",
        );
    }

    if let Some(envelope) = &patch.envelope {
        check_envelope(&mut report, envelope);
    }
    if let Some(lfo) = &patch.frequency_lfo {
        check_lfo(&mut report, lfo, "frequency_lfo");
    }
    if let Some(lfo) = &patch.volume_lfo {
        check_lfo(&mut report, lfo, "volume_lfo");
    }

    report.finish()
}

/// Validate the parameters of one easing curve.
///
/// `field` names the curve in the error message.
pub fn validate_easing(field: &str, curve: &Easing) -> ValidationResult<()> {
    let mut report = Report::default();
    check_easing(&mut report, field, curve);
    report.finish()
}

fn check_envelope(report: &mut Report, envelope: &EnvelopeConfig) {
    report.check(
        (0.0..=1.0).contains(&envelope.sustain),
        "envelope.sustain",
        "must be between 0 and 1",
    );
    check_easing(report, "envelope.attack_curve", &envelope.attack_curve);
    check_easing(report, "envelope.decay_curve", &envelope.decay_curve);
    check_easing(report, "envelope.release_curve", &envelope.release_curve);
}

fn check_lfo(report: &mut Report, lfo: &LfoConfig, prefix: &str) {
    report.check(
        lfo.rate_hz.is_finite() && lfo.rate_hz >= 0.0,
        &format!("{prefix}.rate_hz"),
        "must be a non-negative frequency",
    );
    report.finite(lfo.deviation, &format!("{prefix}.deviation"));
    report.finite(lfo.phase_shift, &format!("{prefix}.phase_shift"));
}

fn check_easing(report: &mut Report, field: &str, curve: &Easing) {
    let positive = |v: f64| v.is_finite() && v > 0.0;
    match *curve {
        Easing::Linear => {}
        Easing::EaseIn { power } | Easing::EaseOut { power } | Easing::EaseInOut { power } => {
            report.check(positive(power), field, "power must be positive");
        }
        Easing::Exponential { factor } | Easing::InverseExponential { factor } => {
            report.check(positive(factor), field, "factor must be positive");
        }
        Easing::Logarithmic { base } | Easing::InverseLogarithmic { base } => {
            report.check(
                base.is_finite() && base > 1.0,
                field,
                "base must be greater than 1",
            );
        }
        Easing::SCurve {
            sharpness,
            midpoint,
        } => {
            report.check(positive(sharpness), field, "sharpness must be positive");
            report.check(
                midpoint > 0.0 && midpoint < 1.0,
                field,
                "midpoint must be strictly between 0 and 1",
            );
        }
    }
}
