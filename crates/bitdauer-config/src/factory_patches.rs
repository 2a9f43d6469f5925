//! Factory patches bundled with the library.
//!
//! These are embedded at compile time, so they are always available without
//! any files on disk. `genex_saw` reproduces the original demo render.

use crate::Patch;

/// Array of factory patch names for external access.
pub static FACTORY_PATCH_NAMES: &[&str] = &[
    "init",
    "genex_saw",
    "pluck",
    "vibrato",
    "tremolo",
    "pink_noise",
    "surf",
    "chime",
];

/// TOML content for factory patches.
static FACTORY_PATCHES_TOML: &[(&str, &str)] = &[
    ("init", INIT_PATCH),
    ("genex_saw", GENEX_SAW_PATCH),
    ("pluck", PLUCK_PATCH),
    ("vibrato", VIBRATO_PATCH),
    ("tremolo", TREMOLO_PATCH),
    ("pink_noise", PINK_NOISE_PATCH),
    ("surf", SURF_PATCH),
    ("chime", CHIME_PATCH),
];

/// Plain A4 sine.
const INIT_PATCH: &str = r#"
name = "Init"
description = "Plain 440 Hz sine, no envelope or modulation"
frequency = 440.0
"#;

/// Two-second A4 sawtooth: one second of exponential swell, one of
/// logarithmic fade.
const GENEX_SAW_PATCH: &str = r#"
name = "Genex Saw"
description = "A4 sawtooth swelling in and fading out over two seconds"
sample_rate = 44100
duration_ms = 2000
waveform = "sawtooth"

[pitch]
note = "a"
octave = 4

[envelope]
attack_ms = 1000
decay_ms = 0
release_ms = 1000
sustain = 1.0
attack_curve = { curve = "exponential", factor = 10.0 }
release_curve = { curve = "logarithmic", base = 2.718281828459045 }
"#;

const PLUCK_PATCH: &str = r#"
name = "Pluck"
description = "Short triangle pluck on C5 with a fast exponential decay"
duration_ms = 400
waveform = "triangle"

[pitch]
note = "c"
octave = 5

[envelope]
attack_ms = 2
decay_ms = 150
sustain_ms = 100
release_ms = 140
sustain = 0.3
decay_curve = { curve = "exponential", factor = 5.0 }
release_curve = { curve = "ease_out", power = 2.0 }
"#;

const VIBRATO_PATCH: &str = r#"
name = "Vibrato"
description = "E4 sine with a 6 Hz pitch wobble"
duration_ms = 2000

[pitch]
note = "e"
octave = 4

[envelope]
attack_ms = 200
sustain_ms = 1500
release_ms = 300
release_curve = { curve = "ease_in_out", power = 2.0 }

[frequency_lfo]
waveform = "sine"
rate_hz = 6.0
deviation = 4.0
"#;

const TREMOLO_PATCH: &str = r#"
name = "Tremolo"
description = "G3 square pulsing in volume at 4 Hz"
duration_ms = 2000
waveform = "square"
volume = 0.5

[pitch]
note = "g"
octave = 3

[volume_lfo]
waveform = "triangle"
rate_hz = 4.0
deviation = 0.3
"#;

const PINK_NOISE_PATCH: &str = r#"
name = "Pink Noise"
description = "One second of steady pink noise"
generator = "noise"
volume = 0.8

[noise]
color = "pink"
"#;

const SURF_PATCH: &str = r#"
name = "Surf"
description = "Red noise washing in and out"
generator = "noise"
duration_ms = 4000

[noise]
color = "red"
seed = 1234

[envelope]
attack_ms = 1500
sustain_ms = 500
release_ms = 2000
sustain = 0.9
attack_curve = { curve = "s_curve", sharpness = 6.0, midpoint = 0.5 }
release_curve = { curve = "exponential", factor = 4.0 }

[volume_lfo]
waveform = "sine"
rate_hz = 0.5
deviation = 0.2
"#;

const CHIME_PATCH: &str = r#"
name = "Chime"
description = "Delayed A5 sine with a long logarithmic tail"
duration_ms = 1500
delay_ms = 250
phase_shift = 90.0

[pitch]
note = "a"
octave = 5

[envelope]
attack_ms = 5
decay_ms = 1000
sustain = 0.0
decay_curve = { curve = "inverse_logarithmic", base = 10.0 }
"#;

/// Get all factory patches.
///
/// ```rust
/// use bitdauer_config::factory_patches;
///
/// for patch in factory_patches() {
///     println!("{}: {}", patch.name, patch.description.as_deref().unwrap_or(""));
/// }
/// ```
pub fn factory_patches() -> Vec<Patch> {
    FACTORY_PATCHES_TOML
        .iter()
        .filter_map(|(_, toml)| Patch::from_toml(toml).ok())
        .collect()
}

/// Get a factory patch by name.
///
/// Matches the internal identifier or the display name, case-insensitively.
///
/// ```rust
/// use bitdauer_config::get_factory_patch;
///
/// let patch = get_factory_patch("Genex Saw").unwrap();
/// assert_eq!(patch.duration_ms, 2000);
/// ```
pub fn get_factory_patch(name: &str) -> Option<Patch> {
    let name_lower = name.to_lowercase();

    if let Some((_, toml)) = FACTORY_PATCHES_TOML
        .iter()
        .find(|(id, _)| id.to_lowercase() == name_lower)
    {
        return Patch::from_toml(toml).ok();
    }

    factory_patches()
        .into_iter()
        .find(|patch| patch.name.to_lowercase() == name_lower)
}

/// Get the internal identifiers of all factory patches.
pub fn factory_patch_names() -> Vec<&'static str> {
    FACTORY_PATCHES_TOML.iter().map(|(name, _)| *name).collect()
}

/// Check if a name refers to a factory patch (case-insensitive).
///
/// ```rust
/// use bitdauer_config::is_factory_patch;
///
/// assert!(is_factory_patch("pluck"));
/// assert!(is_factory_patch("Pink Noise"));
/// assert!(!is_factory_patch("my_patch"));
/// ```
pub fn is_factory_patch(name: &str) -> bool {
    get_factory_patch(name).is_some()
}
