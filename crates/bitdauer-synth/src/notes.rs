//! Equal-tempered note frequencies.
//!
//! A [`NoteTable`] is built once for a given A4 tuning and covers octaves
//! 0 through 8 of the twelve-tone scale:
//!
//! ```text
//! index = octave · 12 + note
//! freq  = a4 · 2^((index - 57) / 12)
//! ```

use core::fmt;
use core::str::FromStr;

use alloc::string::ToString;
use libm::pow;

use crate::SynthError;

/// Octaves covered by a [`NoteTable`].
pub const OCTAVES: u8 = 9;

const TABLE_LEN: usize = OCTAVES as usize * 12;

/// Index of A4 in the table.
const A4_INDEX: i32 = 4 * 12 + 9;

/// Standard concert pitch.
pub const CONCERT_A4: f64 = 440.0;

/// Pitch class inside an octave.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Note {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

impl Note {
    /// All pitch classes from C upward.
    pub const ALL: [Note; 12] = [
        Note::C,
        Note::CSharp,
        Note::D,
        Note::DSharp,
        Note::E,
        Note::F,
        Note::FSharp,
        Note::G,
        Note::GSharp,
        Note::A,
        Note::ASharp,
        Note::B,
    ];

    /// Semitones above C.
    pub fn semitone(self) -> u8 {
        self as u8
    }

    /// Name with `#` for sharps.
    pub fn name(self) -> &'static str {
        const NAMES: [&str; 12] = [
            "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
        ];
        NAMES[usize::from(self.semitone())]
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Note {
    type Err = SynthError;

    /// Accepts `C`, `c#`, `Db`, `f_sharp`, `a_flat` and the like.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let note = match lower.as_str() {
            "c" | "b#" => Note::C,
            "c#" | "db" | "c_sharp" | "d_flat" => Note::CSharp,
            "d" => Note::D,
            "d#" | "eb" | "d_sharp" | "e_flat" => Note::DSharp,
            "e" | "fb" => Note::E,
            "f" | "e#" => Note::F,
            "f#" | "gb" | "f_sharp" | "g_flat" => Note::FSharp,
            "g" => Note::G,
            "g#" | "ab" | "g_sharp" | "a_flat" => Note::GSharp,
            "a" => Note::A,
            "a#" | "bb" | "a_sharp" | "b_flat" => Note::ASharp,
            "b" | "cb" => Note::B,
            _ => return Err(SynthError::UnknownNote(s.to_string())),
        };
        Ok(note)
    }
}

/// Lookup table of note frequencies for one tuning.
///
/// ```rust
/// use bitdauer_synth::{Note, NoteTable};
///
/// let table = NoteTable::new(440.0);
/// assert_eq!(table.frequency(4, Note::A), Some(440.0));
/// assert_eq!(table.frequency(9, Note::C), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NoteTable {
    a4_hz: f64,
    freqs: [f64; TABLE_LEN],
}

impl NoteTable {
    /// Build the table with `a4_hz` as the frequency of A in octave 4.
    pub fn new(a4_hz: f64) -> Self {
        let mut freqs = [0.0; TABLE_LEN];
        for (idx, freq) in (0_i32..).zip(freqs.iter_mut()) {
            *freq = a4_hz * pow(2.0, f64::from(idx - A4_INDEX) / 12.0);
        }
        Self { a4_hz, freqs }
    }

    /// Tuning reference.
    pub fn a4(&self) -> f64 {
        self.a4_hz
    }

    /// Frequency of `note` in `octave`, `None` above octave 8.
    pub fn frequency(&self, octave: u8, note: Note) -> Option<f64> {
        if octave >= OCTAVES {
            return None;
        }
        self.freqs
            .get(usize::from(octave) * 12 + usize::from(note.semitone()))
            .copied()
    }
}

impl Default for NoteTable {
    fn default() -> Self {
        Self::new(CONCERT_A4)
    }
}
