//! # Pitch Class Module
//!
//! This module defines the 12 pitch classes of the chromatic scale and the
//! modular arithmetic every other table in the crate is built on.
//!
//! ## Features
//! - Closed `PitchClass` enum isomorphic to the integers 0..=11
//! - Canonical (sharp-based) name lookup via `note_index`
//! - Lenient spelling parser accepting flats and double accidentals
//! - MIDI numbering and equal temperament frequencies

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed, ordered table of canonical pitch-class names.
///
/// Only these 12 names are indexable. Flat spellings such as "Bb" are
/// display spellings and are not accepted by `note_index`.
pub const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Pattern indicating which pitch classes fall on black piano keys.
/// Same order as `NOTE_NAMES`.
const IS_BLACK: [bool; 12] = [
    false, true, false, true, false, false, true, false, true, false, true, false,
];

/// One of the 12 pitch classes, ordered from C.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PitchClass {
    C,
    #[serde(rename = "C#")]
    CSharp,
    D,
    #[serde(rename = "D#")]
    DSharp,
    E,
    F,
    #[serde(rename = "F#")]
    FSharp,
    G,
    #[serde(rename = "G#")]
    GSharp,
    A,
    #[serde(rename = "A#")]
    ASharp,
    B,
}

impl PitchClass {
    /// All pitch classes in chromatic order.
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::CSharp,
        PitchClass::D,
        PitchClass::DSharp,
        PitchClass::E,
        PitchClass::F,
        PitchClass::FSharp,
        PitchClass::G,
        PitchClass::GSharp,
        PitchClass::A,
        PitchClass::ASharp,
        PitchClass::B,
    ];

    /// Position in the chromatic table (C = 0, B = 11).
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Maps any integer onto the cyclic group of 12, so negative offsets
    /// wrap downwards.
    pub fn from_index(index: i32) -> Self {
        Self::ALL[index.rem_euclid(12) as usize]
    }

    /// Canonical sharp-based name.
    pub fn name(self) -> &'static str {
        NOTE_NAMES[self.index() as usize]
    }

    /// The pitch class `semitones` above (or below, if negative) this one.
    pub fn transpose(self, semitones: i32) -> Self {
        Self::from_index(self.index() as i32 + semitones)
    }

    pub fn is_black(self) -> bool {
        IS_BLACK[self.index() as usize]
    }

    /// MIDI note number of this pitch class in a scientific pitch octave.
    ///
    /// The fixed `+ 12` offset aligns octave 4, index 0 with MIDI 60
    /// (middle C).
    pub fn midi(self, octave: i32) -> i32 {
        octave * 12 + self.index() as i32 + 12
    }

    /// Parses any conventional spelling of a note.
    ///
    /// Accepts a letter `A`..`G` followed by any number of sharps (`#`, `♯`)
    /// or flats (`b`, `♭`), so "Bb", "Cb", "E#" and "F##" all resolve.
    ///
    /// # Arguments
    /// * `spelling` - Note name as displayed (e.g. "Bb", "F#", "C")
    ///
    /// # Returns
    /// * `Ok(pitch_class)` - The pitch class the spelling sounds as
    /// * `Err(Error::UnknownNote)` - The text is not a note spelling
    pub fn from_spelling(spelling: &str) -> Result<Self> {
        let mut chars = spelling.chars();
        let base = match chars.next() {
            Some('C') => 0,
            Some('D') => 2,
            Some('E') => 4,
            Some('F') => 5,
            Some('G') => 7,
            Some('A') => 9,
            Some('B') => 11,
            _ => return Err(Error::UnknownNote(spelling.to_string())),
        };

        let mut offset = 0;
        for c in chars {
            match c {
                '#' | '♯' => offset += 1,
                'b' | '♭' => offset -= 1,
                _ => return Err(Error::UnknownNote(spelling.to_string())),
            }
        }
        Ok(Self::from_index(base + offset))
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PitchClass {
    type Err = Error;

    /// Strict parse: only the 12 canonical names are accepted.
    fn from_str(s: &str) -> Result<Self> {
        NOTE_NAMES
            .iter()
            .position(|&name| name == s)
            .map(|i| Self::ALL[i])
            .ok_or_else(|| Error::UnknownNote(s.to_string()))
    }
}

/// Looks up a canonical pitch-class name in the fixed 12-entry table.
///
/// # Arguments
/// * `name` - One of `C, C#, D, D#, E, F, F#, G, G#, A, A#, B`
///
/// # Returns
/// * `Ok(index)` - Position in `[0, 11]`
/// * `Err(Error::UnknownNote)` - Any other text, flat spellings included
pub fn note_index(name: &str) -> Result<u8> {
    name.parse::<PitchClass>().map(PitchClass::index)
}

/// Computes the MIDI note number of a canonical note name in an octave.
///
/// # Arguments
/// * `note` - Canonical note name
/// * `octave` - Scientific pitch octave (4 = middle octave)
pub fn midi_number(note: &str, octave: i32) -> Result<i32> {
    Ok(note.parse::<PitchClass>()?.midi(octave))
}

/// Equal temperament frequency of a MIDI note, with A4 (MIDI 69) = 440 Hz.
pub fn frequency(midi: i32) -> f32 {
    440.0 * 2.0_f32.powf((midi as f32 - 69.0) / 12.0)
}

/// Emits `NOTE_NAMES[(root + offset) % 12]` for each offset, in order.
pub(crate) fn chromatic_names(root: PitchClass, intervals: &[u8]) -> Vec<String> {
    intervals
        .iter()
        .map(|&offset| root.transpose(offset as i32).name().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_index_accepts_only_canonical_names() {
        assert_eq!(note_index("C").unwrap(), 0);
        assert_eq!(note_index("F#").unwrap(), 6);
        assert_eq!(note_index("B").unwrap(), 11);
        assert!(matches!(note_index("Bb"), Err(Error::UnknownNote(_))));
        assert!(matches!(note_index("c"), Err(Error::UnknownNote(_))));
        assert!(matches!(note_index(""), Err(Error::UnknownNote(_))));
    }

    #[test]
    fn transpose_wraps_in_both_directions() {
        assert_eq!(PitchClass::A.transpose(3), PitchClass::C);
        assert_eq!(PitchClass::C.transpose(-1), PitchClass::B);
        assert_eq!(PitchClass::G.transpose(24 + 7), PitchClass::D);
    }

    #[test]
    fn spelling_parser_handles_accidentals() {
        assert_eq!(PitchClass::from_spelling("Bb").unwrap(), PitchClass::ASharp);
        assert_eq!(PitchClass::from_spelling("Cb").unwrap(), PitchClass::B);
        assert_eq!(PitchClass::from_spelling("E#").unwrap(), PitchClass::F);
        assert_eq!(PitchClass::from_spelling("F##").unwrap(), PitchClass::G);
        assert_eq!(PitchClass::from_spelling("G♭").unwrap(), PitchClass::FSharp);
        assert!(PitchClass::from_spelling("H").is_err());
        assert!(PitchClass::from_spelling("C4").is_err());
    }

    #[test]
    fn midi_numbers_follow_middle_c_convention() {
        assert_eq!(midi_number("C", 4).unwrap(), 60);
        assert_eq!(midi_number("A", 4).unwrap(), 69);
        assert_eq!(midi_number("C", -1).unwrap(), 0);
        assert!(midi_number("X", 4).is_err());
    }

    #[test]
    fn pitch_class_midi_agrees_with_note_names() {
        assert_eq!(PitchClass::C.midi(4), 60);
        assert_eq!(PitchClass::A.midi(4), 69);
        assert_eq!(PitchClass::B.midi(3), 59);
        for pc in PitchClass::ALL {
            assert_eq!(midi_number(pc.name(), 2).unwrap(), pc.midi(2));
        }
    }

    #[test]
    fn a4_is_440() {
        assert!((frequency(69) - 440.0).abs() < 1e-3);
        assert!((frequency(81) - 880.0).abs() < 1e-2);
    }

    #[test]
    fn black_keys() {
        let black: Vec<_> = PitchClass::ALL.iter().filter(|p| p.is_black()).map(|p| p.name()).collect();
        assert_eq!(black, ["C#", "D#", "F#", "G#", "A#"]);
    }
}
