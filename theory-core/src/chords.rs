//! # Chords Module
//!
//! Named chord patterns and their resolution onto a root. Chords are always
//! spelled chromatically with sharps; there is no override table.

use crate::error::{Error, Result};
use crate::pitch::{self, PitchClass};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display metadata and interval pattern of a chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChordDefinition {
    pub name: &'static str,
    pub intervals: &'static [u8],
    /// Suffix written after the root (e.g. "m7" in "Cm7").
    pub symbol: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChordType {
    Major,
    Minor,
    Diminished,
    Augmented,
    Major7,
    Dominant7,
    Minor7,
}

impl ChordType {
    pub const ALL: [ChordType; 7] = [
        ChordType::Major,
        ChordType::Minor,
        ChordType::Diminished,
        ChordType::Augmented,
        ChordType::Major7,
        ChordType::Dominant7,
        ChordType::Minor7,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ChordType::Major => "major",
            ChordType::Minor => "minor",
            ChordType::Diminished => "diminished",
            ChordType::Augmented => "augmented",
            ChordType::Major7 => "major7",
            ChordType::Dominant7 => "dominant7",
            ChordType::Minor7 => "minor7",
        }
    }

    pub fn definition(self) -> &'static ChordDefinition {
        match self {
            ChordType::Major => &MAJOR,
            ChordType::Minor => &MINOR,
            ChordType::Diminished => &DIMINISHED,
            ChordType::Augmented => &AUGMENTED,
            ChordType::Major7 => &MAJOR7,
            ChordType::Dominant7 => &DOMINANT7,
            ChordType::Minor7 => &MINOR7,
        }
    }

    pub fn intervals(self) -> &'static [u8] {
        self.definition().intervals
    }

    /// Chord symbol on a root, e.g. `C#m7`.
    pub fn symbol_on(self, root: PitchClass) -> String {
        format!("{}{}", root, self.definition().symbol)
    }
}

impl fmt::Display for ChordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ChordType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|chord| chord.key() == s)
            .ok_or_else(|| Error::UnknownChordType(s.to_string()))
    }
}

const MAJOR: ChordDefinition = ChordDefinition {
    name: "Major",
    intervals: &[0, 4, 7],
    symbol: "",
    description: "Bright and stable, the foundation of Western harmony.",
};

const MINOR: ChordDefinition = ChordDefinition {
    name: "Minor",
    intervals: &[0, 3, 7],
    symbol: "m",
    description: "Darker and more emotional than major chords.",
};

const DIMINISHED: ChordDefinition = ChordDefinition {
    name: "Diminished",
    intervals: &[0, 3, 6],
    symbol: "°",
    description: "Tense and unstable, often used as a passing chord.",
};

const AUGMENTED: ChordDefinition = ChordDefinition {
    name: "Augmented",
    intervals: &[0, 4, 8],
    symbol: "+",
    description: "Mysterious and unresolved, it builds tension.",
};

const MAJOR7: ChordDefinition = ChordDefinition {
    name: "Major 7th",
    intervals: &[0, 4, 7, 11],
    symbol: "maj7",
    description: "Sophisticated and jazzy, adds color to progressions.",
};

const DOMINANT7: ChordDefinition = ChordDefinition {
    name: "Dominant 7th",
    intervals: &[0, 4, 7, 10],
    symbol: "7",
    description: "Strong pull to resolve, fundamental in blues and jazz.",
};

const MINOR7: ChordDefinition = ChordDefinition {
    name: "Minor 7th",
    intervals: &[0, 3, 7, 10],
    symbol: "m7",
    description: "Soft and mellow, common in jazz and R&B.",
};

/// Resolves a chord pattern onto a canonical root note.
///
/// # Returns
/// * `Ok(notes)` - 3 or 4 sharp-spelled note names, root first
/// * `Err(Error::UnknownNote)` - The root is not a canonical name
pub fn resolve_chord(root: &str, chord: ChordType) -> Result<Vec<String>> {
    let root_pc: PitchClass = root.parse()?;
    Ok(pitch::chromatic_names(root_pc, chord.intervals()))
}

/// String-keyed variant of [`resolve_chord`].
pub fn resolve_chord_by_key(root: &str, chord_key: &str) -> Result<Vec<String>> {
    let chord: ChordType = chord_key.parse()?;
    resolve_chord(root, chord)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triads_on_c() {
        assert_eq!(resolve_chord("C", ChordType::Major).unwrap(), ["C", "E", "G"]);
        assert_eq!(resolve_chord("C", ChordType::Minor).unwrap(), ["C", "D#", "G"]);
        assert_eq!(resolve_chord("C", ChordType::Diminished).unwrap(), ["C", "D#", "F#"]);
        assert_eq!(resolve_chord("C", ChordType::Augmented).unwrap(), ["C", "E", "G#"]);
    }

    #[test]
    fn sevenths_wrap_around_the_octave() {
        assert_eq!(
            resolve_chord("C", ChordType::Minor7).unwrap(),
            ["C", "D#", "G", "A#"]
        );
        assert_eq!(
            resolve_chord("A", ChordType::Major7).unwrap(),
            ["A", "C#", "E", "G#"]
        );
        assert_eq!(
            resolve_chord("G", ChordType::Dominant7).unwrap(),
            ["G", "B", "D", "F"]
        );
    }

    #[test]
    fn flat_roots_are_rejected() {
        assert!(matches!(
            resolve_chord("Bb", ChordType::Major),
            Err(Error::UnknownNote(_))
        ));
    }

    #[test]
    fn unknown_key() {
        assert!(matches!(
            resolve_chord_by_key("C", "sus4"),
            Err(Error::UnknownChordType(_))
        ));
        assert_eq!(resolve_chord_by_key("D", "minor").unwrap(), ["D", "F", "A"]);
    }

    #[test]
    fn symbols() {
        assert_eq!(ChordType::Minor7.symbol_on(PitchClass::CSharp), "C#m7");
        assert_eq!(ChordType::Major.symbol_on(PitchClass::G), "G");
    }
}
