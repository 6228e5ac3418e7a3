//! # Scales Module
//!
//! Named scale patterns and their resolution onto a root.
//!
//! ## Features
//! - Closed `ScaleType` set with stable string keys
//! - Display metadata (name, description, step formula)
//! - Conventional spellings for major scales, chromatic sharp spelling
//!   for everything else

use crate::enharmonic;
use crate::error::{Error, Result};
use crate::pitch::{self, PitchClass};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Display metadata and interval pattern of a scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleDefinition {
    pub name: &'static str,
    /// Semitone offsets from the root, ascending.
    pub intervals: &'static [u8],
    pub description: &'static str,
    /// Whole/half step formula.
    pub formula: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleType {
    Major,
    Minor,
    Pentatonic,
    Blues,
    Dorian,
}

impl ScaleType {
    pub const ALL: [ScaleType; 5] = [
        ScaleType::Major,
        ScaleType::Minor,
        ScaleType::Pentatonic,
        ScaleType::Blues,
        ScaleType::Dorian,
    ];

    /// Stable identifier used by selectors and progress keys.
    pub fn key(self) -> &'static str {
        match self {
            ScaleType::Major => "major",
            ScaleType::Minor => "minor",
            ScaleType::Pentatonic => "pentatonic",
            ScaleType::Blues => "blues",
            ScaleType::Dorian => "dorian",
        }
    }

    pub fn definition(self) -> &'static ScaleDefinition {
        match self {
            ScaleType::Major => &MAJOR,
            ScaleType::Minor => &MINOR,
            ScaleType::Pentatonic => &PENTATONIC,
            ScaleType::Blues => &BLUES,
            ScaleType::Dorian => &DORIAN,
        }
    }

    pub fn intervals(self) -> &'static [u8] {
        self.definition().intervals
    }
}

impl fmt::Display for ScaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ScaleType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|scale| scale.key() == s)
            .ok_or_else(|| Error::UnknownScaleType(s.to_string()))
    }
}

const MAJOR: ScaleDefinition = ScaleDefinition {
    name: "Major",
    intervals: &[0, 2, 4, 5, 7, 9, 11],
    description: "The most common scale in Western music, bright and joyful.",
    formula: "W-W-H-W-W-W-H",
};

const MINOR: ScaleDefinition = ScaleDefinition {
    name: "Natural Minor",
    intervals: &[0, 2, 3, 5, 7, 8, 10],
    description: "The natural minor scale, dark and melancholic.",
    formula: "W-H-W-W-H-W-W",
};

const PENTATONIC: ScaleDefinition = ScaleDefinition {
    name: "Pentatonic",
    intervals: &[0, 2, 4, 7, 9],
    description: "A five-note scale found in many musical traditions.",
    formula: "W-W-WH-W-WH",
};

const BLUES: ScaleDefinition = ScaleDefinition {
    name: "Blues",
    intervals: &[0, 3, 5, 6, 7, 10],
    description: "The blues scale with its characteristic blue notes.",
    formula: "Minor pentatonic + b5",
};

const DORIAN: ScaleDefinition = ScaleDefinition {
    name: "Dorian",
    intervals: &[0, 2, 3, 5, 7, 9, 10],
    description: "A mode with a jazzy, sophisticated sound.",
    formula: "W-H-W-W-W-H-W",
};

/// Resolves a scale pattern onto a root note.
///
/// Major scales on a key with a conventional spelling are returned verbatim
/// from the override table ("F" gives "Bb", not "A#"). Everything else is
/// computed chromatically and spelled with sharps.
///
/// # Arguments
/// * `root` - Root note name; canonical names, or a flat key-signature name
///   for major scales (e.g. "Bb")
/// * `scale` - Scale pattern
///
/// # Returns
/// * `Ok(notes)` - 5 to 7 note names, ascending from the root
/// * `Err(Error::UnknownNote)` - The root is neither overridden nor canonical
pub fn resolve_scale(root: &str, scale: ScaleType) -> Result<Vec<String>> {
    if scale == ScaleType::Major {
        if let Some(spelled) = enharmonic::major_scale_spelling(root) {
            debug!(root, "using conventional major scale spelling");
            return Ok(spelled.iter().map(|s| s.to_string()).collect());
        }
    }

    let root_pc: PitchClass = root.parse()?;
    Ok(pitch::chromatic_names(root_pc, scale.intervals()))
}

/// String-keyed variant of [`resolve_scale`] for callers holding raw keys.
///
/// Fails with `UnknownScaleType` before the root is looked at.
pub fn resolve_scale_by_key(root: &str, scale_key: &str) -> Result<Vec<String>> {
    let scale: ScaleType = scale_key.parse()?;
    resolve_scale(root, scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn c_major() {
        assert_eq!(
            resolve_scale("C", ScaleType::Major).unwrap(),
            ["C", "D", "E", "F", "G", "A", "B"]
        );
    }

    #[test]
    fn f_major_spells_b_flat() {
        assert_eq!(
            resolve_scale("F", ScaleType::Major).unwrap(),
            ["F", "G", "A", "Bb", "C", "D", "E"]
        );
    }

    #[test]
    fn flat_key_names_only_resolve_through_the_override() {
        assert_eq!(
            resolve_scale("Eb", ScaleType::Major).unwrap(),
            ["Eb", "F", "G", "Ab", "Bb", "C", "D"]
        );
        assert!(matches!(
            resolve_scale("Eb", ScaleType::Minor),
            Err(Error::UnknownNote(_))
        ));
    }

    #[test]
    fn non_major_scales_keep_sharp_spelling() {
        assert_eq!(
            resolve_scale("F", ScaleType::Minor).unwrap(),
            ["F", "G", "G#", "A#", "C", "C#", "D#"]
        );
        assert_eq!(
            resolve_scale("A", ScaleType::Pentatonic).unwrap(),
            ["A", "B", "C#", "E", "F#"]
        );
        assert_eq!(
            resolve_scale("C", ScaleType::Blues).unwrap(),
            ["C", "D#", "F", "F#", "G", "A#"]
        );
        assert_eq!(
            resolve_scale("D", ScaleType::Dorian).unwrap(),
            ["D", "E", "F", "G", "A", "B", "C"]
        );
    }

    #[test]
    fn sharp_roots_without_override_fall_back_to_chromatic() {
        assert_eq!(
            resolve_scale("F#", ScaleType::Major).unwrap(),
            ["F#", "G#", "A#", "B", "C#", "D#", "F"]
        );
    }

    #[test]
    fn keys_round_trip() {
        for scale in ScaleType::ALL {
            assert_eq!(scale.key().parse::<ScaleType>().unwrap(), scale);
        }
        assert!(matches!(
            "nonexistent".parse::<ScaleType>(),
            Err(Error::UnknownScaleType(_))
        ));
    }

    #[test]
    fn lengths_follow_pattern() {
        assert_eq!(ScaleType::Pentatonic.intervals().len(), 5);
        assert_eq!(ScaleType::Blues.intervals().len(), 6);
        assert_eq!(ScaleType::Dorian.intervals().len(), 7);
    }
}
