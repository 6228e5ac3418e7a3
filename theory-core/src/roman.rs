//! # Roman Numeral Module
//!
//! Roman-numeral chord symbols relative to a major key, as used by cadences
//! and progression ear training.
//!
//! The numeral's case gives the triad quality: upper-case is major,
//! lower-case is minor, and a trailing `°` makes it diminished
//! regardless of case.

use crate::chords::{self, ChordType};
use crate::error::{Error, Result};
use crate::pitch::PitchClass;
use crate::scales::ScaleType;
use std::fmt;
use std::str::FromStr;

const NUMERALS: [&str; 7] = ["I", "II", "III", "IV", "V", "VI", "VII"];

/// Scale degree of a major key, tonic first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScaleDegree {
    I,
    II,
    III,
    IV,
    V,
    VI,
    VII,
}

impl ScaleDegree {
    pub const ALL: [ScaleDegree; 7] = [
        ScaleDegree::I,
        ScaleDegree::II,
        ScaleDegree::III,
        ScaleDegree::IV,
        ScaleDegree::V,
        ScaleDegree::VI,
        ScaleDegree::VII,
    ];

    /// Zero-based degree index (I = 0, VII = 6).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Semitones from the tonic in the major scale.
    pub fn offset(self) -> u8 {
        ScaleType::Major.intervals()[self.index()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriadQuality {
    Major,
    Minor,
    Diminished,
}

impl TriadQuality {
    pub fn chord_type(self) -> ChordType {
        match self {
            TriadQuality::Major => ChordType::Major,
            TriadQuality::Minor => ChordType::Minor,
            TriadQuality::Diminished => ChordType::Diminished,
        }
    }
}

/// A triad built on a degree of a major key, e.g. `V`, `vi` or `vii°`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RomanNumeral {
    pub degree: ScaleDegree,
    pub quality: TriadQuality,
}

impl RomanNumeral {
    pub const fn new(degree: ScaleDegree, quality: TriadQuality) -> Self {
        Self { degree, quality }
    }

    /// Root of this chord in `key`, taken from the chromatic major scale.
    pub fn root_in(self, key: PitchClass) -> PitchClass {
        key.transpose(self.degree.offset() as i32)
    }
}

impl fmt::Display for RomanNumeral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let numeral = NUMERALS[self.degree.index()];
        match self.quality {
            TriadQuality::Major => f.write_str(numeral),
            TriadQuality::Minor => f.write_str(&numeral.to_lowercase()),
            TriadQuality::Diminished => write!(f, "{}°", numeral.to_lowercase()),
        }
    }
}

impl FromStr for RomanNumeral {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let unknown = || Error::UnknownRomanNumeral(s.to_string());

        let (body, diminished) = match s.strip_suffix('°') {
            Some(body) => (body, true),
            None => (s, false),
        };

        let upper = body.to_uppercase();
        let position = NUMERALS.iter().position(|&n| n == upper).ok_or_else(unknown)?;

        let quality = if diminished {
            TriadQuality::Diminished
        } else if body == upper {
            TriadQuality::Major
        } else if body == body.to_lowercase() {
            TriadQuality::Minor
        } else {
            return Err(unknown());
        };

        Ok(Self::new(ScaleDegree::ALL[position], quality))
    }
}

/// Resolves a roman-numeral chord in a major key to its note names.
///
/// The degree root comes from the major pattern on `key`; the triad is then
/// resolved with [`chords::resolve_chord`], so it is spelled with sharps.
///
/// # Arguments
/// * `key` - Canonical name of the major key's tonic
/// * `numeral` - Degree and quality
///
/// # Returns
/// * `Ok(notes)` - Three note names, root first
/// * `Err(Error::UnknownNote)` - `key` is not a canonical name
pub fn degree_to_roman_chord(key: &str, numeral: RomanNumeral) -> Result<Vec<String>> {
    let tonic: PitchClass = key.parse()?;
    let root = numeral.root_in(tonic);
    chords::resolve_chord(root.name(), numeral.quality.chord_type())
}

/// String-keyed variant of [`degree_to_roman_chord`].
pub fn degree_to_roman_chord_str(key: &str, numeral: &str) -> Result<Vec<String>> {
    degree_to_roman_chord(key, numeral.parse()?)
}

/// Parses a dash-separated progression such as `ii-V-I`.
pub fn parse_progression(progression: &str) -> Result<Vec<RomanNumeral>> {
    progression.split('-').map(str::parse::<RomanNumeral>).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_and_diminished_marker() {
        assert_eq!(
            "V".parse::<RomanNumeral>().unwrap(),
            RomanNumeral::new(ScaleDegree::V, TriadQuality::Major)
        );
        assert_eq!(
            "vi".parse::<RomanNumeral>().unwrap(),
            RomanNumeral::new(ScaleDegree::VI, TriadQuality::Minor)
        );
        assert_eq!(
            "vii°".parse::<RomanNumeral>().unwrap(),
            RomanNumeral::new(ScaleDegree::VII, TriadQuality::Diminished)
        );
    }

    #[test]
    fn rejects_unknown_tokens() {
        for token in ["", "VIII", "Iv", "X", "°", "v7"] {
            assert!(
                matches!(token.parse::<RomanNumeral>(), Err(Error::UnknownRomanNumeral(_))),
                "{token:?}"
            );
        }
    }

    #[test]
    fn display_round_trips() {
        for token in ["I", "ii", "iii", "IV", "V", "vi", "vii°"] {
            assert_eq!(token.parse::<RomanNumeral>().unwrap().to_string(), token);
        }
    }

    #[test]
    fn chords_in_c() {
        assert_eq!(degree_to_roman_chord_str("C", "I").unwrap(), ["C", "E", "G"]);
        assert_eq!(degree_to_roman_chord_str("C", "ii").unwrap(), ["D", "F", "A"]);
        assert_eq!(degree_to_roman_chord_str("C", "IV").unwrap(), ["F", "A", "C"]);
        assert_eq!(degree_to_roman_chord_str("C", "V").unwrap(), ["G", "B", "D"]);
        assert_eq!(degree_to_roman_chord_str("C", "vii°").unwrap(), ["B", "D", "F"]);
    }

    #[test]
    fn chords_in_other_keys() {
        assert_eq!(degree_to_roman_chord_str("G", "V").unwrap(), ["D", "F#", "A"]);
        assert_eq!(degree_to_roman_chord_str("A#", "IV").unwrap(), ["D#", "G", "A#"]);
        assert!(matches!(
            degree_to_roman_chord_str("Bb", "IV"),
            Err(Error::UnknownNote(_))
        ));
    }

    #[test]
    fn progressions() {
        let numerals = parse_progression("I-V-vi-IV").unwrap();
        assert_eq!(numerals.len(), 4);
        assert_eq!(numerals[2].quality, TriadQuality::Minor);
        assert!(parse_progression("I--V").is_err());
    }
}
