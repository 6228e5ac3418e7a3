//! # Cadences Module
//!
//! The five cadences taught by the trainer, each a short roman-numeral
//! progression with display metadata and a short harmonic analysis.

use crate::error::{Error, Result};
use crate::roman::{self, RomanNumeral, ScaleDegree, TriadQuality};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const I: RomanNumeral = RomanNumeral::new(ScaleDegree::I, TriadQuality::Major);
const IV: RomanNumeral = RomanNumeral::new(ScaleDegree::IV, TriadQuality::Major);
const V: RomanNumeral = RomanNumeral::new(ScaleDegree::V, TriadQuality::Major);
const VI_MINOR: RomanNumeral = RomanNumeral::new(ScaleDegree::VI, TriadQuality::Minor);

/// How a cadence functions and feels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CadenceAnalysis {
    pub function: &'static str,
    pub strength: &'static str,
    pub feeling: &'static str,
    pub usage: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CadenceDefinition {
    pub name: &'static str,
    pub progression: &'static [RomanNumeral],
    pub description: &'static str,
    /// The cadence spelled out in C major.
    pub example: &'static str,
    pub analysis: CadenceAnalysis,
    /// (piece, what to listen for)
    pub repertoire: &'static [(&'static str, &'static str)],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CadenceType {
    Perfect,
    Plagal,
    Imperfect,
    Deceptive,
    Half,
}

impl CadenceType {
    pub const ALL: [CadenceType; 5] = [
        CadenceType::Perfect,
        CadenceType::Plagal,
        CadenceType::Imperfect,
        CadenceType::Deceptive,
        CadenceType::Half,
    ];

    pub fn key(self) -> &'static str {
        match self {
            CadenceType::Perfect => "perfect",
            CadenceType::Plagal => "plagal",
            CadenceType::Imperfect => "imperfect",
            CadenceType::Deceptive => "deceptive",
            CadenceType::Half => "half",
        }
    }

    pub fn definition(self) -> &'static CadenceDefinition {
        match self {
            CadenceType::Perfect => &PERFECT,
            CadenceType::Plagal => &PLAGAL,
            CadenceType::Imperfect => &IMPERFECT,
            CadenceType::Deceptive => &DECEPTIVE,
            CadenceType::Half => &HALF,
        }
    }

    pub fn progression(self) -> &'static [RomanNumeral] {
        self.definition().progression
    }

    /// Progression written with arrows, e.g. `V → I`.
    pub fn progression_label(self) -> String {
        self.progression()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" → ")
    }
}

impl fmt::Display for CadenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for CadenceType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|cadence| cadence.key() == s)
            .ok_or_else(|| Error::UnknownCadenceType(s.to_string()))
    }
}

const PERFECT: CadenceDefinition = CadenceDefinition {
    name: "Perfect Cadence",
    progression: &[V, I],
    description: "The strongest cadence, giving a feeling of resolution.",
    example: "G → C in C major",
    analysis: CadenceAnalysis {
        function: "Dominant to Tonic",
        strength: "Very Strong",
        feeling: "Complete resolution",
        usage: "End of phrases, sections, pieces",
    },
    repertoire: &[
        ("Bach Chorale #1", "Every phrase ends with V-I"),
        ("Beethoven Symphony 5", "Dramatic perfect cadences"),
        ("Mozart Sonata K545", "Classical perfect cadences"),
    ],
};

const PLAGAL: CadenceDefinition = CadenceDefinition {
    name: "Plagal Cadence",
    progression: &[IV, I],
    description: "The \"Amen\" cadence, gentler than the perfect cadence.",
    example: "F → C in C major",
    analysis: CadenceAnalysis {
        function: "Subdominant to Tonic",
        strength: "Moderate",
        feeling: "Soft, religious quality",
        usage: "Church music, folk songs",
    },
    repertoire: &[
        ("Amazing Grace", "IV-I \"Amen\" ending"),
        ("Hey Jude (Beatles)", "Famous plagal cadence"),
        ("Traditional Hymns", "Common in church music"),
    ],
};

const IMPERFECT: CadenceDefinition = CadenceDefinition {
    name: "Imperfect Cadence",
    progression: &[I, V],
    description: "Creates expectation and forward motion.",
    example: "C → G in C major",
    analysis: CadenceAnalysis {
        function: "Any chord to Dominant",
        strength: "Weak (no resolution)",
        feeling: "Expectation, suspension",
        usage: "Middle of phrases, questions",
    },
    repertoire: &[
        ("Bach Inventions", "Mid-phrase cadences"),
        ("Chopin Nocturnes", "Creating expectation"),
        ("Classical Sonatas", "First half of phrases"),
    ],
};

const DECEPTIVE: CadenceDefinition = CadenceDefinition {
    name: "Deceptive Cadence",
    progression: &[V, VI_MINOR],
    description: "Surprises the ear by not resolving as expected.",
    example: "G → Am in C major",
    analysis: CadenceAnalysis {
        function: "Dominant to Submediant",
        strength: "Surprising",
        feeling: "Unexpected, continues forward",
        usage: "Avoiding closure, extending phrases",
    },
    repertoire: &[
        ("Bach Chorale harmonizations", "V-vi progressions"),
        ("Mozart Piano Sonatas", "Extending phrases"),
        ("Romantic era pieces", "Avoiding resolution"),
    ],
};

const HALF: CadenceDefinition = CadenceDefinition {
    name: "Half Cadence",
    progression: &[I, V],
    description: "Ends on V, sounding like a question.",
    example: "C → G in C major",
    analysis: CadenceAnalysis {
        function: "Any chord to Dominant",
        strength: "Moderate",
        feeling: "Question-like, incomplete",
        usage: "End of first half of phrases",
    },
    repertoire: &[
        ("Bach Chorales", "Mid-phrase punctuation"),
        ("Classical period works", "Antecedent phrases"),
        ("Folk songs", "Question-answer structure"),
    ],
};

/// Resolves every chord of a cadence in the given major key.
pub fn progression_chords(key: &str, cadence: CadenceType) -> Result<Vec<Vec<String>>> {
    cadence
        .progression()
        .iter()
        .map(|&numeral| roman::degree_to_roman_chord(key, numeral))
        .collect()
}

/// All notes sounding in a cadence, first occurrence order, no repeats.
/// Used to highlight the whole cadence on the keyboard.
pub fn cadence_notes(key: &str, cadence: CadenceType) -> Result<Vec<String>> {
    let mut notes: Vec<String> = Vec::new();
    for note in progression_chords(key, cadence)?.into_iter().flatten() {
        if !notes.contains(&note) {
            notes.push(note);
        }
    }
    Ok(notes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_cadence_in_c() {
        assert_eq!(
            progression_chords("C", CadenceType::Perfect).unwrap(),
            vec![vec!["G", "B", "D"], vec!["C", "E", "G"]]
        );
    }

    #[test]
    fn deceptive_cadence_lands_on_minor_vi() {
        assert_eq!(
            progression_chords("D", CadenceType::Deceptive).unwrap(),
            vec![vec!["A", "C#", "E"], vec!["B", "D", "F#"]]
        );
    }

    #[test]
    fn cadence_notes_are_deduplicated_in_order() {
        assert_eq!(
            cadence_notes("C", CadenceType::Plagal).unwrap(),
            ["F", "A", "C", "E", "G"]
        );
    }

    #[test]
    fn labels() {
        assert_eq!(CadenceType::Perfect.progression_label(), "V → I");
        assert_eq!(CadenceType::Deceptive.progression_label(), "V → vi");
    }

    #[test]
    fn unknown_cadence_key() {
        assert!(matches!(
            "authentic".parse::<CadenceType>(),
            Err(Error::UnknownCadenceType(_))
        ));
        assert_eq!("half".parse::<CadenceType>().unwrap(), CadenceType::Half);
    }
}
