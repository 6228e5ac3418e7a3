//! Named intervals, from the minor second up to the octave.

use crate::error::{Error, Result};
use crate::pitch::PitchClass;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IntervalKind {
    Minor2nd,
    Major2nd,
    Minor3rd,
    Major3rd,
    Perfect4th,
    Tritone,
    Perfect5th,
    Minor6th,
    Major6th,
    Minor7th,
    Major7th,
    Octave,
}

impl IntervalKind {
    /// Ordered by size, so `ALL[n - 1]` spans `n` semitones.
    pub const ALL: [IntervalKind; 12] = [
        IntervalKind::Minor2nd,
        IntervalKind::Major2nd,
        IntervalKind::Minor3rd,
        IntervalKind::Major3rd,
        IntervalKind::Perfect4th,
        IntervalKind::Tritone,
        IntervalKind::Perfect5th,
        IntervalKind::Minor6th,
        IntervalKind::Major6th,
        IntervalKind::Minor7th,
        IntervalKind::Major7th,
        IntervalKind::Octave,
    ];

    pub fn key(self) -> &'static str {
        match self {
            IntervalKind::Minor2nd => "minor2nd",
            IntervalKind::Major2nd => "major2nd",
            IntervalKind::Minor3rd => "minor3rd",
            IntervalKind::Major3rd => "major3rd",
            IntervalKind::Perfect4th => "perfect4th",
            IntervalKind::Tritone => "tritone",
            IntervalKind::Perfect5th => "perfect5th",
            IntervalKind::Minor6th => "minor6th",
            IntervalKind::Major6th => "major6th",
            IntervalKind::Minor7th => "minor7th",
            IntervalKind::Major7th => "major7th",
            IntervalKind::Octave => "octave",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            IntervalKind::Minor2nd => "Minor 2nd",
            IntervalKind::Major2nd => "Major 2nd",
            IntervalKind::Minor3rd => "Minor 3rd",
            IntervalKind::Major3rd => "Major 3rd",
            IntervalKind::Perfect4th => "Perfect 4th",
            IntervalKind::Tritone => "Tritone",
            IntervalKind::Perfect5th => "Perfect 5th",
            IntervalKind::Minor6th => "Minor 6th",
            IntervalKind::Major6th => "Major 6th",
            IntervalKind::Minor7th => "Minor 7th",
            IntervalKind::Major7th => "Major 7th",
            IntervalKind::Octave => "Octave",
        }
    }

    pub fn semitones(self) -> u8 {
        self as u8 + 1
    }

    /// Pitch class this interval above `root`. An octave lands on the root.
    pub fn above(self, root: PitchClass) -> PitchClass {
        root.transpose(self.semitones() as i32)
    }
}

impl fmt::Display for IntervalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for IntervalKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|interval| interval.key() == s)
            .ok_or_else(|| Error::UnknownIntervalType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn semitone_sizes() {
        assert_eq!(IntervalKind::Minor2nd.semitones(), 1);
        assert_eq!(IntervalKind::Tritone.semitones(), 6);
        assert_eq!(IntervalKind::Perfect5th.semitones(), 7);
        assert_eq!(IntervalKind::Octave.semitones(), 12);
    }

    #[test]
    fn above_root() {
        assert_eq!(IntervalKind::Perfect5th.above(PitchClass::C), PitchClass::G);
        assert_eq!(IntervalKind::Major3rd.above(PitchClass::A), PitchClass::CSharp);
        assert_eq!(IntervalKind::Octave.above(PitchClass::E), PitchClass::E);
    }

    #[test]
    fn parse_keys() {
        assert_eq!("perfect4th".parse::<IntervalKind>().unwrap(), IntervalKind::Perfect4th);
        assert!(matches!(
            "minor9th".parse::<IntervalKind>(),
            Err(Error::UnknownIntervalType(_))
        ));
    }
}
