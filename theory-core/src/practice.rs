//! # Practice Module
//!
//! Self-check drills: the learner is given a root and a scale or chord type,
//! works out the notes, then reveals the answer. Revealing counts as having
//! practiced that scale or chord.
//!
//! ## Features
//! - Random challenges from the catalogs with a caller-supplied RNG
//! - Challenge titles in lesson form ("D Dorian", "F#m7")
//! - Recording into the progress store under `"{root}-{type}"`

use crate::chords::{self, ChordType};
use crate::error::Result;
use crate::pitch::PitchClass;
use crate::progress::{progress_key, ProgressStore};
use crate::scales::{self, ScaleType};
use chrono::NaiveDate;
use rand::Rng;
use std::fmt;
use tracing::debug;

/// What the learner is asked to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PracticeKind {
    Scale,
    Chord,
}

impl PracticeKind {
    pub const ALL: [PracticeKind; 2] = [PracticeKind::Scale, PracticeKind::Chord];

    pub fn label(self) -> &'static str {
        match self {
            PracticeKind::Scale => "Scale",
            PracticeKind::Chord => "Chord",
        }
    }
}

impl fmt::Display for PracticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The pattern a challenge asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengePattern {
    Scale(ScaleType),
    Chord(ChordType),
}

/// A root plus a scale or chord type to spell from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Challenge {
    pub root: PitchClass,
    pub pattern: ChallengePattern,
}

impl Challenge {
    pub fn kind(&self) -> PracticeKind {
        match self.pattern {
            ChallengePattern::Scale(_) => PracticeKind::Scale,
            ChallengePattern::Chord(_) => PracticeKind::Chord,
        }
    }

    /// `"{root} {scale name}"` for scales, the chord symbol for chords.
    pub fn title(&self) -> String {
        match self.pattern {
            ChallengePattern::Scale(scale) => format!("{} {}", self.root, scale.definition().name),
            ChallengePattern::Chord(chord) => chord.symbol_on(self.root),
        }
    }

    /// The answer: scales spelled for their key, chords in sharp spelling.
    pub fn notes(&self) -> Result<Vec<String>> {
        let root = self.root.name();
        match self.pattern {
            ChallengePattern::Scale(scale) => scales::resolve_scale(root, scale),
            ChallengePattern::Chord(chord) => chords::resolve_chord(root, chord),
        }
    }

    /// Key under which the challenge is stored in the progress store.
    pub fn progress_id(&self) -> String {
        let pattern = match self.pattern {
            ChallengePattern::Scale(scale) => scale.key(),
            ChallengePattern::Chord(chord) => chord.key(),
        };
        progress_key(self.root.name(), pattern)
    }

    /// Counts the challenge as practiced on `today`.
    pub fn record(&self, store: &mut ProgressStore, today: NaiveDate) {
        let id = self.progress_id();
        match self.pattern {
            ChallengePattern::Scale(_) => store.complete_scale(&id, today),
            ChallengePattern::Chord(_) => store.complete_chord(&id, today),
        }
    }
}

/// Picks a random root and a random scale or chord type of `kind`.
///
/// # Arguments
/// * `kind` - Whether to ask for a scale or a chord
/// * `rng` - Source of randomness; seed it for repeatable drills
pub fn generate_challenge<R: Rng>(kind: PracticeKind, rng: &mut R) -> Challenge {
    let root = PitchClass::ALL[rng.gen_range(0..PitchClass::ALL.len())];
    let pattern = match kind {
        PracticeKind::Scale => {
            ChallengePattern::Scale(ScaleType::ALL[rng.gen_range(0..ScaleType::ALL.len())])
        }
        PracticeKind::Chord => {
            ChallengePattern::Chord(ChordType::ALL[rng.gen_range(0..ChordType::ALL.len())])
        }
    };
    let challenge = Challenge { root, pattern };
    debug!(title = %challenge.title(), "generated practice challenge");
    challenge
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn challenges_match_the_requested_kind() {
        let mut rng = StdRng::seed_from_u64(11);
        for kind in PracticeKind::ALL {
            for _ in 0..50 {
                let challenge = generate_challenge(kind, &mut rng);
                assert_eq!(challenge.kind(), kind);
                assert!(!challenge.notes().unwrap().is_empty());
            }
        }
    }

    #[test]
    fn same_seed_same_challenges() {
        let a: Vec<_> = {
            let mut rng = StdRng::seed_from_u64(5);
            (0..20).map(|_| generate_challenge(PracticeKind::Chord, &mut rng)).collect()
        };
        let b: Vec<_> = {
            let mut rng = StdRng::seed_from_u64(5);
            (0..20).map(|_| generate_challenge(PracticeKind::Chord, &mut rng)).collect()
        };
        assert_eq!(a, b);
    }

    #[test]
    fn every_root_and_type_comes_up() {
        let mut rng = StdRng::seed_from_u64(3);
        let drawn: Vec<_> = (0..500)
            .map(|_| generate_challenge(PracticeKind::Scale, &mut rng))
            .collect();
        for root in PitchClass::ALL {
            assert!(drawn.iter().any(|c| c.root == root), "{root} never drawn");
        }
        for scale in ScaleType::ALL {
            assert!(drawn.iter().any(|c| c.pattern == ChallengePattern::Scale(scale)));
        }
    }

    #[test]
    fn titles_follow_lesson_naming() {
        let scale = Challenge {
            root: PitchClass::D,
            pattern: ChallengePattern::Scale(ScaleType::Dorian),
        };
        assert_eq!(scale.title(), "D Dorian");

        let chord = Challenge {
            root: PitchClass::FSharp,
            pattern: ChallengePattern::Chord(ChordType::Minor7),
        };
        assert_eq!(chord.title(), "F#m7");
    }

    #[test]
    fn chord_answers_keep_sharp_spelling() {
        let chord = Challenge {
            root: PitchClass::ASharp,
            pattern: ChallengePattern::Chord(ChordType::Major),
        };
        assert_eq!(chord.notes().unwrap(), ["A#", "D", "F"]);
    }

    #[test]
    fn recording_uses_root_and_type_key() {
        let mut store = ProgressStore::default();
        let scale = Challenge {
            root: PitchClass::G,
            pattern: ChallengePattern::Scale(ScaleType::Blues),
        };
        let chord = Challenge {
            root: PitchClass::C,
            pattern: ChallengePattern::Chord(ChordType::Dominant7),
        };

        scale.record(&mut store, day());
        scale.record(&mut store, day());
        chord.record(&mut store, day());

        assert_eq!(store.scales["G-blues"].times_completed, 2);
        assert_eq!(store.chords["C-dominant7"].times_completed, 1);
        assert_eq!(store.total_practice_time, 1);
    }
}
