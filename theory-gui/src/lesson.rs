//! # Lesson Module
//!
//! Builds what the lesson panel shows for the current selection: the notes
//! of a scale, chord or cadence on the chosen root, the text around them,
//! and the matching playback plan. Practice lessons keep their notes hidden
//! until the learner reveals them. Kept free of widgets so it can be tested
//! without a window.

use theory_core::cadences::{self, CadenceType};
use theory_core::chords::{self, ChordType};
use theory_core::playback::{self, PlaybackConfig, PlaybackPlan};
use theory_core::practice::{Challenge, ChallengePattern, PracticeKind};
use theory_core::progress::progress_key;
use theory_core::scales::{self, ScaleType};
use theory_core::{PitchClass, Result};

/// Which kind of material the lesson panel is teaching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonMode {
    Scale,
    Chord,
    Cadence,
    Practice,
}

impl LessonMode {
    pub const ALL: [LessonMode; 4] = [
        LessonMode::Scale,
        LessonMode::Chord,
        LessonMode::Cadence,
        LessonMode::Practice,
    ];

    pub fn label(self) -> &'static str {
        match self {
            LessonMode::Scale => "Scales",
            LessonMode::Chord => "Chords",
            LessonMode::Cadence => "Cadences",
            LessonMode::Practice => "Practice",
        }
    }
}

/// Current selector values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub mode: LessonMode,
    pub root: PitchClass,
    pub scale: ScaleType,
    pub chord: ChordType,
    pub cadence: CadenceType,
    /// Whether practice mode asks for a scale or a chord.
    pub practice: PracticeKind,
}

impl Selection {
    pub fn new(root: PitchClass) -> Self {
        Self {
            mode: LessonMode::Scale,
            root,
            scale: ScaleType::Major,
            chord: ChordType::Major,
            cadence: CadenceType::Perfect,
            practice: PracticeKind::Scale,
        }
    }

    /// The practice challenge the selectors currently describe.
    pub fn challenge(&self) -> Challenge {
        let pattern = match self.practice {
            PracticeKind::Scale => ChallengePattern::Scale(self.scale),
            PracticeKind::Chord => ChallengePattern::Chord(self.chord),
        };
        Challenge {
            root: self.root,
            pattern,
        }
    }

    /// Points the selectors at `challenge`, switching the practice kind to
    /// match it.
    pub fn apply_challenge(&mut self, challenge: Challenge) {
        self.root = challenge.root;
        self.practice = challenge.kind();
        match challenge.pattern {
            ChallengePattern::Scale(scale) => self.scale = scale,
            ChallengePattern::Chord(chord) => self.chord = chord,
        }
    }
}

/// Where a practiced lesson is recorded in the progress store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PracticeTarget {
    Scale(String),
    Chord(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Lesson {
    pub title: String,
    pub description: String,
    /// Extra lines: formula, symbol, analysis or repertoire.
    pub details: Vec<String>,
    /// Notes to highlight, in order, as the lesson spells them.
    pub notes: Vec<String>,
    /// Chords of a cadence, one entry per chord. Empty otherwise.
    pub chords: Vec<Vec<String>>,
    pub practice: Option<PracticeTarget>,
    /// Notes are withheld from the panel and keyboard until revealed.
    pub hidden: bool,
}

impl Lesson {
    /// Distinct pitch classes of the lesson with their spelling, for the
    /// keyboard.
    pub fn highlighted(&self) -> Vec<(PitchClass, String)> {
        let mut highlighted: Vec<(PitchClass, String)> = Vec::new();
        if self.hidden {
            return highlighted;
        }
        for note in &self.notes {
            if let Ok(pc) = PitchClass::from_spelling(note) {
                if !highlighted.iter().any(|(p, _)| *p == pc) {
                    highlighted.push((pc, note.clone()));
                }
            }
        }
        highlighted
    }

    /// Shows a hidden answer. Returns false if it was already showing.
    pub fn reveal(&mut self) -> bool {
        std::mem::replace(&mut self.hidden, false)
    }

    pub fn plan(&self, config: &PlaybackConfig) -> Result<PlaybackPlan> {
        if !self.chords.is_empty() {
            playback::plan_progression(&self.chords, config)
        } else if matches!(self.practice, Some(PracticeTarget::Chord(_))) {
            playback::plan_chord(&self.notes, config)
        } else {
            playback::plan_scale(&self.notes, config)
        }
    }
}

pub fn build_lesson(selection: &Selection) -> Result<Lesson> {
    let root = selection.root.name();
    match selection.mode {
        LessonMode::Scale => {
            let definition = selection.scale.definition();
            Ok(Lesson {
                title: format!("{root} {}", definition.name),
                description: definition.description.to_string(),
                details: vec![format!("Formula: {}", definition.formula)],
                notes: scales::resolve_scale(root, selection.scale)?,
                chords: Vec::new(),
                practice: Some(PracticeTarget::Scale(progress_key(
                    root,
                    selection.scale.key(),
                ))),
                hidden: false,
            })
        }
        LessonMode::Chord => {
            let definition = selection.chord.definition();
            Ok(Lesson {
                title: format!("{root} {}", definition.name),
                description: definition.description.to_string(),
                details: vec![format!("Symbol: {}", selection.chord.symbol_on(selection.root))],
                notes: chords::resolve_chord(root, selection.chord)?,
                chords: Vec::new(),
                practice: Some(PracticeTarget::Chord(progress_key(
                    root,
                    selection.chord.key(),
                ))),
                hidden: false,
            })
        }
        LessonMode::Cadence => {
            let definition = selection.cadence.definition();
            let chords = cadences::progression_chords(root, selection.cadence)?;
            let notes = cadences::cadence_notes(root, selection.cadence)?;

            let analysis = &definition.analysis;
            let mut details = vec![
                format!("Progression: {}", selection.cadence.progression_label()),
                format!("Example: {}", definition.example),
                format!("Function: {}", analysis.function),
                format!("Strength: {}", analysis.strength),
                format!("Feeling: {}", analysis.feeling),
                format!("Usage: {}", analysis.usage),
            ];
            details.extend(
                definition
                    .repertoire
                    .iter()
                    .map(|(piece, listen_for)| format!("Listen: {piece} ({listen_for})")),
            );

            Ok(Lesson {
                title: format!("{} in {root} major", definition.name),
                description: definition.description.to_string(),
                details,
                notes,
                chords,
                practice: None,
                hidden: false,
            })
        }
        LessonMode::Practice => {
            let challenge = selection.challenge();
            let id = challenge.progress_id();
            let (what, practice) = match challenge.kind() {
                PracticeKind::Scale => ("scale", PracticeTarget::Scale(id)),
                PracticeKind::Chord => ("chord", PracticeTarget::Chord(id)),
            };
            Ok(Lesson {
                title: challenge.title(),
                description: format!(
                    "Play or write out the notes of this {what}, then show the answer to check."
                ),
                details: Vec::new(),
                notes: challenge.notes()?,
                chords: Vec::new(),
                practice: Some(practice),
                hidden: true,
            })
        }
    }
}
