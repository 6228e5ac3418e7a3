//! # Ear Training Module
//!
//! Multiple-choice listening quizzes: the learner hears an interval, chord,
//! scale or progression and picks its name from four options.
//!
//! ## Features
//! - Question generation from the catalogs with a caller-supplied RNG
//! - Audible prompts as playback plans, rooted on a random pitch class
//! - Quiz sessions with first-answer-counts scoring and feedback text

use crate::chords::{self, ChordType};
use crate::error::{Error, Result};
use crate::intervals::IntervalKind;
use crate::pitch::PitchClass;
use crate::playback::{self, PlaybackConfig, PlaybackPlan};
use crate::roman;
use crate::scales::{self, ScaleType};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Questions per quiz unless the caller asks otherwise.
pub const DEFAULT_QUESTION_COUNT: usize = 10;

/// Options shown per question, the correct one included.
const OPTION_COUNT: usize = 4;

/// Progressions used by progression recognition.
pub const PROGRESSIONS: [&str; 4] = ["I-V-vi-IV", "ii-V-I", "I-vi-IV-V", "vi-IV-I-V"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizKind {
    Intervals,
    Chords,
    Scales,
    Progressions,
}

impl QuizKind {
    pub const ALL: [QuizKind; 4] = [
        QuizKind::Intervals,
        QuizKind::Chords,
        QuizKind::Scales,
        QuizKind::Progressions,
    ];

    pub fn key(self) -> &'static str {
        match self {
            QuizKind::Intervals => "intervals",
            QuizKind::Chords => "chords",
            QuizKind::Scales => "scales",
            QuizKind::Progressions => "progressions",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            QuizKind::Intervals => "Interval Recognition",
            QuizKind::Chords => "Chord Recognition",
            QuizKind::Scales => "Scale Recognition",
            QuizKind::Progressions => "Progression Recognition",
        }
    }

    pub fn question_text(self) -> &'static str {
        match self {
            QuizKind::Intervals => "What interval is this?",
            QuizKind::Chords => "What type of chord is this?",
            QuizKind::Scales => "What scale is this?",
            QuizKind::Progressions => "What chord progression is this?",
        }
    }

    /// Every answer this kind of question can have.
    pub fn option_pool(self) -> Vec<&'static str> {
        match self {
            QuizKind::Intervals => IntervalKind::ALL.iter().map(|i| i.key()).collect(),
            QuizKind::Chords => ChordType::ALL.iter().map(|c| c.key()).collect(),
            QuizKind::Scales => ScaleType::ALL.iter().map(|s| s.key()).collect(),
            QuizKind::Progressions => PROGRESSIONS.to_vec(),
        }
    }

    /// Human-readable label of an option key. Progressions and unknown
    /// keys are shown as-is.
    pub fn display_name(self, option: &str) -> String {
        let name = match self {
            QuizKind::Intervals => option.parse::<IntervalKind>().ok().map(IntervalKind::name),
            QuizKind::Chords => option.parse::<ChordType>().ok().map(|c| c.definition().name),
            QuizKind::Scales => option.parse::<ScaleType>().ok().map(|s| s.definition().name),
            QuizKind::Progressions => None,
        };
        name.unwrap_or(option).to_string()
    }
}

impl fmt::Display for QuizKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for QuizKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.key() == s)
            .ok_or_else(|| Error::UnknownQuizKind(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub kind: QuizKind,
    pub correct: &'static str,
    /// Shuffled; always contains `correct` exactly once.
    pub options: Vec<&'static str>,
    pub correct_index: usize,
    /// Root (or key, for progressions) the prompt is played on.
    pub root: PitchClass,
}

impl Question {
    pub fn is_correct(&self, answer: &str) -> bool {
        answer == self.correct
    }

    /// What the learner hears for this question.
    pub fn prompt(&self, config: &PlaybackConfig) -> Result<PlaybackPlan> {
        let root = self.root.name();
        match self.kind {
            QuizKind::Intervals => {
                let interval: IntervalKind = self.correct.parse()?;
                Ok(playback::plan_interval(self.root, interval, config))
            }
            QuizKind::Chords => {
                let notes = chords::resolve_chord(root, self.correct.parse()?)?;
                playback::plan_chord(&notes, config)
            }
            QuizKind::Scales => {
                let notes = scales::resolve_scale(root, self.correct.parse()?)?;
                playback::plan_scale(&notes, config)
            }
            QuizKind::Progressions => {
                let chords = progression_in_key(self.correct, self.root)?;
                playback::plan_progression(&chords, config)
            }
        }
    }
}

/// Builds one question: a random correct answer, three distinct wrong
/// answers, all four shuffled, on a random root.
pub fn generate_question<R: Rng>(kind: QuizKind, rng: &mut R) -> Question {
    let pool = kind.option_pool();
    let correct = pool[rng.gen_range(0..pool.len())];

    let mut wrong: Vec<&'static str> = pool.into_iter().filter(|&o| o != correct).collect();
    wrong.shuffle(rng);
    wrong.truncate(OPTION_COUNT - 1);

    let mut options = Vec::with_capacity(OPTION_COUNT);
    options.push(correct);
    options.extend(wrong);
    options.shuffle(rng);

    let correct_index = options.iter().position(|&o| o == correct).unwrap_or(0);
    let root = PitchClass::ALL[rng.gen_range(0..PitchClass::ALL.len())];

    Question {
        kind,
        correct,
        options,
        correct_index,
        root,
    }
}

pub fn generate_questions<R: Rng>(kind: QuizKind, count: usize, rng: &mut R) -> Vec<Question> {
    debug!(kind = kind.key(), count, "generating ear training questions");
    (0..count).map(|_| generate_question(kind, rng)).collect()
}

/// A quiz in progress.
#[derive(Debug, Clone)]
pub struct QuizSession {
    kind: QuizKind,
    questions: Vec<Question>,
    current: usize,
    score: u32,
    selected: Option<&'static str>,
}

impl QuizSession {
    pub fn new(kind: QuizKind, questions: Vec<Question>) -> Self {
        Self {
            kind,
            questions,
            current: 0,
            score: 0,
            selected: None,
        }
    }

    /// A fresh quiz of `DEFAULT_QUESTION_COUNT` questions.
    pub fn start<R: Rng>(kind: QuizKind, rng: &mut R) -> Self {
        Self::new(kind, generate_questions(kind, DEFAULT_QUESTION_COUNT, rng))
    }

    pub fn kind(&self) -> QuizKind {
        self.kind
    }

    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    /// Zero-based index of the question being asked.
    pub fn position(&self) -> usize {
        self.current
    }

    /// The option picked for the current question, if any.
    pub fn selected(&self) -> Option<&'static str> {
        self.selected
    }

    /// Records an answer to the current question and reports whether it was
    /// right. Only the first answer per question is scored; later calls
    /// return the verdict on the first one.
    pub fn answer(&mut self, option: &str) -> bool {
        let Some(question) = self.questions.get(self.current) else {
            return false;
        };
        if let Some(first) = self.selected {
            return question.is_correct(first);
        }
        let Some(&picked) = question.options.iter().find(|&&o| o == option) else {
            return false;
        };

        self.selected = Some(picked);
        let correct = question.is_correct(picked);
        if correct {
            self.score += 1;
        }
        correct
    }

    /// Moves on to the next question.
    pub fn next(&mut self) {
        if self.current < self.questions.len() {
            self.current += 1;
            self.selected = None;
        }
    }

    pub fn is_complete(&self) -> bool {
        self.current >= self.questions.len()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn total(&self) -> u32 {
        self.questions.len() as u32
    }

    /// Rounded percentage of correct answers.
    pub fn percentage(&self) -> u32 {
        if self.questions.is_empty() {
            return 0;
        }
        (self.score as f64 / self.questions.len() as f64 * 100.0).round() as u32
    }

    pub fn feedback(&self) -> &'static str {
        let percentage = self.percentage();
        if percentage >= 80 {
            "Excellent work!"
        } else if percentage >= 60 {
            "Good job! Keep practicing."
        } else {
            "Keep practicing, you'll improve!"
        }
    }
}

/// Chords of a named progression in a key, for display next to a question.
pub fn progression_in_key(progression: &str, key: PitchClass) -> Result<Vec<Vec<String>>> {
    roman::parse_progression(progression)?
        .into_iter()
        .map(|numeral| roman::degree_to_roman_chord(key.name(), numeral))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn questions_have_four_distinct_options() {
        let mut rng = StdRng::seed_from_u64(7);
        for kind in QuizKind::ALL {
            for question in generate_questions(kind, 50, &mut rng) {
                assert_eq!(question.options.len(), 4);
                assert_eq!(question.options[question.correct_index], question.correct);
                let mut unique = question.options.clone();
                unique.sort();
                unique.dedup();
                assert_eq!(unique.len(), 4, "{kind}: {:?}", question.options);
            }
        }
    }

    #[test]
    fn same_seed_same_quiz() {
        let a = generate_questions(QuizKind::Chords, 10, &mut StdRng::seed_from_u64(42));
        let b = generate_questions(QuizKind::Chords, 10, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn every_prompt_is_playable() {
        let mut rng = StdRng::seed_from_u64(3);
        let config = PlaybackConfig::default();
        for kind in QuizKind::ALL {
            for question in generate_questions(kind, 30, &mut rng) {
                let plan = question.prompt(&config).unwrap();
                assert!(!plan.is_empty());
            }
        }
    }

    fn fixed_question(correct: &'static str) -> Question {
        Question {
            kind: QuizKind::Chords,
            correct,
            options: vec!["major", "minor", "augmented", "diminished"],
            correct_index: 0,
            root: PitchClass::C,
        }
    }

    #[test]
    fn only_first_answer_counts() {
        let mut session = QuizSession::new(QuizKind::Chords, vec![fixed_question("major")]);
        assert!(!session.answer("minor"));
        assert!(!session.answer("major"));
        assert_eq!(session.score(), 0);
        assert_eq!(session.selected(), Some("minor"));
    }

    #[test]
    fn session_scoring_and_feedback() {
        let questions = (0..10).map(|_| fixed_question("major")).collect();
        let mut session = QuizSession::new(QuizKind::Chords, questions);
        for i in 0..10 {
            assert!(!session.is_complete());
            session.answer(if i < 7 { "major" } else { "minor" });
            session.next();
        }
        assert!(session.is_complete());
        assert!(session.current().is_none());
        assert_eq!(session.score(), 7);
        assert_eq!(session.percentage(), 70);
        assert_eq!(session.feedback(), "Good job! Keep practicing.");
    }

    #[test]
    fn answers_outside_the_options_are_ignored() {
        let mut session = QuizSession::new(QuizKind::Chords, vec![fixed_question("major")]);
        assert!(!session.answer("dominant7"));
        assert_eq!(session.selected(), None);
        assert!(session.answer("major"));
    }

    #[test]
    fn display_names() {
        assert_eq!(QuizKind::Intervals.display_name("tritone"), "Tritone");
        assert_eq!(QuizKind::Chords.display_name("minor7"), "Minor 7th");
        assert_eq!(QuizKind::Progressions.display_name("ii-V-I"), "ii-V-I");
    }

    #[test]
    fn progression_chords_in_g() {
        let chords = progression_in_key("ii-V-I", PitchClass::G).unwrap();
        assert_eq!(chords[0], ["A", "C", "E"]);
        assert_eq!(chords[1], ["D", "F#", "A"]);
        assert_eq!(chords[2], ["G", "B", "D"]);
    }

    #[test]
    fn quiz_kind_keys() {
        assert_eq!("scales".parse::<QuizKind>().unwrap(), QuizKind::Scales);
        assert!(matches!("rhythm".parse::<QuizKind>(), Err(Error::UnknownQuizKind(_))));
    }
}
