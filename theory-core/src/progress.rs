//! # Progress Store Module
//!
//! Practice history of a learner: completed scales and chords, ear
//! training scores and the daily practice streak.
//!
//! The store is a plain serializable value. The application owns it, passes
//! "today" into every mutation and decides when to load and save it; nothing
//! here reads the clock or keeps global state.

use crate::error::Result;
use crate::quiz::QuizKind;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{ErrorKind, Read, Write};
use std::path::Path;
use tracing::{debug, info};

/// File name used when the application has no configured path.
pub const DEFAULT_PROGRESS_FILE: &str = "music-theory-progress.json";

/// Key under which a practiced pattern is stored, e.g. `"C-major"`.
pub fn progress_key(root: &str, pattern: &str) -> String {
    format!("{root}-{pattern}")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressData {
    pub completed: bool,
    pub last_practiced: NaiveDate,
    pub times_completed: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarTrainingScore {
    pub score: u32,
    pub total_questions: u32,
    pub last_attempt: Option<NaiveDate>,
}

impl EarTrainingScore {
    pub fn attempted(&self) -> bool {
        self.total_questions > 0
    }

    pub fn percentage(&self) -> f64 {
        if self.total_questions == 0 {
            return 0.0;
        }
        self.score as f64 / self.total_questions as f64 * 100.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EarTrainingScores {
    pub intervals: EarTrainingScore,
    pub chords: EarTrainingScore,
    pub scales: EarTrainingScore,
    pub progressions: EarTrainingScore,
}

impl EarTrainingScores {
    pub fn get(&self, kind: QuizKind) -> &EarTrainingScore {
        match kind {
            QuizKind::Intervals => &self.intervals,
            QuizKind::Chords => &self.chords,
            QuizKind::Scales => &self.scales,
            QuizKind::Progressions => &self.progressions,
        }
    }

    fn get_mut(&mut self, kind: QuizKind) -> &mut EarTrainingScore {
        match kind {
            QuizKind::Intervals => &mut self.intervals,
            QuizKind::Chords => &mut self.chords,
            QuizKind::Scales => &mut self.scales,
            QuizKind::Progressions => &mut self.progressions,
        }
    }
}

/// Everything the trainer remembers between sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProgressStore {
    pub scales: BTreeMap<String, ProgressData>,
    pub chords: BTreeMap<String, ProgressData>,
    pub ear_training: EarTrainingScores,
    pub streak_days: u32,
    pub last_practice_date: Option<NaiveDate>,
    /// Number of distinct days practiced.
    pub total_practice_time: u32,
}

impl ProgressStore {
    pub fn complete_scale(&mut self, scale_id: &str, today: NaiveDate) {
        mark_completed(&mut self.scales, scale_id, today);
        debug!(scale_id, "scale completed");
        self.record_practice_session(today);
    }

    pub fn complete_chord(&mut self, chord_id: &str, today: NaiveDate) {
        mark_completed(&mut self.chords, chord_id, today);
        debug!(chord_id, "chord completed");
        self.record_practice_session(today);
    }

    /// Replaces the stored result of an ear training category.
    pub fn update_ear_training_score(
        &mut self,
        kind: QuizKind,
        score: u32,
        total: u32,
        today: NaiveDate,
    ) {
        *self.ear_training.get_mut(kind) = EarTrainingScore {
            score,
            total_questions: total,
            last_attempt: Some(today),
        };
        debug!(kind = kind.key(), score, total, "ear training score updated");
        self.record_practice_session(today);
    }

    /// Counts today as a practice day. Practicing on consecutive days grows
    /// the streak; a gap resets it to one. Repeated calls on the same day
    /// change nothing.
    pub fn record_practice_session(&mut self, today: NaiveDate) {
        if self.last_practice_date == Some(today) {
            return;
        }

        let was_yesterday = self.last_practice_date == today.pred_opt();
        self.streak_days = if was_yesterday { self.streak_days + 1 } else { 1 };
        self.last_practice_date = Some(today);
        self.total_practice_time += 1;
    }

    /// Rounded share of tracked scales and chords that are completed.
    pub fn completion_percentage(&self) -> u32 {
        let total = self.scales.len() + self.chords.len();
        if total == 0 {
            return 0;
        }
        let completed = self
            .scales
            .values()
            .chain(self.chords.values())
            .filter(|p| p.completed)
            .count();
        (completed as f64 / total as f64 * 100.0).round() as u32
    }

    /// The streak as of `today`: still alive if the last practice was today
    /// or yesterday, otherwise broken.
    pub fn streak_days(&self, today: NaiveDate) -> u32 {
        match self.last_practice_date {
            Some(last) if last == today || Some(last) == today.pred_opt() => self.streak_days,
            _ => 0,
        }
    }

    /// Mean percentage over the ear training categories attempted so far.
    pub fn ear_training_average(&self) -> f64 {
        let attempted: Vec<f64> = QuizKind::ALL
            .iter()
            .map(|&kind| self.ear_training.get(kind))
            .filter(|s| s.attempted())
            .map(EarTrainingScore::percentage)
            .collect();
        if attempted.is_empty() {
            return 0.0;
        }
        attempted.iter().sum::<f64>() / attempted.len() as f64
    }

    /// Loads a store from a JSON file. A missing file is a fresh store.
    ///
    /// # Arguments
    /// * `path` - File path to load from (e.g. "music-theory-progress.json")
    ///
    /// # Returns
    /// * `Ok(ProgressStore)` - Loaded or default store
    /// * `Err(Error::Io | Error::Json)` - Unreadable or malformed file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "no progress file, starting fresh");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        let mut data = String::new();
        file.read_to_string(&mut data)?;
        let store = serde_json::from_str(&data)?;
        info!(path = %path.display(), "progress loaded");
        Ok(store)
    }

    /// Saves the store as pretty-printed JSON, replacing the file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json_string = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json_string.as_bytes())?;
        debug!(path = %path.display(), "progress saved");
        Ok(())
    }
}

fn mark_completed(entries: &mut BTreeMap<String, ProgressData>, id: &str, today: NaiveDate) {
    let times_completed = entries.get(id).map_or(0, |p| p.times_completed) + 1;
    entries.insert(
        id.to_string(),
        ProgressData {
            completed: true,
            last_practiced: today,
            times_completed,
        },
    );
}
