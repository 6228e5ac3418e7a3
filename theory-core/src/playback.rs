//! # Playback Planning Module
//!
//! Turns note-name sequences into timed note events that an audio back end
//! can render. Planning is pure: no audio device is touched here.
//!
//! ## Features
//! - Single notes, block chords, ascending scales and chord progressions
//! - Accepts display spellings ("Bb", "Cb"), so overridden scales play
//! - Notes are voiced upwards from the root so nothing folds back down
//!   when a pattern crosses C

use crate::error::Result;
use crate::intervals::IntervalKind;
use crate::pitch::{self, PitchClass};
use serde::{Deserialize, Serialize};

/// Timing and level settings for planned playback.
///
/// The defaults match a 120 bpm reading of the lesson material: a single
/// note is an eighth note, a chord a half note, and scales step every
/// 500 ms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Octave of the first note (4 = middle C octave).
    pub octave: i32,
    pub note_ms: u32,
    pub chord_ms: u32,
    pub scale_step_ms: u32,
    /// Output gain, 0.0 to 1.0.
    pub volume: f32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            octave: 4,
            note_ms: 250,
            chord_ms: 1000,
            scale_step_ms: 500,
            volume: 0.3,
        }
    }
}

/// A single note to sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteEvent {
    pub midi: i32,
    /// Offset from the start of the plan.
    pub start_ms: u32,
    pub duration_ms: u32,
}

impl NoteEvent {
    pub fn frequency(&self) -> f32 {
        pitch::frequency(self.midi)
    }

    pub fn end_ms(&self) -> u32 {
        self.start_ms + self.duration_ms
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackPlan {
    pub events: Vec<NoteEvent>,
}

impl PlaybackPlan {
    /// Time at which the last note has finished.
    pub fn total_ms(&self) -> u32 {
        self.events.iter().map(NoteEvent::end_ms).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Appends `other`, shifted to start when this plan ends.
    pub fn then(mut self, other: PlaybackPlan) -> Self {
        let offset = self.total_ms();
        self.events.extend(other.events.into_iter().map(|event| NoteEvent {
            start_ms: event.start_ms + offset,
            ..event
        }));
        self
    }
}

/// Voices a sequence of spellings so that each note is strictly above the
/// previous one, starting in `octave`.
fn ascending_midis<S: AsRef<str>>(notes: &[S], octave: i32) -> Result<Vec<i32>> {
    let mut midis: Vec<i32> = Vec::with_capacity(notes.len());
    for note in notes {
        let pc = PitchClass::from_spelling(note.as_ref())?;
        let mut midi = pc.midi(octave);
        if let Some(&previous) = midis.last() {
            while midi <= previous {
                midi += 12;
            }
        }
        midis.push(midi);
    }
    Ok(midis)
}

/// Plans a single note.
pub fn plan_note(note: &str, octave: i32, config: &PlaybackConfig) -> Result<PlaybackPlan> {
    let pc = PitchClass::from_spelling(note)?;
    Ok(PlaybackPlan {
        events: vec![NoteEvent {
            midi: pc.midi(octave),
            start_ms: 0,
            duration_ms: config.note_ms,
        }],
    })
}

/// Plans a block chord: every note starts together.
pub fn plan_chord<S: AsRef<str>>(notes: &[S], config: &PlaybackConfig) -> Result<PlaybackPlan> {
    let events = ascending_midis(notes, config.octave)?
        .into_iter()
        .map(|midi| NoteEvent {
            midi,
            start_ms: 0,
            duration_ms: config.chord_ms,
        })
        .collect();
    Ok(PlaybackPlan { events })
}

/// Plans an ascending scale, one note every `scale_step_ms`.
pub fn plan_scale<S: AsRef<str>>(notes: &[S], config: &PlaybackConfig) -> Result<PlaybackPlan> {
    let events = ascending_midis(notes, config.octave)?
        .into_iter()
        .enumerate()
        .map(|(i, midi)| NoteEvent {
            midi,
            start_ms: i as u32 * config.scale_step_ms,
            duration_ms: config.note_ms,
        })
        .collect();
    Ok(PlaybackPlan { events })
}

/// Plans chords back to back, each lasting `chord_ms`.
pub fn plan_progression<S: AsRef<str>>(
    chords: &[Vec<S>],
    config: &PlaybackConfig,
) -> Result<PlaybackPlan> {
    let mut plan = PlaybackPlan::default();
    for chord in chords {
        plan = plan.then(plan_chord(chord, config)?);
    }
    Ok(plan)
}

/// Plans a melodic interval: the root, then the upper note.
pub fn plan_interval(
    root: PitchClass,
    interval: IntervalKind,
    config: &PlaybackConfig,
) -> PlaybackPlan {
    let low = root.midi(config.octave);
    let high = low + interval.semitones() as i32;
    PlaybackPlan {
        events: vec![
            NoteEvent {
                midi: low,
                start_ms: 0,
                duration_ms: config.note_ms,
            },
            NoteEvent {
                midi: high,
                start_ms: config.scale_step_ms,
                duration_ms: config.note_ms,
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scales::{self, ScaleType};

    #[test]
    fn single_note_uses_midi_numbering() {
        let plan = plan_note("A", 4, &PlaybackConfig::default()).unwrap();
        assert_eq!(plan.events[0].midi, 69);
        assert!((plan.events[0].frequency() - 440.0).abs() < 1e-3);
        assert_eq!(plan.total_ms(), 250);
    }

    #[test]
    fn scale_steps_are_spaced_and_ascending() {
        let config = PlaybackConfig::default();
        let notes = scales::resolve_scale("Gb", ScaleType::Major).unwrap();
        let plan = plan_scale(&notes, &config).unwrap();

        assert_eq!(plan.events.len(), 7);
        for pair in plan.events.windows(2) {
            assert!(pair[1].midi > pair[0].midi);
            assert_eq!(pair[1].start_ms - pair[0].start_ms, config.scale_step_ms);
        }
        assert_eq!(plan.events[0].midi, 66);
        assert_eq!(plan.total_ms(), 6 * 500 + 250);
    }

    #[test]
    fn chords_are_voiced_upwards() {
        let plan = plan_chord(&["G#", "C", "E"], &PlaybackConfig::default()).unwrap();
        let midis: Vec<_> = plan.events.iter().map(|e| e.midi).collect();
        assert_eq!(midis, [68, 72, 76]);
        assert!(plan.events.iter().all(|e| e.start_ms == 0));
    }

    #[test]
    fn progressions_play_chords_in_sequence() {
        let chords = vec![vec!["G", "B", "D"], vec!["C", "E", "G"]];
        let plan = plan_progression(&chords, &PlaybackConfig::default()).unwrap();
        assert_eq!(plan.events.len(), 6);
        assert_eq!(plan.events[3].start_ms, 1000);
        assert_eq!(plan.total_ms(), 2000);
    }

    #[test]
    fn interval_goes_up() {
        let plan = plan_interval(PitchClass::A, IntervalKind::Octave, &PlaybackConfig::default());
        assert_eq!(plan.events[1].midi - plan.events[0].midi, 12);
    }

    #[test]
    fn planned_notes_match_midi_number_in_every_octave() {
        for octave in [2, 4, 6] {
            for pc in PitchClass::ALL {
                let expected = crate::pitch::midi_number(pc.name(), octave).unwrap();
                let plan = plan_note(pc.name(), octave, &PlaybackConfig::default()).unwrap();
                assert_eq!(plan.events[0].midi, expected);
            }
        }
        let config = PlaybackConfig { octave: 3, ..PlaybackConfig::default() };
        let plan = plan_interval(PitchClass::D, IntervalKind::Octave, &config);
        assert_eq!(plan.events[0].midi, crate::pitch::midi_number("D", 3).unwrap());
    }

    #[test]
    fn bad_spelling_is_rejected() {
        assert!(plan_chord(&["C", "Q"], &PlaybackConfig::default()).is_err());
    }
}
