// theory-core/src/lib.rs

//! The core logic for the music theory trainer.
//! This crate holds the pitch-class model (notes, scales, chords, intervals
//! and cadences), ear training quizzes, playback planning and the learner's
//! progress store. It is completely headless and contains no GUI or audio
//! device code.

pub mod cadences;
pub mod catalog;
pub mod chords;
pub mod circle;
pub mod enharmonic;
pub mod error;
pub mod intervals;
pub mod pitch;
pub mod playback;
pub mod practice;
pub mod progress;
pub mod quiz;
pub mod roman;
pub mod scales;

pub use cadences::CadenceType;
pub use chords::{resolve_chord, ChordType};
pub use error::{Error, Result};
pub use intervals::IntervalKind;
pub use pitch::{midi_number, note_index, PitchClass};
pub use roman::{degree_to_roman_chord, RomanNumeral};
pub use scales::{resolve_scale, ScaleType};
