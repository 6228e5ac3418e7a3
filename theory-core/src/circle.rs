//! Circle of fifths and relative minors.

use crate::pitch::PitchClass;

/// Semitones in a perfect fifth.
const FIFTH: i32 = 7;
/// The relative minor's tonic sits a major sixth above the major tonic.
const RELATIVE_MINOR_OFFSET: i32 = 9;

/// The 12 major keys in circle-of-fifths order, starting at C.
pub fn circle_of_fifths() -> [PitchClass; 12] {
    std::array::from_fn(|i| PitchClass::C.transpose(i as i32 * FIFTH))
}

/// Position of a key on the circle (C = 0, G = 1, ..., F = 11).
pub fn circle_position(key: PitchClass) -> usize {
    // 7 is its own inverse mod 12.
    (key.index() as usize * FIFTH as usize) % 12
}

pub fn relative_minor(major: PitchClass) -> PitchClass {
    major.transpose(RELATIVE_MINOR_OFFSET)
}

/// Chord-symbol name of the relative minor, e.g. "Am" for C.
pub fn relative_minor_name(major: PitchClass) -> String {
    format!("{}m", relative_minor(major))
}
