//! # Enharmonic Spelling Module
//!
//! Conventional letter spellings for the major keys. Chromatic computation
//! always yields sharp names ("A#"); keys on the flat side of the circle
//! spell those degrees with flats instead ("Bb").
//!
//! Both tables are keyed by key-signature name, so flat roots such as "Bb"
//! or "Gb" have entries even though they are not canonical pitch-class
//! names.

use once_cell::sync::Lazy;
use std::collections::BTreeMap;

/// Literal spellings of the major scale for each listed key signature.
static MAJOR_SCALE_SPELLINGS: Lazy<BTreeMap<&'static str, [&'static str; 7]>> = Lazy::new(|| {
    BTreeMap::from([
        ("C", ["C", "D", "E", "F", "G", "A", "B"]),
        ("G", ["G", "A", "B", "C", "D", "E", "F#"]),
        ("F", ["F", "G", "A", "Bb", "C", "D", "E"]),
        ("D", ["D", "E", "F#", "G", "A", "B", "C#"]),
        ("Bb", ["Bb", "C", "D", "Eb", "F", "G", "A"]),
        ("A", ["A", "B", "C#", "D", "E", "F#", "G#"]),
        ("Eb", ["Eb", "F", "G", "Ab", "Bb", "C", "D"]),
        ("Ab", ["Ab", "Bb", "C", "Db", "Eb", "F", "G"]),
        ("E", ["E", "F#", "G#", "A", "B", "C#", "D#"]),
        ("B", ["B", "C#", "D#", "E", "F#", "G#", "A#"]),
        ("Db", ["Db", "Eb", "F", "Gb", "Ab", "Bb", "C"]),
        ("Gb", ["Gb", "Ab", "Bb", "Cb", "Db", "Eb", "F"]),
    ])
});

/// Per key signature: chromatic sharp name -> preferred spelling.
/// Sharp keys have no entries.
static KEY_SPELLINGS: Lazy<BTreeMap<&'static str, BTreeMap<&'static str, &'static str>>> =
    Lazy::new(|| {
        let flats = |pairs: &[(&'static str, &'static str)]| -> BTreeMap<&'static str, &'static str> {
            pairs.iter().copied().collect()
        };
        BTreeMap::from([
            ("C", BTreeMap::new()),
            ("G", BTreeMap::new()),
            ("F", flats(&[("A#", "Bb")])),
            ("D", BTreeMap::new()),
            ("Bb", flats(&[("D#", "Eb"), ("A#", "Bb")])),
            ("A", BTreeMap::new()),
            ("Eb", flats(&[("D#", "Eb"), ("G#", "Ab"), ("A#", "Bb")])),
            ("Ab", flats(&[("C#", "Db"), ("D#", "Eb"), ("G#", "Ab"), ("A#", "Bb")])),
            ("E", BTreeMap::new()),
            ("B", BTreeMap::new()),
            (
                "Db",
                flats(&[("C#", "Db"), ("D#", "Eb"), ("F#", "Gb"), ("G#", "Ab"), ("A#", "Bb")]),
            ),
            (
                "Gb",
                flats(&[
                    ("C#", "Db"),
                    ("D#", "Eb"),
                    ("F#", "Gb"),
                    ("G#", "Ab"),
                    ("A#", "Bb"),
                    ("B", "Cb"),
                ]),
            ),
        ])
    });

/// Returns the override spelling of the major scale on `root`, if one exists.
pub fn major_scale_spelling(root: &str) -> Option<&'static [&'static str; 7]> {
    MAJOR_SCALE_SPELLINGS.get(root)
}

/// Key signatures that carry a major-scale override.
pub fn spelled_keys() -> impl Iterator<Item = &'static str> {
    MAJOR_SCALE_SPELLINGS.keys().copied()
}

/// Spells a chromatic note the way the given key signature writes it.
///
/// # Arguments
/// * `chromatic_note` - Canonical sharp name (e.g. "A#")
/// * `key` - Key signature name (e.g. "F", "Bb")
///
/// # Returns
/// * The key's preferred spelling, or `chromatic_note` unchanged when the
///   key or the note has no entry
pub fn spell_in_key<'a>(chromatic_note: &'a str, key: &str) -> &'a str {
    KEY_SPELLINGS
        .get(key)
        .and_then(|map| map.get(chromatic_note).copied())
        .unwrap_or(chromatic_note)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pitch::PitchClass;

    #[test]
    fn spell_in_key_maps_flat_side_degrees() {
        assert_eq!(spell_in_key("A#", "F"), "Bb");
        assert_eq!(spell_in_key("B", "Gb"), "Cb");
        assert_eq!(spell_in_key("A#", "B"), "A#");
        assert_eq!(spell_in_key("C", "Eb"), "C");
        assert_eq!(spell_in_key("A#", "nowhere"), "A#");
    }

    #[test]
    fn override_spellings_sound_like_a_major_scale() {
        const MAJOR: [i32; 7] = [0, 2, 4, 5, 7, 9, 11];
        for key in spelled_keys() {
            let spelled = major_scale_spelling(key).unwrap();
            let root = PitchClass::from_spelling(key).unwrap();
            for (name, offset) in spelled.iter().zip(MAJOR) {
                assert_eq!(
                    PitchClass::from_spelling(name).unwrap(),
                    root.transpose(offset),
                    "{key} major degree {name}"
                );
            }
        }
    }

    #[test]
    fn key_spellings_agree_with_scale_spellings() {
        for key in spelled_keys() {
            let root = PitchClass::from_spelling(key).unwrap();
            let spelled = major_scale_spelling(key).unwrap();
            for (degree, offset) in [0, 2, 4, 5, 7, 9, 11].into_iter().enumerate() {
                let chromatic = root.transpose(offset).name();
                assert_eq!(spell_in_key(chromatic, key), spelled[degree], "{key}");
            }
        }
    }
}
