//! Properties of the pitch-class model across every root and pattern.

use std::collections::HashSet;
use theory_core::{
    chords, degree_to_roman_chord, midi_number, note_index, resolve_chord, resolve_scale,
    scales, ChordType, Error, PitchClass, ScaleType,
};

#[test]
fn every_major_scale_has_seven_distinct_notes() {
    for root in PitchClass::ALL {
        let notes = resolve_scale(root.name(), ScaleType::Major).unwrap();
        assert_eq!(notes.len(), 7, "{root}");
        let sounding: HashSet<_> = notes
            .iter()
            .map(|n| PitchClass::from_spelling(n).unwrap())
            .collect();
        assert_eq!(sounding.len(), 7, "{root}: {notes:?}");
    }
}

#[test]
fn reference_resolutions() {
    assert_eq!(
        resolve_scale("C", ScaleType::Major).unwrap(),
        ["C", "D", "E", "F", "G", "A", "B"]
    );
    assert_eq!(
        resolve_scale("F", ScaleType::Major).unwrap(),
        ["F", "G", "A", "Bb", "C", "D", "E"]
    );
    assert_eq!(resolve_chord("C", ChordType::Major).unwrap(), ["C", "E", "G"]);
    assert_eq!(
        resolve_chord("C", ChordType::Minor7).unwrap(),
        ["C", "D#", "G", "A#"]
    );
}

#[test]
fn resolution_is_repeatable() {
    for root in PitchClass::ALL {
        for scale in ScaleType::ALL {
            assert_eq!(
                resolve_scale(root.name(), scale).unwrap(),
                resolve_scale(root.name(), scale).unwrap()
            );
        }
        for chord in ChordType::ALL {
            assert_eq!(
                resolve_chord(root.name(), chord).unwrap(),
                resolve_chord(root.name(), chord).unwrap()
            );
        }
    }
}

#[test]
fn scale_lengths_match_their_patterns() {
    for root in PitchClass::ALL {
        for scale in ScaleType::ALL {
            let notes = resolve_scale(root.name(), scale).unwrap();
            assert_eq!(notes.len(), scale.intervals().len());
            assert_eq!(
                PitchClass::from_spelling(&notes[0]).unwrap(),
                root,
                "scales start on their root"
            );
        }
    }
}

#[test]
fn chord_notes_round_trip_through_midi() {
    for root in PitchClass::ALL {
        for chord in ChordType::ALL {
            for note in resolve_chord(root.name(), chord).unwrap() {
                let midi = midi_number(&note, 4).unwrap();
                assert_eq!(midi.rem_euclid(12), note_index(&note).unwrap() as i32);
            }
        }
    }
}

#[test]
fn roman_numerals_match_direct_chords() {
    assert_eq!(
        degree_to_roman_chord("C", "V".parse().unwrap()).unwrap(),
        resolve_chord("G", ChordType::Major).unwrap()
    );
    assert_eq!(
        degree_to_roman_chord("C", "V".parse().unwrap()).unwrap(),
        ["G", "B", "D"]
    );
    assert_eq!(
        degree_to_roman_chord("C", "vi".parse().unwrap()).unwrap(),
        resolve_chord("A", ChordType::Minor).unwrap()
    );
}

#[test]
fn invalid_inputs_fail_fast() {
    assert!(matches!(
        resolve_scale("X", ScaleType::Major),
        Err(Error::UnknownNote(_))
    ));
    assert!(matches!(
        scales::resolve_scale_by_key("C", "nonexistent"),
        Err(Error::UnknownScaleType(_))
    ));
    assert!(matches!(
        chords::resolve_chord_by_key("C", "nonexistent"),
        Err(Error::UnknownChordType(_))
    ));
    assert!(matches!(
        theory_core::roman::degree_to_roman_chord_str("C", "IX"),
        Err(Error::UnknownRomanNumeral(_))
    ));
}
