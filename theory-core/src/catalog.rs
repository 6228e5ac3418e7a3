//! Read-only catalog of pattern keys for selector UIs.
//!
//! Every entry's `key` parses back into its enum, so anything picked from
//! here is a valid input to the query functions.

use crate::cadences::CadenceType;
use crate::chords::ChordType;
use crate::intervals::IntervalKind;
use crate::scales::ScaleType;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub fn scales() -> Vec<CatalogEntry> {
    ScaleType::ALL
        .iter()
        .map(|scale| CatalogEntry {
            key: scale.key(),
            name: scale.definition().name,
            description: scale.definition().description,
        })
        .collect()
}

pub fn chords() -> Vec<CatalogEntry> {
    ChordType::ALL
        .iter()
        .map(|chord| CatalogEntry {
            key: chord.key(),
            name: chord.definition().name,
            description: chord.definition().description,
        })
        .collect()
}

/// Intervals have no description; the entry carries an empty one.
pub fn intervals() -> Vec<CatalogEntry> {
    IntervalKind::ALL
        .iter()
        .map(|interval| CatalogEntry {
            key: interval.key(),
            name: interval.name(),
            description: "",
        })
        .collect()
}

pub fn cadences() -> Vec<CatalogEntry> {
    CadenceType::ALL
        .iter()
        .map(|cadence| CatalogEntry {
            key: cadence.key(),
            name: cadence.definition().name,
            description: cadence.definition().description,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_stable_and_ordered() {
        let keys: Vec<_> = scales().into_iter().map(|e| e.key).collect();
        assert_eq!(keys, ["major", "minor", "pentatonic", "blues", "dorian"]);

        let keys: Vec<_> = chords().into_iter().map(|e| e.key).collect();
        assert_eq!(
            keys,
            ["major", "minor", "diminished", "augmented", "major7", "dominant7", "minor7"]
        );

        let keys: Vec<_> = cadences().into_iter().map(|e| e.key).collect();
        assert_eq!(keys, ["perfect", "plagal", "imperfect", "deceptive", "half"]);

        assert_eq!(intervals().len(), 12);
    }

    #[test]
    fn every_key_parses_back() {
        for entry in scales() {
            assert!(entry.key.parse::<ScaleType>().is_ok());
        }
        for entry in chords() {
            assert!(entry.key.parse::<ChordType>().is_ok());
        }
        for entry in intervals() {
            assert!(entry.key.parse::<IntervalKind>().is_ok());
        }
        for entry in cadences() {
            assert!(entry.key.parse::<CadenceType>().is_ok());
        }
    }
}
