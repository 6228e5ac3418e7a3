//! Saving and loading the progress store through the file system.

use chrono::NaiveDate;
use theory_core::progress::{progress_key, ProgressStore};
use theory_core::quiz::QuizKind;
use theory_core::Error;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

#[test]
fn save_then_load_restores_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("progress.json");

    let mut store = ProgressStore::default();
    store.complete_scale(&progress_key("D", "dorian"), today());
    store.complete_chord(&progress_key("G", "dominant7"), today());
    store.update_ear_training_score(QuizKind::Scales, 8, 10, today());
    store.save(&path).unwrap();

    let loaded = ProgressStore::load(&path).unwrap();
    assert_eq!(loaded, store);
    assert_eq!(loaded.streak_days(today()), 1);
}

#[test]
fn missing_file_loads_a_fresh_store() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = ProgressStore::load(dir.path().join("absent.json")).unwrap();
    assert_eq!(loaded, ProgressStore::default());
}

#[test]
fn malformed_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(ProgressStore::load(&path), Err(Error::Json(_))));
}

#[test]
fn stored_keys_use_camel_case() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("progress.json");
    let mut store = ProgressStore::default();
    store.complete_scale("C-major", today());
    store.save(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"lastPracticeDate\": \"2024-06-15\""));
    assert!(text.contains("\"timesCompleted\": 1"));
    assert!(text.contains("\"earTraining\""));
}
