//! Error types for the theory core.
//!
//! Lookup failures signal an invalid key reaching the model. Callers are
//! expected to draw keys from the catalogs, so these surface immediately
//! instead of being replaced with defaults.

use thiserror::Error;

/// Result type for theory-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Not one of the 12 canonical pitch-class names.
    #[error("unknown note: {0:?}")]
    UnknownNote(String),

    #[error("unknown scale type: {0:?}")]
    UnknownScaleType(String),

    #[error("unknown chord type: {0:?}")]
    UnknownChordType(String),

    #[error("unknown interval: {0:?}")]
    UnknownIntervalType(String),

    #[error("unknown cadence: {0:?}")]
    UnknownCadenceType(String),

    /// Not a roman numeral between I and VII (optionally suffixed with `°`).
    #[error("unknown roman numeral: {0:?}")]
    UnknownRomanNumeral(String),

    #[error("unknown ear training exercise: {0:?}")]
    UnknownQuizKind(String),

    /// Progress store file could not be read or written.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Progress store file is not valid JSON for the store schema.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
