//! # Settings Module
//!
//! Start-up configuration for the trainer, read once from a JSON file.
//!
//! ## Sources
//! 1. The file named by the `THEORY_SETTINGS` environment variable
//! 2. `settings.json` in the working directory
//! 3. Built-in defaults (missing file or missing fields)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use theory_core::playback::PlaybackConfig;
use theory_core::progress::DEFAULT_PROGRESS_FILE;
use theory_core::PitchClass;
use tracing::{info, warn};

pub const SETTINGS_ENV: &str = "THEORY_SETTINGS";
pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub playback: PlaybackConfig,
    /// Where the progress store is kept.
    pub progress_path: PathBuf,
    /// Root selected when the app opens.
    pub default_root: PitchClass,
    /// Octaves shown on the piano keyboard, starting at middle C.
    pub keyboard_octaves: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            playback: PlaybackConfig::default(),
            progress_path: PathBuf::from(DEFAULT_PROGRESS_FILE),
            default_root: PitchClass::C,
            keyboard_octaves: 2,
        }
    }
}

impl Settings {
    /// Reads settings from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(e).with_context(|| format!("failed to open {}", path.display()));
            }
        };
        let mut data = String::new();
        file.read_to_string(&mut data)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let settings = serde_json::from_str(&data)
            .with_context(|| format!("invalid settings in {}", path.display()))?;
        Ok(settings)
    }

    /// Loads settings from the configured location, falling back to the
    /// defaults (with a warning) when the file cannot be used.
    pub fn load() -> Self {
        let path = std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE));

        match Self::load_from(&path) {
            Ok(settings) => {
                info!(path = %path.display(), "settings loaded");
                settings
            }
            Err(e) => {
                warn!("{e:#}; using default settings");
                Self::default()
            }
        }
    }
}
