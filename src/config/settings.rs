//! User settings for envseal
//!
//! Persisted defaults for the command line: whether decryption validates
//! the integrity hashes, which key file to use, and whether existing
//! outputs may be overwritten.

use std::path::PathBuf;

use serde::Deserialize;

use super::paths::EnvsealPaths;
use crate::error::EnvsealError;

/// User settings for envseal
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Verify `file_sha` and `sha` when decrypting
    #[serde(default = "default_validate_integrity")]
    pub validate_integrity: bool,

    /// Key file used when `--key-file` is not given
    #[serde(default)]
    pub default_key_file: Option<PathBuf>,

    /// Replace existing output files without `--force`
    #[serde(default)]
    pub overwrite_outputs: bool,
}

fn default_validate_integrity() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            validate_integrity: default_validate_integrity(),
            default_key_file: None,
            overwrite_outputs: false,
        }
    }
}

impl Settings {
    /// Resolve the key file: explicit argument, then settings, then the default location
    pub fn key_file(&self, paths: &EnvsealPaths, explicit: Option<PathBuf>) -> PathBuf {
        explicit
            .or_else(|| self.default_key_file.clone())
            .unwrap_or_else(|| paths.default_key_file())
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &EnvsealPaths) -> Result<Self, EnvsealError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                EnvsealError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                EnvsealError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // No settings file: the defaults apply and nothing is written
            Ok(Settings::default())
        }
    }
}
