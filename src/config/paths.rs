//! Path management for envseal
//!
//! Provides XDG-compliant path resolution for the settings file and the
//! default key location.
//!
//! ## Path Resolution Order
//!
//! 1. `ENVSEAL_CONFIG_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/envseal` or `~/.config/envseal`
//! 3. Windows: `%APPDATA%\envseal`

use std::path::PathBuf;

use crate::error::EnvsealError;

/// Manages all paths used by envseal
#[derive(Debug, Clone)]
pub struct EnvsealPaths {
    /// Base directory for all envseal configuration
    base_dir: PathBuf,
}

impl EnvsealPaths {
    /// Create a new EnvsealPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, EnvsealError> {
        let base_dir = if let Ok(custom) = std::env::var("ENVSEAL_CONFIG_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create EnvsealPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/envseal/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the key directory (~/.config/envseal/keys/)
    pub fn keys_dir(&self) -> PathBuf {
        self.base_dir.join("keys")
    }

    /// Key file used when neither the command line nor the settings name one
    pub fn default_key_file(&self) -> PathBuf {
        self.keys_dir().join("default.key")
    }
}

/// Resolve the default config directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, EnvsealError> {
    if let Ok(config_home) = std::env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(config_home).join("envseal"));
    }
    let home = std::env::var("HOME")
        .map_err(|_| EnvsealError::Config("Could not determine HOME directory".into()))?;
    Ok(PathBuf::from(home).join(".config").join("envseal"))
}

/// Resolve the default config directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, EnvsealError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| EnvsealError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("envseal"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = EnvsealPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.keys_dir(), temp_dir.path().join("keys"));
        assert_eq!(
            paths.default_key_file(),
            temp_dir.path().join("keys").join("default.key")
        );
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();
        let custom_path = temp_dir.path().to_str().unwrap();

        env::set_var("ENVSEAL_CONFIG_DIR", custom_path);

        let paths = EnvsealPaths::new().unwrap();
        assert_eq!(paths.base_dir(), temp_dir.path());

        env::remove_var("ENVSEAL_CONFIG_DIR");
    }

    #[test]
    fn test_settings_file_path() {
        let temp_dir = TempDir::new().unwrap();
        let paths = EnvsealPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
    }
}
