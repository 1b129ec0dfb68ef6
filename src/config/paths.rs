//! Path management for the relocation wizard
//!
//! Provides XDG-compliant path resolution for settings, drafts, and answers.
//!
//! ## Path Resolution Order
//!
//! 1. `RELOCATE_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/relocate-wizard` or `~/.config/relocate-wizard`
//! 3. Windows: `%APPDATA%\relocate-wizard`

use std::path::PathBuf;

use crate::error::WizardError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "RELOCATE_DATA_DIR";

/// Manages all paths used by the wizard
#[derive(Debug, Clone)]
pub struct WizardPaths {
    /// Base directory for all wizard data
    base_dir: PathBuf,
}

impl WizardPaths {
    /// Create a new WizardPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home or config directory can be determined.
    pub fn new() -> Result<Self, WizardError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create WizardPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the durable draft store
    pub fn drafts_file(&self) -> PathBuf {
        self.base_dir.join("drafts.json")
    }

    /// Get the path to the submitted answers
    pub fn answers_file(&self) -> PathBuf {
        self.base_dir.join("answers.json")
    }

    /// Get the path to the activity log
    pub fn activity_log(&self) -> PathBuf {
        self.base_dir.join("activity.log")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), WizardError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| WizardError::Io(format!("Failed to create base directory: {}", e)))
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, WizardError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let home = std::env::var("HOME").map_err(|_| {
                WizardError::Config("Could not determine HOME directory".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("relocate-wizard"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, WizardError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| WizardError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("relocate-wizard"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = WizardPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.drafts_file(), temp_dir.path().join("drafts.json"));
        assert_eq!(paths.answers_file(), temp_dir.path().join("answers.json"));
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();
        let custom_path = temp_dir.path().to_str().unwrap();

        env::set_var(DATA_DIR_ENV, custom_path);

        let paths = WizardPaths::new().unwrap();
        assert_eq!(paths.base_dir(), temp_dir.path());

        env::remove_var(DATA_DIR_ENV);
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("nested").join("wizard");
        let paths = WizardPaths::with_base_dir(base.clone());

        paths.ensure_directories().unwrap();
        assert!(base.exists());
    }
}
