//! User settings for the relocation wizard
//!
//! Manages autosave preferences and onboarding progress.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::paths::WizardPaths;
use crate::error::WizardError;

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Whether step drafts are written to the draft store while editing
    #[serde(default = "default_autosave")]
    pub autosave: bool,

    /// Quiet period after the last edit before a draft is written
    #[serde(default = "default_debounce_ms")]
    pub autosave_debounce_ms: u64,

    /// Prefix for draft store keys, e.g. `onboarding.family`
    #[serde(default = "default_draft_namespace")]
    pub draft_namespace: String,

    /// Whether every onboarding step has been submitted
    #[serde(default)]
    pub onboarding_completed: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_autosave() -> bool {
    true
}

fn default_debounce_ms() -> u64 {
    500
}

fn default_draft_namespace() -> String {
    "onboarding".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            autosave: default_autosave(),
            autosave_debounce_ms: default_debounce_ms(),
            draft_namespace: default_draft_namespace(),
            onboarding_completed: false,
        }
    }
}

impl Settings {
    /// Autosave debounce delay as a Duration
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.autosave_debounce_ms)
    }

    /// Draft store key for a step, namespaced with a dot
    pub fn draft_key(&self, step_key: &str) -> String {
        format!("{}.{}", self.draft_namespace, step_key)
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &WizardPaths) -> Result<Self, WizardError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                WizardError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                WizardError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &WizardPaths) -> Result<(), WizardError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            WizardError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            WizardError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(settings.autosave);
        assert_eq!(settings.debounce(), Duration::from_millis(500));
        assert_eq!(settings.draft_namespace, "onboarding");
        assert!(!settings.onboarding_completed);
    }

    #[test]
    fn test_draft_key() {
        let settings = Settings::default();
        assert_eq!(settings.draft_key("family"), "onboarding.family");
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = WizardPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.autosave = false;
        settings.autosave_debounce_ms = 1200;

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert!(!loaded.autosave);
        assert_eq!(loaded.autosave_debounce_ms, 1200);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"autosave": false}"#).unwrap();
        assert!(!settings.autosave);
        assert_eq!(settings.autosave_debounce_ms, 500);
        assert_eq!(settings.schema_version, 1);
    }
}
