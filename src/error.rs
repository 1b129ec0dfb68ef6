//! Custom error types for the relocation wizard
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for wizard operations
#[derive(Error, Debug)]
pub enum WizardError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// A step name that is not part of the onboarding flow
    #[error("Unknown step: {0}")]
    UnknownStep(String),

    /// The caller-supplied save operation failed
    #[error("Save failed for step '{step}': {message}")]
    Save { step: String, message: String },

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl WizardError {
    /// Create an "unknown step" error
    pub fn unknown_step(name: impl Into<String>) -> Self {
        Self::UnknownStep(name.into())
    }

    /// Create a save error for the given step
    pub fn save(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Save {
            step: step.into(),
            message: message.into(),
        }
    }

    /// Check if this error came from a save operation
    pub fn is_save(&self) -> bool {
        matches!(self, Self::Save { .. })
    }
}

impl From<std::io::Error> for WizardError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for WizardError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for wizard operations
pub type WizardResult<T> = Result<T, WizardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WizardError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_unknown_step_error() {
        let err = WizardError::unknown_step("pets");
        assert_eq!(err.to_string(), "Unknown step: pets");
    }

    #[test]
    fn test_save_error() {
        let err = WizardError::save("family", "backend unavailable");
        assert_eq!(
            err.to_string(),
            "Save failed for step 'family': backend unavailable"
        );
        assert!(err.is_save());
        assert!(!WizardError::Storage("locked".into()).is_save());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let wizard_err: WizardError = io_err.into();
        assert!(matches!(wizard_err, WizardError::Io(_)));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let wizard_err: WizardError = json_err.into();
        assert!(matches!(wizard_err, WizardError::Json(_)));
    }
}
