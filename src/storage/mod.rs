//! Storage layer for the relocation wizard
//!
//! Provides JSON file storage with atomic writes for step drafts and
//! submitted answers.

pub mod answers;
pub mod drafts;
pub mod file_io;

pub use answers::{AnswerRepository, StepAnswers};
pub use drafts::{DraftStore, FileDraftStore, MemoryDraftStore};
pub use file_io::{read_json, write_json_atomic};

use std::sync::Arc;

use crate::config::paths::WizardPaths;
use crate::error::WizardError;

/// Main storage coordinator that provides access to the draft store and
/// the answer repository
pub struct Storage {
    paths: WizardPaths,
    pub drafts: Arc<FileDraftStore>,
    pub answers: Arc<AnswerRepository>,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: WizardPaths) -> Result<Self, WizardError> {
        paths.ensure_directories()?;

        Ok(Self {
            drafts: Arc::new(FileDraftStore::open(paths.drafts_file())?),
            answers: Arc::new(AnswerRepository::new(paths.answers_file())),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &WizardPaths {
        &self.paths
    }

    /// Load submitted answers from disk
    pub fn load_all(&self) -> Result<(), WizardError> {
        self.answers.load()
    }

    /// Save submitted answers to disk
    pub fn save_all(&self) -> Result<(), WizardError> {
        self.answers.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("wizard");
        let paths = WizardPaths::with_base_dir(base.clone());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        assert!(base.exists());
        assert!(storage.drafts.keys().unwrap().is_empty());
        assert!(storage.answers.completed_steps().unwrap().is_empty());
    }
}
