//! Answer repository for JSON storage
//!
//! Holds the authoritative, submitted answers for each onboarding step in
//! answers.json. Step submission writes here; drafts live elsewhere.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::WizardError;
use crate::form::StepDraft;

use super::file_io::{read_json, write_json_atomic};

/// Answers submitted for one step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepAnswers {
    /// Field values as submitted
    pub answers: StepDraft,
    /// When the step was last submitted
    pub submitted_at: DateTime<Utc>,
}

/// Serializable answer file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct AnswerData {
    #[serde(default)]
    steps: BTreeMap<String, StepAnswers>,
}

/// Repository for submitted step answers
pub struct AnswerRepository {
    path: PathBuf,
    data: RwLock<BTreeMap<String, StepAnswers>>,
}

impl AnswerRepository {
    /// Create a new answer repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(BTreeMap::new()),
        }
    }

    /// Load answers from disk
    pub fn load(&self) -> Result<(), WizardError> {
        let file_data: AnswerData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            WizardError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        *data = file_data.steps;

        Ok(())
    }

    /// Save answers to disk
    pub fn save(&self) -> Result<(), WizardError> {
        let data = self.data.read().map_err(|e| {
            WizardError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let file_data = AnswerData {
            steps: data.clone(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Insert or replace the answers for a step
    pub fn upsert_step(&self, step: &str, answers: StepDraft) -> Result<(), WizardError> {
        let mut data = self.data.write().map_err(|e| {
            WizardError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.insert(
            step.to_string(),
            StepAnswers {
                answers,
                submitted_at: Utc::now(),
            },
        );
        Ok(())
    }

    /// Record a step's answers and write the file.
    ///
    /// The in-memory answers only change once the file has been written, so
    /// a failed write leaves the step unsubmitted.
    pub fn commit_step(&self, step: &str, answers: StepDraft) -> Result<(), WizardError> {
        let mut data = self.data.write().map_err(|e| {
            WizardError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let mut file_data = AnswerData { steps: data.clone() };
        file_data.steps.insert(
            step.to_string(),
            StepAnswers {
                answers,
                submitted_at: Utc::now(),
            },
        );
        write_json_atomic(&self.path, &file_data)?;

        *data = file_data.steps;
        Ok(())
    }

    /// Get the submitted answers for a step
    pub fn get_step(&self, step: &str) -> Result<Option<StepAnswers>, WizardError> {
        let data = self.data.read().map_err(|e| {
            WizardError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(step).cloned())
    }

    /// Get all submitted steps, keyed by step key
    pub fn get_all(&self) -> Result<BTreeMap<String, StepAnswers>, WizardError> {
        let data = self.data.read().map_err(|e| {
            WizardError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.clone())
    }

    /// Keys of every step that has been submitted
    pub fn completed_steps(&self) -> Result<Vec<String>, WizardError> {
        let data = self.data.read().map_err(|e| {
            WizardError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.keys().cloned().collect())
    }

    /// Remove every submitted answer
    pub fn clear(&self) -> Result<(), WizardError> {
        let mut data = self.data.write().map_err(|e| {
            WizardError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        data.clear();
        Ok(())
    }
}
