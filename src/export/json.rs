//! JSON export of submitted answers

use std::collections::BTreeMap;
use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{WizardError, WizardResult};
use crate::steps::StepKind;
use crate::storage::{AnswerRepository, StepAnswers};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Everything the user has submitted, ready to hand to an advisor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswersExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Submitted answers keyed by step key
    pub steps: BTreeMap<String, StepAnswers>,

    pub metadata: ExportMetadata,
}

/// Summary of the export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    /// Number of submitted steps
    pub submitted_count: usize,

    /// Step keys not submitted yet, in wizard order
    pub missing_steps: Vec<String>,

    /// Most recent submission
    pub last_submitted_at: Option<DateTime<Utc>>,
}

impl AnswersExport {
    /// Snapshot the answer repository
    pub fn from_repository(answers: &AnswerRepository) -> WizardResult<Self> {
        let steps = answers.get_all()?;

        let missing_steps = StepKind::ALL
            .iter()
            .map(|step| step.key())
            .filter(|key| !steps.contains_key(*key))
            .map(str::to_string)
            .collect();

        let metadata = ExportMetadata {
            submitted_count: steps.len(),
            missing_steps,
            last_submitted_at: steps.values().map(|s| s.submitted_at).max(),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            steps,
            metadata,
        })
    }

    /// Whether every onboarding step is present
    pub fn is_complete(&self) -> bool {
        self.metadata.missing_steps.is_empty()
    }
}

/// Export submitted answers as JSON
pub fn export_answers_json<W: Write>(
    answers: &AnswerRepository,
    writer: &mut W,
    pretty: bool,
) -> WizardResult<()> {
    let export = AnswersExport::from_repository(answers)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| WizardError::Export(e.to_string()))?;

    Ok(())
}
