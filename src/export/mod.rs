//! Export of submitted answers
//!
//! - JSON: machine-readable, for other tools
//! - YAML: human-readable, for sharing with an advisor

pub mod json;
pub mod yaml;

pub use json::{export_answers_json, AnswersExport, ExportMetadata, EXPORT_SCHEMA_VERSION};
pub use yaml::export_answers_yaml;

use std::io::Write;

use clap::ValueEnum;

use crate::error::WizardResult;
use crate::storage::AnswerRepository;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Pretty-printed JSON
    Json,
    /// YAML with a comment header
    Yaml,
}

/// Write every submitted answer to `writer` in `format`
pub fn export_answers<W: Write>(
    answers: &AnswerRepository,
    format: ExportFormat,
    writer: &mut W,
) -> WizardResult<()> {
    match format {
        ExportFormat::Json => export_answers_json(answers, writer, true),
        ExportFormat::Yaml => export_answers_yaml(answers, writer),
    }
}
