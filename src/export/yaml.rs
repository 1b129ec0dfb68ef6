//! YAML export of submitted answers

use std::io::Write;

use crate::error::{WizardError, WizardResult};
use crate::export::json::AnswersExport;
use crate::storage::AnswerRepository;

/// Export submitted answers as YAML with a short header
pub fn export_answers_yaml<W: Write>(answers: &AnswerRepository, writer: &mut W) -> WizardResult<()> {
    let export = AnswersExport::from_repository(answers)?;

    let header = format!(
        "# Relocation onboarding answers\n\
         # Generated: {}\n\
         # App Version: {}\n\n",
        export.exported_at, export.app_version
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| WizardError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| WizardError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::StepDraft;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_yaml_export() {
        let temp = TempDir::new().unwrap();
        let answers = AnswerRepository::new(temp.path().join("answers.json"));
        answers
            .upsert_step(
                "education",
                StepDraft::from_value(json!({"highestLevel": "Master's", "languages": ["English"]}))
                    .unwrap(),
            )
            .unwrap();

        let mut output = Vec::new();
        export_answers_yaml(&answers, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert!(text.starts_with("# Relocation onboarding answers"));
        assert!(text.contains("app_version:"));

        let body: serde_yaml::Value = serde_yaml::from_str(&text).unwrap();
        assert_eq!(
            body["steps"]["education"]["answers"]["highestLevel"].as_str(),
            Some("Master's")
        );
    }
}
