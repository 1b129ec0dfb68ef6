//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::WizardError;

/// Read JSON from a file, returning a default value if file doesn't exist
pub fn read_json<T, P>(path: P) -> Result<T, WizardError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path)
        .map_err(|e| WizardError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| WizardError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write JSON to a file atomically (write to temp, then rename)
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), WizardError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            WizardError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Temp file must live in the same directory for the rename to be atomic
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| WizardError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| WizardError::Storage(format!("Failed to serialize data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| WizardError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| WizardError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        WizardError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::StepDraft;
    use crate::storage::StepAnswers;
    use chrono::Utc;
    use serde_json::json;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    /// Shape of `drafts.json`: store key to serialized draft
    type DraftFile = BTreeMap<String, String>;

    #[test]
    fn test_read_nonexistent_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("drafts.json");

        let data: DraftFile = read_json(&path).unwrap();
        assert!(data.is_empty());
    }

    #[test]
    fn test_write_and_read_drafts() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("drafts.json");

        let mut data = DraftFile::new();
        data.insert(
            "onboarding.family".to_string(),
            json!({"hasPartner": "Yes", "partnerNationality": ["ES"]}).to_string(),
        );

        write_json_atomic(&path, &data).unwrap();
        let loaded: DraftFile = read_json(&path).unwrap();
        assert_eq!(data, loaded);
        assert!(!temp_dir.path().join("drafts.json.tmp").exists());

        let draft = StepDraft::parse(&loaded["onboarding.family"]).unwrap();
        assert_eq!(draft.text("hasPartner"), Some("Yes"));
    }

    #[test]
    fn test_write_and_read_answers() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("answers.json");

        let mut steps = BTreeMap::new();
        steps.insert(
            "ancestry".to_string(),
            StepAnswers {
                answers: StepDraft::from_value(json!({"hasAncestry": "No"})).unwrap(),
                submitted_at: Utc::now(),
            },
        );

        write_json_atomic(&path, &steps).unwrap();
        let loaded: BTreeMap<String, StepAnswers> = read_json(&path).unwrap();
        assert_eq!(steps, loaded);
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("drafts.json");

        write_json_atomic(&path, &DraftFile::new()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_write_onto_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("answers.json");
        fs::create_dir(&path).unwrap();

        assert!(write_json_atomic(&path, &DraftFile::new()).is_err());
        assert!(path.is_dir());
    }

    #[test]
    fn test_read_corrupt_file_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("answers.json");
        fs::write(&path, "not json at all").unwrap();

        let err = read_json::<BTreeMap<String, StepAnswers>, _>(&path).unwrap_err();
        assert!(matches!(err, WizardError::Storage(_)));
    }
}
