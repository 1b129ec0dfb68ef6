//! Activity logger for the append-only activity log
//!
//! Each entry is written as a single JSON line and flushed immediately.

use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{WizardError, WizardResult};

use super::entry::{ActivityAction, ActivityEntry};

/// Writes activity entries to a JSONL file
pub struct ActivityLogger {
    log_path: PathBuf,
}

impl ActivityLogger {
    /// Create a new ActivityLogger that writes to the specified path
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append an entry to the log
    pub fn log(&self, entry: &ActivityEntry) -> WizardResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| WizardError::Io(format!("Failed to open activity log: {}", e)))?;

        let json = serde_json::to_string(entry).map_err(|e| {
            WizardError::Json(format!("Failed to serialize activity entry: {}", e))
        })?;

        writeln!(file, "{}", json)
            .map_err(|e| WizardError::Io(format!("Failed to write activity entry: {}", e)))?;

        file.flush()
            .map_err(|e| WizardError::Io(format!("Failed to flush activity log: {}", e)))?;

        Ok(())
    }

    /// Read all entries, oldest first
    pub fn read_all(&self) -> WizardResult<Vec<ActivityEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| WizardError::Io(format!("Failed to open activity log: {}", e)))?;

        let mut entries = Vec::new();
        for (line_num, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| {
                WizardError::Io(format!(
                    "Failed to read activity log line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: ActivityEntry = serde_json::from_str(&line).map_err(|e| {
                WizardError::Json(format!(
                    "Failed to parse activity entry at line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;
            entries.push(entry);
        }

        Ok(entries)
    }

    /// Read the most recent N entries
    pub fn read_recent(&self, count: usize) -> WizardResult<Vec<ActivityEntry>> {
        let all_entries = self.read_all()?;
        let start = all_entries.len().saturating_sub(count);
        Ok(all_entries[start..].to_vec())
    }

    /// Total active time per step over every recorded action
    pub fn total_time_by_step(&self) -> WizardResult<BTreeMap<String, Duration>> {
        let mut totals: BTreeMap<String, Duration> = BTreeMap::new();
        for entry in self.read_all()? {
            *totals.entry(entry.step.clone()).or_default() += entry.time_spent();
        }
        Ok(totals)
    }

    /// Number of times each step has been submitted
    pub fn submissions_by_step(&self) -> WizardResult<BTreeMap<String, usize>> {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for entry in self.read_all()? {
            if entry.action == ActivityAction::Submitted {
                *counts.entry(entry.step).or_default() += 1;
            }
        }
        Ok(counts)
    }

    /// Check if the log file exists
    pub fn exists(&self) -> bool {
        self.log_path.exists()
    }

    /// Get the path to the log file
    pub fn path(&self) -> &PathBuf {
        &self.log_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use uuid::Uuid;

    fn create_test_logger() -> (ActivityLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let logger = ActivityLogger::new(temp_dir.path().join("activity.log"));
        (logger, temp_dir)
    }

    fn entry(step: &str, action: ActivityAction, ms: u64) -> ActivityEntry {
        ActivityEntry::new(Uuid::new_v4(), step, action, Duration::from_millis(ms))
    }

    #[test]
    fn test_log_and_read() {
        let (logger, _temp) = create_test_logger();
        logger.log(&entry("family", ActivityAction::Submitted, 1200)).unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].step, "family");
        assert_eq!(entries[0].action, ActivityAction::Submitted);
    }

    #[test]
    fn test_read_recent() {
        let (logger, _temp) = create_test_logger();
        for step in ["general_info", "family", "education", "work"] {
            logger.log(&entry(step, ActivityAction::Submitted, 10)).unwrap();
        }

        let recent = logger.read_recent(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].step, "education");
        assert_eq!(recent[1].step, "work");
    }

    #[test]
    fn test_totals() {
        let (logger, _temp) = create_test_logger();
        logger.log(&entry("family", ActivityAction::WentBack, 1000)).unwrap();
        logger.log(&entry("family", ActivityAction::Submitted, 2500)).unwrap();
        logger.log(&entry("work", ActivityAction::Submitted, 400)).unwrap();

        let totals = logger.total_time_by_step().unwrap();
        assert_eq!(totals["family"], Duration::from_millis(3500));
        assert_eq!(totals["work"], Duration::from_millis(400));

        let submissions = logger.submissions_by_step().unwrap();
        assert_eq!(submissions["family"], 1);
        assert_eq!(submissions["work"], 1);
    }

    #[test]
    fn test_empty_log() {
        let (logger, _temp) = create_test_logger();
        assert!(!logger.exists());
        assert!(logger.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_line_reports_line_number() {
        let (logger, _temp) = create_test_logger();
        logger.log(&entry("family", ActivityAction::Submitted, 1)).unwrap();
        std::fs::OpenOptions::new()
            .append(true)
            .open(logger.path())
            .and_then(|mut f| writeln!(f, "garbage"))
            .unwrap();

        let err = logger.read_all().unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
