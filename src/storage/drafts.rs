//! Durable key-value store for in-progress step drafts
//!
//! Drafts are stored as serialized strings under caller-chosen keys such as
//! `onboarding.family`. Every operation is synchronous and may fail; callers
//! that treat drafts as best-effort are expected to swallow the error.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::WizardError;

use super::file_io::{read_json, write_json_atomic};

/// Key-value contract for draft persistence
pub trait DraftStore: Send + Sync {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>, WizardError>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<(), WizardError>;

    /// Remove the entry for `key`; removing a missing key is not an error
    fn delete(&self, key: &str) -> Result<(), WizardError>;

    /// All keys currently stored, sorted
    fn keys(&self) -> Result<Vec<String>, WizardError>;
}

fn lock_poisoned(e: impl std::fmt::Display) -> WizardError {
    WizardError::Storage(format!("Failed to acquire draft lock: {}", e))
}

/// In-memory draft store
#[derive(Debug, Default)]
pub struct MemoryDraftStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryDraftStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl DraftStore for MemoryDraftStore {
    fn get(&self, key: &str) -> Result<Option<String>, WizardError> {
        let entries = self.entries.read().map_err(lock_poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), WizardError> {
        let mut entries = self.entries.write().map_err(lock_poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), WizardError> {
        let mut entries = self.entries.write().map_err(lock_poisoned)?;
        entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, WizardError> {
        let entries = self.entries.read().map_err(lock_poisoned)?;
        Ok(entries.keys().cloned().collect())
    }
}

/// Draft store backed by a single JSON object file (`drafts.json`)
///
/// The whole file is rewritten atomically on every change, which keeps a
/// crash from leaving a half-written draft behind.
pub struct FileDraftStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileDraftStore {
    /// Open the store, loading any existing entries from disk
    pub fn open(path: PathBuf) -> Result<Self, WizardError> {
        let entries: BTreeMap<String, String> = read_json(&path)?;
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl DraftStore for FileDraftStore {
    fn get(&self, key: &str) -> Result<Option<String>, WizardError> {
        let entries = self.entries.read().map_err(lock_poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), WizardError> {
        let mut entries = self.entries.write().map_err(lock_poisoned)?;
        let mut next = entries.clone();
        next.insert(key.to_string(), value.to_string());
        // Memory only changes once the file has been written
        write_json_atomic(&self.path, &next)?;
        *entries = next;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), WizardError> {
        let mut entries = self.entries.write().map_err(lock_poisoned)?;
        if !entries.contains_key(key) {
            return Ok(());
        }
        let mut next = entries.clone();
        next.remove(key);
        write_json_atomic(&self.path, &next)?;
        *entries = next;
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, WizardError> {
        let entries = self.entries.read().map_err(lock_poisoned)?;
        Ok(entries.keys().cloned().collect())
    }
}
