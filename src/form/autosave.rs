//! Debounced draft persistence
//!
//! One outstanding timer per controller. Every change aborts the armed
//! timer and re-arms it with the latest draft, so only the last edit inside
//! the delay window is written. Write failures are logged and dropped.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::draft::StepDraft;
use super::options::Persistence;
use crate::storage::DraftStore;

/// Autosave timer state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutosaveState {
    /// No write pending
    Idle,
    /// Timer armed, a write will happen when it fires
    PendingWrite,
}

pub(crate) struct Autosaver {
    store: Arc<dyn DraftStore>,
    key: String,
    delay: Duration,
    pending: Option<JoinHandle<()>>,
    /// Draft held by the armed timer, kept for flushing on unmount
    latest: Option<StepDraft>,
}

impl Autosaver {
    pub(crate) fn new(persistence: Persistence, delay: Duration) -> Self {
        Self {
            store: persistence.store,
            key: persistence.key,
            delay,
            pending: None,
            latest: None,
        }
    }

    pub(crate) fn key(&self) -> &str {
        &self.key
    }

    /// Read the persisted snapshot, if any. Unreadable snapshots are ignored.
    pub(crate) fn load(&self) -> Option<StepDraft> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read draft snapshot");
                return None;
            }
        };

        match StepDraft::parse(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!(key = %self.key, error = %e, "Ignoring unreadable draft snapshot");
                None
            }
        }
    }

    pub(crate) fn state(&self) -> AutosaveState {
        match &self.pending {
            Some(handle) if !handle.is_finished() => AutosaveState::PendingWrite,
            _ => AutosaveState::Idle,
        }
    }

    /// Arm (or re-arm) the timer with the current draft
    pub(crate) fn schedule(&mut self, draft: StepDraft) {
        self.cancel();

        let Ok(runtime) = Handle::try_current() else {
            // No runtime to run a timer on; write through
            write_snapshot(self.store.as_ref(), &self.key, &draft);
            return;
        };

        let store = Arc::clone(&self.store);
        let key = self.key.clone();
        let delay = self.delay;
        self.latest = Some(draft.clone());
        self.pending = Some(runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            write_snapshot(store.as_ref(), &key, &draft);
        }));
    }

    /// Abort the armed timer; returns whether one was pending
    pub(crate) fn cancel(&mut self) -> bool {
        let was_pending = self.state() == AutosaveState::PendingWrite;
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        self.latest = None;
        was_pending
    }

    /// Write a pending draft immediately instead of waiting for the timer
    pub(crate) fn flush(&mut self) {
        let latest = self.latest.take();
        if self.cancel() {
            if let Some(draft) = latest {
                write_snapshot(self.store.as_ref(), &self.key, &draft);
            }
        }
    }

    /// Abort the armed timer and hand back its task.
    ///
    /// Abort cannot stop a task that is already inside the store write, so
    /// callers that delete the entry afterwards must await the handle first.
    pub(crate) fn take_pending(&mut self) -> Option<JoinHandle<()>> {
        self.latest = None;
        let handle = self.pending.take()?;
        handle.abort();
        Some(handle)
    }

    /// Drop the pending write and delete the persisted entry
    pub(crate) fn clear(&mut self) {
        self.cancel();
        if let Err(e) = self.store.delete(&self.key) {
            warn!(key = %self.key, error = %e, "Failed to clear draft snapshot");
        }
    }
}

impl Drop for Autosaver {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

fn write_snapshot(store: &dyn DraftStore, key: &str, draft: &StepDraft) {
    let raw = match serde_json::to_string(draft) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(key, error = %e, "Failed to serialize draft");
            return;
        }
    };

    match store.set(key, &raw) {
        Ok(()) => debug!(key, fields = draft.len(), "Draft autosaved"),
        Err(e) => warn!(key, error = %e, "Failed to autosave draft"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryDraftStore;
    use serde_json::json;

    fn autosaver(store: &Arc<MemoryDraftStore>) -> Autosaver {
        let store: Arc<dyn DraftStore> = store.clone();
        Autosaver::new(
            Persistence {
                store,
                key: "onboarding.work".to_string(),
            },
            Duration::from_millis(500),
        )
    }

    fn draft(occupation: &str) -> StepDraft {
        StepDraft::from_value(json!({ "occupation": occupation })).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_write_happens_after_delay() {
        let store = Arc::new(MemoryDraftStore::new());
        let mut saver = autosaver(&store);

        saver.schedule(draft("Nurse"));
        assert_eq!(saver.state(), AutosaveState::PendingWrite);

        tokio::time::sleep(Duration::from_millis(499)).await;
        assert_eq!(store.get("onboarding.work").unwrap(), None);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(
            store.get("onboarding.work").unwrap().as_deref(),
            Some(r#"{"occupation":"Nurse"}"#)
        );
        assert_eq!(saver.state(), AutosaveState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_is_last_write_wins() {
        let store = Arc::new(MemoryDraftStore::new());
        let mut saver = autosaver(&store);

        saver.schedule(draft("Nur"));
        tokio::time::sleep(Duration::from_millis(300)).await;
        saver.schedule(draft("Nurse"));
        tokio::time::sleep(Duration::from_millis(300)).await;

        // First timer was cancelled, second has not fired yet
        assert_eq!(store.get("onboarding.work").unwrap(), None);

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(
            store.get("onboarding.work").unwrap().as_deref(),
            Some(r#"{"occupation":"Nurse"}"#)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_cancels_pending_and_deletes() {
        let store = Arc::new(MemoryDraftStore::new());
        store.set("onboarding.work", "{}").unwrap();
        let mut saver = autosaver(&store);

        saver.schedule(draft("Nurse"));
        saver.clear();
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(store.get("onboarding.work").unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_flush_writes_immediately() {
        let store = Arc::new(MemoryDraftStore::new());
        let mut saver = autosaver(&store);

        saver.schedule(draft("Architect"));
        saver.flush();

        assert_eq!(saver.state(), AutosaveState::Idle);
        assert_eq!(
            store.get("onboarding.work").unwrap().as_deref(),
            Some(r#"{"occupation":"Architect"}"#)
        );
    }

    #[test]
    fn test_without_runtime_writes_through() {
        let store = Arc::new(MemoryDraftStore::new());
        let mut saver = autosaver(&store);

        saver.schedule(draft("Pilot"));

        assert_eq!(saver.state(), AutosaveState::Idle);
        assert!(store.get("onboarding.work").unwrap().is_some());
    }

    #[test]
    fn test_load_ignores_garbage() {
        let store = Arc::new(MemoryDraftStore::new());
        store.set("onboarding.work", "not json").unwrap();
        let saver = autosaver(&store);

        assert!(saver.load().is_none());
    }
}
