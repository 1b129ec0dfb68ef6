//! Options for building a step controller

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::draft::{StepData, StepDraft, ValidationErrors};
use crate::config::Settings;
use crate::error::WizardResult;
use crate::storage::DraftStore;

/// Default quiet period before an autosave write
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Pure function from a draft to its sparse error map
pub type Validator = Arc<dyn Fn(&StepDraft) -> ValidationErrors + Send + Sync>;

/// Navigation or notification hook supplied by the host
pub type Callback = Arc<dyn Fn() + Send + Sync>;

/// The authoritative save operation for a step
#[async_trait]
pub trait StepSaver<T: StepData>: Send + Sync {
    async fn save(&self, data: T) -> WizardResult<()>;
}

#[async_trait]
impl<T, F, Fut> StepSaver<T> for F
where
    T: StepData,
    F: Fn(T) -> Fut + Send + Sync,
    Fut: Future<Output = WizardResult<()>> + Send + 'static,
{
    async fn save(&self, data: T) -> WizardResult<()> {
        (self)(data).await
    }
}

/// Where drafts are persisted between edits
#[derive(Clone)]
pub(crate) struct Persistence {
    pub(crate) store: Arc<dyn DraftStore>,
    pub(crate) key: String,
}

/// Builder for [`StepController`](super::StepController) options
pub struct StepOptions<T: StepData> {
    pub(crate) label: String,
    pub(crate) saver: Arc<dyn StepSaver<T>>,
    pub(crate) validator: Option<Validator>,
    pub(crate) on_next: Option<Callback>,
    pub(crate) on_previous: Option<Callback>,
    pub(crate) on_saved: Option<Callback>,
    pub(crate) persistence: Option<Persistence>,
    pub(crate) autosave: bool,
    pub(crate) debounce: Duration,
}

impl<T: StepData> StepOptions<T> {
    /// Create options around the step's save operation
    pub fn new(saver: impl StepSaver<T> + 'static) -> Self {
        Self {
            label: "step".to_string(),
            saver: Arc::new(saver),
            validator: None,
            on_next: None,
            on_previous: None,
            on_saved: None,
            persistence: None,
            autosave: true,
            debounce: DEFAULT_DEBOUNCE,
        }
    }

    /// Name used in log output
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the validation function
    pub fn validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&StepDraft) -> ValidationErrors + Send + Sync + 'static,
    {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Called after a successful submit
    pub fn on_next<F: Fn() + Send + Sync + 'static>(mut self, f: F) -> Self {
        self.on_next = Some(Arc::new(f));
        self
    }

    /// Called when the user navigates back
    pub fn on_previous<F: Fn() + Send + Sync + 'static>(mut self, f: F) -> Self {
        self.on_previous = Some(Arc::new(f));
        self
    }

    /// Called after the save operation resolves, before `on_next`
    pub fn on_saved<F: Fn() + Send + Sync + 'static>(mut self, f: F) -> Self {
        self.on_saved = Some(Arc::new(f));
        self
    }

    /// Persist drafts to `store` under `key`
    pub fn persist(mut self, store: Arc<dyn DraftStore>, key: impl Into<String>) -> Self {
        self.persistence = Some(Persistence {
            store,
            key: key.into(),
        });
        self
    }

    /// Enable or disable autosave
    pub fn autosave(mut self, enabled: bool) -> Self {
        self.autosave = enabled;
        self
    }

    /// Set the autosave debounce delay
    pub fn debounce(mut self, delay: Duration) -> Self {
        self.debounce = delay;
        self
    }

    /// Take autosave preferences from user settings
    pub fn with_settings(self, settings: &Settings) -> Self {
        self.autosave(settings.autosave).debounce(settings.debounce())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WizardError;
    use crate::storage::MemoryDraftStore;
    use serde_json::json;

    fn noop_options() -> StepOptions<StepDraft> {
        StepOptions::new(|_: StepDraft| async { Ok::<(), WizardError>(()) })
    }

    #[tokio::test]
    async fn test_closure_saver() {
        let saver = |draft: StepDraft| async move {
            assert_eq!(draft.text("hasPartner"), Some("No"));
            Ok::<(), WizardError>(())
        };
        let draft = StepDraft::from_value(json!({"hasPartner": "No"})).unwrap();
        StepSaver::<StepDraft>::save(&saver, draft).await.unwrap();
    }

    #[test]
    fn test_defaults() {
        let options = noop_options();
        assert!(options.autosave);
        assert_eq!(options.debounce, DEFAULT_DEBOUNCE);
        assert!(options.persistence.is_none());
        assert!(options.validator.is_none());
    }

    #[test]
    fn test_with_settings() {
        let mut settings = Settings::default();
        settings.autosave = false;
        settings.autosave_debounce_ms = 250;

        let options = noop_options()
            .persist(Arc::new(MemoryDraftStore::new()), "onboarding.family")
            .with_settings(&settings);

        assert!(!options.autosave);
        assert_eq!(options.debounce, Duration::from_millis(250));
        assert_eq!(
            options.persistence.as_ref().map(|p| p.key.as_str()),
            Some("onboarding.family")
        );
    }
}
