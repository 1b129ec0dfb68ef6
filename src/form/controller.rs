//! Step form controller
//!
//! Owns one wizard step's draft for as long as the step is mounted: field
//! edits, validation, touched tracking, debounced draft persistence, and the
//! submit / previous navigation flow around the caller's save operation.
//!
//! The controller is a cheap, cloneable handle. Clones share state, so a
//! second `submit()` issued while the first is still awaiting its save is
//! observed and turned into a no-op.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde_json::Value;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::autosave::{AutosaveState, Autosaver};
use super::draft::{StepData, StepDraft, TouchedFields, ValidationErrors};
use super::options::{Callback, StepOptions, StepSaver, Validator};
use crate::error::WizardResult;

/// Result of a submit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Saved, draft cleared and `on_next` invoked
    Completed,
    /// Validation failed; every declared field is now touched
    Invalid(ValidationErrors),
    /// Another submit is still in flight
    AlreadySubmitting,
}

impl SubmitOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

struct FormState {
    draft: StepDraft,
    errors: ValidationErrors,
    touched: TouchedFields,
    submitting: bool,
    mounted: bool,
    active_since: Option<Instant>,
    time_spent: Duration,
    autosaver: Option<Autosaver>,
}

impl FormState {
    /// Fold the running active segment into the total
    fn accumulate_time(&mut self, restart: bool) {
        if let Some(since) = self.active_since.take() {
            let now = Instant::now();
            self.time_spent += now.saturating_duration_since(since);
            if restart {
                self.active_since = Some(now);
            }
        }
    }
}

struct Inner<T: StepData> {
    label: String,
    declared: Vec<String>,
    saver: Arc<dyn StepSaver<T>>,
    validator: Option<Validator>,
    on_next: Option<Callback>,
    on_previous: Option<Callback>,
    on_saved: Option<Callback>,
    autosave: bool,
    state: Mutex<FormState>,
}

/// Controller for a single wizard step
pub struct StepController<T: StepData> {
    inner: Arc<Inner<T>>,
}

impl<T: StepData> Clone for StepController<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Resets the submitting flag however `submit` exits
struct SubmittingGuard<'a> {
    state: &'a Mutex<FormState>,
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.submitting = false;
    }
}

impl<T: StepData> StepController<T> {
    /// Mount a controller for a step.
    ///
    /// The declared field set is the shape of `initial`. If a persisted
    /// snapshot exists for the configured key it is merged over the initial
    /// values. Fails only if `T` does not serialize to a JSON object.
    pub fn new(initial: T, options: StepOptions<T>) -> WizardResult<Self> {
        let mut draft = StepDraft::from_data(&initial)?;
        let declared: Vec<String> = draft.field_names().map(str::to_string).collect();

        let autosaver = options
            .persistence
            .map(|p| Autosaver::new(p, options.debounce));

        if let Some(snapshot) = autosaver.as_ref().and_then(Autosaver::load) {
            debug!(step = %options.label, fields = snapshot.len(), "Restoring draft snapshot");
            draft.merge_snapshot(snapshot);
        }

        Ok(Self {
            inner: Arc::new(Inner {
                label: options.label,
                declared,
                saver: options.saver,
                validator: options.validator,
                on_next: options.on_next,
                on_previous: options.on_previous,
                on_saved: options.on_saved,
                autosave: options.autosave,
                state: Mutex::new(FormState {
                    draft,
                    errors: ValidationErrors::new(),
                    touched: TouchedFields::new(),
                    submitting: false,
                    mounted: true,
                    active_since: Some(Instant::now()),
                    time_spent: Duration::ZERO,
                    autosaver,
                }),
            }),
        })
    }

    fn state(&self) -> MutexGuard<'_, FormState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn run_validator(&self, draft: &StepDraft) -> ValidationErrors {
        match &self.inner.validator {
            Some(validate) => validate(draft),
            None => ValidationErrors::new(),
        }
    }

    fn after_change(&self, state: &mut FormState) {
        if !self.inner.autosave {
            return;
        }
        let draft = state.draft.clone();
        if let Some(autosaver) = state.autosaver.as_mut() {
            autosaver.schedule(draft);
        }
    }

    /// Label used in log output
    pub fn label(&self) -> &str {
        &self.inner.label
    }

    /// Fields declared by the initial data, in order
    pub fn declared_fields(&self) -> &[String] {
        &self.inner.declared
    }

    /// Overwrite one field, mark it touched and clear its error.
    ///
    /// Names that are not in the draft are ignored.
    pub fn set_field(&self, name: &str, value: impl Into<Value>) {
        let mut state = self.state();
        if !state.draft.contains(name) {
            warn!(step = %self.inner.label, field = name, "Ignoring edit to undeclared field");
            return;
        }
        state.draft.insert(name, value.into());
        state.touched.touch(name);
        state.errors.remove(name);
        self.after_change(&mut state);
    }

    /// Replace the draft with a full set of step values.
    ///
    /// Keys outside the current draft shape are dropped.
    pub fn set_data(&self, data: &T) -> WizardResult<()> {
        let incoming = StepDraft::from_data(data)?;
        let mut state = self.state();
        for (name, value) in incoming.iter() {
            if state.draft.contains(name) {
                state.draft.insert(name, value.clone());
            }
        }
        self.after_change(&mut state);
        Ok(())
    }

    /// Overwrite an array field wholesale.
    ///
    /// Unlike `set_field` this neither marks the field touched nor clears its
    /// error.
    pub fn set_array_field<V: Into<Value>>(&self, name: &str, values: Vec<V>) {
        let mut state = self.state();
        if !state.draft.contains(name) {
            warn!(step = %self.inner.label, field = name, "Ignoring edit to undeclared field");
            return;
        }
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        state.draft.insert(name, Value::Array(values));
        self.after_change(&mut state);
    }

    /// Append an item to an array field. Returns false if the field is not
    /// an array.
    pub fn add_array_item(&self, name: &str, item: impl Into<Value>) -> bool {
        let mut state = self.state();
        let Some(items) = state.draft.array_mut(name) else {
            return false;
        };
        items.push(item.into());
        self.after_change(&mut state);
        true
    }

    /// Remove the item at `index` from an array field. Returns false if the
    /// field is not an array or the index is out of bounds.
    pub fn remove_array_item(&self, name: &str, index: usize) -> bool {
        let mut state = self.state();
        match state.draft.array_mut(name) {
            Some(items) if index < items.len() => {
                items.remove(index);
            }
            _ => return false,
        }
        self.after_change(&mut state);
        true
    }

    /// Run the validator over the current draft and store the result
    pub fn validate_all(&self) -> ValidationErrors {
        let mut state = self.state();
        let errors = self.run_validator(&state.draft);
        state.errors = errors.clone();
        errors
    }

    /// Run the validator and keep only one field's message
    pub fn validate_field(&self, name: &str) -> Option<String> {
        let mut state = self.state();
        let message = self
            .run_validator(&state.draft)
            .get(name)
            .map(str::to_string);
        state.errors.set_field(name, message.clone());
        message
    }

    /// Validate, save, clear the persisted draft and advance.
    ///
    /// A save failure is returned unchanged; the controller stays usable
    /// and the persisted draft is kept.
    pub async fn submit(&self) -> WizardResult<SubmitOutcome> {
        let draft = {
            let mut state = self.state();
            if state.submitting {
                debug!(step = %self.inner.label, "Submit already in flight");
                return Ok(SubmitOutcome::AlreadySubmitting);
            }

            let errors = self.run_validator(&state.draft);
            state.errors = errors.clone();
            if !errors.is_empty() {
                state
                    .touched
                    .touch_all(self.inner.declared.iter().map(String::as_str));
                return Ok(SubmitOutcome::Invalid(errors));
            }

            state.submitting = true;
            state.accumulate_time(true);
            state.draft.clone()
        };
        let _guard = SubmittingGuard {
            state: &self.inner.state,
        };

        let data: T = draft.to_data()?;
        self.inner.saver.save(data).await?;

        let mounted = loop {
            let pending = {
                let mut state = self.state();
                match state.autosaver.as_mut().and_then(Autosaver::take_pending) {
                    Some(handle) => handle,
                    None => {
                        if let Some(autosaver) = state.autosaver.as_mut() {
                            autosaver.clear();
                        }
                        break state.mounted;
                    }
                }
            };
            // A timer already writing must finish before the entry is deleted
            let _ = pending.await;
        };
        if !mounted {
            // The host navigated away while the save was pending; callbacks
            // still run against it.
            warn!(step = %self.inner.label, "Step submit completed after unmount");
        }

        info!(
            step = %self.inner.label,
            time_spent_ms = millis(self.time_spent()),
            "Step submitted"
        );

        if let Some(on_saved) = &self.inner.on_saved {
            on_saved();
        }
        if let Some(on_next) = &self.inner.on_next {
            on_next();
        }

        Ok(SubmitOutcome::Completed)
    }

    /// Navigate back. No validation, no submit-state check.
    pub fn previous(&self) {
        if let Some(on_previous) = &self.inner.on_previous {
            on_previous();
        }
    }

    /// Detach the step: stop the activity clock and write out any pending
    /// draft. An in-flight submit is not cancelled.
    pub fn unmount(&self) {
        let mut state = self.state();
        if !state.mounted {
            return;
        }
        state.mounted = false;
        state.accumulate_time(false);
        if let Some(autosaver) = state.autosaver.as_mut() {
            autosaver.flush();
        }
    }

    /// Total time the step has been active, as of the last submit or unmount
    pub fn time_spent(&self) -> Duration {
        self.state().time_spent
    }

    /// Current draft
    pub fn draft(&self) -> StepDraft {
        self.state().draft.clone()
    }

    /// Current draft as the typed step
    pub fn data(&self) -> WizardResult<T> {
        self.state().draft.to_data()
    }

    /// Errors from the last validation
    pub fn errors(&self) -> ValidationErrors {
        self.state().errors.clone()
    }

    /// Fields marked touched so far
    pub fn touched(&self) -> TouchedFields {
        self.state().touched.clone()
    }

    /// The error for a field, only once the field has been touched
    pub fn visible_error(&self, name: &str) -> Option<String> {
        let state = self.state();
        if !state.touched.is_touched(name) {
            return None;
        }
        state.errors.get(name).map(str::to_string)
    }

    pub fn is_submitting(&self) -> bool {
        self.state().submitting
    }

    pub fn is_mounted(&self) -> bool {
        self.state().mounted
    }

    /// Autosave timer state; `Idle` when no persistence is configured
    pub fn autosave_state(&self) -> AutosaveState {
        self.state()
            .autosaver
            .as_ref()
            .map_or(AutosaveState::Idle, Autosaver::state)
    }

    /// Draft store key, if persistence is configured
    pub fn persistence_key(&self) -> Option<String> {
        self.state()
            .autosaver
            .as_ref()
            .map(|a| a.key().to_string())
    }
}

/// Milliseconds for log fields, saturating at `u64::MAX`
fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
