//! Step form state management
//!
//! A [`StepController`] owns one wizard step's draft: field edits, validation,
//! touched-field tracking, debounced draft persistence, and submission.

pub mod autosave;
pub mod controller;
pub mod draft;
pub mod options;

pub use autosave::AutosaveState;
pub use controller::{StepController, SubmitOutcome};
pub use draft::{StepData, StepDraft, TouchedFields, ValidationErrors};
pub use options::{Callback, StepOptions, StepSaver, Validator, DEFAULT_DEBOUNCE};
