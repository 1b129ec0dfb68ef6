//! relocate-wizard - step-by-step onboarding for people planning a move abroad
//!
//! This library provides the core of the relocation onboarding wizard: a
//! per-step form controller with validation, touched-field tracking and
//! debounced draft autosave, plus the onboarding steps, storage and the
//! terminal wizard that drives them.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `form`: The step controller and its draft, validation and autosave types
//! - `steps`: The onboarding steps and their validators
//! - `storage`: JSON file storage for drafts and submitted answers
//! - `activity`: Append-only log of time spent per step
//! - `wizard`: Interactive orchestration over a prompter
//! - `export`: JSON and YAML export of submitted answers
//! - `cli`: Command handlers for the `relocate` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use relocate_wizard::form::{StepController, StepOptions};
//! use relocate_wizard::steps::{Family, OnboardingStep};
//!
//! let controller = StepController::new(
//!     Family::default(),
//!     StepOptions::new(|family: Family| async move { save(family).await })
//!         .validator(Family::validate)
//!         .persist(store, "onboarding.family"),
//! )?;
//! controller.set_field("hasPartner", "No");
//! controller.submit().await?;
//! ```

pub mod activity;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod form;
pub mod steps;
pub mod storage;
pub mod wizard;

pub use error::{WizardError, WizardResult};
