//! Interactive onboarding wizard
//!
//! Drives the onboarding steps through a [`Prompter`], one step controller
//! at a time.

pub mod flow;
pub mod input;
pub mod prompt;

pub use flow::{OnboardingWizard, WizardOutcome};
pub use input::Command;
pub use prompt::{Prompter, ScriptedPrompter, TerminalPrompter};
