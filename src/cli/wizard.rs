//! CLI command running the interactive wizard

use std::sync::Arc;

use crate::activity::ActivityLogger;
use crate::config::{Settings, WizardPaths};
use crate::error::WizardResult;
use crate::steps::StepKind;
use crate::storage::{DraftStore, Storage};
use crate::wizard::{OnboardingWizard, TerminalPrompter, WizardOutcome};

/// Run the wizard on the terminal, starting at `step` or the first
/// unanswered step
pub async fn handle_wizard_command(
    storage: &Storage,
    paths: &WizardPaths,
    settings: &mut Settings,
    step: Option<StepKind>,
    no_autosave: bool,
) -> WizardResult<WizardOutcome> {
    let drafts: Arc<dyn DraftStore> = storage.drafts.clone();
    let wizard = OnboardingWizard::new(drafts, Arc::clone(&storage.answers))
        .with_activity_log(ActivityLogger::new(paths.activity_log()));

    let start = match step {
        Some(step) => step,
        None => wizard.first_unanswered()?,
    };

    // --no-autosave applies to this run only
    let mut run_settings = settings.clone();
    if no_autosave {
        run_settings.autosave = false;
    }

    let mut prompter = TerminalPrompter;
    let outcome = wizard.run(&mut prompter, &mut run_settings, start).await?;

    if run_settings.onboarding_completed && !settings.onboarding_completed {
        settings.onboarding_completed = true;
        settings.save(paths)?;
    }

    Ok(outcome)
}
