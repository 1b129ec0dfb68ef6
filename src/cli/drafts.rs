//! Draft CLI commands
//!
//! Inspect and discard in-progress step drafts.

use clap::Subcommand;

use crate::config::Settings;
use crate::error::WizardResult;
use crate::form::StepDraft;
use crate::steps::StepKind;
use crate::storage::{DraftStore, Storage};

/// Draft subcommands
#[derive(Subcommand, Debug)]
pub enum DraftCommands {
    /// List steps with a saved draft
    List,
    /// Show the draft for a step
    Show {
        /// Step name (e.g. family, general-info)
        step: StepKind,
    },
    /// Discard drafts
    Clear {
        /// Only clear this step's draft
        step: Option<StepKind>,
    },
}

/// Handle a draft command
pub fn handle_drafts_command(
    storage: &Storage,
    settings: &Settings,
    cmd: DraftCommands,
) -> WizardResult<()> {
    let store = storage.drafts.as_ref();

    match cmd {
        DraftCommands::List => {
            let mut found = 0;
            for step in StepKind::ALL {
                let Some(raw) = store.get(&settings.draft_key(step.key()))? else {
                    continue;
                };
                let filled = StepDraft::parse(&raw)
                    .map(|draft| draft.field_names().filter(|f| !draft.is_blank(f)).count())
                    .unwrap_or(0);
                println!("{:14} {:24} {} answered", step.key(), step.title(), filled);
                found += 1;
            }

            if found == 0 {
                println!("No drafts saved.");
            }
        }

        DraftCommands::Show { step } => {
            match store.get(&settings.draft_key(step.key()))? {
                Some(raw) => {
                    let draft = StepDraft::parse(&raw)?;
                    println!("{}", serde_json::to_string_pretty(&draft)?);
                }
                None => println!("No draft for {}.", step.title()),
            }
        }

        DraftCommands::Clear { step: Some(step) } => {
            store.delete(&settings.draft_key(step.key()))?;
            println!("Cleared draft for {}.", step.title());
        }

        DraftCommands::Clear { step: None } => {
            let prefix = format!("{}.", settings.draft_namespace);
            let mut cleared = 0;
            for key in store.keys()? {
                if key.starts_with(&prefix) {
                    store.delete(&key)?;
                    cleared += 1;
                }
            }
            println!("Cleared {} draft(s).", cleared);
        }
    }

    Ok(())
}
