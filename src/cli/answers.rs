//! Answer CLI command
//!
//! Prints submitted answers, step by step, with field labels.

use crate::error::WizardResult;
use crate::steps::StepKind;
use crate::storage::Storage;
use crate::wizard::input::display_value;

/// Print submitted answers, for one step or all of them
pub fn handle_answers_command(storage: &Storage, step: Option<StepKind>) -> WizardResult<()> {
    let steps: Vec<StepKind> = match step {
        Some(step) => vec![step],
        None => StepKind::ALL.to_vec(),
    };

    for step in steps {
        println!("{}", step.title());
        println!("{}", "-".repeat(step.title().len()));

        let Some(stored) = storage.answers.get_step(step.key())? else {
            println!("  (not submitted)");
            println!();
            continue;
        };

        for field in step.fields() {
            let value = stored
                .answers
                .get(field.name)
                .map(display_value)
                .unwrap_or_default();
            println!("  {:45} {}", field.label, value);
        }
        println!(
            "  Submitted {}",
            stored.submitted_at.format("%Y-%m-%d %H:%M")
        );
        println!();
    }

    Ok(())
}
