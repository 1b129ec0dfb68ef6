//! Activity CLI command

use crate::activity::ActivityLogger;
use crate::config::WizardPaths;
use crate::error::WizardResult;
use crate::steps::StepKind;

/// Show recent step activity and time spent per step
pub fn handle_activity_command(paths: &WizardPaths, limit: usize) -> WizardResult<()> {
    let logger = ActivityLogger::new(paths.activity_log());
    let entries = logger.read_recent(limit)?;

    if entries.is_empty() {
        println!("No activity recorded yet.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }

    let totals = logger.total_time_by_step()?;
    let submissions = logger.submissions_by_step()?;

    println!();
    println!("{:24} {:>10} {:>12}", "Step", "Time", "Submissions");
    println!("{}", "-".repeat(48));
    for step in StepKind::ALL {
        let Some(total) = totals.get(step.key()) else {
            continue;
        };
        println!(
            "{:24} {:>9.1}s {:>12}",
            step.title(),
            total.as_secs_f64(),
            submissions.get(step.key()).copied().unwrap_or(0)
        );
    }

    Ok(())
}
