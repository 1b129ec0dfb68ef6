//! CLI command for answer export

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use crate::error::{WizardError, WizardResult};
use crate::export::{export_answers, ExportFormat};
use crate::storage::Storage;

/// Export submitted answers to a file, or stdout when no file is given
pub fn handle_export_command(
    storage: &Storage,
    format: ExportFormat,
    output: Option<PathBuf>,
) -> WizardResult<()> {
    match output {
        Some(path) => {
            let file = File::create(&path).map_err(|e| {
                WizardError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            export_answers(&storage.answers, format, &mut writer)?;
            writer
                .flush()
                .map_err(|e| WizardError::Export(e.to_string()))?;
            println!("Answers exported to: {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            export_answers(&storage.answers, format, &mut writer)?;
            writeln!(writer).map_err(|e| WizardError::Export(e.to_string()))?;
        }
    }

    Ok(())
}
