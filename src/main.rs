use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use relocate_wizard::cli::{
    handle_activity_command, handle_answers_command, handle_drafts_command,
    handle_export_command, handle_wizard_command, DraftCommands,
};
use relocate_wizard::config::{Settings, WizardPaths};
use relocate_wizard::export::ExportFormat;
use relocate_wizard::steps::StepKind;
use relocate_wizard::storage::Storage;
use relocate_wizard::wizard::WizardOutcome;

#[derive(Parser)]
#[command(
    name = "relocate",
    author = "Kaylee Beyene",
    version,
    about = "Step-by-step onboarding for moving abroad",
    long_about = "relocate walks you through the questions a visa or relocation \
                  advisor needs answered: who you are, your family, education, \
                  work, money and ancestry. Answers are saved as drafts while you \
                  type, so you can stop and come back at any time."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the onboarding wizard
    #[command(alias = "start")]
    Wizard {
        /// Step to start at (defaults to the first unanswered step)
        #[arg(short, long)]
        step: Option<StepKind>,
        /// Don't save drafts while typing
        #[arg(long)]
        no_autosave: bool,
    },

    /// Show submitted answers
    Answers {
        /// Only show this step
        step: Option<StepKind>,
    },

    /// Draft management commands
    #[command(subcommand)]
    Drafts(DraftCommands),

    /// Export submitted answers
    Export {
        /// Export format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,
        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show recent wizard activity
    Activity {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show current configuration and paths
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = WizardPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Wizard { step, no_autosave }) => {
            let outcome =
                handle_wizard_command(&storage, &paths, &mut settings, step, no_autosave).await?;
            if let WizardOutcome::Quit { at } = outcome {
                println!("Run 'relocate wizard' to continue from {}.", at.title());
            }
        }
        Some(Commands::Answers { step }) => {
            handle_answers_command(&storage, step)?;
        }
        Some(Commands::Drafts(cmd)) => {
            handle_drafts_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Export { format, output }) => {
            handle_export_command(&storage, format, output)?;
        }
        Some(Commands::Activity { limit }) => {
            handle_activity_command(&paths, limit)?;
        }
        Some(Commands::Config) => {
            println!("relocate configuration");
            println!("======================");
            println!("Data directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Drafts file:    {}", paths.drafts_file().display());
            println!("Answers file:   {}", paths.answers_file().display());
            println!("Activity log:   {}", paths.activity_log().display());
            println!();
            println!("Settings:");
            println!("  Autosave:             {}", settings.autosave);
            println!("  Autosave debounce:    {} ms", settings.autosave_debounce_ms);
            println!("  Draft namespace:      {}", settings.draft_namespace);
            println!("  Onboarding completed: {}", settings.onboarding_completed);
        }
        None => {
            println!("relocate - step-by-step onboarding for moving abroad");
            println!();
            println!("Run 'relocate --help' for usage information.");
            println!("Run 'relocate wizard' to start or continue the onboarding.");
        }
    }

    Ok(())
}
