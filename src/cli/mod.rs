//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with storage and the wizard.

pub mod activity;
pub mod answers;
pub mod drafts;
pub mod export;
pub mod wizard;

pub use activity::handle_activity_command;
pub use answers::handle_answers_command;
pub use drafts::{handle_drafts_command, DraftCommands};
pub use export::handle_export_command;
pub use wizard::handle_wizard_command;
