//! Configuration module for the relocation wizard
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::WizardPaths;
pub use settings::Settings;
