//! Activity log for wizard steps
//!
//! Records how long each step was active when it was submitted, left
//! backwards, or abandoned, in an append-only JSONL file.

mod entry;
mod logger;

pub use entry::{ActivityAction, ActivityEntry};
pub use logger::ActivityLogger;
