//! Activity entry data structures

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What happened to a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityAction {
    /// Step answers were saved and the wizard moved on
    Submitted,
    /// The user went back to the previous step
    WentBack,
    /// The wizard was quit while on this step
    Abandoned,
}

impl std::fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ActivityAction::Submitted => "SUBMITTED",
            ActivityAction::WentBack => "WENT BACK",
            ActivityAction::Abandoned => "ABANDONED",
        };
        f.pad(label)
    }
}

/// A single activity log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// When the action happened (UTC)
    pub timestamp: DateTime<Utc>,

    /// Wizard run this entry belongs to
    pub session_id: Uuid,

    /// Step key
    pub step: String,

    pub action: ActivityAction,

    /// Time the step had been active when the action happened
    pub time_spent_ms: u64,
}

impl ActivityEntry {
    /// Create an entry stamped with the current time
    pub fn new(
        session_id: Uuid,
        step: impl Into<String>,
        action: ActivityAction,
        time_spent: Duration,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            session_id,
            step: step.into(),
            action,
            time_spent_ms: u64::try_from(time_spent.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Time spent as a Duration
    pub fn time_spent(&self) -> Duration {
        Duration::from_millis(self.time_spent_ms)
    }

    /// Format as a single human-readable line
    pub fn format_human_readable(&self) -> String {
        format!(
            "[{}] {:<10} {:<14} {:>6.1}s  session {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.action,
            self.step,
            self.time_spent_ms as f64 / 1000.0,
            &self.session_id.to_string()[..8],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_spent_round_trip() {
        let entry = ActivityEntry::new(
            Uuid::new_v4(),
            "family",
            ActivityAction::Submitted,
            Duration::from_millis(4250),
        );
        assert_eq!(entry.time_spent_ms, 4250);
        assert_eq!(entry.time_spent(), Duration::from_millis(4250));
    }

    #[test]
    fn test_serialization_uses_lowercase_actions() {
        let entry = ActivityEntry::new(
            Uuid::new_v4(),
            "work",
            ActivityAction::WentBack,
            Duration::ZERO,
        );
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"action\":\"wentback\""));

        let parsed: ActivityEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.action, ActivityAction::WentBack);
        assert_eq!(parsed.step, "work");
    }

    #[test]
    fn test_human_readable() {
        let entry = ActivityEntry::new(
            Uuid::new_v4(),
            "money",
            ActivityAction::Submitted,
            Duration::from_millis(1500),
        );
        let line = entry.format_human_readable();
        assert!(line.contains("SUBMITTED"));
        assert!(line.contains("money"));
        assert!(line.contains("1.5s"));
    }
}
