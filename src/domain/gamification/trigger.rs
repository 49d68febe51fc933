//! Events that trigger an achievement evaluation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Kind of state change that preceded an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    /// An incident log was created.
    Log,
    /// The streak was incremented.
    Streak,
    /// Community activity (post, like, reply).
    Social,
    /// Explicit milestone re-check.
    Milestone,
    /// Admin or test-harness trigger.
    Manual,
}

impl TriggerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerKind::Log => "log",
            TriggerKind::Streak => "streak",
            TriggerKind::Social => "social",
            TriggerKind::Milestone => "milestone",
            TriggerKind::Manual => "manual",
        }
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TriggerKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "log" => Ok(TriggerKind::Log),
            "streak" => Ok(TriggerKind::Streak),
            "social" => Ok(TriggerKind::Social),
            "milestone" => Ok(TriggerKind::Milestone),
            "manual" | "test" => Ok(TriggerKind::Manual),
            "" => Err(ValidationError::empty_field("event_type")),
            other => Err(ValidationError::invalid_format(
                "event_type",
                format!("unknown event type '{}'", other),
            )),
        }
    }
}
