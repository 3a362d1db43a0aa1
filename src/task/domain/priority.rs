//! Task priority levels.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Priority of an active task.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "i64", into = "i64")]
pub enum Priority {
    /// Low priority (`1`).
    #[default]
    Low,
    /// Medium priority (`2`).
    Medium,
    /// High priority (`3`).
    High,
}

impl Priority {
    /// All priorities in the order the active list presents its sections.
    pub const ALL: [Self; 3] = [Self::High, Self::Medium, Self::Low];

    /// Returns the numeric level stored for this priority.
    #[must_use]
    pub const fn value(self) -> i64 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }

    /// Returns the human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl TryFrom<i64> for Priority {
    type Error = TaskDomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Low),
            2 => Ok(Self::Medium),
            3 => Ok(Self::High),
            other => Err(TaskDomainError::InvalidPriority(other)),
        }
    }
}

impl From<Priority> for i64 {
    fn from(value: Priority) -> Self {
        value.value()
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
