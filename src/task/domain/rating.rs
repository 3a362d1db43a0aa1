//! Star rating recorded when a task is completed.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Self-assessed rating from one to five stars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Rating(u8);

impl Rating {
    /// Lowest accepted rating.
    pub const MIN: u8 = 1;
    /// Highest accepted rating.
    pub const MAX: u8 = 5;

    /// Creates a validated rating.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidRating`] when the value is outside
    /// `1..=5`.
    pub fn new(value: i64) -> Result<Self, TaskDomainError> {
        u8::try_from(value)
            .ok()
            .filter(|stars| (Self::MIN..=Self::MAX).contains(stars))
            .map(Self)
            .ok_or(TaskDomainError::InvalidRating(value))
    }

    /// Returns the number of stars.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Renders the rating as filled and empty stars, e.g. `★★★☆☆`.
    #[must_use]
    pub fn stars(self) -> String {
        let filled = usize::from(self.0);
        let empty = usize::from(Self::MAX - self.0);
        format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self(3)
    }
}

impl TryFrom<i64> for Rating {
    type Error = TaskDomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for i64 {
    fn from(value: Rating) -> Self {
        Self::from(value.0)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}
