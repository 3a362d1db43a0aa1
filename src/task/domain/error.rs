//! Error types for task domain validation and lifecycle guards.

use super::TaskId;
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task content is empty after trimming.
    #[error("task content must not be empty")]
    EmptyContent,

    /// The task content exceeds the stored title length.
    #[error("task content is {length} characters long, at most {max} are allowed")]
    ContentTooLong {
        /// Character count after trimming.
        length: usize,
        /// Maximum character count.
        max: usize,
    },

    /// The priority value is outside the supported levels.
    #[error("invalid priority {0}, expected 1 (low), 2 (medium) or 3 (high)")]
    InvalidPriority(i64),

    /// The rating is outside the one-to-five star range.
    #[error("invalid rating {0}, expected a value from 1 to 5")]
    InvalidRating(i64),

    /// The reminder time is not a valid time of day.
    #[error("invalid reminder time {hour:02}:{minute:02}")]
    InvalidReminderTime {
        /// Requested hour.
        hour: u32,
        /// Requested minute.
        minute: u32,
    },

    /// The task has already been completed.
    #[error("task {0} is already completed")]
    AlreadyCompleted(TaskId),

    /// Completed tasks are archived and can no longer be edited.
    #[error("task {0} is completed and can no longer be edited")]
    CompletedTaskIsReadOnly(TaskId),
}

impl TaskDomainError {
    /// Returns `true` when the error guards a lifecycle state rather than
    /// rejecting malformed input.
    #[must_use]
    pub const fn is_state_violation(&self) -> bool {
        matches!(
            self,
            Self::AlreadyCompleted(_) | Self::CompletedTaskIsReadOnly(_)
        )
    }
}
