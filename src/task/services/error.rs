//! Service-level errors shared by task orchestration services.

use crate::task::{
    domain::{TaskDomainError, TaskId},
    ports::TaskRepositoryError,
};
use thiserror::Error;

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation or a lifecycle guard failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// No task exists with the given identifier.
    #[error("task {0} not found")]
    NotFound(TaskId),
}

/// Result type for task service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Coarse error category reported to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskErrorKind {
    /// The input was rejected; nothing changed.
    Validation,
    /// The operation referenced an unknown or stale task.
    NotFound,
    /// The task is not in a state that allows the operation.
    InvalidState,
    /// Storage failed.
    Persistence,
}

impl TaskLifecycleError {
    /// Returns the category of this error.
    #[must_use]
    pub const fn kind(&self) -> TaskErrorKind {
        match self {
            Self::Domain(err) if err.is_state_violation() => TaskErrorKind::InvalidState,
            Self::Domain(_) => TaskErrorKind::Validation,
            Self::NotFound(_) | Self::Repository(TaskRepositoryError::NotFound(_)) => {
                TaskErrorKind::NotFound
            }
            Self::Repository(_) => TaskErrorKind::Persistence,
        }
    }

    /// Maps a repository error, lifting `NotFound` to the service variant.
    pub(crate) fn from_repository(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(id) => Self::NotFound(id),
            other => Self::Repository(other),
        }
    }
}
