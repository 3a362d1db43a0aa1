//! Repository port for task persistence, querying, and change feeds.

use crate::task::domain::{Task, TaskId, TaskQuery};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::broadcast;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Receiving half of a repository change feed.
pub type TaskChangeReceiver = broadcast::Receiver<TaskChange>;

/// Task persistence contract.
///
/// Every mutating call has completed its write when it returns, so a
/// subsequent [`TaskRepository::query`] observes the change.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Removes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist, including when it has already been removed.
    async fn remove(&self, id: TaskId) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns the tasks matching the query, in the query's sort order.
    async fn query(&self, query: &TaskQuery) -> TaskRepositoryResult<Vec<Task>>;

    /// Subscribes to changes committed after this call.
    fn subscribe(&self) -> TaskChangeReceiver;
}

/// A committed repository mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskChange {
    /// A task was stored.
    Stored(TaskId),
    /// A task was updated.
    Updated(TaskId),
    /// A task was removed.
    Removed(TaskId),
}

impl TaskChange {
    /// Returns the identifier of the affected task.
    #[must_use]
    pub const fn task_id(self) -> TaskId {
        match self {
            Self::Stored(id) | Self::Updated(id) | Self::Removed(id) => id,
        }
    }
}

/// Broadcast fan-out used by adapters to publish committed changes.
#[derive(Debug, Clone)]
pub struct TaskChangeFeed {
    sender: broadcast::Sender<TaskChange>,
}

impl TaskChangeFeed {
    /// Buffered changes per subscriber before it starts lagging.
    pub const DEFAULT_CAPACITY: usize = 64;

    /// Creates a feed buffering up to `capacity` changes per subscriber.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publishes a change to current subscribers.
    pub fn publish(&self, change: TaskChange) {
        match self.sender.send(change) {
            Ok(receivers) => tracing::trace!(?change, receivers, "published task change"),
            Err(_) => tracing::trace!(?change, "no task change subscribers"),
        }
    }

    /// Subscribes to changes published after this call.
    #[must_use]
    pub fn subscribe(&self) -> TaskChangeReceiver {
        self.sender.subscribe()
    }
}

impl Default for TaskChangeFeed {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
