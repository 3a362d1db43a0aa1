//! Live queries re-evaluated after every committed repository change.

use crate::task::{
    domain::{Task, TaskQuery},
    ports::{TaskChangeReceiver, TaskRepository, TaskRepositoryResult},
};
use std::sync::Arc;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};

/// A query bound to a repository change feed.
///
/// The subscription is taken when the live query is created, so a change
/// committed between creation and the first [`LiveQuery::current`] call is
/// still reported by [`LiveQuery::next`].
pub struct LiveQuery<R>
where
    R: TaskRepository,
{
    repository: Arc<R>,
    query: TaskQuery,
    changes: TaskChangeReceiver,
}

impl<R> LiveQuery<R>
where
    R: TaskRepository,
{
    /// Subscribes to the repository and binds the query.
    #[must_use]
    pub fn new(repository: Arc<R>, query: TaskQuery) -> Self {
        let changes = repository.subscribe();
        Self {
            repository,
            query,
            changes,
        }
    }

    /// Returns the bound query.
    #[must_use]
    pub const fn query(&self) -> &TaskQuery {
        &self.query
    }

    /// Evaluates the query now.
    ///
    /// # Errors
    ///
    /// Returns repository errors from the underlying query.
    pub async fn current(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.repository.query(&self.query).await
    }

    /// Waits for the next committed change and returns the re-evaluated
    /// results.
    ///
    /// Changes already queued are coalesced into a single re-evaluation.
    /// A lagging subscriber re-queries rather than failing. Returns `None`
    /// if the change feed closes.
    pub async fn next(&mut self) -> Option<TaskRepositoryResult<Vec<Task>>> {
        match self.changes.recv().await {
            Ok(_) | Err(RecvError::Lagged(_)) => {}
            Err(RecvError::Closed) => return None,
        }
        self.drain_queued();
        Some(self.current().await)
    }

    fn drain_queued(&mut self) {
        loop {
            match self.changes.try_recv() {
                Ok(_) | Err(TryRecvError::Lagged(_)) => {}
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
    }
}
