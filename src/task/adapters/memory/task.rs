//! In-memory task repository.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{Task, TaskId, TaskQuery},
    ports::{
        TaskChange, TaskChangeFeed, TaskChangeReceiver, TaskRepository, TaskRepositoryError,
        TaskRepositoryResult,
    },
};

/// Thread-safe in-memory task repository.
///
/// Tasks are kept in insertion order, which queries preserve for ties under
/// the requested sort.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
    changes: TaskChangeFeed,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: Vec<Task>,
}

impl InMemoryTaskState {
    fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id() == id)
    }
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored tasks.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when lock acquisition fails.
    pub fn len(&self) -> TaskRepositoryResult<usize> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.tasks.len())
    }

    /// Returns `true` when no task is stored.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when lock acquisition fails.
    pub fn is_empty(&self) -> TaskRepositoryResult<bool> {
        Ok(self.len()? == 0)
    }
}

fn lock_error(err: impl std::fmt::Display) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        {
            let mut state = self.state.write().map_err(lock_error)?;
            if state.position(task.id()).is_some() {
                return Err(TaskRepositoryError::DuplicateTask(task.id()));
            }
            state.tasks.push(task.clone());
        }
        self.changes.publish(TaskChange::Stored(task.id()));
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        {
            let mut state = self.state.write().map_err(lock_error)?;
            let slot = state
                .tasks
                .iter_mut()
                .find(|stored| stored.id() == task.id())
                .ok_or(TaskRepositoryError::NotFound(task.id()))?;
            *slot = task.clone();
        }
        self.changes.publish(TaskChange::Updated(task.id()));
        Ok(())
    }

    async fn remove(&self, id: TaskId) -> TaskRepositoryResult<()> {
        {
            let mut state = self.state.write().map_err(lock_error)?;
            let index = state
                .position(id)
                .ok_or(TaskRepositoryError::NotFound(id))?;
            state.tasks.remove(index);
        }
        self.changes.publish(TaskChange::Removed(id));
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.tasks.iter().find(|task| task.id() == id).cloned())
    }

    async fn query(&self, query: &TaskQuery) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(query.evaluate(&state.tasks))
    }

    fn subscribe(&self) -> TaskChangeReceiver {
        self.changes.subscribe()
    }
}
