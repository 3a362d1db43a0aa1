//! Shared world state for task lifecycle BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskreflect::{
    config::ReminderConfig,
    task::{
        adapters::memory::{InMemoryNotificationCenter, InMemoryTaskRepository},
        domain::TaskId,
        services::{
            CreateTaskRequest, ReminderStatus, TaskLifecycleError, TaskLifecycleService,
            TaskOutcome,
        },
    },
};

/// Service type used by the BDD world.
pub type TestTaskService =
    TaskLifecycleService<InMemoryTaskRepository, InMemoryNotificationCenter, DefaultClock>;

/// Scenario world for task lifecycle behaviour tests.
pub struct TaskWorld {
    pub service: TestTaskService,
    pub repository: Arc<InMemoryTaskRepository>,
    pub notifications: InMemoryNotificationCenter,
    pub pending_request: Option<CreateTaskRequest>,
    pub task_id: Option<TaskId>,
    pub last_create_result: Option<Result<TaskOutcome, TaskLifecycleError>>,
    pub last_error: Option<TaskLifecycleError>,
    pub last_reminder: Option<ReminderStatus>,
}

impl TaskWorld {
    /// Creates a world with empty pending scenario state.
    #[must_use]
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryTaskRepository::new());
        let notifications = InMemoryNotificationCenter::new();
        let service = TaskLifecycleService::new(
            Arc::clone(&repository),
            Arc::new(notifications.clone()),
            Arc::new(DefaultClock),
            ReminderConfig::default(),
        );
        Self {
            service,
            repository,
            notifications,
            pending_request: None,
            task_id: None,
            last_create_result: None,
            last_error: None,
            last_reminder: None,
        }
    }

    /// Returns the identifier of the task created in this scenario.
    ///
    /// # Errors
    ///
    /// Returns an error when no task has been created yet.
    pub fn task_id(&self) -> Result<TaskId, eyre::Report> {
        self.task_id
            .ok_or_else(|| eyre::eyre!("no task has been created in this scenario"))
    }

    /// Records the result of a mutating operation.
    pub fn record<T>(&mut self, result: Result<T, TaskLifecycleError>) -> Option<T> {
        match result {
            Ok(value) => {
                self.last_error = None;
                Some(value)
            }
            Err(err) => {
                self.last_error = Some(err);
                None
            }
        }
    }
}

impl Default for TaskWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskWorld {
    TaskWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
