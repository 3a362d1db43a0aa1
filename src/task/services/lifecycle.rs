//! Task lifecycle controller keeping reminders in step with mutations.

use super::{
    CreateTaskRequest, LiveQuery, PrioritySections, ReminderScheduler, ReminderStatus,
    TaskCatalogService, TaskLifecycleResult, UpdateTaskRequest,
};
use crate::{
    config::ReminderConfig,
    task::{
        domain::{Priority, Task, TaskId, TaskQuery, TaskSort},
        ports::{NotificationCenter, TaskRepository},
    },
};
use mockable::Clock;
use std::sync::Arc;

/// A mutated task together with the reminder side effect it triggered.
///
/// `reminder` is `None` when the mutation did not touch the reminder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskOutcome {
    task: Task,
    reminder: Option<ReminderStatus>,
}

impl TaskOutcome {
    const fn new(task: Task, reminder: Option<ReminderStatus>) -> Self {
        Self { task, reminder }
    }

    /// Returns the task as persisted.
    #[must_use]
    pub const fn task(&self) -> &Task {
        &self.task
    }

    /// Returns the reminder status, if the reminder was touched.
    #[must_use]
    pub const fn reminder(&self) -> Option<&ReminderStatus> {
        self.reminder.as_ref()
    }

    /// Consumes the outcome, returning the task.
    #[must_use]
    pub fn into_task(self) -> Task {
        self.task
    }
}

/// Orchestrates task creation, edits, completion, and deletion.
///
/// Tasks move from active to completed exactly once; completed tasks stay in
/// the archive until deleted. The reminder scheduler is invoked as part of
/// every mutation that changes reminder settings, completes a task, or
/// deletes one, so no reminder outlives its task.
#[derive(Clone)]
pub struct TaskLifecycleService<R, N, C>
where
    R: TaskRepository,
    N: NotificationCenter,
    C: Clock + Send + Sync,
{
    catalog: TaskCatalogService<R, C>,
    scheduler: ReminderScheduler<N, C>,
}

impl<R, N, C> TaskLifecycleService<R, N, C>
where
    R: TaskRepository,
    N: NotificationCenter,
    C: Clock + Send + Sync,
{
    /// Creates a lifecycle service.
    #[must_use]
    pub fn new(
        repository: Arc<R>,
        notifications: Arc<N>,
        clock: Arc<C>,
        config: ReminderConfig,
    ) -> Self {
        let catalog =
            TaskCatalogService::new(repository, Arc::clone(&clock)).with_utc_offset(config.utc_offset());
        let scheduler = ReminderScheduler::new(notifications, clock, config);
        Self { catalog, scheduler }
    }

    /// Returns the task catalogue.
    #[must_use]
    pub const fn catalog(&self) -> &TaskCatalogService<R, C> {
        &self.catalog
    }

    /// Returns the reminder scheduler.
    #[must_use]
    pub const fn scheduler(&self) -> &ReminderScheduler<N, C> {
        &self.scheduler
    }

    /// Creates a task and schedules its reminder when enabled.
    ///
    /// # Errors
    ///
    /// Returns validation and repository errors from
    /// [`TaskCatalogService::create`]. Reminder failures are reported in the
    /// outcome.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskLifecycleResult<TaskOutcome> {
        let task = self.catalog.create(request).await?;
        let reminder = if task.reminder().is_enabled() {
            Some(self.scheduler.schedule(&task).await)
        } else {
            None
        };
        Ok(TaskOutcome::new(task, reminder))
    }

    /// Edits an active task, rescheduling its reminder when the reminder
    /// settings changed or when an enabled reminder's title changed.
    ///
    /// # Errors
    ///
    /// Returns not-found, validation, invalid-state, and repository errors
    /// from [`TaskCatalogService::update`].
    pub async fn edit(
        &self,
        id: TaskId,
        request: UpdateTaskRequest,
    ) -> TaskLifecycleResult<TaskOutcome> {
        let before = self.catalog.find(id).await?;
        let task = self.catalog.update(id, request).await?;
        let reminder = if reminder_is_stale(&before, &task) {
            Some(self.scheduler.reschedule(&task).await)
        } else {
            None
        };
        Ok(TaskOutcome::new(task, reminder))
    }

    /// Completes a task and cancels its pending reminder.
    ///
    /// # Errors
    ///
    /// Returns not-found, validation, invalid-state, and repository errors
    /// from [`TaskCatalogService::complete`].
    pub async fn complete(
        &self,
        id: TaskId,
        rating: i64,
        reflection: impl Into<String> + Send,
    ) -> TaskLifecycleResult<TaskOutcome> {
        let task = self.catalog.complete(id, rating, reflection).await?;
        let reminder = self.scheduler.cancel(&task).await;
        Ok(TaskOutcome::new(task, Some(reminder)))
    }

    /// Cancels the task's reminder, then deletes the task.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskLifecycleError::NotFound`] when the task does not
    /// exist, including on a repeated delete, and repository errors when
    /// removal fails.
    pub async fn delete(&self, id: TaskId) -> TaskLifecycleResult<ReminderStatus> {
        let task = self.catalog.find(id).await?;
        let reminder = self.scheduler.cancel(&task).await;
        self.catalog.delete(id).await?;
        Ok(reminder)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskLifecycleError::NotFound`] when the task does not
    /// exist.
    pub async fn find(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        self.catalog.find(id).await
    }

    /// Returns active tasks, optionally of one priority.
    ///
    /// # Errors
    ///
    /// Returns repository errors when the query fails.
    pub async fn query_active(&self, priority: Option<Priority>) -> TaskLifecycleResult<Vec<Task>> {
        self.catalog.query_active(priority).await
    }

    /// Returns archived tasks matching an optional search.
    ///
    /// # Errors
    ///
    /// Returns repository errors when the query fails.
    pub async fn query_archived(
        &self,
        search_text: Option<&str>,
        sort: TaskSort,
    ) -> TaskLifecycleResult<Vec<Task>> {
        self.catalog.query_archived(search_text, sort).await
    }

    /// Returns active tasks grouped into priority sections.
    ///
    /// # Errors
    ///
    /// Returns repository errors when the query fails.
    pub async fn active_by_priority(&self) -> TaskLifecycleResult<PrioritySections> {
        self.catalog.active_by_priority().await
    }

    /// Binds a query to the repository change feed.
    #[must_use]
    pub fn watch(&self, query: TaskQuery) -> LiveQuery<R> {
        self.catalog.watch(query)
    }
}

fn reminder_is_stale(before: &Task, after: &Task) -> bool {
    before.reminder() != after.reminder()
        || (after.reminder().is_enabled() && before.content() != after.content())
}
