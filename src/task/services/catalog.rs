//! Validated create, edit, complete, delete, and query operations over the
//! task repository.

use super::{LiveQuery, TaskLifecycleError, TaskLifecycleResult};
use crate::task::{
    domain::{
        NewTask, Priority, Rating, ReminderSettings, ReminderTime, Task, TaskContent, TaskEdit,
        TaskId, TaskQuery, TaskSort,
    },
    ports::TaskRepository,
};
use chrono::{FixedOffset, Offset, Utc};
use mockable::Clock;
use std::sync::Arc;

/// Request payload for creating a task.
///
/// Raw values are validated by [`TaskCatalogService::create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    content: String,
    goal: String,
    priority: i64,
    reminder_enabled: bool,
    reminder_time: Option<(u32, u32)>,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields and no reminder.
    #[must_use]
    pub fn new(content: impl Into<String>, priority: i64) -> Self {
        Self {
            content: content.into(),
            goal: String::new(),
            priority,
            reminder_enabled: false,
            reminder_time: None,
        }
    }

    /// Sets the goal description.
    #[must_use]
    pub fn with_goal(mut self, goal: impl Into<String>) -> Self {
        self.goal = goal.into();
        self
    }

    /// Enables a daily reminder at `hour:minute`.
    #[must_use]
    pub fn with_reminder(mut self, hour: u32, minute: u32) -> Self {
        self.reminder_enabled = true;
        self.reminder_time = Some((hour, minute));
        self
    }
}

/// Request payload for a partial task edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    content: Option<String>,
    goal: Option<String>,
    priority: Option<i64>,
    reminder_enabled: Option<bool>,
    reminder_time: Option<(u32, u32)>,
}

impl UpdateTaskRequest {
    /// Creates an empty edit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the content.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Replaces the goal description.
    #[must_use]
    pub fn with_goal(mut self, goal: impl Into<String>) -> Self {
        self.goal = Some(goal.into());
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Turns the reminder on or off.
    #[must_use]
    pub fn with_reminder_enabled(mut self, enabled: bool) -> Self {
        self.reminder_enabled = Some(enabled);
        self
    }

    /// Replaces the reminder time.
    #[must_use]
    pub fn with_reminder_time(mut self, hour: u32, minute: u32) -> Self {
        self.reminder_time = Some((hour, minute));
        self
    }

    fn into_edit(self) -> TaskLifecycleResult<TaskEdit> {
        Ok(TaskEdit {
            content: self.content.map(TaskContent::new).transpose()?,
            goal: self.goal,
            priority: self.priority.map(Priority::try_from).transpose()?,
            reminder_enabled: self.reminder_enabled,
            reminder_time: self
                .reminder_time
                .map(|(hour, minute)| ReminderTime::new(hour, minute))
                .transpose()?,
        })
    }
}

/// Active tasks partitioned by priority.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrioritySections {
    high: Vec<Task>,
    medium: Vec<Task>,
    low: Vec<Task>,
}

impl PrioritySections {
    fn from_active(tasks: Vec<Task>) -> Self {
        let mut sections = Self::default();
        for task in tasks {
            match task.priority() {
                Priority::High => sections.high.push(task),
                Priority::Medium => sections.medium.push(task),
                Priority::Low => sections.low.push(task),
            }
        }
        sections
    }

    /// Returns the tasks of one priority.
    #[must_use]
    pub fn get(&self, priority: Priority) -> &[Task] {
        match priority {
            Priority::High => &self.high,
            Priority::Medium => &self.medium,
            Priority::Low => &self.low,
        }
    }

    /// Iterates sections from high to low priority.
    pub fn iter(&self) -> impl Iterator<Item = (Priority, &[Task])> {
        Priority::ALL
            .into_iter()
            .map(move |priority| (priority, self.get(priority)))
    }

    /// Returns the total number of active tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.high.len() + self.medium.len() + self.low.len()
    }

    /// Returns `true` when there are no active tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Task catalogue: validated CRUD and queries over a repository.
///
/// This service performs no reminder side effects; see
/// [`super::TaskLifecycleService`] for the controller that keeps reminders
/// in step with task mutations.
#[derive(Clone)]
pub struct TaskCatalogService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    utc_offset: FixedOffset,
}

impl<R, C> TaskCatalogService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a catalogue using UTC for local times of day.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            utc_offset: Utc.fix(),
        }
    }

    /// Sets the offset used to derive the default reminder time.
    #[must_use]
    pub fn with_utc_offset(mut self, utc_offset: FixedOffset) -> Self {
        self.utc_offset = utc_offset;
        self
    }

    /// Returns the underlying repository.
    #[must_use]
    pub const fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    /// Creates and persists a new active task.
    ///
    /// Without an explicit reminder time the current local time of day is
    /// remembered, disabled.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the content is empty, the
    /// priority is not 1 to 3, or the reminder time is invalid; nothing is
    /// persisted in that case. Returns repository errors when storage fails.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let content = TaskContent::new(request.content)?;
        let priority = Priority::try_from(request.priority)?;
        let time = match request.reminder_time {
            Some((hour, minute)) => ReminderTime::new(hour, minute)?,
            None => ReminderTime::from_datetime(&self.clock.utc().with_timezone(&self.utc_offset)),
        };
        let reminder = if request.reminder_enabled {
            ReminderSettings::enabled_at(time)
        } else {
            ReminderSettings::disabled_at(time)
        };

        let task = Task::new(
            NewTask {
                content,
                goal: request.goal,
                priority,
                reminder,
            },
            &*self.clock,
        );
        self.repository.store(&task).await?;
        tracing::debug!(task_id = %task.id(), priority = %task.priority(), "created task");
        Ok(task)
    }

    /// Applies a partial edit to an active task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for an unknown task,
    /// [`TaskLifecycleError::Domain`] for invalid fields or when the task is
    /// already completed, and repository errors when storage fails.
    pub async fn update(&self, id: TaskId, request: UpdateTaskRequest) -> TaskLifecycleResult<Task> {
        let edit = request.into_edit()?;
        let mut task = self.find(id).await?;
        task.apply_edit(edit, &*self.clock)?;
        self.repository
            .update(&task)
            .await
            .map_err(TaskLifecycleError::from_repository)?;
        tracing::debug!(task_id = %id, "updated task");
        Ok(task)
    }

    /// Completes a task with a rating and reflection.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for an unknown task,
    /// [`TaskLifecycleError::Domain`] when the rating is outside 1 to 5 or
    /// the task is already completed, and repository errors when storage
    /// fails.
    pub async fn complete(
        &self,
        id: TaskId,
        rating: i64,
        reflection: impl Into<String> + Send,
    ) -> TaskLifecycleResult<Task> {
        let stars = Rating::new(rating)?;
        let mut task = self.find(id).await?;
        task.complete(stars, reflection, &*self.clock)?;
        self.repository
            .update(&task)
            .await
            .map_err(TaskLifecycleError::from_repository)?;
        tracing::debug!(task_id = %id, rating = stars.value(), "completed task");
        Ok(task)
    }

    /// Deletes a task, active or archived.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist,
    /// including on a repeated delete.
    pub async fn delete(&self, id: TaskId) -> TaskLifecycleResult<()> {
        self.repository
            .remove(id)
            .await
            .map_err(TaskLifecycleError::from_repository)?;
        tracing::debug!(task_id = %id, "deleted task");
        Ok(())
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist.
    pub async fn find(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(id))
    }

    /// Evaluates an arbitrary query.
    ///
    /// # Errors
    ///
    /// Returns repository errors when the query fails.
    pub async fn query(&self, query: &TaskQuery) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.query(query).await?)
    }

    /// Returns active tasks, optionally of one priority, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns repository errors when the query fails.
    pub async fn query_active(&self, priority: Option<Priority>) -> TaskLifecycleResult<Vec<Task>> {
        self.query(&TaskQuery::active(priority)).await
    }

    /// Returns archived tasks whose content contains `search_text`, ignoring
    /// case. A missing or blank search returns every archived task.
    ///
    /// # Errors
    ///
    /// Returns repository errors when the query fails.
    pub async fn query_archived(
        &self,
        search_text: Option<&str>,
        sort: TaskSort,
    ) -> TaskLifecycleResult<Vec<Task>> {
        self.query(&TaskQuery::archived(search_text, sort)).await
    }

    /// Returns active tasks grouped into priority sections.
    ///
    /// # Errors
    ///
    /// Returns repository errors when the query fails.
    pub async fn active_by_priority(&self) -> TaskLifecycleResult<PrioritySections> {
        let active = self.query_active(None).await?;
        Ok(PrioritySections::from_active(active))
    }

    /// Binds a query to the repository change feed.
    #[must_use]
    pub fn watch(&self, query: TaskQuery) -> LiveQuery<R> {
        LiveQuery::new(Arc::clone(&self.repository), query)
    }
}
