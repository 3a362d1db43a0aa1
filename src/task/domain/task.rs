//! Task aggregate root and related lifecycle types.

use super::{Priority, Rating, ReminderSettings, ReminderTime, TaskContent, TaskDomainError, TaskId};
use chrono::{DateTime, FixedOffset, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task is on the active list and may be edited.
    Active,
    /// Task has been completed, rated, and archived. Terminal.
    Completed,
}

impl TaskStatus {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

/// Rating and reflection recorded when a task is completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    rating: Rating,
    reflection: String,
    completed_at: DateTime<Utc>,
}

impl Completion {
    /// Creates a completion record.
    #[must_use]
    pub fn new(rating: Rating, reflection: impl Into<String>, completed_at: DateTime<Utc>) -> Self {
        Self {
            rating,
            reflection: reflection.into(),
            completed_at,
        }
    }

    /// Returns the star rating.
    #[must_use]
    pub const fn rating(&self) -> Rating {
        self.rating
    }

    /// Returns the reflection note, possibly empty.
    #[must_use]
    pub fn reflection(&self) -> &str {
        &self.reflection
    }

    /// Returns the completion timestamp.
    #[must_use]
    pub const fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }
}

/// Validated field values for a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Display title.
    pub content: TaskContent,
    /// Free-text goal description.
    pub goal: String,
    /// Priority level.
    pub priority: Priority,
    /// Reminder settings.
    pub reminder: ReminderSettings,
}

/// Validated partial edit of an active task.
///
/// `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEdit {
    /// Replacement display title.
    pub content: Option<TaskContent>,
    /// Replacement goal description.
    pub goal: Option<String>,
    /// Replacement priority.
    pub priority: Option<Priority>,
    /// Replacement reminder enabled flag.
    pub reminder_enabled: Option<bool>,
    /// Replacement reminder time.
    pub reminder_time: Option<ReminderTime>,
}

impl TaskEdit {
    /// Returns `true` when the edit changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.content.is_none()
            && self.goal.is_none()
            && self.priority.is_none()
            && self.reminder_enabled.is_none()
            && self.reminder_time.is_none()
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    content: TaskContent,
    goal: String,
    priority: Priority,
    reminder: ReminderSettings,
    completion: Option<Completion>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted display title.
    pub content: TaskContent,
    /// Persisted goal description.
    pub goal: String,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted reminder settings.
    pub reminder: ReminderSettings,
    /// Persisted completion record, if the task is done.
    pub completion: Option<Completion>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new active task.
    #[must_use]
    pub fn new(draft: NewTask, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            content: draft.content,
            goal: draft.goal,
            priority: draft.priority,
            reminder: draft.reminder,
            completion: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            content: data.content,
            goal: data.goal,
            priority: data.priority,
            reminder: data.reminder,
            completion: data.completion,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the display title.
    #[must_use]
    pub const fn content(&self) -> &TaskContent {
        &self.content
    }

    /// Returns the goal description.
    #[must_use]
    pub fn goal(&self) -> &str {
        &self.goal
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the reminder settings.
    #[must_use]
    pub const fn reminder(&self) -> ReminderSettings {
        self.reminder
    }

    /// Returns the completion record, if the task is done.
    #[must_use]
    pub const fn completion(&self) -> Option<&Completion> {
        self.completion.as_ref()
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        if self.completion.is_some() {
            TaskStatus::Completed
        } else {
            TaskStatus::Active
        }
    }

    /// Returns whether the task has been completed.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.completion.is_some()
    }

    /// Returns the rating, present only once completed.
    #[must_use]
    pub fn rating(&self) -> Option<Rating> {
        self.completion.as_ref().map(Completion::rating)
    }

    /// Returns the reflection note, present only once completed.
    #[must_use]
    pub fn reflection(&self) -> Option<&str> {
        self.completion.as_ref().map(Completion::reflection)
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the date shown next to the task: the creation time while
    /// active and the completion time once archived.
    #[must_use]
    pub fn register_date(&self) -> DateTime<Utc> {
        self.completion
            .as_ref()
            .map_or(self.created_at, Completion::completed_at)
    }

    /// Returns `true` for an active task created on an earlier calendar day
    /// than `now`, as seen from `offset`.
    #[must_use]
    pub fn is_carried_over(&self, now: DateTime<Utc>, offset: FixedOffset) -> bool {
        !self.is_done()
            && self.created_at.with_timezone(&offset).date_naive()
                < now.with_timezone(&offset).date_naive()
    }

    /// Applies a partial edit to an active task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::CompletedTaskIsReadOnly`] when the task has
    /// already been completed.
    pub fn apply_edit(&mut self, edit: TaskEdit, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.ensure_active(TaskDomainError::CompletedTaskIsReadOnly(self.id))?;
        if edit.is_empty() {
            return Ok(());
        }

        let TaskEdit {
            content,
            goal,
            priority,
            reminder_enabled,
            reminder_time,
        } = edit;
        if let Some(new_content) = content {
            self.content = new_content;
        }
        if let Some(new_goal) = goal {
            self.goal = new_goal;
        }
        if let Some(new_priority) = priority {
            self.priority = new_priority;
        }
        if let Some(enabled) = reminder_enabled {
            self.reminder = self.reminder.with_enabled(enabled);
        }
        if let Some(time) = reminder_time {
            self.reminder = self.reminder.with_time(time);
        }
        self.touch(clock);
        Ok(())
    }

    /// Marks the task as completed with a rating and reflection.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AlreadyCompleted`] when the task is already
    /// done; completion happens exactly once.
    pub fn complete(
        &mut self,
        rating: Rating,
        reflection: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_active(TaskDomainError::AlreadyCompleted(self.id))?;
        let timestamp = clock.utc();
        self.completion = Some(Completion::new(rating, reflection, timestamp));
        self.updated_at = timestamp;
        Ok(())
    }

    fn ensure_active(&self, violation: TaskDomainError) -> Result<(), TaskDomainError> {
        if self.is_done() {
            return Err(violation);
        }
        Ok(())
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
