//! Diesel row models for task persistence.

use super::schema::todo_tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = todo_tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Display title.
    pub content: String,
    /// Goal description.
    pub goal: String,
    /// Priority level.
    pub priority: i16,
    /// Completion flag.
    pub is_done: bool,
    /// Reminder enabled flag.
    pub notification_enabled: bool,
    /// Reminder hour.
    pub notification_hour: i16,
    /// Reminder minute.
    pub notification_minute: i16,
    /// Completion rating.
    pub rating: Option<i16>,
    /// Completion reflection.
    pub reflection: Option<String>,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert and update model for task records.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = todo_tasks)]
#[diesel(treat_none_as_null = true)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Display title.
    pub content: String,
    /// Goal description.
    pub goal: String,
    /// Priority level.
    pub priority: i16,
    /// Completion flag.
    pub is_done: bool,
    /// Reminder enabled flag.
    pub notification_enabled: bool,
    /// Reminder hour.
    pub notification_hour: i16,
    /// Reminder minute.
    pub notification_minute: i16,
    /// Completion rating.
    pub rating: Option<i16>,
    /// Completion reflection.
    pub reflection: Option<String>,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
