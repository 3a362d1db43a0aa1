//! Domain model for task tracking.
//!
//! The task domain models creation, editing, one-way completion with a
//! rating and reflection, reminder settings, and query parameter objects,
//! while keeping persistence and notification delivery outside the domain
//! boundary.

mod error;
mod ids;
mod priority;
pub mod query;
mod rating;
mod reminder;
mod task;

pub use error::TaskDomainError;
pub use ids::{ReminderId, TaskContent, TaskId};
pub use priority::Priority;
pub use query::{CompletionFilter, SortDirection, SortKey, TaskFilter, TaskQuery, TaskSort};
pub use rating::Rating;
pub use reminder::{ReminderSettings, ReminderTime};
pub use task::{Completion, NewTask, PersistedTaskData, Task, TaskEdit, TaskStatus};
