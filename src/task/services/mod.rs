//! Application services for task tracking.

mod catalog;
mod error;
mod lifecycle;
mod live;
mod scheduler;

pub use catalog::{CreateTaskRequest, PrioritySections, TaskCatalogService, UpdateTaskRequest};
pub use error::{TaskErrorKind, TaskLifecycleError, TaskLifecycleResult};
pub use lifecycle::{TaskLifecycleService, TaskOutcome};
pub use live::LiveQuery;
pub use scheduler::{ReminderScheduler, ReminderStatus};
