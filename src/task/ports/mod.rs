//! Port contracts for task tracking.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod notification;
pub mod repository;

pub use notification::{
    NotificationCenter, NotificationCenterError, NotificationCenterResult, ReminderRequest,
};
pub use repository::{
    TaskChange, TaskChangeFeed, TaskChangeReceiver, TaskRepository, TaskRepositoryError,
    TaskRepositoryResult,
};
