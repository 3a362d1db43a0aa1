//! Notification port for one-shot task reminders.

use crate::task::domain::{ReminderId, ReminderTime};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for notification centre operations.
pub type NotificationCenterResult<T> = Result<T, NotificationCenterError>;

/// A one-shot local reminder to register with the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderRequest {
    /// Key used to replace or cancel the reminder.
    pub id: ReminderId,
    /// Local time of day the reminder was configured for.
    pub time: ReminderTime,
    /// Next instant at which the reminder fires.
    pub fire_at: DateTime<Utc>,
    /// Notification title.
    pub title: String,
    /// Notification body.
    pub body: String,
}

/// Platform notification service contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationCenter: Send + Sync {
    /// Asks the user for permission to deliver notifications.
    ///
    /// Returns `false` when permission is denied.
    async fn request_permission(&self) -> NotificationCenterResult<bool>;

    /// Registers a one-shot reminder, replacing any pending reminder with the
    /// same identifier.
    async fn schedule_one_shot(&self, request: &ReminderRequest) -> NotificationCenterResult<()>;

    /// Removes a pending reminder. Succeeds when none is pending.
    async fn cancel(&self, id: &ReminderId) -> NotificationCenterResult<()>;
}

/// Errors returned by notification centre adapters.
#[derive(Debug, Clone, Error)]
pub enum NotificationCenterError {
    /// The platform refused the request.
    #[error("notifications unavailable: {0}")]
    Unavailable(String),

    /// Generic runtime failure.
    #[error("notification runtime error: {0}")]
    Runtime(Arc<dyn std::error::Error + Send + Sync>),
}

impl NotificationCenterError {
    /// Wraps a runtime error from the notification adapter.
    pub fn runtime(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Runtime(Arc::new(err))
    }
}
