//! Reminder scheduling for tasks.
//!
//! Each task owns at most one pending reminder, keyed by
//! [`ReminderId::for_task`]. Scheduling failures never propagate as errors:
//! they are logged and reported as a [`ReminderStatus`] so the task stays
//! usable without its reminder.

use crate::{
    config::ReminderConfig,
    task::{
        domain::{ReminderId, Task},
        ports::{NotificationCenter, ReminderRequest},
    },
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;

/// Outcome of a reminder side effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReminderStatus {
    /// A reminder is pending.
    Scheduled {
        /// Reminder key.
        id: ReminderId,
        /// Next fire time.
        fire_at: DateTime<Utc>,
    },
    /// Any pending reminder was removed.
    Cancelled(ReminderId),
    /// No reminder applies: it is switched off or the task is completed.
    Disabled,
    /// The user has not granted notification permission.
    PermissionDenied,
    /// The notification centre rejected the request.
    Failed {
        /// Reminder key.
        id: ReminderId,
        /// Failure description.
        reason: String,
    },
}

impl ReminderStatus {
    /// Returns `true` when a reminder is pending after the operation.
    #[must_use]
    pub const fn is_scheduled(&self) -> bool {
        matches!(self, Self::Scheduled { .. })
    }

    /// Returns `true` when the reminder could not be brought into the
    /// requested state.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        matches!(self, Self::PermissionDenied | Self::Failed { .. })
    }
}

/// Keeps the platform's pending reminders in step with task settings.
#[derive(Clone)]
pub struct ReminderScheduler<N, C>
where
    N: NotificationCenter,
    C: Clock + Send + Sync,
{
    center: Arc<N>,
    clock: Arc<C>,
    config: ReminderConfig,
}

impl<N, C> ReminderScheduler<N, C>
where
    N: NotificationCenter,
    C: Clock + Send + Sync,
{
    /// Creates a scheduler.
    #[must_use]
    pub const fn new(center: Arc<N>, clock: Arc<C>, config: ReminderConfig) -> Self {
        Self {
            center,
            clock,
            config,
        }
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &ReminderConfig {
        &self.config
    }

    /// Builds the reminder request for a task, or `None` when no reminder
    /// applies.
    #[must_use]
    pub fn request_for(&self, task: &Task) -> Option<ReminderRequest> {
        if task.is_done() {
            return None;
        }
        let time = task.reminder().active_time()?;
        Some(ReminderRequest {
            id: ReminderId::for_task(task.id()),
            time,
            fire_at: time.next_occurrence(self.clock.utc(), self.config.utc_offset()),
            title: task.content().as_str().to_owned(),
            body: self.config.body().to_owned(),
        })
    }

    /// Registers the task's reminder for the next occurrence of its time.
    ///
    /// Returns [`ReminderStatus::Disabled`] without contacting the
    /// notification centre when no reminder applies.
    pub async fn schedule(&self, task: &Task) -> ReminderStatus {
        let Some(request) = self.request_for(task) else {
            return ReminderStatus::Disabled;
        };

        match self.center.request_permission().await {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!(task_id = %task.id(), "notification permission denied; reminder not scheduled");
                return ReminderStatus::PermissionDenied;
            }
            Err(err) => return failed(request.id, &err),
        }

        match self.center.schedule_one_shot(&request).await {
            Ok(()) => {
                tracing::debug!(
                    task_id = %task.id(),
                    reminder_id = %request.id,
                    fire_at = %request.fire_at,
                    "scheduled reminder"
                );
                ReminderStatus::Scheduled {
                    id: request.id,
                    fire_at: request.fire_at,
                }
            }
            Err(err) => failed(request.id, &err),
        }
    }

    /// Removes any pending reminder for the task.
    pub async fn cancel(&self, task: &Task) -> ReminderStatus {
        let id = ReminderId::for_task(task.id());
        match self.center.cancel(&id).await {
            Ok(()) => {
                tracing::debug!(task_id = %task.id(), reminder_id = %id, "cancelled reminder");
                ReminderStatus::Cancelled(id)
            }
            Err(err) => failed(id, &err),
        }
    }

    /// Cancels then re-registers the task's reminder.
    ///
    /// When no reminder applies any more, reports the cancellation. A failed
    /// cancellation is logged and scheduling is still attempted, since the
    /// platform replaces reminders that share an identifier.
    pub async fn reschedule(&self, task: &Task) -> ReminderStatus {
        let cancelled = self.cancel(task).await;
        if self.request_for(task).is_none() {
            return cancelled;
        }
        self.schedule(task).await
    }
}

fn failed(id: ReminderId, err: &dyn std::error::Error) -> ReminderStatus {
    tracing::warn!(reminder_id = %id, error = %err, "reminder operation failed");
    ReminderStatus::Failed {
        id,
        reason: err.to_string(),
    }
}
