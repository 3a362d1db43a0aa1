//! In-memory notification centre for reminder tests and headless embedders.

use crate::task::{
    domain::ReminderId,
    ports::{NotificationCenter, NotificationCenterError, NotificationCenterResult, ReminderRequest},
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// In-memory notification centre.
///
/// Records pending reminders keyed by identifier instead of delivering them.
/// Permission is granted until [`InMemoryNotificationCenter::deny_permission`]
/// is called.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotificationCenter {
    state: Arc<RwLock<InMemoryNotificationState>>,
}

#[derive(Debug, Default)]
struct InMemoryNotificationState {
    permission_denied: bool,
    permission_requests: usize,
    pending: HashMap<ReminderId, ReminderRequest>,
}

impl InMemoryNotificationCenter {
    /// Creates a notification centre with permission granted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent permission requests fail.
    ///
    /// # Errors
    ///
    /// Returns runtime errors when lock acquisition fails.
    pub fn deny_permission(&self) -> NotificationCenterResult<()> {
        self.set_permission_denied(true)
    }

    /// Makes subsequent permission requests succeed.
    ///
    /// # Errors
    ///
    /// Returns runtime errors when lock acquisition fails.
    pub fn grant_permission(&self) -> NotificationCenterResult<()> {
        self.set_permission_denied(false)
    }

    /// Returns every pending reminder, ordered by fire time.
    ///
    /// # Errors
    ///
    /// Returns runtime errors when lock acquisition fails.
    pub fn pending(&self) -> NotificationCenterResult<Vec<ReminderRequest>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut pending: Vec<ReminderRequest> = state.pending.values().cloned().collect();
        pending.sort_by_key(|request| request.fire_at);
        Ok(pending)
    }

    /// Returns the pending reminder with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns runtime errors when lock acquisition fails.
    pub fn pending_for(&self, id: &ReminderId) -> NotificationCenterResult<Option<ReminderRequest>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.pending.get(id).cloned())
    }

    /// Returns how many times permission has been requested.
    ///
    /// # Errors
    ///
    /// Returns runtime errors when lock acquisition fails.
    pub fn permission_requests(&self) -> NotificationCenterResult<usize> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.permission_requests)
    }

    fn set_permission_denied(&self, denied: bool) -> NotificationCenterResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.permission_denied = denied;
        Ok(())
    }
}

fn lock_error(err: impl std::fmt::Display) -> NotificationCenterError {
    NotificationCenterError::runtime(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl NotificationCenter for InMemoryNotificationCenter {
    async fn request_permission(&self) -> NotificationCenterResult<bool> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.permission_requests += 1;
        Ok(!state.permission_denied)
    }

    async fn schedule_one_shot(&self, request: &ReminderRequest) -> NotificationCenterResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.permission_denied {
            return Err(NotificationCenterError::Unavailable(
                "notification permission has not been granted".to_owned(),
            ));
        }
        state.pending.insert(request.id.clone(), request.clone());
        Ok(())
    }

    async fn cancel(&self, id: &ReminderId) -> NotificationCenterResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.pending.remove(id);
        Ok(())
    }
}
