//! Daily reminder settings attached to a task.

use super::TaskDomainError;
use chrono::{DateTime, FixedOffset, NaiveTime, TimeDelta, TimeZone, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Time of day, in the user's local offset, at which a reminder fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ReminderTime {
    hour: u32,
    minute: u32,
}

impl ReminderTime {
    /// Creates a validated reminder time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidReminderTime`] when `hour` is not
    /// below 24 or `minute` is not below 60.
    pub const fn new(hour: u32, minute: u32) -> Result<Self, TaskDomainError> {
        if hour >= 24 || minute >= 60 {
            return Err(TaskDomainError::InvalidReminderTime { hour, minute });
        }
        Ok(Self { hour, minute })
    }

    /// Captures the hour and minute of a timestamp in its own time zone.
    #[must_use]
    pub fn from_datetime<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> Self {
        Self {
            hour: timestamp.hour(),
            minute: timestamp.minute(),
        }
    }

    /// Returns the hour component.
    #[must_use]
    pub const fn hour(self) -> u32 {
        self.hour
    }

    /// Returns the minute component.
    #[must_use]
    pub const fn minute(self) -> u32 {
        self.minute
    }

    /// Returns the next instant strictly after `after` whose local time in
    /// `offset` is this reminder time.
    #[must_use]
    pub fn next_occurrence(self, after: DateTime<Utc>, offset: FixedOffset) -> DateTime<Utc> {
        let local_day = after.with_timezone(&offset).date_naive();
        let local_fire = local_day.and_time(self.as_naive_time());
        let mut fire_at =
            local_fire.and_utc() - TimeDelta::seconds(i64::from(offset.local_minus_utc()));
        if fire_at <= after {
            fire_at += TimeDelta::days(1);
        }
        fire_at
    }

    fn as_naive_time(self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or_default()
    }
}

impl<'de> Deserialize<'de> for ReminderTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Parts {
            hour: u32,
            minute: u32,
        }

        let Parts { hour, minute } = Parts::deserialize(deserializer)?;
        Self::new(hour, minute).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for ReminderTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Reminder configuration of a task.
///
/// The time is retained while the reminder is disabled so that turning it
/// back on restores the previous choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReminderSettings {
    enabled: bool,
    time: ReminderTime,
}

impl ReminderSettings {
    /// Creates enabled reminder settings.
    #[must_use]
    pub const fn enabled_at(time: ReminderTime) -> Self {
        Self {
            enabled: true,
            time,
        }
    }

    /// Creates disabled reminder settings remembering `time`.
    #[must_use]
    pub const fn disabled_at(time: ReminderTime) -> Self {
        Self {
            enabled: false,
            time,
        }
    }

    /// Returns whether the reminder is enabled.
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        self.enabled
    }

    /// Returns the configured time of day.
    #[must_use]
    pub const fn time(self) -> ReminderTime {
        self.time
    }

    /// Returns the time of day only when the reminder is enabled.
    #[must_use]
    pub const fn active_time(self) -> Option<ReminderTime> {
        if self.enabled { Some(self.time) } else { None }
    }

    /// Returns a copy with the enabled flag replaced.
    #[must_use]
    pub const fn with_enabled(self, enabled: bool) -> Self {
        Self { enabled, ..self }
    }

    /// Returns a copy with the time replaced.
    #[must_use]
    pub const fn with_time(self, time: ReminderTime) -> Self {
        Self { time, ..self }
    }
}
