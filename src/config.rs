//! Reminder configuration.
//!
//! Configuration is layered over compiled defaults: a TOML document supplied
//! by the embedding application may override any field, and missing fields
//! keep their defaults. The crate never reads files or the environment
//! itself.
//!
//! ```toml
//! [reminders]
//! body = "Time to get started!"
//! utc_offset_minutes = 540
//! ```

use chrono::{FixedOffset, Offset, Utc};
use serde::Deserialize;

/// Default notification body shown under the task title.
pub const DEFAULT_REMINDER_BODY: &str = "It's time! Let's start the task!";

/// Largest accepted UTC offset magnitude, in minutes.
pub const MAX_UTC_OFFSET_MINUTES: i32 = 23 * 60 + 59;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to parse the TOML configuration.
    #[error("failed to parse reminder configuration: {0}")]
    ParseToml(#[from] toml::de::Error),

    /// The UTC offset is outside one day in either direction.
    #[error("UTC offset of {0} minutes is out of range (at most ±{MAX_UTC_OFFSET_MINUTES})")]
    InvalidUtcOffset(i32),

    /// The notification body is empty after trimming.
    #[error("reminder body must not be empty")]
    EmptyBody,
}

/// Top-level TOML document structure.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    reminders: ReminderFileConfig,
}

/// `[reminders]` section; every field optional for partial overrides.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ReminderFileConfig {
    body: Option<String>,
    utc_offset_minutes: Option<i32>,
}

/// Resolved reminder configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderConfig {
    body: String,
    utc_offset: FixedOffset,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            body: DEFAULT_REMINDER_BODY.to_owned(),
            utc_offset: Utc.fix(),
        }
    }
}

impl ReminderConfig {
    /// Parses a TOML document, applying it over the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParseToml`] for malformed TOML,
    /// [`ConfigError::InvalidUtcOffset`] for an out-of-range offset, and
    /// [`ConfigError::EmptyBody`] for a blank body.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(text)?;
        let mut config = Self::default();
        if let Some(body) = file.reminders.body {
            config = config.with_body(body)?;
        }
        if let Some(minutes) = file.reminders.utc_offset_minutes {
            config = config.with_utc_offset_minutes(minutes)?;
        }
        Ok(config)
    }

    /// Replaces the notification body.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyBody`] when the body is blank.
    pub fn with_body(mut self, body: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = body.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::EmptyBody);
        }
        self.body = trimmed.to_owned();
        Ok(self)
    }

    /// Replaces the UTC offset used for reminder times and calendar days.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUtcOffset`] when `minutes` exceeds
    /// [`MAX_UTC_OFFSET_MINUTES`] in magnitude.
    pub fn with_utc_offset_minutes(mut self, minutes: i32) -> Result<Self, ConfigError> {
        if minutes.abs() > MAX_UTC_OFFSET_MINUTES {
            return Err(ConfigError::InvalidUtcOffset(minutes));
        }
        self.utc_offset =
            FixedOffset::east_opt(minutes * 60).ok_or(ConfigError::InvalidUtcOffset(minutes))?;
        Ok(self)
    }

    /// Returns the notification body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the UTC offset.
    #[must_use]
    pub const fn utc_offset(&self) -> FixedOffset {
        self.utc_offset
    }
}
