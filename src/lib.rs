//! Taskreflect: task tracking core with daily reminders and a reflection
//! archive.
//!
//! # Architecture
//!
//! Taskreflect follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence and notifications
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//!
//! # Modules
//!
//! - [`config`]: Reminder configuration loaded from TOML
//! - [`task`]: Task creation, completion, archive queries, and reminders

pub mod config;
pub mod task;
