//! Task tracking with daily reminders and a reflection archive.
//!
//! Tasks are created with a priority, a goal, and an optional daily
//! reminder. Completing a task records a star rating and a reflection note
//! and moves it to the searchable archive. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
