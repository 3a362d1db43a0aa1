//! In-memory adapter implementations.
//!
//! These adapters provide simple, thread-safe implementations suitable for
//! unit testing and for embedders without a database.

mod notification;
mod task;

pub use notification::InMemoryNotificationCenter;
pub use task::InMemoryTaskRepository;
