//! Unit tests for the task domain, queries, and services.

mod support;
