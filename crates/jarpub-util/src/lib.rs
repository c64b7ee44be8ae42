//! Shared utilities for jarpub.
//!
//! This crate provides cross-cutting concerns used by all other jarpub crates:
//! the error type, the reporter handed to resolvers for warnings with a
//! proposed action, filesystem helpers and terminal status lines.

pub mod errors;
pub mod fs;
pub mod progress;
pub mod report;
