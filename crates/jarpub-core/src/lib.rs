//! Core data types for jarpub.
//!
//! This crate defines the pieces every other jarpub crate leans on: the
//! human-facing version ordering, the project property lookup service with
//! its `gradle.properties` layering, the `jarpub.toml` configuration, and the
//! variant/signing policy enums that declaration scopes resolve.
//!
//! This crate is intentionally free of network I/O.

pub mod config;
pub mod properties;
pub mod strategy;
pub mod version;
