//! POM metadata for jarpub.
//!
//! - [`model`]: the POM records and their gap-filling merge
//! - [`finalize`]: fills a POM from project defaults before publishing
//! - [`group`]: variant-keyed POM documents
//! - [`loader`]: `pom.yaml` discovery and parsing
//! - [`xml`]: rendering to a Maven POM document

pub mod finalize;
pub mod group;
pub mod license;
pub mod loader;
pub mod model;
pub mod xml;

pub use group::PomGroup;
pub use model::{License, Organization, Overlay, Person, PluginInfo, Pom, Scm, Web};
