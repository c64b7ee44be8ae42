use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all jarpub operations.
///
/// The `Display` string is the title line of a failure; the diagnostic `help`
/// is the proposed action shown underneath it.
#[derive(Debug, Error, Diagnostic)]
pub enum PublishError {
    /// A mandatory project property is absent.
    #[error("Failed to find property '{key}'")]
    #[diagnostic(
        code(jarpub::missing_configuration),
        help("Add '{key}' to one of the gradle.properties files, or specify -P{key}=<value> on the command line")
    )]
    MissingConfiguration { key: String },

    /// Group, artifact id or version is absent where a coordinate is derived.
    #[error("POM is incomplete: missing {}", .missing.join(", "))]
    #[diagnostic(
        code(jarpub::incomplete_pom),
        help("Declare the missing fields in pom.yaml, or set them on the project being published")
    )]
    IncompletePom { missing: Vec<String> },

    /// Malformed version string or malformed build-file content.
    #[error("Invalid format: {message}")]
    #[diagnostic(code(jarpub::format))]
    Format { message: String },

    /// Two POM documents declare the same variant.
    #[error("POM with variant '{variant}' already exists")]
    #[diagnostic(
        code(jarpub::duplicate_variant),
        help("Each document in a pom.yaml file needs a distinct 'variant'")
    )]
    DuplicateVariant { variant: String },

    /// The endpoint has no URL for the kind of version being published.
    #[error("{kind} URL of the repo '{repo}' is not provided")]
    #[diagnostic(
        code(jarpub::missing_url),
        help("Set the release/snapshot URL properties of this repository in gradle.properties")
    )]
    MissingUrl { repo: String, kind: String },

    /// A published file does not match its checksum sidecar.
    #[error("{algorithm} mismatch for {path}: expected {expected}, got {actual}")]
    #[diagnostic(code(jarpub::checksum))]
    ChecksumMismatch {
        algorithm: String,
        path: String,
        expected: String,
        actual: String,
    },

    /// A file expected in a published repository is absent.
    #[error("Expected artifact is missing: {path}")]
    #[diagnostic(code(jarpub::missing_artifact))]
    MissingArtifact { path: String },

    /// Invalid `jarpub.toml`.
    #[error("Configuration error: {message}")]
    #[diagnostic(help("Check jarpub.toml for syntax errors"))]
    Config { message: String },

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

impl PublishError {
    pub fn missing_configuration(key: impl Into<String>) -> Self {
        Self::MissingConfiguration { key: key.into() }
    }

    pub fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }
}

/// Convenience alias used by the library crates.
pub type PublishResult<T> = Result<T, PublishError>;
