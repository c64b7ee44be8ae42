use std::fmt;

use jarpub_core::strategy::VariantMode;
use jarpub_core::version::{is_snapshot, SNAPSHOT_SUFFIX};
use jarpub_pom::Pom;
use jarpub_util::errors::{PublishError, PublishResult};
use serde::Serialize;

/// Published identity of an artifact.
///
/// The variant mode is fixed at construction, so every path derived from a
/// coordinate stays the same for its whole lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Coordinate {
    group: String,
    artifact_id: String,
    version: String,
    variant: String,
    mode: VariantMode,
}

fn required<'a>(
    name: &str,
    value: Option<&'a str>,
    missing: &mut Vec<String>,
) -> &'a str {
    match value.filter(|v| !v.trim().is_empty()) {
        Some(v) => v,
        None => {
            missing.push(name.to_string());
            ""
        }
    }
}

impl Coordinate {
    /// Fails with `IncompletePom` naming every blank identity field.
    pub fn new(
        group: Option<&str>,
        artifact_id: Option<&str>,
        version: Option<&str>,
        variant: &str,
        mode: VariantMode,
    ) -> PublishResult<Self> {
        let mut missing = Vec::new();
        let group = required("group", group, &mut missing);
        let artifact_id = required("artifactId", artifact_id, &mut missing);
        let version = required("version", version, &mut missing);
        if !missing.is_empty() {
            return Err(PublishError::IncompletePom { missing });
        }
        Ok(Self {
            group: group.to_string(),
            artifact_id: artifact_id.to_string(),
            version: version.to_string(),
            variant: variant.to_string(),
            mode,
        })
    }

    pub fn from_pom(pom: &Pom, mode: VariantMode) -> PublishResult<Self> {
        Self::new(
            pom.group.as_deref(),
            pom.artifact_id.as_deref(),
            pom.version.as_deref(),
            &pom.variant,
            mode,
        )
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn variant(&self) -> &str {
        &self.variant
    }

    pub fn mode(&self) -> VariantMode {
        self.mode
    }

    pub fn is_snapshot(&self) -> bool {
        is_snapshot(&self.version)
    }

    /// `mylib-debug` in `WithArtifactId` mode, `mylib` otherwise.
    pub fn artifact_id_with_variant(&self) -> String {
        if self.mode == VariantMode::WithArtifactId && !self.variant.is_empty() {
            format!("{}-{}", self.artifact_id, self.variant)
        } else {
            self.artifact_id.clone()
        }
    }

    /// `1.0-debug` in `WithVersion` mode; a snapshot keeps its suffix last,
    /// as in `1.0-debug-SNAPSHOT`.
    pub fn version_with_variant(&self) -> String {
        if self.mode != VariantMode::WithVersion || self.variant.is_empty() {
            return self.version.clone();
        }
        append_before_snapshot(&self.version, &self.variant)
    }

    /// `group:artifactIdWithVariant:versionWithVariant`
    pub fn gav(&self) -> String {
        format!(
            "{}:{}:{}",
            self.group,
            self.artifact_id_with_variant(),
            self.version_with_variant()
        )
    }
}

/// Insert `-token` before a trailing `-SNAPSHOT`, or append it.
pub fn append_before_snapshot(version: &str, token: &str) -> String {
    match version.strip_suffix(SNAPSHOT_SUFFIX) {
        Some(base) => format!("{base}-{token}{SNAPSHOT_SUFFIX}"),
        None => format!("{version}-{token}"),
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.gav())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(version: &str, variant: &str, mode: VariantMode) -> Coordinate {
        Coordinate::new(Some("io.hkhc"), Some("mylib"), Some(version), variant, mode).unwrap()
    }

    #[test]
    fn variant_with_version() {
        let c = coord("1.0", "debug", VariantMode::WithVersion);
        assert_eq!(c.artifact_id_with_variant(), "mylib");
        assert_eq!(c.version_with_variant(), "1.0-debug");
        assert_eq!(c.gav(), "io.hkhc:mylib:1.0-debug");
    }

    #[test]
    fn variant_before_snapshot() {
        let c = coord("1.0-SNAPSHOT", "debug", VariantMode::WithVersion);
        assert_eq!(c.version_with_variant(), "1.0-debug-SNAPSHOT");
        assert!(c.is_snapshot());
    }

    #[test]
    fn inner_snapshot_marker_is_not_a_suffix() {
        let c = coord("1.0-SNAPSHOT-rc1", "debug", VariantMode::WithVersion);
        assert_eq!(c.version_with_variant(), "1.0-SNAPSHOT-rc1-debug");
        assert!(!c.is_snapshot());
    }

    #[test]
    fn variant_with_artifact_id() {
        let c = coord("1.0", "debug", VariantMode::WithArtifactId);
        assert_eq!(c.artifact_id_with_variant(), "mylib-debug");
        assert_eq!(c.version_with_variant(), "1.0");
    }

    #[test]
    fn invisible_and_empty_variant_leave_coordinate_alone() {
        let c = coord("1.0", "debug", VariantMode::Invisible);
        assert_eq!(c.gav(), "io.hkhc:mylib:1.0");
        let c = coord("1.0", "", VariantMode::WithArtifactId);
        assert_eq!(c.gav(), "io.hkhc:mylib:1.0");
        let c = coord("1.0", "", VariantMode::WithVersion);
        assert_eq!(c.gav(), "io.hkhc:mylib:1.0");
    }

    #[test]
    fn incomplete_names_missing_fields() {
        let err = Coordinate::new(Some("io.hkhc"), None, Some(" "), "", VariantMode::WithVersion)
            .unwrap_err();
        match err {
            PublishError::IncompletePom { missing } => {
                assert_eq!(missing, vec!["artifactId", "version"])
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
