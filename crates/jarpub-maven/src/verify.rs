//! Verification of a publication installed into a local Maven repository.

use std::path::Path;

use jarpub_util::errors::{PublishError, PublishResult};
use serde::Serialize;
use tracing::debug;

use crate::checksum::{verify_sidecar, ChecksumKind};
use crate::coordinate::Coordinate;
use crate::layout::{expected_local_files, get_path};

/// Outcome of comparing a version directory with the expected file set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VerifyReport {
    /// Expected files that are absent.
    pub missing: Vec<String>,
    /// Files present that are neither expected nor a checksum of one.
    pub unexpected: Vec<String>,
    /// Number of checksum sidecars that matched their file.
    pub checksums_verified: usize,
}

impl VerifyReport {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.unexpected.is_empty()
    }

    /// Turn the first problem into an error.
    pub fn into_result(self) -> PublishResult<Self> {
        if let Some(path) = self.missing.first() {
            return Err(PublishError::MissingArtifact { path: path.clone() });
        }
        if !self.unexpected.is_empty() {
            return Err(PublishError::Generic {
                message: format!("Unexpected files in repository: {}", self.unexpected.join(", ")),
            });
        }
        Ok(self)
    }
}

/// Compare `repo_dir/{get_path(coordinate)}` against the expected local file
/// set and check every checksum sidecar found there.
///
/// A checksum mismatch fails immediately; missing and unexpected files are
/// collected into the report.
pub fn verify_local_repository(
    repo_dir: &Path,
    coordinate: &Coordinate,
    packaging: &str,
    signed: bool,
) -> PublishResult<VerifyReport> {
    let version_path = get_path(coordinate);
    let version_dir = repo_dir.join(&version_path);
    if !version_dir.is_dir() {
        return Err(PublishError::MissingArtifact { path: version_path });
    }

    let expected = expected_local_files(coordinate, packaging, signed);
    let present: Vec<String> = jarpub_util::fs::list_files_relative(&version_dir)?
        .iter()
        .map(|p| p.to_string_lossy().replace('\\', "/"))
        .collect();
    debug!(
        "Verifying {} against {} expected files",
        version_dir.display(),
        expected.len()
    );

    let mut report = VerifyReport {
        missing: expected
            .iter()
            .filter(|f| !present.contains(f))
            .cloned()
            .collect(),
        ..VerifyReport::default()
    };

    for file in &present {
        if expected.contains(file) {
            continue;
        }
        match ChecksumKind::split_sidecar(file) {
            Some((kind, base)) if present.iter().any(|p| p == base) => {
                verify_sidecar(&version_dir.join(base), &version_dir.join(file), kind)?;
                report.checksums_verified += 1;
                if !expected.iter().any(|e| e == base) {
                    report.unexpected.push(base.to_string());
                }
            }
            _ => report.unexpected.push(file.clone()),
        }
    }
    report.unexpected.sort();
    report.unexpected.dedup();
    Ok(report)
}
