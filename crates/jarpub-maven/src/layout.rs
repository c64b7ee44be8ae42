//! Maven repository layout of a published coordinate.

use jarpub_util::errors::{PublishError, PublishResult};

use crate::coordinate::Coordinate;

/// Checksum sidecars a remote repository keeps next to every file.
pub const HASH_SUFFIXES: [&str; 5] = ["", ".md5", ".sha1", ".sha256", ".sha512"];

pub const SIGNATURE_SUFFIX: &str = ".asc";
pub const METADATA_FILE: &str = "maven-metadata.xml";
pub const LOCAL_METADATA_FILE: &str = "maven-metadata-local.xml";

/// `{group with / for .}/{artifactIdWithVariant}/{versionWithVariant}`
pub fn get_path(coordinate: &Coordinate) -> String {
    format!(
        "{}/{}",
        artifact_dir(coordinate),
        coordinate.version_with_variant()
    )
}

/// `{artifactIdWithVariant}-{versionWithVariant}`
pub fn get_filename_base(coordinate: &Coordinate) -> String {
    format!(
        "{}-{}",
        coordinate.artifact_id_with_variant(),
        coordinate.version_with_variant()
    )
}

/// Directory of a Gradle plugin marker artifact.
pub fn get_plugin_path(plugin_id: &str) -> PublishResult<String> {
    if plugin_id.trim().is_empty() {
        return Err(PublishError::IncompletePom {
            missing: vec!["plugin.id".to_string()],
        });
    }
    Ok(format!(
        "{}/{plugin_id}.gradle.plugin",
        plugin_id.replace('.', "/")
    ))
}

fn artifact_dir(coordinate: &Coordinate) -> String {
    format!(
        "{}/{}",
        coordinate.group().replace('.', "/"),
        coordinate.artifact_id_with_variant()
    )
}

/// Suffixes of the files one publication produces.
pub fn artifact_suffixes(packaging: &str) -> Vec<String> {
    vec![
        ".module".to_string(),
        ".pom".to_string(),
        format!(".{packaging}"),
        "-javadoc.jar".to_string(),
        "-sources.jar".to_string(),
    ]
}

/// File names of a publication, with signatures when signed. Snapshots are
/// never signed.
pub fn artifact_files(coordinate: &Coordinate, packaging: &str, signed: bool) -> Vec<String> {
    let base = get_filename_base(coordinate);
    let with_signature = signed && !coordinate.is_snapshot();
    artifact_suffixes(packaging)
        .into_iter()
        .flat_map(|suffix| {
            let file = format!("{base}{suffix}");
            if with_signature {
                vec![file.clone(), format!("{file}{SIGNATURE_SUFFIX}")]
            } else {
                vec![file]
            }
        })
        .collect()
}

/// Files a Maven local repository holds in the version directory
/// ([`get_path`]) after publishing.
pub fn expected_local_files(coordinate: &Coordinate, packaging: &str, signed: bool) -> Vec<String> {
    let mut files = artifact_files(coordinate, packaging, signed);
    if coordinate.is_snapshot() {
        files.push(LOCAL_METADATA_FILE.to_string());
    }
    files.sort();
    files
}

/// Paths, relative to the repository root, a remote repository holds after
/// publishing, each with its checksum sidecars. Includes the plugin marker
/// when `plugin_id` is given.
pub fn expected_remote_files(
    coordinate: &Coordinate,
    packaging: &str,
    signed: bool,
    plugin_id: Option<&str>,
) -> PublishResult<Vec<String>> {
    let mut paths = Vec::new();

    if let Some(plugin_id) = plugin_id {
        let marker = get_plugin_path(plugin_id)?;
        let version = coordinate.version_with_variant();
        paths.push(format!("{marker}/{METADATA_FILE}"));
        paths.push(format!(
            "{marker}/{version}/{plugin_id}.gradle.plugin-{version}.pom"
        ));
    }

    let dir = artifact_dir(coordinate);
    let version_dir = get_path(coordinate);
    paths.push(format!("{dir}/{METADATA_FILE}"));
    if coordinate.is_snapshot() {
        paths.push(format!("{version_dir}/{METADATA_FILE}"));
    }
    paths.extend(
        artifact_files(coordinate, packaging, signed)
            .into_iter()
            .map(|f| format!("{version_dir}/{f}")),
    );

    Ok(paths
        .into_iter()
        .flat_map(|p| HASH_SUFFIXES.into_iter().map(move |h| format!("{p}{h}")))
        .collect())
}
