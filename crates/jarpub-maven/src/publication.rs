//! A publication: one merged POM, its declarations, and where it goes.

use jarpub_core::config::RepositoryRef;
use jarpub_core::strategy::SignType;
use jarpub_pom::Pom;
use jarpub_util::errors::PublishResult;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

use crate::coordinate::Coordinate;
use crate::declaration::Declaration;
use crate::endpoint::{bintray_snapshot, EndpointResolver, RepoEndpoint};
use crate::layout::{
    expected_local_files, expected_remote_files, get_filename_base, get_path, get_plugin_path,
};
use crate::naming::{capitalize, normalize_pub_name};

/// Stands in for an artifact id that yields no usable name.
pub const DEFAULT_PUB_NAME: &str = "Lib";

/// Where and under which names one publication is uploaded to one endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadTarget {
    pub endpoint_id: String,
    pub kind: &'static str,
    pub base_url: String,
    /// URL of the version directory.
    pub artifact_url: String,
    pub filename_base: String,
    /// URL of the plugin marker directory, for Gradle plugins.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugin_marker_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Publication {
    pom: Pom,
    coordinate: Coordinate,
    declaration: Declaration,
    repos: Vec<RepoEndpoint>,
    name: String,
}

impl Publication {
    /// Derive the coordinate from `pom` and settle the endpoint list.
    ///
    /// On top of the declared repositories, a snapshot going to Bintray goes
    /// to its Artifactory OSS snapshot endpoint instead, and a Gradle plugin
    /// release also goes to the Gradle Plugin Portal, which takes no
    /// snapshots.
    pub fn new(
        pom: Pom,
        declaration: Declaration,
        resolver: &EndpointResolver<'_>,
    ) -> PublishResult<Self> {
        let coordinate = Coordinate::from_pom(&pom, declaration.variant_mode())?;
        let mut repos = Vec::new();
        for repo in declaration.effective_repos() {
            match repo {
                RepoEndpoint::Bintray(bintray) if coordinate.is_snapshot() => {
                    push_unique(&mut repos, bintray_snapshot(&bintray));
                }
                other => push_unique(&mut repos, other),
            }
        }
        if pom.is_gradle_plugin() && !coordinate.is_snapshot() {
            push_unique(&mut repos, resolver.resolve(&RepositoryRef::GradlePortal)?);
        }
        debug!(
            "Publication {} goes to {} repositories",
            coordinate,
            repos.len()
        );
        let name = base_pub_name(&coordinate);
        Ok(Self {
            pom,
            coordinate,
            declaration,
            repos,
            name,
        })
    }

    pub fn coordinate(&self) -> &Coordinate {
        &self.coordinate
    }

    pub fn pom(&self) -> &Pom {
        &self.pom
    }

    pub fn declaration(&self) -> &Declaration {
        &self.declaration
    }

    pub fn repos(&self) -> &[RepoEndpoint] {
        &self.repos
    }

    pub fn variant(&self) -> &str {
        self.coordinate.variant()
    }

    /// Unique among the publications passed to [`resolve_pub_names`].
    pub fn pub_name(&self) -> &str {
        &self.name
    }

    pub fn signing(&self) -> SignType {
        self.declaration.signing()
    }

    /// Signatures are produced for signed releases, never for snapshots.
    pub fn signing_required(&self) -> bool {
        self.signing().should_sign() && !self.coordinate.is_snapshot()
    }

    pub fn docs(&self) -> bool {
        self.declaration.docs()
    }

    pub fn packaging(&self) -> &str {
        self.pom.packaging.as_deref().unwrap_or("jar")
    }

    fn plugin_id(&self) -> Option<&str> {
        self.pom
            .plugin
            .as_ref()
            .and_then(|p| p.id.as_deref())
            .filter(|id| !id.is_empty())
    }

    /// The POM as published, with the variant applied to its identity.
    pub fn published_pom(&self) -> Pom {
        let mut pom = self.pom.clone();
        pom.artifact_id = Some(self.coordinate.artifact_id_with_variant());
        pom.version = Some(self.coordinate.version_with_variant());
        pom
    }

    pub fn upload_targets(&self) -> PublishResult<Vec<UploadTarget>> {
        let path = get_path(&self.coordinate);
        let plugin_path = match self.plugin_id() {
            Some(id) => Some(get_plugin_path(id)?),
            None if self.pom.is_gradle_plugin() => Some(get_plugin_path("")?),
            None => None,
        };
        self.repos
            .iter()
            .map(|repo| -> PublishResult<UploadTarget> {
                let base_url = repo.effective_url(&self.coordinate)?;
                Ok(UploadTarget {
                    endpoint_id: repo.id().to_string(),
                    kind: repo.kind(),
                    artifact_url: format!("{base_url}/{path}"),
                    filename_base: get_filename_base(&self.coordinate),
                    plugin_marker_url: plugin_path.as_ref().map(|p| format!("{base_url}/{p}")),
                    base_url,
                })
            })
            .collect()
    }

    /// Files expected in a Maven local repository's version directory.
    pub fn expected_local_files(&self) -> Vec<String> {
        expected_local_files(&self.coordinate, self.packaging(), self.signing_required())
    }

    /// Files expected in a remote repository, checksums included.
    pub fn expected_remote_files(&self) -> PublishResult<Vec<String>> {
        expected_remote_files(
            &self.coordinate,
            self.packaging(),
            self.signing_required(),
            self.plugin_id(),
        )
    }
}

/// The camelCase artifact id plus the capitalized variant, e.g. `myLibDebug`.
fn base_pub_name(coordinate: &Coordinate) -> String {
    let mut name = normalize_pub_name(coordinate.artifact_id());
    if name.is_empty() {
        name = normalize_pub_name(DEFAULT_PUB_NAME);
    }
    name.push_str(&capitalize(coordinate.variant()));
    name
}

/// Number repeated names in order: `myLib`, `myLib1`, `myLib2`.
pub fn resolve_pub_names(publications: &mut [Publication]) {
    let mut taken = BTreeSet::new();
    for publication in publications.iter_mut() {
        let base = base_pub_name(&publication.coordinate);
        let mut name = base.clone();
        let mut n = 1;
        while taken.contains(&name) {
            name = format!("{base}{n}");
            n += 1;
        }
        taken.insert(name.clone());
        publication.name = name;
    }
}

fn push_unique(repos: &mut Vec<RepoEndpoint>, endpoint: RepoEndpoint) {
    if !repos.iter().any(|r| r.same_repository(&endpoint)) {
        repos.push(endpoint);
    }
}
