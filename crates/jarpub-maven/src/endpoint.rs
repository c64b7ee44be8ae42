//! Repository endpoints and their resolution from project properties.
//!
//! Each repository kind reads its settings from a property namespace:
//!
//! | Kind | Properties |
//! |---|---|
//! | `maven:<key>` | `repository.maven.<key>.{release,snapshot,username,password,description,allowInsecureProtocol}` |
//! | `artifactory:<key>` | `repository.artifactory.<key>.{release,snapshot,username,password,repoKey,description}` |
//! | `property:<key>` | `repository.<key>.{release,snapshot,username,password,apikey,description}` |
//! | `bintray` | `repository.bintray.{release,snapshot,username,apikey,description}` |
//! | `maven-central` | `repository.mavencentral.{username,password,newUser}` |
//! | `gradle-portal` | `gradle.publish.{key,secret}` |
//! | `maven-local` | `maven.repo.local` |
//!
//! A missing mandatory property fails resolution with `MissingConfiguration`.
//! Optional ones fall back to a default, some of them with a warning.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;

use jarpub_core::config::RepositoryRef;
use jarpub_core::properties::PropertySource;
use jarpub_util::errors::{PublishError, PublishResult};
use jarpub_util::report::Reporter;
use serde::Serialize;
use tracing::debug;

use crate::coordinate::Coordinate;
use crate::naming::{capitalize, normalize_pub_name};

const OSSRH_HOST: &str = "oss.sonatype.org";
const OSSRH_HOST_S01: &str = "s01.oss.sonatype.org";
pub const GRADLE_PORTAL_URL: &str = "https://plugins.gradle.org";
pub const BINTRAY_SNAPSHOT_URL: &str = "https://oss.jfrog.org";
pub const BINTRAY_SNAPSHOT_REPO_KEY: &str = "oss-snapshot-local";

/// URLs and credentials of a network repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct RemoteEndpoint {
    pub id: String,
    pub release_url: String,
    pub snapshot_url: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    #[serde(skip_serializing)]
    pub apikey: String,
    pub description: String,
    pub allow_insecure_protocol: bool,
}

/// A resolved repository a publication can be uploaded to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum RepoEndpoint {
    Property(RemoteEndpoint),
    MavenCentral(RemoteEndpoint),
    MavenLocal { path: PathBuf },
    Maven(RemoteEndpoint),
    Artifactory {
        remote: RemoteEndpoint,
        repo_key: String,
    },
    GradlePortal(RemoteEndpoint),
    Bintray(RemoteEndpoint),
}

impl RepoEndpoint {
    pub fn kind(&self) -> &'static str {
        match self {
            RepoEndpoint::Property(_) => "property",
            RepoEndpoint::MavenCentral(_) => "maven-central",
            RepoEndpoint::MavenLocal { .. } => "maven-local",
            RepoEndpoint::Maven(_) => "maven",
            RepoEndpoint::Artifactory { .. } => "artifactory",
            RepoEndpoint::GradlePortal(_) => "gradle-portal",
            RepoEndpoint::Bintray(_) => "bintray",
        }
    }

    pub fn remote(&self) -> Option<&RemoteEndpoint> {
        match self {
            RepoEndpoint::Property(r)
            | RepoEndpoint::MavenCentral(r)
            | RepoEndpoint::Maven(r)
            | RepoEndpoint::GradlePortal(r)
            | RepoEndpoint::Bintray(r)
            | RepoEndpoint::Artifactory { remote: r, .. } => Some(r),
            RepoEndpoint::MavenLocal { .. } => None,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            RepoEndpoint::MavenLocal { .. } => "MavenLocal",
            other => other.remote().map_or("", |r| r.id.as_str()),
        }
    }

    /// Whether both endpoints stand for the same logical repository: same
    /// kind, and same id for the keyed kinds.
    pub fn same_repository(&self, other: &RepoEndpoint) -> bool {
        self.kind() == other.kind() && self.id() == other.id()
    }

    /// Upload URL for `coordinate`: the snapshot URL for snapshots, the
    /// release URL otherwise.
    pub fn effective_url(&self, coordinate: &Coordinate) -> PublishResult<String> {
        if let RepoEndpoint::MavenLocal { path } = self {
            return Ok(format!("file://{}", path.display()));
        }
        let remote = self.remote().map(|r| (r.id.as_str(), &r.release_url, &r.snapshot_url));
        let Some((id, release, snapshot)) = remote else {
            return Err(PublishError::Generic {
                message: format!("Repository '{}' has no URL", self.id()),
            });
        };
        let (url, kind) = if coordinate.is_snapshot() {
            (snapshot, "Snapshot")
        } else {
            (release, "Release")
        };
        if url.is_empty() {
            return Err(PublishError::MissingUrl {
                repo: id.to_string(),
                kind: kind.to_string(),
            });
        }
        Ok(url.trim_end_matches('/').to_string())
    }
}

/// The Artifactory endpoint that takes snapshot uploads for a Bintray account.
pub fn bintray_snapshot(bintray: &RemoteEndpoint) -> RepoEndpoint {
    RepoEndpoint::Artifactory {
        remote: RemoteEndpoint {
            id: bintray.id.clone(),
            release_url: String::new(),
            snapshot_url: bintray.snapshot_url.clone(),
            username: bintray.username.clone(),
            password: bintray.apikey.clone(),
            apikey: String::new(),
            description: "Artifactory OSS Snapshot".to_string(),
            allow_insecure_protocol: false,
        },
        repo_key: BINTRAY_SNAPSHOT_REPO_KEY.to_string(),
    }
}

/// Resolves [`RepositoryRef`]s into endpoints through a property source.
///
/// Each repository is resolved once per resolver; later lookups reuse the
/// endpoint and raise no further warnings.
pub struct EndpointResolver<'a> {
    props: &'a dyn PropertySource,
    reporter: &'a dyn Reporter,
    resolved: RefCell<HashMap<RepositoryRef, RepoEndpoint>>,
}

/// Property lookups under one `prefix.` namespace.
struct Namespace<'r, 'a> {
    resolver: &'r EndpointResolver<'a>,
    prefix: String,
}

impl Namespace<'_, '_> {
    fn key(&self, name: &str) -> String {
        format!("{}.{name}", self.prefix)
    }

    fn lookup(&self, name: &str) -> Option<String> {
        self.resolver
            .props
            .property(&self.key(name))
            .filter(|v| !v.is_empty())
    }

    fn mandatory(&self, name: &str) -> PublishResult<String> {
        self.lookup(name)
            .ok_or_else(|| PublishError::missing_configuration(self.key(name)))
    }

    fn or(&self, name: &str, default: &str) -> String {
        self.lookup(name).unwrap_or_else(|| default.to_string())
    }

    /// Empty string plus a warning when absent.
    fn or_warn(&self, name: &str, why: &str) -> String {
        self.lookup(name).unwrap_or_else(|| {
            let key = self.key(name);
            self.resolver.reporter.warn(
                &format!("Property '{key}' is not set. {why}"),
                &format!(
                    "Add '{key}' to one of the gradle.properties files, \
                     or specify -P{key}=<value> on the command line"
                ),
            );
            String::new()
        })
    }
}

impl<'a> EndpointResolver<'a> {
    pub fn new(props: &'a dyn PropertySource, reporter: &'a dyn Reporter) -> Self {
        Self {
            props,
            reporter,
            resolved: RefCell::new(HashMap::new()),
        }
    }

    fn namespace(&self, prefix: impl Into<String>) -> Namespace<'_, 'a> {
        Namespace {
            resolver: self,
            prefix: prefix.into(),
        }
    }

    pub fn resolve(&self, repo: &RepositoryRef) -> PublishResult<RepoEndpoint> {
        if let Some(endpoint) = self.resolved.borrow().get(repo) {
            return Ok(endpoint.clone());
        }
        let endpoint = self.resolve_uncached(repo)?;
        self.resolved
            .borrow_mut()
            .insert(repo.clone(), endpoint.clone());
        Ok(endpoint)
    }

    fn resolve_uncached(&self, repo: &RepositoryRef) -> PublishResult<RepoEndpoint> {
        debug!("Resolving repository {repo}");
        match repo {
            RepositoryRef::MavenCentral => Ok(self.maven_central()),
            RepositoryRef::MavenLocal => Ok(self.maven_local()),
            RepositoryRef::GradlePortal => Ok(self.gradle_portal()),
            RepositoryRef::Bintray => self.bintray(),
            RepositoryRef::Maven(key) => self.maven(key),
            RepositoryRef::Artifactory(key) => self.artifactory(key),
            RepositoryRef::Property(key) => self.property_repo(key),
        }
    }

    fn maven(&self, key: &str) -> PublishResult<RepoEndpoint> {
        let ns = self.namespace(format!("repository.maven.{key}"));
        Ok(RepoEndpoint::Maven(RemoteEndpoint {
            id: capitalize(&normalize_pub_name(&format!("maven.{key}"))),
            release_url: ns.mandatory("release")?,
            snapshot_url: ns.mandatory("snapshot")?,
            username: ns.mandatory("username")?,
            password: ns.mandatory("password")?,
            apikey: String::new(),
            description: ns.or("description", &format!("Maven repository '{key}'")),
            allow_insecure_protocol: ns.or("allowInsecureProtocol", "false") == "true",
        }))
    }

    fn artifactory(&self, key: &str) -> PublishResult<RepoEndpoint> {
        let ns = self.namespace(format!("repository.artifactory.{key}"));
        let remote = RemoteEndpoint {
            id: capitalize(&normalize_pub_name(&format!("artifactory.{key}"))),
            release_url: ns.mandatory("release")?,
            snapshot_url: ns.mandatory("snapshot")?,
            username: ns.mandatory("username")?,
            password: ns.mandatory("password")?,
            apikey: String::new(),
            description: ns.or("description", "Artifactory"),
            allow_insecure_protocol: false,
        };
        let repo_key = ns.or_warn("repoKey", "Uploads go to the default repository of the server.");
        Ok(RepoEndpoint::Artifactory { remote, repo_key })
    }

    fn property_repo(&self, key: &str) -> PublishResult<RepoEndpoint> {
        let ns = self.namespace(format!("repository.{key}"));
        Ok(RepoEndpoint::Property(RemoteEndpoint {
            id: capitalize(&normalize_pub_name(key)),
            release_url: ns.mandatory("release")?,
            snapshot_url: ns.mandatory("snapshot")?,
            username: ns.mandatory("username")?,
            password: ns.mandatory("password")?,
            apikey: ns.or("apikey", ""),
            description: ns.or_warn("description", "The repository has no description."),
            allow_insecure_protocol: false,
        }))
    }

    fn bintray(&self) -> PublishResult<RepoEndpoint> {
        let ns = self.namespace("repository.bintray");
        Ok(RepoEndpoint::Bintray(RemoteEndpoint {
            id: "Bintray".to_string(),
            release_url: ns.or("release", ""),
            snapshot_url: ns.or("snapshot", BINTRAY_SNAPSHOT_URL),
            username: ns.mandatory("username")?,
            password: String::new(),
            apikey: ns.mandatory("apikey")?,
            description: ns.or("description", "Bintray"),
            allow_insecure_protocol: false,
        }))
    }

    fn maven_central(&self) -> RepoEndpoint {
        let ns = self.namespace("repository.mavencentral");
        let new_user = match ns.lookup("newUser") {
            Some(v) => v.eq_ignore_ascii_case("true"),
            None => {
                self.reporter.warn(
                    "OSSRH user has not been specified to be new or old. New account is assumed.",
                    "If the account was created before February 2021, it is an old account. \
                     Add 'repository.mavencentral.newUser=false' to gradle.properties",
                );
                true
            }
        };
        let host = if new_user { OSSRH_HOST_S01 } else { OSSRH_HOST };
        RepoEndpoint::MavenCentral(RemoteEndpoint {
            id: "MavenCentral".to_string(),
            release_url: format!("https://{host}/service/local/staging/deploy/maven2"),
            snapshot_url: format!("https://{host}/content/repositories/snapshots"),
            username: ns.or_warn("username", "Uploads to Maven Central will not authenticate."),
            password: ns.or_warn("password", "Uploads to Maven Central will not authenticate."),
            apikey: String::new(),
            description: "Maven Central".to_string(),
            allow_insecure_protocol: false,
        })
    }

    fn gradle_portal(&self) -> RepoEndpoint {
        let ns = self.namespace("gradle.publish");
        RepoEndpoint::GradlePortal(RemoteEndpoint {
            id: "GradlePortal".to_string(),
            release_url: GRADLE_PORTAL_URL.to_string(),
            snapshot_url: String::new(),
            username: ns.or_warn("key", "Plugin uploads will not authenticate."),
            password: ns.or_warn("secret", "Plugin uploads will not authenticate."),
            apikey: String::new(),
            description: "Gradle Plugin Portal".to_string(),
            allow_insecure_protocol: false,
        })
    }

    fn maven_local(&self) -> RepoEndpoint {
        let path = self
            .props
            .property("maven.repo.local")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                jarpub_util::fs::home_dir()
                    .unwrap_or_default()
                    .join(".m2")
                    .join("repository")
            });
        RepoEndpoint::MavenLocal { path }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jarpub_core::strategy::VariantMode;
    use jarpub_util::report::MemoryReporter;
    use std::collections::BTreeMap;

    fn props(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn coord(version: &str) -> Coordinate {
        Coordinate::new(Some("io.hkhc"), Some("mylib"), Some(version), "", VariantMode::WithVersion)
            .unwrap()
    }

    #[test]
    fn bintray_snapshot_uses_apikey_as_password() {
        let bintray = RemoteEndpoint {
            id: "Bintray".into(),
            snapshot_url: BINTRAY_SNAPSHOT_URL.into(),
            username: "user".into(),
            apikey: "key".into(),
            ..RemoteEndpoint::default()
        };
        let RepoEndpoint::Artifactory { remote, repo_key } = bintray_snapshot(&bintray) else {
            panic!("expected an artifactory endpoint");
        };
        assert_eq!(repo_key, "oss-snapshot-local");
        assert_eq!(remote.password, "key");
        assert_eq!(remote.release_url, "");
        assert_eq!(remote.description, "Artifactory OSS Snapshot");
    }

    #[test]
    fn effective_url_routes_by_snapshot() {
        let p = props(&[
            ("repository.maven.mock.release", "https://release/"),
            ("repository.maven.mock.snapshot", "https://snapshot"),
            ("repository.maven.mock.username", "u"),
            ("repository.maven.mock.password", "p"),
        ]);
        let reporter = MemoryReporter::new();
        let endpoint = EndpointResolver::new(&p, &reporter)
            .resolve(&RepositoryRef::Maven("mock".into()))
            .unwrap();
        assert_eq!(endpoint.effective_url(&coord("1.0")).unwrap(), "https://release");
        assert_eq!(
            endpoint.effective_url(&coord("1.0-SNAPSHOT")).unwrap(),
            "https://snapshot"
        );
    }

    #[test]
    fn gradle_portal_rejects_snapshots() {
        let p = props(&[("gradle.publish.key", "k"), ("gradle.publish.secret", "s")]);
        let reporter = MemoryReporter::new();
        let endpoint = EndpointResolver::new(&p, &reporter)
            .resolve(&RepositoryRef::GradlePortal)
            .unwrap();
        let err = endpoint.effective_url(&coord("1.0-SNAPSHOT")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Snapshot URL of the repo 'GradlePortal' is not provided"
        );
        assert!(reporter.reports().is_empty());
    }

    #[test]
    fn maven_local_honours_property() {
        let p = props(&[("maven.repo.local", "/tmp/m2")]);
        let reporter = MemoryReporter::new();
        let endpoint = EndpointResolver::new(&p, &reporter)
            .resolve(&RepositoryRef::MavenLocal)
            .unwrap();
        assert_eq!(
            endpoint,
            RepoEndpoint::MavenLocal {
                path: PathBuf::from("/tmp/m2")
            }
        );
        assert_eq!(endpoint.effective_url(&coord("1.0")).unwrap(), "file:///tmp/m2");
    }
}
