use std::fmt;
use std::path::Path;
use std::str::FromStr;

use jarpub_util::errors::{PublishError, PublishResult};
use serde::{Deserialize, Serialize};

use crate::strategy::{SignType, VariantMode};

/// File name of the publishing configuration.
pub const CONFIG_FILE: &str = "jarpub.toml";

/// Publishing configuration loaded from `jarpub.toml`.
///
/// ```toml
/// [publish]
/// repositories = ["maven-local", "maven:mock"]
/// signing = "keybox"
///
/// [[publication]]
/// variant = "debug"
/// variant-mode = "with-artifact-id"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublishConfig {
    /// Root-level declarations every publication falls back to.
    #[serde(default, rename = "publish")]
    pub root: ScopeConfig,

    #[serde(default, rename = "publication")]
    pub publications: Vec<PublicationConfig>,
}

/// Declarations of one scope. Unset values defer to the parent scope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ScopeConfig {
    #[serde(default)]
    pub repositories: Vec<RepositoryRef>,
    #[serde(default)]
    pub variant_mode: Option<VariantMode>,
    #[serde(default)]
    pub signing: Option<SignType>,
    #[serde(default)]
    pub docs: Option<bool>,
}

/// `[[publication]]` entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublicationConfig {
    /// Empty for the default POM.
    #[serde(default)]
    pub variant: String,
    #[serde(flatten)]
    pub scope: ScopeConfig,
}

/// A repository named in configuration, before its endpoint is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RepositoryRef {
    MavenCentral,
    MavenLocal,
    GradlePortal,
    Bintray,
    /// Generic Maven repository under `repository.maven.<key>.*`.
    Maven(String),
    /// Artifactory under `repository.artifactory.<key>.*`.
    Artifactory(String),
    /// Property-driven repository under `repository.<key>.*`.
    Property(String),
}

impl FromStr for RepositoryRef {
    type Err = PublishError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let keyed = |key: &str, make: fn(String) -> RepositoryRef| {
            if key.is_empty() {
                Err(PublishError::Config {
                    message: format!("repository '{s}' needs a key"),
                })
            } else {
                Ok(make(key.to_string()))
            }
        };
        match s.split_once(':') {
            Some(("maven", key)) => keyed(key, RepositoryRef::Maven),
            Some(("artifactory", key)) => keyed(key, RepositoryRef::Artifactory),
            Some(("property", key)) => keyed(key, RepositoryRef::Property),
            Some(_) => Err(unknown_repository(s)),
            None => match s {
                "maven-central" => Ok(RepositoryRef::MavenCentral),
                "maven-local" => Ok(RepositoryRef::MavenLocal),
                "gradle-portal" => Ok(RepositoryRef::GradlePortal),
                "bintray" => Ok(RepositoryRef::Bintray),
                _ => Err(unknown_repository(s)),
            },
        }
    }
}

fn unknown_repository(s: &str) -> PublishError {
    PublishError::Config {
        message: format!(
            "unknown repository '{s}' (expected maven-central, maven-local, gradle-portal, \
             bintray, maven:<key>, artifactory:<key> or property:<key>)"
        ),
    }
}

impl TryFrom<String> for RepositoryRef {
    type Error = PublishError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RepositoryRef> for String {
    fn from(value: RepositoryRef) -> Self {
        value.to_string()
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepositoryRef::MavenCentral => f.write_str("maven-central"),
            RepositoryRef::MavenLocal => f.write_str("maven-local"),
            RepositoryRef::GradlePortal => f.write_str("gradle-portal"),
            RepositoryRef::Bintray => f.write_str("bintray"),
            RepositoryRef::Maven(key) => write!(f, "maven:{key}"),
            RepositoryRef::Artifactory(key) => write!(f, "artifactory:{key}"),
            RepositoryRef::Property(key) => write!(f, "property:{key}"),
        }
    }
}

impl PublishConfig {
    /// Load `jarpub.toml` from `path`, or return defaults if the file doesn't exist.
    pub fn load(path: &Path) -> PublishResult<Self> {
        if !path.is_file() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> PublishResult<Self> {
        toml::from_str(content).map_err(|e| PublishError::Config {
            message: e.to_string(),
        })
    }

    /// Declared publications, or a single default one when none are declared.
    pub fn effective_publications(&self) -> Vec<PublicationConfig> {
        if self.publications.is_empty() {
            vec![PublicationConfig::default()]
        } else {
            self.publications.clone()
        }
    }
}
