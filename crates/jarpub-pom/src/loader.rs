//! `pom.yaml` discovery and parsing.
//!
//! A file may hold several YAML documents (`---` separated), each one POM.
//! Keys follow the Maven POM names in camelCase (`artifactId`,
//! `inceptionYear`, `scm.developerConnection`, ...).

use std::path::{Path, PathBuf};

use jarpub_util::errors::{PublishError, PublishResult};
use tracing::debug;
use yaml_rust2::{Yaml, YamlLoader};

use crate::group::PomGroup;
use crate::model::{BintrayInfo, License, Organization, Person, PluginInfo, Pom, Scm, Web};

pub const POM_FILENAME: &str = "pom.yaml";
pub const POM_FILENAME_ALT: &str = "pom.yml";

/// The POM file of a directory: `pom.yaml`, or `pom.yml` when only that exists.
pub fn pom_path(dir: &Path) -> PathBuf {
    let primary = dir.join(POM_FILENAME);
    let alternate = dir.join(POM_FILENAME_ALT);
    if !primary.exists() && alternate.exists() {
        alternate
    } else {
        primary
    }
}

/// POM files in resolution order, most specific first: an explicit file,
/// the project directory (when not the root), the root directory, then the
/// Gradle user home.
pub fn pom_file_list(
    explicit: Option<&Path>,
    project_dir: &Path,
    root_dir: &Path,
    gradle_user_home: Option<&Path>,
) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if let Some(file) = explicit {
        files.push(file.to_path_buf());
    }
    if project_dir != root_dir {
        files.push(pom_path(project_dir));
    }
    files.push(pom_path(root_dir));
    if let Some(home) = gradle_user_home {
        files.push(pom_path(home));
    }
    files
}

/// Load every file and combine them, earlier files winning.
pub fn resolve_pom_group(files: &[PathBuf]) -> PublishResult<PomGroup> {
    let mut group = PomGroup::new();
    for file in files {
        group.combine(&load_pom_file(file)?);
    }
    Ok(group)
}

/// Load one POM file. A missing file is an empty group.
pub fn load_pom_file(path: &Path) -> PublishResult<PomGroup> {
    if !path.is_file() {
        debug!("POM file {} does not exist", path.display());
        return Ok(PomGroup::new());
    }
    debug!("Loading POM file {}", path.display());
    let content = std::fs::read_to_string(path)?;
    parse_pom_group(&content).map_err(|e| match e {
        PublishError::Format { message } => {
            PublishError::format(format!("{}: {message}", path.display()))
        }
        other => other,
    })
}

pub fn parse_pom_group(content: &str) -> PublishResult<PomGroup> {
    let docs = YamlLoader::load_from_str(content).map_err(|e| PublishError::format(e.to_string()))?;
    let poms = docs
        .iter()
        .filter(|doc| !matches!(doc, Yaml::Null | Yaml::BadValue))
        .map(parse_pom)
        .collect::<PublishResult<Vec<_>>>()?;
    PomGroup::from_poms(poms)
}

fn parse_pom(doc: &Yaml) -> PublishResult<Pom> {
    if !matches!(doc, Yaml::Hash(_)) {
        return Err(PublishError::format("a POM document must be a mapping"));
    }
    let inception_year = match &doc["inceptionYear"] {
        Yaml::Integer(n) => Some(i32::try_from(*n).map_err(|_| {
            PublishError::format(format!("inceptionYear {n} is out of range"))
        })?),
        Yaml::String(s) => Some(s.trim().parse::<i32>().map_err(|_| {
            PublishError::format(format!("inceptionYear '{s}' is not a year"))
        })?),
        _ => None,
    };

    Ok(Pom {
        group: scalar(&doc["group"]),
        artifact_id: scalar(&doc["artifactId"]),
        version: scalar(&doc["version"]),
        inception_year,
        packaging: scalar(&doc["packaging"]),
        name: scalar(&doc["name"]),
        url: scalar(&doc["url"]),
        description: scalar(&doc["description"]),
        licenses: list(&doc["licenses"], |y| License {
            name: scalar(&y["name"]),
            url: scalar(&y["url"]),
            dist: scalar(&y["dist"]),
            comments: scalar(&y["comments"]),
        }),
        developers: list(&doc["developers"], person),
        contributors: list(&doc["contributors"], person),
        organization: Organization {
            name: scalar(&doc["organization"]["name"]),
            url: scalar(&doc["organization"]["url"]),
        },
        web: Web {
            url: scalar(&doc["web"]["url"]),
            description: scalar(&doc["web"]["description"]),
        },
        scm: scm(&doc["scm"]),
        variant: scalar(&doc["variant"]).unwrap_or_default(),
        bintray: BintrayInfo {
            labels: scalar(&doc["bintray"]["labels"]),
            repo: scalar(&doc["bintray"]["repo"]),
            user_org: scalar(&doc["bintray"]["userOrg"]),
        },
        plugin: plugin(&doc["plugin"]),
    })
}

fn scalar(y: &Yaml) -> Option<String> {
    match y {
        Yaml::String(s) | Yaml::Real(s) => Some(s.clone()),
        Yaml::Integer(n) => Some(n.to_string()),
        Yaml::Boolean(b) => Some(b.to_string()),
        _ => None,
    }
}

fn list<T>(y: &Yaml, item: impl Fn(&Yaml) -> T) -> Vec<T> {
    y.as_vec()
        .map(|items| items.iter().map(item).collect())
        .unwrap_or_default()
}

fn person(y: &Yaml) -> Person {
    Person {
        id: scalar(&y["id"]),
        name: scalar(&y["name"]),
        email: scalar(&y["email"]),
        organization: scalar(&y["organization"]),
        organization_url: scalar(&y["organizationUrl"]),
        time_zone: scalar(&y["timeZone"]),
        url: scalar(&y["url"]),
    }
}

fn scm(y: &Yaml) -> Scm {
    Scm {
        url: scalar(&y["url"]),
        connection: scalar(&y["connection"]),
        developer_connection: scalar(&y["developerConnection"]),
        repo_type: scalar(&y["repoType"]),
        repo_name: scalar(&y["repoName"]),
        issue_type: scalar(&y["issueType"]),
        issue_url: scalar(&y["issueUrl"]),
        tag: scalar(&y["tag"]),
        github_release_note_file: scalar(&y["githubReleaseNoteFile"]),
    }
}

fn plugin(y: &Yaml) -> Option<PluginInfo> {
    if !matches!(y, Yaml::Hash(_)) {
        return None;
    }
    Some(PluginInfo {
        id: scalar(&y["id"]),
        display_name: scalar(&y["displayName"]),
        description: scalar(&y["description"]),
        implementation_class: scalar(&y["implementationClass"]),
        tags: list(&y["tags"], scalar).into_iter().flatten().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_fields() {
        let group = parse_pom_group(
            r#"
group: io.hkhc
artifactId: mylib
version: 1.0
inceptionYear: 2019
licenses:
  - name: Apache-2.0
developers:
  - id: hkhc
    name: Herman Cheung
    timeZone: GMT+8
scm:
  repoType: github.com
  repoName: hkhc/mylib
plugin:
  id: io.hkhc.plugin
  tags: [publish, maven]
"#,
        )
        .unwrap();
        let pom = group.default_pom();
        assert_eq!(pom.group.as_deref(), Some("io.hkhc"));
        assert_eq!(pom.version.as_deref(), Some("1.0"));
        assert_eq!(pom.inception_year, Some(2019));
        assert_eq!(pom.licenses[0].name.as_deref(), Some("Apache-2.0"));
        assert_eq!(pom.developers[0].time_zone.as_deref(), Some("GMT+8"));
        assert_eq!(pom.scm.repo_name.as_deref(), Some("hkhc/mylib"));
        let plugin = pom.plugin.unwrap();
        assert_eq!(plugin.tags, vec!["publish", "maven"]);
    }

    #[test]
    fn comment_only_file_is_empty_group() {
        let group = parse_pom_group("# nothing here\n").unwrap();
        assert!(group.is_empty());
    }

    #[test]
    fn multiple_documents_keyed_by_variant() {
        let group = parse_pom_group("group: io.hkhc\n---\nvariant: debug\nversion: 2.0\n").unwrap();
        assert_eq!(group.variants().collect::<Vec<_>>(), vec!["", "debug"]);
    }

    #[test]
    fn scalar_document_is_format_error() {
        assert!(matches!(
            parse_pom_group("just a string\n"),
            Err(PublishError::Format { .. })
        ));
    }

    #[test]
    fn bad_inception_year() {
        assert!(parse_pom_group("inceptionYear: soon\n").is_err());
    }
}
