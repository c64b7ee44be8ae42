//! Completing a POM from project defaults before it is published.

use jarpub_util::report::Reporter;
use tracing::debug;

use crate::license::license_url;
use crate::model::{is_blank, Pom, Scm};

/// Values the host project supplies for fields a POM leaves blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectDefaults {
    pub group: Option<String>,
    /// Project name, used as the artifact id.
    pub name: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
    /// Inception year when the POM gives none.
    pub year: i32,
}

fn fill_with(field: &mut Option<String>, value: Option<String>) {
    if is_blank(field) && !is_blank(&value) {
        *field = value;
    }
}

impl Scm {
    /// Derive URLs and connections from `repo_type` and `repo_name`.
    fn expand_git(&mut self) {
        let (Some(repo_type), Some(repo_name)) = (self.repo_type.clone(), self.repo_name.clone())
        else {
            return;
        };
        if repo_type.is_empty() || repo_name.is_empty() {
            return;
        }
        fill_with(&mut self.url, Some(format!("https://{repo_type}/{repo_name}")));
        fill_with(
            &mut self.connection,
            Some(format!("scm:git@{repo_type}:{repo_name}")),
        );
        fill_with(
            &mut self.developer_connection,
            Some(format!("scm:git@{repo_type}:{repo_name}.git")),
        );
        fill_with(&mut self.issue_type, Some(repo_type.clone()));
        fill_with(
            &mut self.issue_url,
            Some(format!("https://{repo_type}/{repo_name}/issues")),
        );
    }
}

impl Pom {
    /// Fill the remaining blanks from the project and from derivable values.
    /// Fields already set are left alone.
    pub fn finalize(&mut self, defaults: &ProjectDefaults, reporter: &dyn Reporter) {
        fill_with(&mut self.group, defaults.group.clone());
        fill_with(&mut self.artifact_id, defaults.name.clone());
        fill_with(&mut self.name, self.artifact_id.clone());
        fill_with(&mut self.version, defaults.version.clone());
        if self.inception_year.is_none() {
            self.inception_year = Some(defaults.year);
        }
        fill_with(&mut self.packaging, Some("jar".to_string()));
        fill_with(&mut self.description, defaults.description.clone());

        for license in &mut self.licenses {
            if is_blank(&license.url) {
                if let Some(name) = license.name.as_deref().filter(|n| !n.is_empty()) {
                    match license_url(name) {
                        Some(url) => license.url = Some(url.to_string()),
                        None => reporter.warn(
                            &format!("No known URL for license '{name}'"),
                            "Add 'url' to the license in pom.yaml",
                        ),
                    }
                }
            }
            fill_with(&mut license.dist, Some("repo".to_string()));
        }

        self.scm.expand_git();

        fill_with(&mut self.web.url, self.scm.url.clone());
        fill_with(&mut self.web.description, self.description.clone());
        fill_with(&mut self.url, self.scm.url.clone());

        debug!(
            "Finalized POM {}:{}:{}",
            self.group.as_deref().unwrap_or_default(),
            self.artifact_id.as_deref().unwrap_or_default(),
            self.version.as_deref().unwrap_or_default()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::License;
    use jarpub_util::report::MemoryReporter;

    fn s(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    fn defaults() -> ProjectDefaults {
        ProjectDefaults {
            group: s("io.hkhc"),
            name: s("mylib"),
            version: s("1.0"),
            description: s("A library"),
            year: 2024,
        }
    }

    #[test]
    fn fills_identity_and_derived_fields() {
        let mut pom = Pom::default();
        let reporter = MemoryReporter::new();
        pom.finalize(&defaults(), &reporter);

        assert_eq!(pom.group, s("io.hkhc"));
        assert_eq!(pom.artifact_id, s("mylib"));
        assert_eq!(pom.name, s("mylib"));
        assert_eq!(pom.version, s("1.0"));
        assert_eq!(pom.inception_year, Some(2024));
        assert_eq!(pom.packaging, s("jar"));
        assert_eq!(pom.description, s("A library"));
        assert_eq!(pom.web.description, s("A library"));
        assert!(reporter.reports().is_empty());
    }

    #[test]
    fn keeps_set_fields() {
        let mut pom = Pom {
            artifact_id: s("custom"),
            name: s("Custom Name"),
            inception_year: Some(2018),
            packaging: s("aar"),
            ..Pom::default()
        };
        pom.finalize(&defaults(), &MemoryReporter::new());
        assert_eq!(pom.artifact_id, s("custom"));
        assert_eq!(pom.name, s("Custom Name"));
        assert_eq!(pom.inception_year, Some(2018));
        assert_eq!(pom.packaging, s("aar"));
    }

    #[test]
    fn expands_scm_from_repo_type_and_name() {
        let mut pom = Pom {
            scm: Scm {
                repo_type: s("github.com"),
                repo_name: s("hkhc/jarpub"),
                ..Scm::default()
            },
            ..Pom::default()
        };
        pom.finalize(&defaults(), &MemoryReporter::new());
        assert_eq!(pom.scm.url, s("https://github.com/hkhc/jarpub"));
        assert_eq!(pom.scm.connection, s("scm:git@github.com:hkhc/jarpub"));
        assert_eq!(
            pom.scm.developer_connection,
            s("scm:git@github.com:hkhc/jarpub.git")
        );
        assert_eq!(pom.scm.issue_type, s("github.com"));
        assert_eq!(
            pom.scm.issue_url,
            s("https://github.com/hkhc/jarpub/issues")
        );
        assert_eq!(pom.web.url, s("https://github.com/hkhc/jarpub"));
        assert_eq!(pom.url, s("https://github.com/hkhc/jarpub"));
    }

    #[test]
    fn scm_needs_both_type_and_name() {
        let mut pom = Pom {
            scm: Scm {
                repo_type: s("github.com"),
                ..Scm::default()
            },
            ..Pom::default()
        };
        pom.finalize(&defaults(), &MemoryReporter::new());
        assert_eq!(pom.scm.url, None);
        assert_eq!(pom.url, None);
    }

    #[test]
    fn license_url_and_dist() {
        let mut pom = Pom {
            licenses: vec![License::named("Apache-2.0"), License::named("Custom-1.0")],
            ..Pom::default()
        };
        let reporter = MemoryReporter::new();
        pom.finalize(&defaults(), &reporter);
        assert_eq!(
            pom.licenses[0].url,
            s("http://www.apache.org/licenses/LICENSE-2.0.txt")
        );
        assert_eq!(pom.licenses[0].dist, s("repo"));
        assert_eq!(pom.licenses[1].url, None);
        assert_eq!(reporter.warnings().len(), 1);
        assert!(reporter.warnings()[0].title.contains("Custom-1.0"));
    }

    #[test]
    fn finalize_twice_is_stable() {
        let mut pom = Pom {
            licenses: vec![License::named("MIT")],
            ..Pom::default()
        };
        pom.finalize(&defaults(), &MemoryReporter::new());
        let once = pom.clone();
        pom.finalize(&defaults(), &MemoryReporter::new());
        assert_eq!(pom, once);
    }
}
