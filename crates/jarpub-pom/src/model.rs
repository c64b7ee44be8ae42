//! POM records and their gap-filling merge.
//!
//! Every record field is optional. Merging never overwrites a field that is
//! already set and never clears one: it only fills blanks from the other
//! record. A field holding an empty string counts as blank.

use serde::Serialize;

/// Gap-filling combination of two partially populated records.
pub trait Overlay {
    /// Fill every blank field of `self` from `other`.
    fn merge(&mut self, other: &Self);

    /// Apply `self` onto `target`, whose set fields take precedence.
    fn overlay(&self, target: &mut Self)
    where
        Self: Sized,
    {
        target.merge(self);
    }
}

/// Identity of list items, used to pair items of two lists during merge.
pub trait Keyed {
    fn same_key(&self, other: &Self) -> bool;
}

pub(crate) fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |s| s.is_empty())
}

fn fill(field: &mut Option<String>, other: &Option<String>) {
    if is_blank(field) && !is_blank(other) {
        field.clone_from(other);
    }
}

macro_rules! fill_fields {
    ($me:ident, $other:ident; $($field:ident),+ $(,)?) => {
        $( fill(&mut $me.$field, &$other.$field); )+
    };
}

/// Merge two keyed lists.
///
/// The result holds the items of `incoming` in their order, each gap-filled
/// into the matching item of `target` (whose fields win), followed by the
/// items of `target` nothing matched, in their original order. Every incoming
/// item pairs with at most one target item.
pub fn merge_list<T>(target: &mut Vec<T>, incoming: &[T])
where
    T: Overlay + Keyed + Clone,
{
    let mut used = vec![false; target.len()];
    let mut merged = Vec::with_capacity(target.len() + incoming.len());

    for item in incoming {
        let found = target
            .iter()
            .enumerate()
            .position(|(i, t)| !used[i] && t.same_key(item));
        match found {
            Some(i) => {
                used[i] = true;
                let mut combined = target[i].clone();
                combined.merge(item);
                merged.push(combined);
            }
            None => merged.push(item.clone()),
        }
    }

    merged.extend(
        target
            .drain(..)
            .zip(used)
            .filter(|(_, used)| !used)
            .map(|(t, _)| t),
    );
    *target = merged;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct License {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

impl License {
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Self::default()
        }
    }
}

impl Overlay for License {
    fn merge(&mut self, other: &Self) {
        fill_fields!(self, other; name, url, dist, comments);
    }
}

impl Keyed for License {
    fn same_key(&self, other: &Self) -> bool {
        if is_blank(&self.name) || is_blank(&other.name) {
            return self == other;
        }
        self.name == other.name
    }
}

/// A developer or contributor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Overlay for Person {
    fn merge(&mut self, other: &Self) {
        fill_fields!(self, other; id, name, email, organization, organization_url, time_zone, url);
    }
}

impl Keyed for Person {
    /// Ids pair people when both carry one, names otherwise.
    fn same_key(&self, other: &Self) -> bool {
        if !is_blank(&self.id) && !is_blank(&other.id) {
            return self.id == other.id;
        }
        if !is_blank(&self.name) && !is_blank(&other.name) {
            return self.name == other.name;
        }
        self == other
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Organization {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Overlay for Organization {
    fn merge(&mut self, other: &Self) {
        fill_fields!(self, other; name, url);
    }
}

/// Project web site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Web {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Overlay for Web {
    fn merge(&mut self, other: &Self) {
        fill_fields!(self, other; url, description);
    }
}

/// Source control details. `repo_type` (`github.com`, `gitlab.com`, ...) and
/// `repo_name` (`user/repo`) are enough to derive the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub developer_connection: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_release_note_file: Option<String>,
}

impl Overlay for Scm {
    fn merge(&mut self, other: &Self) {
        fill_fields!(
            self, other;
            url,
            connection,
            developer_connection,
            repo_type,
            repo_name,
            issue_type,
            issue_url,
            tag,
            github_release_note_file,
        );
    }
}

/// Extra details for the legacy Bintray target; not part of the POM document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BintrayInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_org: Option<String>,
}

impl Overlay for BintrayInfo {
    fn merge(&mut self, other: &Self) {
        fill_fields!(self, other; labels, repo, user_org);
    }
}

/// Gradle plugin marker details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implementation_class: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Overlay for PluginInfo {
    fn merge(&mut self, other: &Self) {
        fill_fields!(self, other; id, display_name, description, implementation_class);
        for tag in &other.tags {
            if !self.tags.contains(tag) {
                self.tags.push(tag.clone());
            }
        }
    }
}

/// The root POM record.
///
/// `variant` and `bintray` are not part of the Maven POM document: the
/// former tells documents of one `pom.yaml` apart, the latter carries
/// legacy upload details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pom {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inception_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub packaging: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub licenses: Vec<License>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub developers: Vec<Person>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub contributors: Vec<Person>,
    pub organization: Organization,
    pub web: Web,
    pub scm: Scm,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub variant: String,
    pub bintray: BintrayInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugin: Option<PluginInfo>,
}

impl Pom {
    pub fn is_snapshot(&self) -> bool {
        self.version
            .as_deref()
            .is_some_and(jarpub_core::version::is_snapshot)
    }

    pub fn is_gradle_plugin(&self) -> bool {
        self.plugin.is_some()
    }

    /// Names of the identity fields (`group`, `artifactId`, `version`) still blank.
    pub fn missing_identity(&self) -> Vec<String> {
        [
            ("group", &self.group),
            ("artifactId", &self.artifact_id),
            ("version", &self.version),
        ]
        .into_iter()
        .filter(|(_, v)| is_blank(v))
        .map(|(k, _)| k.to_string())
        .collect()
    }
}

impl Overlay for Pom {
    fn merge(&mut self, other: &Self) {
        fill_fields!(self, other; group, artifact_id, version, packaging, name, url, description);
        if self.inception_year.is_none() {
            self.inception_year = other.inception_year;
        }
        if self.variant.is_empty() {
            self.variant.clone_from(&other.variant);
        }

        merge_list(&mut self.licenses, &other.licenses);
        merge_list(&mut self.developers, &other.developers);
        merge_list(&mut self.contributors, &other.contributors);

        self.organization.merge(&other.organization);
        self.web.merge(&other.web);
        self.scm.merge(&other.scm);
        self.bintray.merge(&other.bintray);

        match (&mut self.plugin, &other.plugin) {
            (Some(mine), Some(theirs)) => mine.merge(theirs),
            (None, Some(theirs)) => self.plugin = Some(theirs.clone()),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    #[test]
    fn merge_fills_only_blanks() {
        let mut org = Organization {
            name: s("Mine"),
            url: s(""),
        };
        org.merge(&Organization {
            name: s("Theirs"),
            url: s("https://theirs"),
        });
        assert_eq!(org.name, s("Mine"));
        assert_eq!(org.url, s("https://theirs"));
    }

    #[test]
    fn merge_never_clears() {
        let mut web = Web {
            url: s("https://a"),
            description: None,
        };
        web.merge(&Web::default());
        assert_eq!(web.url, s("https://a"));
    }

    #[test]
    fn overlay_gives_target_precedence() {
        let source = Web {
            url: s("https://default"),
            description: s("default"),
        };
        let mut target = Web {
            url: s("https://specific"),
            description: None,
        };
        source.overlay(&mut target);
        assert_eq!(target.url, s("https://specific"));
        assert_eq!(target.description, s("default"));
    }

    #[test]
    fn license_list_new_items_come_first() {
        let mut target = vec![License::named("A"), License::named("B")];
        merge_list(&mut target, &[License::named("C")]);
        let names: Vec<_> = target.iter().map(|l| l.name.clone().unwrap()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[test]
    fn people_list_pairs_by_id() {
        let person = |id: &str, email: Option<String>| Person {
            id: s(id),
            email,
            ..Person::default()
        };
        let mut target = vec![person("1", None), person("2", None)];
        merge_list(&mut target, &[person("2", s("changed"))]);
        assert_eq!(target, vec![person("2", s("changed")), person("1", None)]);
    }

    #[test]
    fn people_fall_back_to_name_match() {
        let mut target = vec![Person {
            id: s("hkhc"),
            name: s("Herman"),
            ..Person::default()
        }];
        let incoming = [Person {
            name: s("Herman"),
            email: s("h@example.com"),
            ..Person::default()
        }];
        merge_list(&mut target, &incoming);
        assert_eq!(target.len(), 1);
        assert_eq!(target[0].id, s("hkhc"));
        assert_eq!(target[0].email, s("h@example.com"));
    }

    #[test]
    fn duplicate_keys_pair_one_to_one() {
        let mut target = vec![License::named("MIT"), License::named("MIT")];
        merge_list(&mut target, &[License::named("MIT")]);
        assert_eq!(target.len(), 2);
    }

    #[test]
    fn plugin_tags_union_in_order() {
        let mut mine = PluginInfo {
            tags: vec!["a".into(), "b".into()],
            ..PluginInfo::default()
        };
        mine.merge(&PluginInfo {
            id: s("io.hkhc.jarpub"),
            tags: vec!["b".into(), "c".into()],
            ..PluginInfo::default()
        });
        assert_eq!(mine.tags, vec!["a", "b", "c"]);
        assert_eq!(mine.id, s("io.hkhc.jarpub"));
    }

    #[test]
    fn pom_merge_recurses_into_nested_records() {
        let mut pom = Pom {
            group: s("io.hkhc"),
            scm: Scm {
                repo_type: s("github.com"),
                ..Scm::default()
            },
            ..Pom::default()
        };
        let defaults = Pom {
            group: s("com.other"),
            version: s("1.0"),
            inception_year: Some(2020),
            scm: Scm {
                repo_type: s("gitlab.com"),
                repo_name: s("hkhc/mylib"),
                ..Scm::default()
            },
            plugin: Some(PluginInfo {
                id: s("io.hkhc.plugin"),
                ..PluginInfo::default()
            }),
            ..Pom::default()
        };
        pom.merge(&defaults);
        assert_eq!(pom.group, s("io.hkhc"));
        assert_eq!(pom.version, s("1.0"));
        assert_eq!(pom.inception_year, Some(2020));
        assert_eq!(pom.scm.repo_type, s("github.com"));
        assert_eq!(pom.scm.repo_name, s("hkhc/mylib"));
        assert!(pom.is_gradle_plugin());
    }

    #[test]
    fn missing_identity_names_blank_fields() {
        let pom = Pom {
            group: s("io.hkhc"),
            version: s(""),
            ..Pom::default()
        };
        assert_eq!(pom.missing_identity(), vec!["artifactId", "version"]);
    }
}
