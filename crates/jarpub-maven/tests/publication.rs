use std::collections::BTreeMap;
use std::sync::Arc;

use jarpub_core::config::{PublishConfig, RepositoryRef};
use jarpub_core::strategy::SignType;
use jarpub_maven::publication::resolve_pub_names;
use jarpub_maven::{Declaration, EndpointResolver, Publication, RepoEndpoint};
use jarpub_pom::{PluginInfo, Pom};
use jarpub_util::errors::PublishError;
use jarpub_util::report::MemoryReporter;

fn props() -> BTreeMap<String, String> {
    [
        ("repository.maven.mock.release", "https://mock/release"),
        ("repository.maven.mock.snapshot", "https://mock/snapshot"),
        ("repository.maven.mock.username", "user"),
        ("repository.maven.mock.password", "secret"),
        ("repository.bintray.username", "buser"),
        ("repository.bintray.apikey", "bkey"),
        ("gradle.publish.key", "k"),
        ("gradle.publish.secret", "s"),
        ("maven.repo.local", "/tmp/m2"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn pom(version: &str) -> Pom {
    Pom {
        group: Some("io.hkhc".into()),
        artifact_id: Some("mylib".into()),
        version: Some(version.into()),
        ..Pom::default()
    }
}

#[test]
fn test_upload_targets_follow_snapshot_routing() {
    let p = props();
    let reporter = MemoryReporter::new();
    let resolver = EndpointResolver::new(&p, &reporter);
    let mut decl = Declaration::root();
    decl.register(resolver.resolve(&RepositoryRef::Maven("mock".into())).unwrap());
    decl.register(resolver.resolve(&RepositoryRef::MavenLocal).unwrap());

    let release = Publication::new(pom("1.0"), decl.clone(), &resolver).unwrap();
    let targets = release.upload_targets().unwrap();
    assert_eq!(targets.len(), 2);
    assert_eq!(targets[0].endpoint_id, "MavenMock");
    assert_eq!(targets[0].base_url, "https://mock/release");
    assert_eq!(
        targets[0].artifact_url,
        "https://mock/release/io/hkhc/mylib/1.0"
    );
    assert_eq!(targets[0].filename_base, "mylib-1.0");
    assert_eq!(targets[1].base_url, "file:///tmp/m2");

    let snapshot = Publication::new(pom("1.0-SNAPSHOT"), decl, &resolver).unwrap();
    let targets = snapshot.upload_targets().unwrap();
    assert_eq!(targets[0].base_url, "https://mock/snapshot");
}

#[test]
fn test_incomplete_pom_fails_publication() {
    let p = props();
    let reporter = MemoryReporter::new();
    let resolver = EndpointResolver::new(&p, &reporter);
    let mut incomplete = pom("1.0");
    incomplete.group = None;
    let err = Publication::new(incomplete, Declaration::root(), &resolver).unwrap_err();
    assert!(matches!(err, PublishError::IncompletePom { ref missing } if missing == &["group"]));
}

#[test]
fn test_bintray_snapshot_goes_to_artifactory() {
    let p = props();
    let reporter = MemoryReporter::new();
    let resolver = EndpointResolver::new(&p, &reporter);
    let mut decl = Declaration::root();
    decl.register(resolver.resolve(&RepositoryRef::Bintray).unwrap());

    let snapshot = Publication::new(pom("1.0-SNAPSHOT"), decl.clone(), &resolver).unwrap();
    assert_eq!(snapshot.repos().len(), 1);
    let RepoEndpoint::Artifactory { remote, repo_key } = &snapshot.repos()[0] else {
        panic!("expected artifactory, got {:?}", snapshot.repos()[0]);
    };
    assert_eq!(repo_key, "oss-snapshot-local");
    assert_eq!(remote.password, "bkey");
    let targets = snapshot.upload_targets().unwrap();
    assert_eq!(targets[0].base_url, "https://oss.jfrog.org");

    let release = Publication::new(pom("1.0"), decl, &resolver).unwrap();
    assert_eq!(release.repos()[0].kind(), "bintray");
    let err = release.upload_targets().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Release URL of the repo 'Bintray' is not provided"
    );
}

#[test]
fn test_plugin_release_adds_gradle_portal() {
    let p = props();
    let reporter = MemoryReporter::new();
    let resolver = EndpointResolver::new(&p, &reporter);
    let mut plugin_pom = pom("1.0");
    plugin_pom.plugin = Some(PluginInfo {
        id: Some("io.hkhc.demo".into()),
        ..PluginInfo::default()
    });

    let release = Publication::new(plugin_pom.clone(), Declaration::root(), &resolver).unwrap();
    assert_eq!(release.repos().len(), 1);
    assert_eq!(release.repos()[0].kind(), "gradle-portal");
    let targets = release.upload_targets().unwrap();
    assert_eq!(
        targets[0].plugin_marker_url.as_deref(),
        Some("https://plugins.gradle.org/io/hkhc/demo/io.hkhc.demo.gradle.plugin")
    );

    plugin_pom.version = Some("1.0-SNAPSHOT".into());
    let snapshot = Publication::new(plugin_pom, Declaration::root(), &resolver).unwrap();
    assert!(snapshot.repos().is_empty());
}

#[test]
fn test_plugin_releases_share_one_portal_resolution() {
    let p: BTreeMap<String, String> = BTreeMap::new();
    let reporter = MemoryReporter::new();
    let resolver = EndpointResolver::new(&p, &reporter);
    let mut plugin_pom = pom("1.0");
    plugin_pom.plugin = Some(PluginInfo {
        id: Some("io.hkhc.demo".into()),
        ..PluginInfo::default()
    });

    Publication::new(plugin_pom.clone(), Declaration::root(), &resolver).unwrap();
    let warned = reporter.warnings().len();
    assert_eq!(warned, 2);
    plugin_pom.variant = "debug".into();
    let debug = Publication::new(plugin_pom, Declaration::root(), &resolver).unwrap();
    assert_eq!(debug.repos()[0].kind(), "gradle-portal");
    assert_eq!(reporter.warnings().len(), warned);
}

#[test]
fn test_pub_names_follow_artifact_id_and_stay_unique() {
    let p = props();
    let reporter = MemoryReporter::new();
    let resolver = EndpointResolver::new(&p, &reporter);
    let named = |artifact_id: Option<&str>| {
        let mut doc = pom("1.0");
        doc.artifact_id = artifact_id.map(str::to_string);
        doc
    };

    let mut publications = vec![
        Publication::new(named(Some("my-lib")), Declaration::root(), &resolver).unwrap(),
        Publication::new(named(Some("my-lib")), Declaration::root(), &resolver).unwrap(),
        Publication::new(named(Some("my.lib")), Declaration::root(), &resolver).unwrap(),
        Publication::new(named(Some("--")), Declaration::root(), &resolver).unwrap(),
    ];
    assert_eq!(publications[0].pub_name(), "myLib");
    assert_eq!(publications[1].pub_name(), "myLib");

    resolve_pub_names(&mut publications);
    let names: Vec<&str> = publications.iter().map(|p| p.pub_name()).collect();
    assert_eq!(names, vec!["myLib", "myLib1", "myLib2", "lib"]);
}

#[test]
fn test_declarations_from_config() {
    let config = PublishConfig::parse(
        r#"
[publish]
repositories = ["maven-local"]
signing = "keyring"

[[publication]]
variant = "debug"
variant-mode = "with-artifact-id"
repositories = ["maven:mock"]
docs = false
"#,
    )
    .unwrap();
    let p = props();
    let reporter = MemoryReporter::new();
    let resolver = EndpointResolver::new(&p, &reporter);
    let root = Arc::new(Declaration::from_config(&config.root, None, &resolver).unwrap());
    let pub_config = &config.effective_publications()[0];
    let decl =
        Declaration::from_config(&pub_config.scope, Some(root.clone()), &resolver).unwrap();

    let mut debug_pom = pom("1.0");
    debug_pom.variant = pub_config.variant.clone();
    let publication = Publication::new(debug_pom, decl, &resolver).unwrap();

    assert_eq!(publication.coordinate().gav(), "io.hkhc:mylib-debug:1.0");
    assert_eq!(publication.pub_name(), "mylibDebug");
    assert_eq!(publication.signing(), SignType::Keyring);
    assert!(publication.signing_required());
    assert!(!publication.docs());
    let ids: Vec<&str> = publication.repos().iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec!["MavenMock", "MavenLocal"]);

    let published = publication.published_pom();
    assert_eq!(published.artifact_id.as_deref(), Some("mylib-debug"));
    assert_eq!(published.version.as_deref(), Some("1.0"));
}

#[test]
fn test_upload_targets_serialize_without_secrets() {
    let p = props();
    let reporter = MemoryReporter::new();
    let resolver = EndpointResolver::new(&p, &reporter);
    let mut decl = Declaration::root();
    decl.register(resolver.resolve(&RepositoryRef::Maven("mock".into())).unwrap());
    let publication = Publication::new(pom("1.0"), decl, &resolver).unwrap();

    let json = serde_json::to_string(&publication.repos()).unwrap();
    assert!(json.contains("\"kind\":\"maven\""));
    assert!(!json.contains("secret"));
}
