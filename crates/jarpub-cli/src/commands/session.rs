//! Everything a command needs: properties, configuration and POMs of one
//! project, loaded once per invocation.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Datelike;
use jarpub_core::config::{PublicationConfig, PublishConfig, ScopeConfig, CONFIG_FILE};
use jarpub_core::properties::{parse_override, LayeredProperties, PropertySource};
use jarpub_maven::publication::resolve_pub_names;
use jarpub_maven::{Declaration, EndpointResolver, Publication};
use jarpub_pom::finalize::ProjectDefaults;
use jarpub_pom::loader::{pom_file_list, resolve_pom_group};
use jarpub_pom::PomGroup;
use jarpub_util::errors::{PublishError, PublishResult};
use jarpub_util::fs::{find_ancestor_with, gradle_user_home};
use jarpub_util::report::Reporter;
use tracing::debug;

use crate::cli::Cli;

pub struct Session {
    props: LayeredProperties,
    config: PublishConfig,
    poms: PomGroup,
    defaults: ProjectDefaults,
}

impl Session {
    /// The root directory is the nearest ancestor holding `jarpub.toml`, or
    /// the project directory itself.
    pub fn load(cli: &Cli) -> PublishResult<Self> {
        let project_dir = match &cli.project_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };
        let project_dir = project_dir.canonicalize()?;
        let root_dir =
            find_ancestor_with(&project_dir, CONFIG_FILE).unwrap_or_else(|| project_dir.clone());
        debug!(
            "Project {} with root {}",
            project_dir.display(),
            root_dir.display()
        );

        let mut overrides = BTreeMap::new();
        for arg in &cli.properties {
            let (key, value) = parse_override(arg)?;
            overrides.insert(key, value);
        }
        let gradle_home = gradle_user_home();
        let props = LayeredProperties::discover(
            overrides,
            gradle_home.as_deref(),
            &project_dir,
            &root_dir,
        )?;

        let config = PublishConfig::load(&root_dir.join(CONFIG_FILE))?;
        let files = pom_file_list(
            cli.pom_file.as_deref(),
            &project_dir,
            &root_dir,
            gradle_home.as_deref(),
        );
        let poms = resolve_pom_group(&files)?;

        let defaults = ProjectDefaults {
            group: props.property("group"),
            name: project_dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned()),
            version: props.property("version"),
            description: props.property("description"),
            year: chrono::Local::now().year(),
        };

        Ok(Self {
            props,
            config,
            poms,
            defaults,
        })
    }

    fn build(
        &self,
        configs: &[PublicationConfig],
        reporter: &dyn Reporter,
    ) -> PublishResult<Vec<Publication>> {
        let resolver = EndpointResolver::new(&self.props, reporter);
        let root = Arc::new(Declaration::from_config(
            &self.config.root,
            None,
            &resolver,
        )?);
        let mut publications = configs
            .iter()
            .map(|pc| {
                let mut pom = self.poms.effective(&pc.variant);
                pom.finalize(&self.defaults, reporter);
                let decl = Declaration::from_config(&pc.scope, Some(root.clone()), &resolver)?;
                Publication::new(pom, decl, &resolver)
            })
            .collect::<PublishResult<Vec<_>>>()?;
        resolve_pub_names(&mut publications);
        Ok(publications)
    }

    /// Every configured publication, finalized.
    pub fn publications(&self, reporter: &dyn Reporter) -> PublishResult<Vec<Publication>> {
        self.build(&self.config.effective_publications(), reporter)
    }

    /// The publication of one variant. A variant with a POM document but no
    /// `[[publication]]` entry inherits everything from the root scope.
    pub fn publication(&self, variant: &str, reporter: &dyn Reporter) -> PublishResult<Publication> {
        let config = match self
            .config
            .effective_publications()
            .into_iter()
            .find(|pc| pc.variant == variant)
        {
            Some(pc) => pc,
            None if variant.is_empty() || self.poms.get(variant).is_some() => PublicationConfig {
                variant: variant.to_string(),
                scope: ScopeConfig::default(),
            },
            None => {
                return Err(PublishError::Config {
                    message: format!("Unknown variant '{variant}'"),
                })
            }
        };
        let mut built = self.build(std::slice::from_ref(&config), reporter)?;
        built.pop().ok_or_else(|| PublishError::Generic {
            message: format!("Publication '{variant}' could not be built"),
        })
    }
}
