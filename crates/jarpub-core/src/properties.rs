use std::collections::BTreeMap;
use std::path::Path;

use jarpub_util::errors::{PublishError, PublishResult};
use tracing::debug;

/// Prefix under which Gradle exposes project properties as environment variables.
pub const ENV_PREFIX: &str = "ORG_GRADLE_PROJECT_";

/// Name of the per-directory property file.
pub const PROPERTIES_FILE: &str = "gradle.properties";

/// Lookup service for project properties.
pub trait PropertySource {
    fn property(&self, key: &str) -> Option<String>;
}

impl PropertySource for BTreeMap<String, String> {
    fn property(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Properties resolved from several layers, most specific first:
/// command-line overrides, `ORG_GRADLE_PROJECT_*` environment variables,
/// then each loaded file in the order it was added.
#[derive(Debug, Default, Clone)]
pub struct LayeredProperties {
    overrides: BTreeMap<String, String>,
    read_env: bool,
    files: Vec<BTreeMap<String, String>>,
}

impl LayeredProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_overrides(mut self, overrides: BTreeMap<String, String>) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn with_env(mut self, read_env: bool) -> Self {
        self.read_env = read_env;
        self
    }

    /// Add a lower-precedence layer.
    pub fn with_layer(mut self, layer: BTreeMap<String, String>) -> Self {
        self.files.push(layer);
        self
    }

    /// Build the standard layering: overrides, environment, then the
    /// `gradle.properties` of the user home, the project and the root.
    pub fn discover(
        overrides: BTreeMap<String, String>,
        user_home: Option<&Path>,
        project_dir: &Path,
        root_dir: &Path,
    ) -> PublishResult<Self> {
        let mut layers = Self::new().with_overrides(overrides).with_env(true);
        let mut dirs: Vec<&Path> = Vec::new();
        if let Some(home) = user_home {
            dirs.push(home);
        }
        dirs.push(project_dir);
        if root_dir != project_dir {
            dirs.push(root_dir);
        }
        for dir in dirs {
            let path = dir.join(PROPERTIES_FILE);
            debug!("Loading properties from {}", path.display());
            layers = layers.with_layer(load_properties_file(&path)?);
        }
        Ok(layers)
    }
}

impl PropertySource for LayeredProperties {
    fn property(&self, key: &str) -> Option<String> {
        if let Some(v) = self.overrides.get(key) {
            return Some(v.clone());
        }
        if self.read_env {
            if let Ok(v) = std::env::var(format!("{ENV_PREFIX}{key}")) {
                return Some(v);
            }
        }
        self.files.iter().find_map(|layer| layer.get(key).cloned())
    }
}

/// Loads a `.properties` file. A missing file yields an empty map.
pub fn load_properties_file(path: &Path) -> PublishResult<BTreeMap<String, String>> {
    if !path.is_file() {
        return Ok(BTreeMap::new());
    }
    let content = std::fs::read_to_string(path)?;
    Ok(parse_properties(&content))
}

/// Parses `key=value` / `key: value` lines; `#` and `!` start comments.
pub fn parse_properties(content: &str) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }
        let split = trimmed
            .find(['=', ':'])
            .map(|i| (&trimmed[..i], &trimmed[i + 1..]));
        if let Some((key, value)) = split {
            map.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    map
}

/// Parses a `-P` command-line override of the form `key=value`.
pub fn parse_override(arg: &str) -> PublishResult<(String, String)> {
    match arg.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(PublishError::format(format!(
            "property override '{arg}' must look like key=value"
        ))),
    }
}
