//! Handler for `jarpub plan`.

use console::Style;
use miette::Result;
use serde::Serialize;

use jarpub_core::strategy::SignType;
use jarpub_maven::{Publication, UploadTarget};
use jarpub_util::errors::{PublishError, PublishResult};
use jarpub_util::report::TracingReporter;

use super::Session;

#[derive(Debug, Serialize)]
struct PlanEntry {
    name: String,
    variant: String,
    coordinate: String,
    packaging: String,
    signing: SignType,
    signed: bool,
    docs: bool,
    targets: Vec<UploadTarget>,
    files: Vec<String>,
}

impl PlanEntry {
    fn new(publication: &Publication) -> PublishResult<Self> {
        Ok(Self {
            name: publication.pub_name().to_string(),
            variant: publication.variant().to_string(),
            coordinate: publication.coordinate().gav(),
            packaging: publication.packaging().to_string(),
            signing: publication.signing(),
            signed: publication.signing_required(),
            docs: publication.docs(),
            targets: publication.upload_targets()?,
            files: publication.expected_local_files(),
        })
    }
}

pub fn exec(session: &Session, json: bool) -> Result<()> {
    let publications = session.publications(&TracingReporter)?;
    let entries = publications
        .iter()
        .map(PlanEntry::new)
        .collect::<PublishResult<Vec<_>>>()?;

    if json {
        let out = serde_json::to_string_pretty(&entries).map_err(|e| PublishError::Generic {
            message: format!("Failed to serialize plan: {e}"),
        })?;
        println!("{out}");
        return Ok(());
    }

    let bold = Style::new().bold();
    let dim = Style::new().dim();
    for entry in &entries {
        println!("{} {}", bold.apply_to(&entry.name), entry.coordinate);
        let signing = if entry.signed {
            entry.signing.to_string()
        } else {
            format!("{} (unsigned)", entry.signing)
        };
        println!("  signing: {signing}, docs: {}", entry.docs);
        if entry.targets.is_empty() {
            println!("  {}", dim.apply_to("no repositories declared"));
        }
        for target in &entry.targets {
            println!("  -> {} {}", target.endpoint_id, target.artifact_url);
            if let Some(marker) = &target.plugin_marker_url {
                println!("     {} {marker}", dim.apply_to("plugin marker"));
            }
        }
    }
    Ok(())
}
