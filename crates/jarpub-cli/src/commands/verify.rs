//! Handler for `jarpub verify`.

use std::path::Path;

use miette::Result;

use jarpub_maven::verify::verify_local_repository;
use jarpub_util::progress::{status, status_info, status_warn};
use jarpub_util::report::TracingReporter;

use super::Session;

pub fn exec(
    session: &Session,
    repo_dir: &Path,
    variant: Option<&str>,
    packaging: Option<&str>,
) -> Result<()> {
    let publication = session.publication(variant.unwrap_or_default(), &TracingReporter)?;
    let coordinate = publication.coordinate();
    let packaging = packaging.unwrap_or(publication.packaging());

    status_info(
        "Verifying",
        &format!("{coordinate} in {}", repo_dir.display()),
    );
    let report = verify_local_repository(
        repo_dir,
        coordinate,
        packaging,
        publication.signing_required(),
    )?;
    for file in &report.missing {
        status_warn("Missing", file);
    }
    for file in &report.unexpected {
        status_warn("Unexpected", file);
    }

    let report = report.into_result()?;
    status(
        "Verified",
        &format!(
            "{coordinate} ({} checksums matched)",
            report.checksums_verified
        ),
    );
    Ok(())
}
