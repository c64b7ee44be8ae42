//! Handler for `jarpub pom`.

use miette::Result;

use jarpub_pom::xml::render_pom;
use jarpub_util::report::TracingReporter;

use super::Session;

pub fn exec(session: &Session, variant: Option<&str>) -> Result<()> {
    let publication = session.publication(variant.unwrap_or_default(), &TracingReporter)?;
    let xml = render_pom(&publication.published_pom())?;
    println!("{}", xml.trim_end());
    Ok(())
}
