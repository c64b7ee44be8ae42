//! Rendering a merged POM to a Maven 4.0.0 POM document.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use jarpub_util::errors::{PublishError, PublishResult};

use crate::model::{is_blank, Person, Pom};

const POM_NS: &str = "http://maven.apache.org/POM/4.0.0";
const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";
const SCHEMA_LOCATION: &str =
    "http://maven.apache.org/POM/4.0.0 https://maven.apache.org/xsd/maven-4.0.0.xsd";

fn xml_error(e: impl std::fmt::Display) -> PublishError {
    PublishError::Generic {
        message: format!("Failed to write POM XML: {e}"),
    }
}

struct PomWriter {
    writer: Writer<Vec<u8>>,
}

impl PomWriter {
    fn event(&mut self, event: Event<'_>) -> PublishResult<()> {
        self.writer.write_event(event).map_err(xml_error)
    }

    fn start(&mut self, tag: &str) -> PublishResult<()> {
        self.event(Event::Start(BytesStart::new(tag)))
    }

    fn end(&mut self, tag: &str) -> PublishResult<()> {
        self.event(Event::End(BytesEnd::new(tag)))
    }

    /// `<tag>value</tag>`, or nothing when the value is blank.
    fn text(&mut self, tag: &str, value: &Option<String>) -> PublishResult<()> {
        let Some(value) = value.as_deref().filter(|v| !v.is_empty()) else {
            return Ok(());
        };
        self.start(tag)?;
        self.event(Event::Text(BytesText::new(value)))?;
        self.end(tag)
    }

    fn person(&mut self, tag: &str, person: &Person, with_id: bool) -> PublishResult<()> {
        self.start(tag)?;
        if with_id {
            self.text("id", &person.id)?;
        }
        self.text("name", &person.name)?;
        self.text("email", &person.email)?;
        self.text("url", &person.url)?;
        self.text("organization", &person.organization)?;
        self.text("organizationUrl", &person.organization_url)?;
        self.text("timezone", &person.time_zone)?;
        self.end(tag)
    }
}

/// Render `pom` as XML. Blank fields and empty sections are left out.
pub fn render_pom(pom: &Pom) -> PublishResult<String> {
    let mut w = PomWriter {
        writer: Writer::new_with_indent(Vec::new(), b' ', 2),
    };

    w.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    w.event(Event::Start(BytesStart::new("project").with_attributes([
        ("xmlns", POM_NS),
        ("xmlns:xsi", XSI_NS),
        ("xsi:schemaLocation", SCHEMA_LOCATION),
    ])))?;
    w.text("modelVersion", &Some("4.0.0".to_string()))?;
    w.text("groupId", &pom.group)?;
    w.text("artifactId", &pom.artifact_id)?;
    w.text("version", &pom.version)?;
    w.text("packaging", &pom.packaging)?;
    w.text("name", &pom.name)?;
    w.text("description", &pom.description)?;
    w.text("url", &pom.url)?;
    w.text("inceptionYear", &pom.inception_year.map(|y| y.to_string()))?;

    if !is_blank(&pom.organization.name) || !is_blank(&pom.organization.url) {
        w.start("organization")?;
        w.text("name", &pom.organization.name)?;
        w.text("url", &pom.organization.url)?;
        w.end("organization")?;
    }

    if !pom.licenses.is_empty() {
        w.start("licenses")?;
        for license in &pom.licenses {
            w.start("license")?;
            w.text("name", &license.name)?;
            w.text("url", &license.url)?;
            w.text("distribution", &license.dist)?;
            w.text("comments", &license.comments)?;
            w.end("license")?;
        }
        w.end("licenses")?;
    }

    if !pom.developers.is_empty() {
        w.start("developers")?;
        for dev in &pom.developers {
            w.person("developer", dev, true)?;
        }
        w.end("developers")?;
    }

    if !pom.contributors.is_empty() {
        w.start("contributors")?;
        for contributor in &pom.contributors {
            w.person("contributor", contributor, false)?;
        }
        w.end("contributors")?;
    }

    let scm = &pom.scm;
    if [&scm.connection, &scm.developer_connection, &scm.url, &scm.tag]
        .into_iter()
        .any(|v| !is_blank(v))
    {
        w.start("scm")?;
        w.text("connection", &scm.connection)?;
        w.text("developerConnection", &scm.developer_connection)?;
        w.text("tag", &scm.tag)?;
        w.text("url", &scm.url)?;
        w.end("scm")?;
    }

    if !is_blank(&scm.issue_url) {
        w.start("issueManagement")?;
        w.text("system", &scm.issue_type)?;
        w.text("url", &scm.issue_url)?;
        w.end("issueManagement")?;
    }

    w.end("project")?;

    String::from_utf8(w.writer.into_inner()).map_err(xml_error)
}
