//! XHTML page templates.
//!
//! Entity pages and supplementary documents share one page shell; the title
//! page gets its own, config-driven template. Everything here is pure string
//! generation; the orchestrator handles the file writes.

use crate::model::{DocumentedEntity, PackageConfig};

/// Wrap a content fragment in the shared XHTML page shell.
pub fn page(title: &str, body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE html>
<html xmlns="http://www.w3.org/1999/xhtml" xmlns:epub="http://www.idpf.org/2007/ops" lang="en">
<head>
  <meta charset="utf-8"/>
  <title>{}</title>
  <link rel="stylesheet" type="text/css" href="dist/epub.css"/>
  <script src="dist/epub.js"></script>
</head>
<body>
  <div id="content" class="content-inner">
{}
  </div>
</body>
</html>
"#,
        escape_xml(title),
        body
    )
}

/// Render one entity page: kind-labelled heading plus the pre-rendered body.
pub fn entity_page(entity: &DocumentedEntity) -> String {
    let body = format!(
        "    <h1 id=\"top\" class=\"{kind}\">{name} <small>{kind}</small></h1>\n{body}",
        kind = entity.kind.label(),
        name = escape_xml(&entity.name),
        body = entity.body,
    );
    page(&entity.name, &body)
}

/// Render the title page (project name, version, optional staged logo).
pub fn title_page(config: &PackageConfig, logo_href: Option<&str>) -> String {
    let mut body = String::from("    <div class=\"title-page\">\n");
    if let Some(href) = logo_href {
        body.push_str(&format!(
            "      <img src=\"{}\" alt=\"{} logo\" class=\"logo\"/>\n",
            escape_xml(href),
            escape_xml(&config.project)
        ));
    }
    body.push_str(&format!(
        "      <h1>{}</h1>\n      <h2>v{}</h2>\n    </div>",
        escape_xml(&config.project),
        escape_xml(&config.version)
    ));
    page(&config.project, &body)
}

/// Escape XML special characters.
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
