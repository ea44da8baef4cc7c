//! Structural document generation.
//!
//! The four format-mandated top-level documents: the OPF package manifest,
//! the legacy NCX table of contents, the EPUB 3 navigation document, and the
//! title page (rendered by [`crate::render::title_page`]). All are generated
//! as strings from the combined entity list, the run identity, and the
//! package configuration.

use std::path::Path;

use crate::identity::PackageIdentity;
use crate::model::{DocumentedEntity, EntityKind, PackageConfig, SupplementaryDocument};
use crate::render::escape_xml;

/// One navigation target; kind groups nest their entities as children.
#[derive(Debug, Clone)]
pub struct NavEntry {
    pub title: String,
    pub href: String,
    pub children: Vec<NavEntry>,
}

impl NavEntry {
    fn new(title: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            href: href.into(),
            children: Vec::new(),
        }
    }
}

/// Build the navigation tree: title page, supplementary documents, then one
/// group per non-empty entity kind. Group entries point at their first child
/// so NCX navPoints always have a content target.
pub fn nav_entries(
    config: &PackageConfig,
    docs: &[SupplementaryDocument],
    groups: &[(EntityKind, Vec<&DocumentedEntity>)],
) -> Vec<NavEntry> {
    let mut entries = vec![NavEntry::new(config.project.clone(), "title.xhtml")];

    for doc in docs {
        entries.push(NavEntry::new(doc.title.clone(), doc.filename()));
    }

    for (kind, members) in groups {
        let Some(first) = members.first() else {
            continue;
        };
        let mut group = NavEntry::new(group_title(*kind), first.filename());
        group.children = members
            .iter()
            .map(|e| NavEntry::new(e.name.clone(), e.filename()))
            .collect();
        entries.push(group);
    }

    entries
}

fn group_title(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Module => "Modules",
        EntityKind::Exception => "Exceptions",
        EntityKind::Protocol => "Protocols",
    }
}

/// Generate content.opf: package metadata, a manifest of every staged
/// resource, and the spine in reading order (title page, supplementary
/// documents, then modules, exceptions, protocols).
pub fn generate_opf(
    config: &PackageConfig,
    identity: &PackageIdentity,
    docs: &[SupplementaryDocument],
    ordered: &[&DocumentedEntity],
    logo_href: Option<&str>,
) -> String {
    let mut opf = String::new();

    opf.push_str(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="3.0" unique-identifier="BookId">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/">
"#,
    );

    opf.push_str(&format!(
        "    <dc:title>{}</dc:title>\n",
        escape_xml(&config.project)
    ));
    opf.push_str(&format!(
        "    <dc:identifier id=\"BookId\">{}</dc:identifier>\n",
        escape_xml(&identity.identifier)
    ));
    let language = if config.language.is_empty() {
        "en"
    } else {
        &config.language
    };
    opf.push_str(&format!(
        "    <dc:language>{}</dc:language>\n",
        escape_xml(language)
    ));
    opf.push_str(&format!(
        "    <meta property=\"dcterms:modified\">{}</meta>\n",
        escape_xml(&identity.modified)
    ));

    opf.push_str("  </metadata>\n  <manifest>\n");
    opf.push_str(
        "    <item id=\"ncx\" href=\"toc.ncx\" media-type=\"application/x-dtbncx+xml\"/>\n",
    );
    opf.push_str(
        "    <item id=\"nav\" href=\"nav.xhtml\" media-type=\"application/xhtml+xml\" properties=\"nav\"/>\n",
    );

    let mut spine_refs: Vec<String> = Vec::new();
    let mut page = |opf: &mut String, href: &str| {
        let id = href_to_id(href);
        opf.push_str(&format!(
            "    <item id=\"{}\" href=\"{}\" media-type=\"application/xhtml+xml\"/>\n",
            id,
            escape_xml(href)
        ));
        spine_refs.push(id);
    };

    page(&mut opf, "title.xhtml");
    for doc in docs {
        page(&mut opf, &doc.filename());
    }
    for entity in ordered {
        page(&mut opf, &entity.filename());
    }

    let mut assets = vec!["dist/epub.css".to_string(), "dist/epub.js".to_string()];
    if let Some(href) = logo_href {
        assets.push(href.to_string());
    }
    for href in &assets {
        opf.push_str(&format!(
            "    <item id=\"{}\" href=\"{}\" media-type=\"{}\"/>\n",
            href_to_id(href),
            escape_xml(href),
            guess_media_type(href)
        ));
    }

    opf.push_str("  </manifest>\n  <spine toc=\"ncx\">\n");
    for id in &spine_refs {
        opf.push_str(&format!("    <itemref idref=\"{}\"/>\n", id));
    }
    opf.push_str("  </spine>\n</package>\n");
    opf
}

/// Generate toc.ncx, keyed by the package identifier.
pub fn generate_ncx(
    config: &PackageConfig,
    identity: &PackageIdentity,
    entries: &[NavEntry],
) -> String {
    let mut ncx = String::new();

    ncx.push_str(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE ncx PUBLIC "-//NISO//DTD ncx 2005-1//EN" "http://www.daisy.org/z3986/2005/ncx-2005-1.dtd">
<ncx xmlns="http://www.daisy.org/z3986/2005/ncx/" version="2005-1">
  <head>
    <meta name="dtb:uid" content=""#,
    );
    ncx.push_str(&escape_xml(&identity.identifier));
    ncx.push_str(
        r#""/>
    <meta name="dtb:depth" content="2"/>
    <meta name="dtb:totalPageCount" content="0"/>
    <meta name="dtb:maxPageNumber" content="0"/>
  </head>
  <docTitle>
    <text>"#,
    );
    ncx.push_str(&escape_xml(&config.project));
    ncx.push_str(
        r#"</text>
  </docTitle>
  <navMap>
"#,
    );

    let mut play_order = 1;
    write_nav_points(&mut ncx, entries, &mut play_order, 2);

    ncx.push_str("  </navMap>\n</ncx>\n");
    ncx
}

/// Recursively write navPoint elements.
fn write_nav_points(ncx: &mut String, entries: &[NavEntry], play_order: &mut usize, indent: usize) {
    let indent_str = "  ".repeat(indent);

    for entry in entries {
        ncx.push_str(&format!(
            "{}<navPoint id=\"navpoint-{}\" playOrder=\"{}\">\n",
            indent_str, play_order, play_order
        ));
        ncx.push_str(&format!(
            "{}  <navLabel><text>{}</text></navLabel>\n",
            indent_str,
            escape_xml(&entry.title)
        ));
        ncx.push_str(&format!(
            "{}  <content src=\"{}\"/>\n",
            indent_str,
            escape_xml(&entry.href)
        ));

        *play_order += 1;

        if !entry.children.is_empty() {
            write_nav_points(ncx, &entry.children, play_order, indent + 1);
        }

        ncx.push_str(&format!("{}</navPoint>\n", indent_str));
    }
}

/// Generate nav.xhtml, the EPUB 3 navigation document.
pub fn generate_nav(config: &PackageConfig, entries: &[NavEntry]) -> String {
    let mut nav = String::new();

    nav.push_str(&format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE html>
<html xmlns="http://www.w3.org/1999/xhtml" xmlns:epub="http://www.idpf.org/2007/ops" lang="en">
<head>
  <meta charset="utf-8"/>
  <title>{}</title>
  <link rel="stylesheet" type="text/css" href="dist/epub.css"/>
</head>
<body>
  <nav epub:type="toc">
    <h1>Table of contents</h1>
"#,
        escape_xml(&config.project)
    ));

    write_nav_list(&mut nav, entries, 2);

    nav.push_str("  </nav>\n</body>\n</html>\n");
    nav
}

/// Recursively write nested ol/li navigation lists.
fn write_nav_list(nav: &mut String, entries: &[NavEntry], indent: usize) {
    let indent_str = "  ".repeat(indent);

    nav.push_str(&format!("{}<ol>\n", indent_str));
    for entry in entries {
        nav.push_str(&format!(
            "{}  <li><a href=\"{}\">{}</a>",
            indent_str,
            escape_xml(&entry.href),
            escape_xml(&entry.title)
        ));
        if !entry.children.is_empty() {
            nav.push('\n');
            write_nav_list(nav, &entry.children, indent + 2);
            nav.push_str(&format!("{}  </li>\n", indent_str));
        } else {
            nav.push_str("</li>\n");
        }
    }
    nav.push_str(&format!("{}</ol>\n", indent_str));
}

/// Guess media type from file extension.
pub fn guess_media_type(path: &str) -> &'static str {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "xhtml" | "html" | "htm" => "application/xhtml+xml",
        "css" => "text/css",
        "js" => "application/javascript",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ncx" => "application/x-dtbncx+xml",
        "opf" => "application/oebps-package+xml",
        _ => "application/octet-stream",
    }
}

fn href_to_id(href: &str) -> String {
    href.replace(['/', '.', ' ', '-'], "_")
}
