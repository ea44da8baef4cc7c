//! Markdown conversion for supplementary documents.
//!
//! Converts a lightweight-markup document into an XHTML fragment, resolving
//! inline-code cross-references against the documented entity list on the
//! way: `` `StringUtils` `` becomes a link to the sibling `string-utils.xhtml`
//! page, while names rooted in a configured dependency link out to that
//! dependency's published docs.

use std::collections::HashMap;

use pulldown_cmark::{Event, Options, Parser, html};

use crate::model::{DocumentedEntity, PackageConfig};
use crate::render::escape_xml;

/// Cross-reference table built once per run from the full entity list and the
/// configured dependency doc URLs.
pub struct CrossRefs<'a> {
    local: HashMap<&'a str, &'a str>,
    deps: &'a HashMap<String, String>,
}

enum Target<'a> {
    Local(&'a str),
    Remote(String),
}

impl<'a> CrossRefs<'a> {
    pub fn new(entities: &'a [DocumentedEntity], config: &'a PackageConfig) -> Self {
        let local = entities
            .iter()
            .map(|e| (e.name.as_str(), e.id.as_str()))
            .collect();
        Self {
            local,
            deps: &config.deps,
        }
    }

    fn resolve(&self, name: &str) -> Option<Target<'a>> {
        if let Some(&id) = self.local.get(name) {
            return Some(Target::Local(id));
        }
        // "Dep.Nested.Name" resolves against the doc root configured for "Dep"
        let root = name.split('.').next()?;
        let base = self.deps.get(root)?;
        Some(Target::Remote(format!(
            "{}/{}.xhtml",
            base.trim_end_matches('/'),
            name
        )))
    }
}

/// Convert one markdown document to an XHTML fragment.
///
/// Inline code spans that name a known entity or dependency are rewritten to
/// links; everything else passes through pulldown-cmark's HTML renderer.
pub fn to_xhtml(markdown: &str, refs: &CrossRefs<'_>) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(markdown, options);

    let events = parser.map(|event| match event {
        Event::Code(code) => match refs.resolve(&code) {
            Some(Target::Local(id)) => Event::InlineHtml(
                format!(
                    "<code class=\"inline\"><a href=\"{}.xhtml\">{}</a></code>",
                    id,
                    escape_xml(&code)
                )
                .into(),
            ),
            Some(Target::Remote(url)) => Event::InlineHtml(
                format!(
                    "<code class=\"inline\"><a href=\"{}\">{}</a></code>",
                    escape_xml(&url),
                    escape_xml(&code)
                )
                .into(),
            ),
            None => Event::Code(code),
        },
        other => other,
    });

    let mut out = String::new();
    html::push_html(&mut out, events);
    out
}
