//! Data model for documentation packaging.
//!
//! These types describe the inputs to the EPUB pipeline: documentation
//! entities produced by an upstream extraction stage, supplementary markdown
//! documents, and the per-run package configuration. All of them are plain
//! data; the pipeline never mutates an input after construction.

use std::collections::HashMap;
use std::path::PathBuf;

/// The kind of a documented entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "cli", serde(rename_all = "lowercase"))]
pub enum EntityKind {
    Module,
    Exception,
    Protocol,
}

impl EntityKind {
    /// Lowercase label used in page headings.
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Module => "module",
            EntityKind::Exception => "exception",
            EntityKind::Protocol => "protocol",
        }
    }
}

/// One documented entity, as produced by the extraction stage.
///
/// The `id` is stable and filesystem-safe; it becomes the content file name
/// (`<id>.xhtml`) and the target of sibling cross-references. The `body` is a
/// pre-rendered XHTML fragment, taken as-is.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "cli", derive(serde::Deserialize, serde::Serialize))]
pub struct DocumentedEntity {
    pub id: String,
    pub name: String,
    pub kind: EntityKind,
    pub body: String,
}

impl DocumentedEntity {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: EntityKind,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            body: body.into(),
        }
    }

    /// File name of this entity's page inside the content directory.
    pub fn filename(&self) -> String {
        format!("{}.xhtml", self.id)
    }
}

/// A supplementary document after conversion, ready for navigation lists.
///
/// Created by reading one configured markdown input. `title` is the file
/// stem, uppercased; it doubles as the page title and the content file stem.
#[derive(Debug, Clone)]
pub struct SupplementaryDocument {
    pub source: PathBuf,
    pub title: String,
    pub content: String,
}

impl SupplementaryDocument {
    /// File name of this document's page inside the content directory.
    pub fn filename(&self) -> String {
        format!("{}.xhtml", self.title)
    }
}

/// Per-run package configuration.
///
/// Read-only once constructed. The logo is copied into the staging tree by
/// the pipeline, which derives the staged href separately rather than
/// rewriting this struct.
#[derive(Debug, Clone)]
pub struct PackageConfig {
    /// Output directory. Recreated destructively at run start; holds the
    /// staging tree during the run and the finished archive afterwards.
    pub output: PathBuf,
    pub project: String,
    pub version: String,
    /// Optional logo image shown on the title page.
    pub logo: Option<PathBuf>,
    /// Supplementary markdown documents to include, in reading order.
    pub extras: Vec<PathBuf>,
    /// Dependency name -> documentation base URL, for cross-reference
    /// resolution to other packages' docs.
    pub deps: HashMap<String, String>,
    /// Package language (`dc:language`), "en" if empty.
    pub language: String,
}

impl PackageConfig {
    pub fn new(
        project: impl Into<String>,
        version: impl Into<String>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            output: output.into(),
            project: project.into(),
            version: version.into(),
            logo: None,
            extras: Vec::new(),
            deps: HashMap::new(),
            language: String::new(),
        }
    }

    pub fn with_logo(mut self, logo: impl Into<PathBuf>) -> Self {
        self.logo = Some(logo.into());
        self
    }

    pub fn with_extra(mut self, path: impl Into<PathBuf>) -> Self {
        self.extras.push(path.into());
        self
    }

    pub fn with_dep(mut self, name: impl Into<String>, doc_url: impl Into<String>) -> Self {
        self.deps.insert(name.into(), doc_url.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// File name of the finished archive.
    pub fn archive_name(&self) -> String {
        format!("{}-v{}.epub", self.project, self.version)
    }
}
