//! Container orchestration.
//!
//! [`build_epub`] runs the whole pipeline: staging-tree creation, static
//! asset copy, concurrent document and entity-page rendering, structural
//! document generation, archive packaging, and staging teardown. The staging
//! tree is torn down whether or not packaging succeeded; its removal never
//! masks a pipeline error.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use rayon::prelude::*;

use crate::epub::{archive, assets, staging::Staging, structure};
use crate::error::{Error, Result};
use crate::identity::PackageIdentity;
use crate::markdown::{self, CrossRefs};
use crate::model::{DocumentedEntity, EntityKind, PackageConfig, SupplementaryDocument};
use crate::render;

/// Build one EPUB archive from the documented entities and the package
/// configuration, returning the archive's absolute path.
///
/// The configured output directory is recreated destructively at the start of
/// the run, so it must not hold unrelated content.
pub fn build_epub(entities: &[DocumentedEntity], config: &PackageConfig) -> Result<PathBuf> {
    validate(config)?;

    let staging = Staging::create(&config.output)?;
    let result = assemble(entities, config, &staging);
    staging.cleanup();

    if let Ok(ref path) = result {
        info!("wrote {}", path.display());
    }
    result
}

fn validate(config: &PackageConfig) -> Result<()> {
    if config.project.is_empty() {
        return Err(Error::InvalidConfig("project name is required".to_string()));
    }
    if config.version.is_empty() {
        return Err(Error::InvalidConfig(
            "project version is required".to_string(),
        ));
    }
    Ok(())
}

fn assemble(
    entities: &[DocumentedEntity],
    config: &PackageConfig,
    staging: &Staging,
) -> Result<PathBuf> {
    info!(
        "packaging {} v{}: {} entities, {} documents",
        config.project,
        config.version,
        entities.len(),
        config.extras.len()
    );

    assets::copy(staging)?;
    let logo_href = match config.logo.as_deref() {
        Some(logo) => Some(assets::copy_logo(staging, logo)?),
        None => None,
    };

    let groups = partition(entities);
    let refs = CrossRefs::new(entities, config);

    debug!("rendering {} supplementary documents", config.extras.len());
    let docs: Vec<SupplementaryDocument> = config
        .extras
        .par_iter()
        .map(|path| render_document(path, &refs, staging))
        .collect::<Result<Vec<_>>>()?;

    let identity = PackageIdentity::generate();
    debug!("package identity {}", identity.identifier);

    let ordered: Vec<&DocumentedEntity> = groups
        .iter()
        .flat_map(|(_, members)| members.iter().copied())
        .collect();
    let entries = structure::nav_entries(config, &docs, &groups);

    fs::write(
        staging.content_path("content.opf"),
        structure::generate_opf(config, &identity, &docs, &ordered, logo_href.as_deref()),
    )?;
    fs::write(
        staging.content_path("toc.ncx"),
        structure::generate_ncx(config, &identity, &entries),
    )?;
    fs::write(
        staging.content_path("nav.xhtml"),
        structure::generate_nav(config, &entries),
    )?;
    fs::write(
        staging.content_path("title.xhtml"),
        render::title_page(config, logo_href.as_deref()),
    )?;

    debug!("rendering {} entity pages", ordered.len());
    ordered
        .par_iter()
        .try_for_each(|entity| write_entity_page(entity, staging))?;

    archive::package(staging, config)
}

/// Partition entities by kind, preserving input order within each kind. The
/// result order fixes the reading order: modules, exceptions, protocols.
fn partition(entities: &[DocumentedEntity]) -> Vec<(EntityKind, Vec<&DocumentedEntity>)> {
    [
        EntityKind::Module,
        EntityKind::Exception,
        EntityKind::Protocol,
    ]
    .into_iter()
    .map(|kind| (kind, entities.iter().filter(|e| e.kind == kind).collect()))
    .collect()
}

/// Render one supplementary document into the content directory.
///
/// The input must be a markdown file; any other extension fails the run with
/// an error naming the offending path.
fn render_document(
    path: &Path,
    refs: &CrossRefs<'_>,
    staging: &Staging,
) -> Result<SupplementaryDocument> {
    let is_markdown = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md"));
    if !is_markdown {
        return Err(Error::UnsupportedFormat(path.to_path_buf()));
    }

    let source = fs::read_to_string(path)?;
    let title = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_uppercase())
        .unwrap_or_default();
    let content = markdown::to_xhtml(&source, refs);

    let doc = SupplementaryDocument {
        source: path.to_path_buf(),
        title,
        content,
    };
    fs::write(
        staging.content_path(&doc.filename()),
        render::page(&doc.title, &doc.content),
    )?;
    Ok(doc)
}

/// Render one entity page into the content directory.
fn write_entity_page(entity: &DocumentedEntity, staging: &Staging) -> Result<()> {
    fs::write(
        staging.content_path(&entity.filename()),
        render::entity_page(entity),
    )?;
    Ok(())
}
