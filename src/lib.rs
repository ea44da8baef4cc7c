//! # tomo
//!
//! Packages extracted documentation into a single EPUB archive.
//!
//! Upstream tooling hands this crate a list of documented entities (modules,
//! exceptions, protocols) with pre-rendered XHTML bodies, plus optional
//! supplementary markdown documents. `tomo` assembles the container: it
//! stages the EPUB directory layout, renders every page concurrently,
//! generates the package manifest, navigation documents, and a run-unique
//! identifier, then serializes everything into one ZIP archive with the
//! `mimetype` entry stored uncompressed.
//!
//! ## Quick Start
//!
//! ```no_run
//! use tomo::{build_epub, DocumentedEntity, EntityKind, PackageConfig};
//!
//! let entities = vec![DocumentedEntity::new(
//!     "string-utils",
//!     "StringUtils",
//!     EntityKind::Module,
//!     "<p>String helpers.</p>",
//! )];
//!
//! let config = PackageConfig::new("demo", "1.0.0", "doc")
//!     .with_extra("README.md");
//!
//! let archive = build_epub(&entities, &config)?;
//! println!("wrote {}", archive.display());
//! # Ok::<(), tomo::Error>(())
//! ```
//!
//! The output directory is recreated destructively at the start of a run and
//! holds only the finished `<project>-v<version>.epub` afterwards; the
//! intermediate staging tree is always torn down, even on failure.

pub mod epub;
pub mod error;
pub mod identity;
pub mod markdown;
pub mod model;
pub mod render;

pub use epub::build_epub;
pub use error::{Error, Result};
pub use identity::PackageIdentity;
pub use model::{DocumentedEntity, EntityKind, PackageConfig, SupplementaryDocument};
