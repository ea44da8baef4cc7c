//! Staging tree lifecycle.
//!
//! The staging tree mirrors the archive's internal layout inside the output
//! directory: `mimetype` at the root, `META-INF/` for container registration,
//! `OEBPS/` for content pages with `OEBPS/dist/` for static assets. It is
//! working storage only; teardown removes it and leaves the archive behind.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

pub const META_INF: &str = "META-INF";
pub const OEBPS: &str = "OEBPS";
pub const DIST: &str = "dist";
pub const MIMETYPE_FILE: &str = "mimetype";

/// Handle to one run's staging tree.
#[derive(Debug)]
pub struct Staging {
    root: PathBuf,
}

impl Staging {
    /// Recreate the output root and the staging skeleton inside it.
    ///
    /// Destructive: any pre-existing tree at `output` is removed first, so
    /// callers must not point this at a directory with unrelated contents.
    pub fn create(output: &Path) -> Result<Self> {
        if output.exists() {
            fs::remove_dir_all(output)?;
        }
        fs::create_dir_all(output.join(META_INF))?;
        fs::create_dir_all(output.join(OEBPS).join(DIST))?;
        Ok(Self {
            root: output.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn mimetype_path(&self) -> PathBuf {
        self.root.join(MIMETYPE_FILE)
    }

    pub fn meta_inf_path(&self, name: &str) -> PathBuf {
        self.root.join(META_INF).join(name)
    }

    /// Path of a file inside the content directory.
    pub fn content_path(&self, name: &str) -> PathBuf {
        self.root.join(OEBPS).join(name)
    }

    pub fn dist_path(&self, name: &str) -> PathBuf {
        self.root.join(OEBPS).join(DIST).join(name)
    }

    /// Remove the staging tree, leaving anything else in the output root
    /// (notably the finished archive) in place. Best-effort: teardown
    /// failures are ignored so they never mask a pipeline error.
    pub fn cleanup(&self) {
        let _ = fs::remove_dir_all(self.root.join(META_INF));
        let _ = fs::remove_dir_all(self.root.join(OEBPS));
        let _ = fs::remove_file(self.mimetype_path());
    }
}
