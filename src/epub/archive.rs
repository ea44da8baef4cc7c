//! Archive packaging.
//!
//! Walks the staging tree and writes the final `.epub` ZIP. Two conformance
//! rules apply: the `mimetype` entry is written first and stored without
//! compression, and only recognized text/image entries are deflated.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::epub::assets;
use crate::epub::staging::{META_INF, OEBPS, Staging};
use crate::error::Result;
use crate::model::PackageConfig;

/// Extensions that get deflate compression inside the archive.
const COMPRESSIBLE: &[&str] = &[
    "css", "gif", "htm", "html", "jpeg", "jpg", "js", "ncx", "opf", "png", "svg", "txt", "xhtml",
    "xml",
];

/// Package the staging tree into `<project>-v<version>.epub` in the staging
/// root and return the archive's absolute path.
pub fn package(staging: &Staging, config: &PackageConfig) -> Result<PathBuf> {
    let archive_path = staging.root().join(config.archive_name());
    let file = fs::File::create(&archive_path)?;
    let mut zip = ZipWriter::new(file);

    let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    let deflated = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(6));

    // mimetype first and uncompressed, per OCF
    zip.start_file("mimetype", stored)?;
    zip.write_all(assets::MIMETYPE)?;

    for path in collect_files(staging.root()) {
        // Best-effort enumeration: a file that vanished or became unreadable
        // since staging is excluded rather than failing the archive.
        let Ok(data) = fs::read(&path) else {
            continue;
        };
        let rel = relative_name(staging.root(), &path);
        let options = if compressible(&rel) { deflated } else { stored };
        zip.start_file(&rel, options)?;
        zip.write_all(&data)?;
    }

    zip.finish()?;
    Ok(fs::canonicalize(&archive_path)?)
}

/// Enumerate every regular file under META-INF/ and OEBPS/, sorted for a
/// stable entry order. Directories that cannot be read are skipped.
fn collect_files(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for dir in [META_INF, OEBPS] {
        walk(&root.join(dir), &mut files);
    }
    files.sort();
    files
}

fn walk(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            walk(&path, out);
        } else if path.is_file() {
            out.push(path);
        }
    }
}

/// Archive entry name: path relative to the staging root, forward slashes.
fn relative_name(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn compressible(name: &str) -> bool {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    COMPRESSIBLE.contains(&ext.as_str())
}
