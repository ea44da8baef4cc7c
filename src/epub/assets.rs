//! Embedded static assets and their staging writes.

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::epub::staging::Staging;

/// Content of the format-identification file. Must be stored uncompressed in
/// the finished archive.
pub const MIMETYPE: &[u8] = b"application/epub+zip";

/// META-INF/container.xml pointing readers at the package manifest.
pub const CONTAINER_XML: &[u8] = br#"<?xml version="1.0" encoding="UTF-8"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>
"#;

/// Shared stylesheet for all content pages.
pub const EPUB_CSS: &str = r#"body {
  font-family: Georgia, serif;
  line-height: 1.5;
  margin: 1em;
}

h1, h2, h3 {
  font-family: Helvetica, Arial, sans-serif;
}

h1 small {
  color: #666;
  font-size: 0.5em;
  font-weight: normal;
}

pre {
  background: #f4f4f4;
  padding: 0.6em;
  overflow-x: auto;
  white-space: pre-wrap;
}

code.inline {
  background: #f4f4f4;
}

.title-page {
  text-align: center;
  margin-top: 4em;
}

.title-page .logo {
  max-width: 40%;
}
"#;

/// Shared script for all content pages. Kept minimal; some readers ignore
/// scripting entirely.
pub const EPUB_JS: &str = r#"document.addEventListener("DOMContentLoaded", function () {
  document.documentElement.classList.add("loaded");
});
"#;

/// Write the fixed static assets into their staging locations: the
/// format-identification file at the root, the container registration under
/// META-INF, and the stylesheet/script under the content asset directory.
pub fn copy(staging: &Staging) -> Result<()> {
    fs::write(staging.mimetype_path(), MIMETYPE)?;
    fs::write(staging.meta_inf_path("container.xml"), CONTAINER_XML)?;
    fs::write(staging.dist_path("epub.css"), EPUB_CSS)?;
    fs::write(staging.dist_path("epub.js"), EPUB_JS)?;
    Ok(())
}

/// Copy the configured logo into the content asset directory and return its
/// href relative to the content directory.
pub fn copy_logo(staging: &Staging, logo: &Path) -> Result<String> {
    let ext = logo
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("png");
    let filename = format!("logo.{ext}");
    fs::copy(logo, staging.dist_path(&filename))?;
    Ok(format!("dist/{filename}"))
}
