//! Error types for tomo operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while assembling or packaging a documentation EPUB.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("unsupported document format: {} (allowed format: .md)", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
