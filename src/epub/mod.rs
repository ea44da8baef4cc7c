//! EPUB container assembly: staging, structural documents, and packaging.

pub mod archive;
pub mod assets;
pub mod builder;
pub mod staging;
pub mod structure;

pub use builder::build_epub;
