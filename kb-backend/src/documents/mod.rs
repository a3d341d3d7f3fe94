//! Document discovery and loading for the knowledge-base tree.
//!
//! The root holds `projects/`, `journals/` and `concepts/`. Documents inside
//! them come in several shapes (flat files, document folders, category
//! folders with subdocuments); the indexer normalizes all of them into
//! `DocumentMeta` records and the loader resolves an id back to its files.

pub mod file_ops;
pub mod frontmatter;
pub mod indexer;
pub mod loader;
pub mod meta;

pub use indexer::index_documents;
pub use loader::load_document;

use std::fmt;
use std::io;

#[derive(Debug)]
pub enum DocumentError {
    /// No file or folder backs the requested id
    NotFound(String),
    Io(io::Error),
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentError::NotFound(id) => write!(f, "Document not found: {}", id),
            DocumentError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for DocumentError {}

impl From<io::Error> for DocumentError {
    fn from(e: io::Error) -> Self {
        DocumentError::Io(e)
    }
}
