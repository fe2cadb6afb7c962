//! Document source trait and structured load errors.
//!
//! The DocumentSource trait abstracts over where the static JSON documents
//! live (a local directory, a static file origin over HTTP) so the store can
//! be loaded from either and mocked in tests.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::ParseIndexError;

/// Structured error types for loading documents.
///
/// Every variant aborts the whole load: there is no partial store.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    InvalidIndex(#[from] ParseIndexError),

    #[error("document not found: {path}")]
    NotFound { path: String },

    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("HTTP {status} while fetching {path}")]
    Http { path: String, status: u16 },

    #[error("HTTP client setup failed: {0}")]
    HttpClient(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid dataset in {path}: {reason}")]
    InvalidDataset { path: String, reason: String },
}

/// Where documents are read from.
///
/// Paths are relative, `/`-separated, e.g. `acwi/changes.json`.
pub trait DocumentSource: Send + Sync {
    /// Human-readable name of this source, for logs.
    fn name(&self) -> &str;

    /// Fetch one whole document.
    fn fetch(&self, path: &str) -> Result<Vec<u8>, LoadError>;
}

/// Documents stored under a local directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
    name: String,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let name = format!("dir:{}", root.display());
        Self { root, name }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl DocumentSource for DirectorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self, path: &str) -> Result<Vec<u8>, LoadError> {
        let full = path
            .split('/')
            .fold(self.root.clone(), |acc, part| acc.join(part));
        std::fs::read(&full).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                LoadError::NotFound { path: path.to_string() }
            } else {
                LoadError::Io { path: path.to_string(), source }
            }
        })
    }
}
