//! Error types for planning and content loading

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building a page plan
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl PlanError {
    pub(crate) fn page_size(value: i64) -> Self {
        PlanError::InvalidConfig(format!("page size must be at least 1, got {}", value))
    }
}

/// Errors raised while loading posts from the content directory
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid front-matter in {path:?}: {message}")]
    Frontmatter { path: PathBuf, message: String },

    #[error("Duplicate slug '{slug}' in {first} and {second}")]
    DuplicateSlug {
        slug: String,
        first: String,
        second: String,
    },

    #[error("Duplicate post id '{0}'")]
    DuplicateId(String),

    #[error("Invalid exclude pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

impl LoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LoadError::Io {
            path: path.into(),
            source,
        }
    }
}
