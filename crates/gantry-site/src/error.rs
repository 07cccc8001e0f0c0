//! Error types for site generation.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SiteError>;

#[derive(Debug, Error)]
pub enum SiteError {
    // Bundle loading
    #[error(transparent)]
    Load(#[from] gantry_loader::LoadError),

    // Page function output
    #[error("page function returned malformed page records: {0}")]
    PageFormat(String),

    #[error("page path '{0}' escapes the site directory")]
    UnsafePagePath(String),

    // Asset I/O
    #[error("failed to read {}: {source}", path.display())]
    ReadAsset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SiteError {
    pub(crate) fn read_asset(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadAsset {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}
