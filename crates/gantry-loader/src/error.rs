//! Error types for bundle loading and registry access.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LoadError>;

/// Failure raised by a host callback or module initializer.
///
/// Callbacks are opaque host closures, so their failures travel as plain
/// messages rather than a typed hierarchy.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CallbackError {
    message: String,
}

impl CallbackError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for CallbackError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

impl From<&str> for CallbackError {
    fn from(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    // Filesystem errors
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Dependency manifest errors
    #[error("malformed dependency manifest {} at line {line}: {message}", path.display())]
    ManifestSyntax {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("namespace '{namespace}' (required by {required_by}) is not in the manifest or module table")]
    UnresolvedRequire {
        namespace: String,
        required_by: String,
    },

    #[error("circular namespace requirement: {cycle}")]
    CircularRequire { cycle: String },

    // Registry errors
    #[error("symbol '{0}' is already bound; registry bindings are append-only")]
    Rebind(String),

    #[error("symbol '{0}' is not bound in the registry")]
    UnknownSymbol(String),

    #[error("symbol '{0}' is bound but not callable")]
    NotAFunction(String),

    // Host module errors
    #[error("initializer for module '{module}' failed: {source}")]
    Init {
        module: String,
        #[source]
        source: CallbackError,
    },

    #[error("callback '{name}' failed: {source}")]
    Callback {
        name: String,
        #[source]
        source: CallbackError,
    },
}

impl LoadError {
    /// Wrap an I/O failure with the path that produced it.
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }
}
