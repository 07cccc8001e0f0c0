//! Error handling for the gantry CLI.
//!
//! Hierarchical error types built on `thiserror`. The top-level [`CliError`]
//! wraps the library crates' errors and the CLI's own failure modes; variants
//! carry hints where the fix is not obvious from the message alone.
//!
//! # Example
//!
//! ```rust,no_run
//! use gantry_cli::error::{Result, ResultExt};
//! use std::path::Path;
//!
//! fn read_source(path: &Path) -> Result<String> {
//!     std::fs::read_to_string(path).with_path(path)
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

mod miette;
pub use miette::cli_error_to_miette;

/// Top-level CLI error type.
///
/// Converts automatically from the library crates' errors via `From`, so
/// command implementations can use `?` throughout.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration loading and validation errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Site generation errors (bundle loading, page function, asset writes)
    #[error("Site generation error: {0}")]
    Site(#[from] gantry_site::SiteError),

    /// Invalid command-line arguments or options
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with custom messages
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
///
/// These occur while discovering, parsing, and validating the gantry
/// configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Explicitly named config file doesn't exist
    #[error("Config file not found: {}\n\nHint: Create a gantry.toml file or pass --config <path>", .0.display())]
    NotFound(PathBuf),

    /// No config discovered in the working directory
    #[error("No gantry configuration found in {}\n\nHint: Create gantry.toml, or add a \"gantry\" section to package.json", .0.display())]
    NotDiscovered(PathBuf),

    /// Config file has invalid TOML syntax
    #[error("Invalid TOML in {}: {source}\n\nHint: Check the syntax near the reported line", .path.display())]
    InvalidToml {
        /// The config file that failed to parse
        path: PathBuf,
        #[source]
        source: Box<toml::de::Error>,
    },

    /// package.json has invalid JSON syntax
    #[error("Invalid JSON in {}: {source}\n\nHint: Use a JSON validator to check syntax", .path.display())]
    InvalidJson {
        /// The file that failed to parse
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// package.json was named explicitly but has no gantry section
    #[error("No \"gantry\" section in {}\n\nHint: Add a top-level \"gantry\" object holding the site configuration", .0.display())]
    MissingSection(PathBuf),

    /// Config file extension is neither .toml nor .json
    #[error("Unsupported config format: {}\n\nHint: Use a gantry.toml file or a package.json with a \"gantry\" section", .0.display())]
    UnsupportedFormat(PathBuf),

    /// Requested test environment isn't configured
    #[error("Test environment '{0}' not found in config\n\nHint: Environments are declared as [testenv.<name>] tables")]
    EnvNotFound(String),

    /// Command needs an [externs] section the config doesn't have
    #[error("No [externs] section in the configuration\n\nHint: Add an [externs] table with namespace, global_name and source")]
    NoExterns,

    /// Invalid value for a configuration option
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The invalid value
        value: String,
        /// Helpful hint for correct values
        hint: String,
    },

    /// I/O error while reading config
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Add a file path to the error context.
    ///
    /// I/O `NotFound` errors become [`CliError::FileNotFound`] carrying the
    /// path; everything else converts unchanged.
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;

    /// Add a helpful hint to the error message.
    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T>;

    /// Prefix the error with a higher-level description of what failed.
    fn context(self, msg: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            match err {
                CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                    CliError::FileNotFound(path.as_ref().to_path_buf())
                }
                other => other,
            }
        })
    }

    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}\n\nHint: {}", err, hint))
        })
    }

    fn context(self, msg: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}: {}", msg, err))
        })
    }
}
