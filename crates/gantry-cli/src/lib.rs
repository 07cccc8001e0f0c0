//! Gantry CLI - site generation and packaging tooling for compiled bundles.
//!
//! This crate provides the command-line interface over the gantry library
//! crates: `gantry-loader` for bundle loading, `gantry-site` for site
//! generation, and `gantry-externs` for library embedding.
//!
//! # Architecture
//!
//! - [`cli`] - Argument parsing with clap
//! - [`commands`] - Individual CLI command implementations
//! - [`config`] - Configuration discovery and loading
//! - [`error`] - Error types with actionable messages
//! - [`logger`] - Structured logging with tracing
//! - [`ui`] - Terminal status messages and formatting
//!
//! # Example
//!
//! ```rust
//! use gantry_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     // CLI command implementations...
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;

// Re-export commonly used types
pub use config::GantryConfig;
pub use error::{CliError, ConfigError, Result, ResultExt};
