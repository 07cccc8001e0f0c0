//! Command implementations for the gantry CLI.
//!
//! - [`generate`] - Load the compiled bundle and write the site
//! - [`externs`] - Emit the library wrapper and externs files
//! - [`testconf`] - Write karma configs for the test environments
//! - [`check`] - Validate the configuration and report the build layout
//!
//! Each command lives in its own module and provides an `execute` function
//! taking the parsed command arguments and the global `--config` override.

pub mod check;
pub mod externs;
pub mod generate;
pub mod testconf;

// Re-export execute functions for convenience
pub use check::execute as check_execute;
pub use externs::execute as externs_execute;
pub use generate::execute as generate_execute;
pub use testconf::execute as testconf_execute;
