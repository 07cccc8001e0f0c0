//! Command-line interface definition.
//!
//! Defined with clap v4 derive macros. Global flags control logging and
//! color; each subcommand carries its own arguments.
//!
//! # Command Structure
//!
//! - `gantry gen` - Load the compiled bundle and generate the site
//! - `gantry externs` - Emit the library wrapper and externs files
//! - `gantry testconf` - Write karma configs for the test environments
//! - `gantry check` - Validate the configuration

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Gantry - build tooling for a compiled UI component library
#[derive(Parser, Debug)]
#[command(
    name = "gantry",
    version,
    about = "Site generation and packaging tooling for compiled bundles",
    long_about = "Gantry drives the build outputs of a whole-program-compiled UI library:\n\
                  it detects which build profile produced a bundle, loads it through an\n\
                  explicit module registry, generates the documentation site, and emits\n\
                  packaging artifacts (externs, test runner configs)."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file to use instead of discovery
    ///
    /// By default gantry looks for gantry.toml, then for a "gantry" section
    /// in package.json, in the current directory.
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available gantry subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate the documentation site from the compiled bundle
    ///
    /// Detects whether the bundle was produced by a combined or an
    /// incremental build, loads it, and writes the site's pages and assets.
    Gen(GenArgs),

    /// Emit the library wrapper and externs files
    ///
    /// Embeds the configured JavaScript library in a compiler-safe namespace
    /// wrapper and declares its dynamic names as externs.
    Externs(ExternsArgs),

    /// Write karma configs for the packaging test environments
    Testconf(TestconfArgs),

    /// Validate the configuration
    ///
    /// Checks gantry.toml for errors and reports which build layout the
    /// configured output currently contains.
    Check,
}

/// Arguments for the gen command
#[derive(Args, Debug)]
pub struct GenArgs {
    /// Compiler status message, as passed by a watch loop's notify hook
    ///
    /// When the message reports a failed compile, gen rings the terminal
    /// bell and exits successfully without touching the site, keeping the
    /// watch loop alive.
    #[arg(value_name = "COMPILE_STATUS")]
    pub compile_status: Option<String>,

    /// Remove previously generated pages and assets first
    #[arg(long)]
    pub clean: bool,
}

/// Arguments for the externs command
#[derive(Args, Debug)]
pub struct ExternsArgs {
    /// Which artifacts to emit
    #[arg(long, value_enum, default_value = "both")]
    pub emit: EmitKind,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmitKind {
    /// Only the namespace wrapper
    Wrapper,
    /// Only the externs file
    Externs,
    /// Wrapper and externs
    Both,
}

/// Arguments for the testconf command
#[derive(Args, Debug)]
pub struct TestconfArgs {
    /// Single environment to write; all configured environments by default
    #[arg(value_name = "NAME")]
    pub name: Option<String>,
}
