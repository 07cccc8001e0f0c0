//! Gantry CLI - site generation and packaging tooling for compiled bundles.
//!
//! This is the main entry point. It handles command-line argument parsing,
//! logging initialization, and command dispatch. Failures ring the terminal
//! bell before reporting, so a compile-watch loop running in another window
//! is audible.

use clap::Parser;
use gantry_cli::{cli, commands, error, logger, ui};
use miette::Result;

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging and colors based on global flags
    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors();

    let config = args.config.as_deref();
    let result = match args.command {
        cli::Command::Gen(gen_args) => commands::generate_execute(gen_args, config),
        cli::Command::Externs(externs_args) => commands::externs_execute(externs_args, config),
        cli::Command::Testconf(testconf_args) => commands::testconf_execute(testconf_args, config),
        cli::Command::Check => commands::check_execute(config),
    };

    // Convert CLI errors to miette diagnostics for error reporting
    result.map_err(|err| {
        ui::bell();
        error::cli_error_to_miette(err)
    })
}
