//! Logging infrastructure for the gantry CLI.
//!
//! Structured logging on the `tracing` ecosystem. Verbosity comes from the
//! global CLI flags, with `RUST_LOG` as the escape hatch for per-crate
//! filtering.
//!
//! # Example
//!
//! ```rust,no_run
//! use gantry_cli::logger::init_logger;
//!
//! init_logger(false, false, false);
//! tracing::info!("generating site");
//! ```

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber with the specified options.
///
/// Call once at the start of the program, before any logging occurs.
///
/// # Verbosity Levels
///
/// The logging level is determined in this order:
/// 1. `--verbose` flag: DEBUG for gantry crates
/// 2. `--quiet` flag: errors only
/// 3. `RUST_LOG` environment variable: custom filter
/// 4. Default: INFO for gantry crates
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = if verbose {
        EnvFilter::new(
            "gantry=debug,gantry_loader=debug,gantry_site=debug,gantry_externs=debug,gantry_cli=debug",
        )
    } else if quiet {
        EnvFilter::new("gantry=error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("gantry=info,gantry_loader=info,gantry_site=info,gantry_externs=info")
        })
    };

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
