//! Miette diagnostic conversion for CLI errors.
//!
//! Errors cross into miette territory exactly once, at the binary's exit
//! boundary, so the library crates stay free of reporting concerns.

use crate::error::CliError;
use gantry_loader::LoadError;
use gantry_site::SiteError;
use miette::Report;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Site(e) => site_error_to_miette(e),
        CliError::Config(e) => miette::miette!("Configuration error: {}", e),
        _ => miette::miette!("{}", err),
    }
}

/// Convert SiteError to miette Report
fn site_error_to_miette(err: SiteError) -> Report {
    match err {
        SiteError::Load(LoadError::UnresolvedRequire {
            namespace,
            required_by,
        }) => {
            miette::miette!(
                "Failed to resolve namespace: {}\nRequired by: {}\n\n\
                 Hint: Recompile so the dependency manifest covers it, or bind the namespace as a host module",
                namespace,
                required_by
            )
        }
        SiteError::Load(LoadError::CircularRequire { cycle }) => {
            miette::miette!(
                "Circular namespace requirement:\n{}\n\nHint: Break the cycle in the modules' require declarations",
                cycle
            )
        }
        SiteError::PageFormat(detail) => {
            miette::miette!(
                "Page function returned malformed records: {}\n\n\
                 Hint: The page function must return an array of {{\"path\", \"content\"}} objects",
                detail
            )
        }
        _ => miette::miette!("{}", err),
    }
}
