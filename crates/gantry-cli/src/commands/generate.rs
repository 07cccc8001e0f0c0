//! Gen command implementation.
//!
//! The main entry point for site generation, and the command a compiler
//! watch loop calls after every rebuild. The watch hook passes the
//! compiler's status message as the trailing argument; when that message
//! reports a failure there is nothing to load, so the command rings the
//! bell and exits successfully to keep the loop alive.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use gantry_site::{default_table, generate, write_site, SiteConfig};

use crate::cli::GenArgs;
use crate::config::GantryConfig;
use crate::error::{Result, ResultExt};
use crate::ui;

/// Execute the gen command.
pub fn execute(args: GenArgs, config_path: Option<&Path>) -> Result<()> {
    if compile_failed(args.compile_status.as_deref()) {
        ui::error("Compilation failed");
        ui::bell();
        return Ok(());
    }

    let config = GantryConfig::load(config_path)?;
    config.validate()?;

    if args.clean {
        clean_generated(&config.site)?;
    }

    ui::info(&format!("Loading {}", config.site.main_file.display()));
    let started = Instant::now();

    let table = default_table(&config.site);
    let site = generate(&config.site, &table)?;
    let written = write_site(&config.site, &site)?;

    ui::success(&format!(
        "Generated {} file{} ({} build) in {}",
        written.count(),
        if written.count() == 1 { "" } else { "s" },
        site.mode,
        ui::format_duration(started.elapsed())
    ));

    Ok(())
}

/// Whether a watch loop's status message reports a failed compile.
///
/// Matches the compiler's wording: any message containing `failed`.
fn compile_failed(status: Option<&str>) -> bool {
    status.is_some_and(|msg| msg.contains("failed"))
}

/// Remove previously generated files: the configured page routes, the
/// concatenated stylesheet, and the bundle copy.
///
/// Compiler output is never touched, even when it lives inside the site
/// directory.
fn clean_generated(site: &SiteConfig) -> Result<()> {
    let mut targets: Vec<PathBuf> = site
        .pages
        .iter()
        .map(|route| site.site_dir.join(route))
        .collect();
    if !site.css.is_empty() {
        targets.push(site.site_dir.join(&site.css_out));
    }
    if site.bundle_needs_copy() {
        targets.push(site.site_dir.join(&site.bundle_out));
    }

    let mut removed = 0usize;
    for target in targets {
        match fs::remove_file(&target) {
            Ok(()) => {
                tracing::debug!("removed {}", target.display());
                removed += 1;
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(e).context(format!("Failed to remove {}", target.display()));
            }
        }
    }

    if removed > 0 {
        ui::info(&format!("Removed {removed} generated file(s)"));
    }
    Ok(())
}
