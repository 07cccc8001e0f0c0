//! Check command implementation.
//!
//! Validates the configuration without generating anything, and reports
//! which build layout the configured output currently contains.

use std::fs;
use std::path::{Path, PathBuf};

use gantry_loader::BundleLocation;

use crate::config::GantryConfig;
use crate::error::Result;
use crate::ui;

/// Execute the check command.
///
/// # Validation Steps
///
/// 1. Load and validate the configuration
/// 2. Probe the compiled output for its build layout
/// 3. Warn about referenced files that don't exist yet
pub fn execute(config_path: Option<&Path>) -> Result<()> {
    ui::info("Checking configuration...");

    let config = GantryConfig::load(config_path)?;
    config.validate()?;
    ui::success(&format!("{} is valid", config.source.display()));

    match bundle_layout(&config.site.bundle_location()) {
        Layout::Incremental(manifest) => {
            ui::success(&format!(
                "incremental build output (manifest {})",
                manifest.display()
            ));
        }
        Layout::Combined(size) => {
            ui::success(&format!(
                "combined bundle {} ({})",
                config.site.main_file.display(),
                ui::format_size(size)
            ));
        }
        Layout::Missing => {
            ui::warning("no compiled bundle found yet");
        }
    }

    for stylesheet in &config.site.css {
        if !stylesheet.exists() {
            ui::warning(&format!("stylesheet not found: {}", stylesheet.display()));
        }
    }
    if let Some(externs) = &config.externs {
        if !externs.source.exists() {
            ui::warning(&format!(
                "externs source not found: {}",
                externs.source.display()
            ));
        }
    }

    ui::info(&format!(
        "{} page route(s), {} stylesheet(s)",
        config.site.pages.len(),
        config.site.css.len()
    ));
    if !config.testenv.is_empty() {
        let names: Vec<&str> = config.testenv.keys().map(String::as_str).collect();
        ui::info(&format!("test environments: {}", names.join(", ")));
    }

    ui::success("All checks passed!");
    Ok(())
}

/// What the configured output locations currently hold.
enum Layout {
    /// A dependency manifest exists, so the output is an incremental build.
    Incremental(PathBuf),
    /// Only the combined bundle exists; carries its size.
    Combined(u64),
    /// Nothing compiled yet.
    Missing,
}

fn bundle_layout(location: &BundleLocation) -> Layout {
    if let Some(manifest) = location.manifest_path() {
        if manifest.exists() {
            return Layout::Incremental(manifest);
        }
    }
    match fs::metadata(&location.main_file) {
        Ok(meta) => Layout::Combined(meta.len()),
        Err(_) => Layout::Missing,
    }
}
