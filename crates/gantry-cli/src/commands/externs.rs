//! Externs command implementation.
//!
//! Reads the configured library source and emits the two packaging
//! artifacts around it: the namespace wrapper that embeds the library for
//! whole-program compilation, and the externs file declaring the names the
//! compiler must not rename.

use std::fs;
use std::path::Path;

use gantry_externs::{collect_names, externs, wrapper};

use crate::cli::{EmitKind, ExternsArgs};
use crate::config::GantryConfig;
use crate::error::{ConfigError, Result, ResultExt};
use crate::ui;

/// Execute the externs command.
pub fn execute(args: ExternsArgs, config_path: Option<&Path>) -> Result<()> {
    let config = GantryConfig::load(config_path)?;
    config.validate()?;
    let externs_config = config.externs_section()?;

    let source = fs::read_to_string(&externs_config.source).with_path(&externs_config.source)?;
    let names = collect_names(externs_config, &source);
    ui::info(&format!(
        "{}: exposing {} names",
        externs_config.source.display(),
        names.len()
    ));

    if wants(args.emit, EmitKind::Wrapper) {
        match &externs_config.wrapper_out {
            Some(out) => {
                write_artifact(out, &wrapper(externs_config, &source))?;
                ui::success(&format!("Wrote wrapper {}", out.display()));
            }
            None => skip_unconfigured("wrapper", "externs.wrapper_out", args.emit)?,
        }
    }

    if wants(args.emit, EmitKind::Externs) {
        match &externs_config.externs_out {
            Some(out) => {
                write_artifact(out, &externs(externs_config, &names))?;
                ui::success(&format!("Wrote externs {}", out.display()));
            }
            None => skip_unconfigured("externs file", "externs.externs_out", args.emit)?,
        }
    }

    Ok(())
}

fn wants(emit: EmitKind, kind: EmitKind) -> bool {
    emit == EmitKind::Both || emit == kind
}

/// An artifact without a destination is skipped under `--emit both`, but is
/// an error when it was requested by name.
fn skip_unconfigured(what: &str, field: &str, emit: EmitKind) -> Result<()> {
    if emit == EmitKind::Both {
        ui::warning(&format!("{field} not set, skipping {what}"));
        return Ok(());
    }
    Err(ConfigError::InvalidValue {
        field: field.to_string(),
        value: "(unset)".to_string(),
        hint: format!("Set {field} to the {what}'s output path"),
    }
    .into())
}

fn write_artifact(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .context(format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, contents)
        .context(format!("Failed to write {}", path.display()))
        .with_hint("Check output directory permissions")?;
    Ok(())
}
