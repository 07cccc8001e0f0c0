//! Testconf command implementation.
//!
//! Writes `karma.conf.js` into each configured test environment directory,
//! or into a single named one.

use std::path::Path;

use gantry_site::write_karma_conf;

use crate::cli::TestconfArgs;
use crate::config::GantryConfig;
use crate::error::Result;
use crate::ui;

/// Execute the testconf command.
pub fn execute(args: TestconfArgs, config_path: Option<&Path>) -> Result<()> {
    let config = GantryConfig::load(config_path)?;
    config.validate()?;

    if config.testenv.is_empty() {
        ui::warning("No test environments configured");
        return Ok(());
    }

    match &args.name {
        Some(name) => {
            let env = config.testenv_named(name)?;
            let path = write_karma_conf(env)?;
            ui::success(&format!("Wrote {}", path.display()));
        }
        None => {
            for (name, env) in &config.testenv {
                let path = write_karma_conf(env)?;
                ui::success(&format!("{}: wrote {}", name, path.display()));
            }
        }
    }

    Ok(())
}
