//! Configuration discovery and loading.
//!
//! The configuration lives either in `gantry.toml` or, for projects that
//! keep everything in one manifest, under a top-level `"gantry"` key in
//! `package.json`. Discovery checks the TOML file first. Relative paths in
//! the file are interpreted relative to the file's own directory, so
//! commands behave the same from any working directory.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use gantry_externs::ExternsConfig;
use gantry_site::{SiteConfig, TestEnvConfig};
use serde::Deserialize;

use crate::error::ConfigError;

/// The discovered config file name.
pub const CONFIG_FILE: &str = "gantry.toml";
/// The fallback manifest holding a `"gantry"` section.
pub const PACKAGE_FILE: &str = "package.json";

/// The whole gantry configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GantryConfig {
    /// Site generation settings.
    pub site: SiteConfig,

    /// Library wrapper and externs settings. Optional; only the `externs`
    /// command needs it.
    #[serde(default)]
    pub externs: Option<ExternsConfig>,

    /// Packaging test environments, keyed by name.
    #[serde(default)]
    pub testenv: BTreeMap<String, TestEnvConfig>,

    /// Where this configuration was loaded from. Not part of the file.
    #[serde(skip)]
    pub source: PathBuf,
}

impl GantryConfig {
    /// Load the configuration, from `explicit` when given, otherwise by
    /// discovery in the current directory.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => {
                let cwd = std::env::current_dir()?;
                Self::discover(&cwd)
            }
        }
    }

    /// Discover and load the configuration in `dir`: `gantry.toml` first,
    /// then a `"gantry"` section in `package.json`.
    pub fn discover(dir: &Path) -> Result<Self, ConfigError> {
        let toml_path = dir.join(CONFIG_FILE);
        if toml_path.exists() {
            return Self::load_from(&toml_path);
        }

        let package_path = dir.join(PACKAGE_FILE);
        if package_path.exists() {
            if let Some(config) = Self::load_package(&package_path)? {
                return Ok(config);
            }
        }

        Err(ConfigError::NotDiscovered(dir.to_path_buf()))
    }

    /// Load the configuration from a specific file, chosen by extension.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => {
                let text = fs::read_to_string(path)?;
                let mut config: GantryConfig =
                    toml::from_str(&text).map_err(|source| ConfigError::InvalidToml {
                        path: path.to_path_buf(),
                        source: Box::new(source),
                    })?;
                config.finish(path);
                Ok(config)
            }
            Some("json") => Self::load_package(path)?
                .ok_or_else(|| ConfigError::MissingSection(path.to_path_buf())),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Load the `"gantry"` section of a package manifest. `Ok(None)` when
    /// the manifest parses but has no such section.
    fn load_package(path: &Path) -> Result<Option<Self>, ConfigError> {
        let text = fs::read_to_string(path)?;
        let mut manifest: serde_json::Value =
            serde_json::from_str(&text).map_err(|source| ConfigError::InvalidJson {
                path: path.to_path_buf(),
                source,
            })?;

        let Some(section) = manifest.get_mut("gantry") else {
            return Ok(None);
        };

        let mut config: GantryConfig =
            serde_json::from_value(section.take()).map_err(|source| ConfigError::InvalidJson {
                path: path.to_path_buf(),
                source,
            })?;
        config.finish(path);
        Ok(Some(config))
    }

    /// Record the source path and rebase relative filesystem paths onto its
    /// directory. Site-relative strings (routes, asset locations) are left
    /// alone.
    fn finish(&mut self, path: &Path) {
        self.source = path.to_path_buf();
        let base = path.parent().unwrap_or_else(|| Path::new("")).to_path_buf();

        rebase(&mut self.site.main_file, &base);
        if let Some(output_dir) = self.site.output_dir.as_mut() {
            rebase(output_dir, &base);
        }
        rebase(&mut self.site.site_dir, &base);
        for stylesheet in &mut self.site.css {
            rebase(stylesheet, &base);
        }

        if let Some(externs) = self.externs.as_mut() {
            rebase(&mut externs.source, &base);
            if let Some(out) = externs.wrapper_out.as_mut() {
                rebase(out, &base);
            }
            if let Some(out) = externs.externs_out.as_mut() {
                rebase(out, &base);
            }
        }

        for env in self.testenv.values_mut() {
            rebase(&mut env.dir, &base);
        }

        tracing::debug!("configuration loaded from {}", self.source.display());
    }

    /// Check the loaded values for problems serde can't see.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.pages.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "site.pages".to_string(),
                value: "[]".to_string(),
                hint: "List at least one route, e.g. [\"index.html\"]".to_string(),
            });
        }

        for route in &self.site.pages {
            if Path::new(route).is_absolute() || route.split('/').any(|part| part == "..") {
                return Err(ConfigError::InvalidValue {
                    field: "site.pages".to_string(),
                    value: route.clone(),
                    hint: "Routes are site-relative paths like news/index.html".to_string(),
                });
            }
        }

        // dev_entry and mount_id are spliced into the generated page shell.
        if !is_namespace(&self.site.dev_entry) {
            return Err(ConfigError::InvalidValue {
                field: "site.dev_entry".to_string(),
                value: self.site.dev_entry.clone(),
                hint: "Use a dotted namespace like site.dev".to_string(),
            });
        }
        if !is_html_id(&self.site.mount_id) {
            return Err(ConfigError::InvalidValue {
                field: "site.mount_id".to_string(),
                value: self.site.mount_id.clone(),
                hint: "Use letters, digits, '-' and '_'".to_string(),
            });
        }

        if self.site.pages_fn.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "site.pages_fn".to_string(),
                value: String::new(),
                hint: "Name the registry symbol to call, e.g. site.core/genpages".to_string(),
            });
        }

        if let Some(externs) = &self.externs {
            // namespace and global_name end up in generated JavaScript.
            if !is_namespace(&externs.namespace) {
                return Err(ConfigError::InvalidValue {
                    field: "externs.namespace".to_string(),
                    value: externs.namespace.clone(),
                    hint: "Use a dotted namespace like site.react".to_string(),
                });
            }
            if !is_ident(&externs.global_name) {
                return Err(ConfigError::InvalidValue {
                    field: "externs.global_name".to_string(),
                    value: externs.global_name.clone(),
                    hint: "Use a plain identifier like React".to_string(),
                });
            }
        }

        for (name, env) in &self.testenv {
            if env.dir.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: format!("testenv.{name}.dir"),
                    value: String::new(),
                    hint: "Point dir at the environment's directory".to_string(),
                });
            }
        }

        Ok(())
    }

    /// The named test environment, or an error when it isn't configured.
    pub fn testenv_named(&self, name: &str) -> Result<&TestEnvConfig, ConfigError> {
        self.testenv
            .get(name)
            .ok_or_else(|| ConfigError::EnvNotFound(name.to_string()))
    }

    /// The externs section, or an error when the config has none.
    pub fn externs_section(&self) -> Result<&ExternsConfig, ConfigError> {
        self.externs.as_ref().ok_or(ConfigError::NoExterns)
    }
}

fn rebase(path: &mut PathBuf, base: &Path) {
    if path.is_relative() {
        *path = base.join(&*path);
    }
}

fn is_namespace(value: &str) -> bool {
    !value.is_empty() && value.split('.').all(is_ident)
}

fn is_ident(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn is_html_id(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
