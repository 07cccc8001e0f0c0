//! Test environment scaffolding: karma runner configuration.
//!
//! Each packaging flavor of the library gets a small directory with a karma
//! config pointing the runner at that flavor's compiled output. The configs
//! are declarative and repetitive, so they are generated from the same TOML
//! configuration as the rest of the tooling.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{Result, SiteError};

/// One test environment and the runner settings emitted for it.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestEnvConfig {
    /// Directory the karma config is written into.
    pub dir: PathBuf,

    /// Karma `basePath`, relative to `dir`.
    #[serde(default)]
    pub base_path: String,

    #[serde(default = "default_browsers")]
    pub browsers: Vec<String>,

    /// Files loaded into the runner page, in order.
    #[serde(default)]
    pub files: Vec<String>,

    /// Patterns served but not loaded (module files fetched by the
    /// bootstrap, source maps).
    #[serde(default)]
    pub serve_only: Vec<String>,

    #[serde(default = "default_frameworks")]
    pub frameworks: Vec<String>,

    #[serde(default)]
    pub preprocessors: BTreeMap<String, Vec<String>>,

    #[serde(default)]
    pub proxies: BTreeMap<String, String>,

    /// Arguments handed to the client adapter, typically the test runner
    /// namespace.
    #[serde(default)]
    pub client_args: Vec<String>,

    #[serde(default = "default_true")]
    pub colors: bool,

    /// Karma log level constant name, spliced as `config.<level>`.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_true")]
    pub single_run: bool,
}

fn default_browsers() -> Vec<String> {
    vec!["ChromeHeadless".to_string()]
}

fn default_frameworks() -> Vec<String> {
    vec!["cljs-test".to_string()]
}

fn default_log_level() -> String {
    "LOG_INFO".to_string()
}

fn default_true() -> bool {
    true
}

/// Render the karma configuration module for one environment.
pub fn karma_conf(env: &TestEnvConfig) -> String {
    let mut entries: Vec<String> = Vec::new();

    entries.push(format!("browsers: {}", js_array(&env.browsers)));
    entries.push(format!("basePath: {}", js_str(&env.base_path)));

    let mut file_items: Vec<String> = env.files.iter().map(|file| js_str(file)).collect();
    file_items.extend(
        env.serve_only
            .iter()
            .map(|pattern| format!("{{pattern: {}, included: false}}", js_str(pattern))),
    );
    entries.push(block("files", "[", "]", &file_items));

    entries.push(format!("frameworks: {}", js_array(&env.frameworks)));

    if !env.preprocessors.is_empty() {
        let items: Vec<String> = env
            .preprocessors
            .iter()
            .map(|(file, chain)| format!("{}: {}", js_str(file), js_array(chain)))
            .collect();
        entries.push(block("preprocessors", "{", "}", &items));
    }

    if !env.proxies.is_empty() {
        let items: Vec<String> = env
            .proxies
            .iter()
            .map(|(from, to)| format!("{}: {}", js_str(from), js_str(to)))
            .collect();
        entries.push(block("proxies", "{", "}", &items));
    }

    entries.push(format!("colors: {}", env.colors));
    entries.push(format!("logLevel: config.{}", env.log_level));

    if !env.client_args.is_empty() {
        entries.push(format!(
            "client: {{\n            args: {}\n        }}",
            js_array(&env.client_args)
        ));
    }

    entries.push(format!("singleRun: {}", env.single_run));

    format!(
        "module.exports = function (config) {{\n    config.set({{\n        {}\n    }});\n}};\n",
        entries.join(",\n        ")
    )
}

/// Write the environment's `karma.conf.js`, creating its directory.
pub fn write_karma_conf(env: &TestEnvConfig) -> Result<PathBuf> {
    fs::create_dir_all(&env.dir).map_err(|e| SiteError::write(&env.dir, e))?;
    let path = env.dir.join("karma.conf.js");
    fs::write(&path, karma_conf(env)).map_err(|e| SiteError::write(&path, e))?;
    Ok(path)
}

fn js_str(value: &str) -> String {
    format!(
        "'{}'",
        value
            .replace('\\', "\\\\")
            .replace('\'', "\\'")
            .replace('\n', "\\n")
    )
}

fn js_array(values: &[String]) -> String {
    let items: Vec<String> = values.iter().map(|value| js_str(value)).collect();
    format!("[{}]", items.join(", "))
}

fn block(key: &str, open: &str, close: &str, items: &[String]) -> String {
    if items.is_empty() {
        return format!("{key}: {open}{close}");
    }
    format!(
        "{key}: {open}\n            {}\n        {close}",
        items.join(",\n            ")
    )
}
