//! Closure-style dependency manifest parsing.
//!
//! An incremental build writes a `deps.js` next to its runtime bootstrap.
//! The file is a flat list of `goog.addDependency("path", [provides],
//! [requires]);` records mapping namespaces to the files that provide them.
//! The manifest is data about the build, so it is parsed, never evaluated.

use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{LoadError, Result};

static ADD_DEPENDENCY: Lazy<Regex> = Lazy::new(|| {
    // Both quote styles appear in the wild; the optional fourth argument
    // (module flags) is ignored.
    Regex::new(
        r#"^\s*goog\.addDependency\(\s*["']([^"']*)["']\s*,\s*\[([^\]]*)\]\s*,\s*\[([^\]]*)\]"#,
    )
    .expect("valid addDependency pattern")
});

/// One `goog.addDependency` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepEntry {
    /// File path relative to the runtime directory the manifest lives in.
    pub path: String,
    /// Namespaces the file provides.
    pub provides: Vec<String>,
    /// Namespaces the file requires before it can be evaluated.
    pub requires: Vec<String>,
}

/// Parsed dependency manifest with namespace lookup.
#[derive(Debug, Default)]
pub struct DepsManifest {
    entries: Vec<DepEntry>,
    by_namespace: HashMap<String, usize>,
}

impl DepsManifest {
    /// Parse manifest `source` read from `path`.
    ///
    /// Lines that are not `goog.addDependency` calls (comments, blanks, the
    /// autogeneration banner) are skipped. A line that starts an
    /// `addDependency` call but cannot be parsed is a syntax error; silently
    /// dropping it would make a namespace unresolvable much later with a
    /// worse diagnostic.
    pub fn parse(path: &Path, source: &str) -> Result<Self> {
        let mut entries = Vec::new();
        let mut by_namespace = HashMap::new();

        for (idx, line) in source.lines().enumerate() {
            if !line.trim_start().starts_with("goog.addDependency(") {
                continue;
            }
            let caps =
                ADD_DEPENDENCY
                    .captures(line)
                    .ok_or_else(|| LoadError::ManifestSyntax {
                        path: path.to_path_buf(),
                        line: idx + 1,
                        message: "unparseable goog.addDependency call".to_string(),
                    })?;

            let entry = DepEntry {
                path: caps[1].to_string(),
                provides: parse_name_list(&caps[2]),
                requires: parse_name_list(&caps[3]),
            };
            if entry.path.is_empty() {
                return Err(LoadError::ManifestSyntax {
                    path: path.to_path_buf(),
                    line: idx + 1,
                    message: "empty file path".to_string(),
                });
            }

            let slot = entries.len();
            for namespace in &entry.provides {
                // Later records win, matching how the runtime's own registry
                // treats duplicate provides.
                by_namespace.insert(namespace.clone(), slot);
            }
            entries.push(entry);
        }

        tracing::debug!(
            "parsed {} dependency records from {}",
            entries.len(),
            path.display()
        );
        Ok(Self {
            entries,
            by_namespace,
        })
    }

    /// Look up the entry that provides `namespace`.
    pub fn lookup(&self, namespace: &str) -> Option<&DepEntry> {
        self.by_namespace
            .get(namespace)
            .and_then(|&slot| self.entries.get(slot))
    }

    pub fn entries(&self) -> &[DepEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Split a quoted, comma-separated namespace list.
fn parse_name_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|name| name.trim().trim_matches(|c| c == '\'' || c == '"').trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
