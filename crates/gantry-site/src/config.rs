//! Site generation settings.

use std::path::{Path, PathBuf};

use gantry_loader::BundleLocation;
use serde::Deserialize;

/// Everything the generator needs to know about one documentation site.
///
/// Paths are interpreted relative to the directory the configuration was
/// loaded from; resolving them is the caller's job.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// The combined bundle file.
    pub main_file: PathBuf,

    /// Compiler output directory probed for an incremental layout. Omit for
    /// build profiles that only produce a combined file.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Namespace required last in incremental mode.
    #[serde(default = "default_dev_entry")]
    pub dev_entry: String,

    /// Directory the finished site is written into.
    #[serde(default = "default_site_dir")]
    pub site_dir: PathBuf,

    /// Page title used by the built-in shell.
    #[serde(default = "default_title")]
    pub title: String,

    /// Site-relative routes to generate, e.g. `index.html`,
    /// `news/index.html`.
    #[serde(default = "default_pages")]
    pub pages: Vec<String>,

    /// Stylesheets concatenated into the site's single CSS asset.
    #[serde(default)]
    pub css: Vec<PathBuf>,

    /// Registry symbol invoked to produce the pages.
    #[serde(default = "default_pages_fn")]
    pub pages_fn: String,

    /// Site-relative location the combined bundle is copied to when it lives
    /// outside the site directory.
    #[serde(default = "default_bundle_out")]
    pub bundle_out: String,

    /// Site-relative location of the concatenated stylesheet.
    #[serde(default = "default_css_out")]
    pub css_out: String,

    /// Id of the mount point element in the built-in shell.
    #[serde(default = "default_mount_id")]
    pub mount_id: String,
}

impl SiteConfig {
    /// The loader inputs this configuration describes.
    pub fn bundle_location(&self) -> BundleLocation {
        BundleLocation::new(
            self.main_file.clone(),
            self.output_dir.clone(),
            self.dev_entry.clone(),
        )
    }

    /// Namespace part of [`pages_fn`](Self::pages_fn), the module whose
    /// initializer must install the page function.
    pub fn pages_namespace(&self) -> &str {
        match self.pages_fn.split_once('/') {
            Some((namespace, _)) => namespace,
            None => &self.pages_fn,
        }
    }

    /// Where a page can reach the combined bundle, relative to the site
    /// root: the bundle's own location when it already lives under
    /// [`site_dir`](Self::site_dir), otherwise the copy target.
    pub fn bundle_href(&self) -> String {
        match self.main_file.strip_prefix(&self.site_dir) {
            Ok(inside) => slashify(inside),
            Err(_) => self.bundle_out.clone(),
        }
    }

    /// Where a page can reach the compiler output directory, relative to the
    /// site root. Incremental profiles are expected to compile into the site
    /// directory; anything else is passed through as-is.
    pub fn output_href(&self) -> Option<String> {
        self.output_dir.as_ref().map(|dir| {
            match dir.strip_prefix(&self.site_dir) {
                Ok(inside) => slashify(inside),
                Err(_) => slashify(dir),
            }
        })
    }

    /// Whether the combined bundle needs copying into the site directory.
    pub fn bundle_needs_copy(&self) -> bool {
        self.main_file.strip_prefix(&self.site_dir).is_err()
    }
}

fn slashify(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn default_dev_entry() -> String {
    "site.dev".to_string()
}

fn default_site_dir() -> PathBuf {
    PathBuf::from("public")
}

fn default_title() -> String {
    "Documentation".to_string()
}

fn default_pages() -> Vec<String> {
    vec!["index.html".to_string()]
}

fn default_pages_fn() -> String {
    "site.core/genpages".to_string()
}

fn default_bundle_out() -> String {
    "js/main.js".to_string()
}

fn default_css_out() -> String {
    "css/site.css".to_string()
}

fn default_mount_id() -> String {
    "main-content".to_string()
}
