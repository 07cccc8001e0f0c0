//! Writing the generated site to disk.
//!
//! All writes are staged to temporary files and renamed into place, so a
//! failed run never leaves a half-written page behind. Page routes come from
//! the page function, which may be site-supplied code, so every target path
//! is checked for containment in the site directory before anything is
//! written.

use std::fs;
use std::path::{Path, PathBuf};

use gantry_loader::Mode;
use path_clean::PathClean;

use crate::config::SiteConfig;
use crate::error::{Result, SiteError};
use crate::gen::GeneratedSite;

/// Files produced by [`write_site`], for reporting.
#[derive(Debug, Default)]
pub struct WrittenAssets {
    pub pages: Vec<PathBuf>,
    pub stylesheet: Option<PathBuf>,
    pub bundle: Option<PathBuf>,
}

impl WrittenAssets {
    pub fn count(&self) -> usize {
        self.pages.len()
            + usize::from(self.stylesheet.is_some())
            + usize::from(self.bundle.is_some())
    }
}

/// Write pages and assets under the configured site directory.
///
/// Besides the pages themselves this writes the concatenated stylesheet
/// (when any sources are configured) and, for combined builds whose bundle
/// lives outside the site directory, a copy of the bundle at the location
/// the page shell references.
pub fn write_site(config: &SiteConfig, site: &GeneratedSite) -> Result<WrittenAssets> {
    let site_dir = normalize_dir(&config.site_dir)?;
    fs::create_dir_all(&site_dir).map_err(|e| SiteError::write(&site_dir, e))?;

    let mut operations: Vec<(PathBuf, Vec<u8>)> = Vec::new();
    let mut written = WrittenAssets::default();

    for page in &site.pages {
        let target = contained_path(&site_dir, &page.route)?;
        written.pages.push(target.clone());
        operations.push((target, page.content.clone().into_bytes()));
    }

    if !config.css.is_empty() {
        let stylesheet = concat_stylesheets(&config.css)?;
        let target = contained_path(&site_dir, &config.css_out)?;
        written.stylesheet = Some(target.clone());
        operations.push((target, stylesheet.into_bytes()));
    }

    if site.mode == Mode::Combined && config.bundle_needs_copy() {
        let bundle = fs::read(&config.main_file)
            .map_err(|e| SiteError::read_asset(&config.main_file, e))?;
        let target = contained_path(&site_dir, &config.bundle_out)?;
        written.bundle = Some(target.clone());
        operations.push((target, bundle));
    }

    write_files_atomic(&operations)?;
    tracing::debug!(
        "wrote {} site files under {}",
        operations.len(),
        site_dir.display()
    );
    Ok(written)
}

/// Clean the site directory and make it absolute, so containment checks
/// compare like with like.
fn normalize_dir(dir: &Path) -> Result<PathBuf> {
    let cleaned = dir.clean();
    if cleaned.is_absolute() {
        return Ok(cleaned);
    }
    let cwd = std::env::current_dir().map_err(|e| SiteError::write(dir, e))?;
    Ok(cwd.join(cleaned).clean())
}

/// Resolve `route` under `site_dir`, rejecting anything that climbs out.
fn contained_path(site_dir: &Path, route: &str) -> Result<PathBuf> {
    if route.contains('\0') {
        return Err(SiteError::UnsafePagePath(route.to_string()));
    }
    let full = site_dir.join(Path::new(route).clean()).clean();
    if !full.starts_with(site_dir) {
        return Err(SiteError::UnsafePagePath(route.to_string()));
    }
    Ok(full)
}

fn concat_stylesheets(sources: &[PathBuf]) -> Result<String> {
    let mut out = String::new();
    for source in sources {
        let css = fs::read_to_string(source).map_err(|e| SiteError::read_asset(source, e))?;
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&css);
    }
    Ok(out)
}

/// Two-phase write: stage everything to `<name>.tmp` files, then rename into
/// place. Any failure removes the staged files.
fn write_files_atomic(operations: &[(PathBuf, Vec<u8>)]) -> Result<()> {
    let mut staged: Vec<(PathBuf, &PathBuf)> = Vec::new();

    for (target, content) in operations {
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                cleanup_staged(&staged);
                SiteError::write(parent, e)
            })?;
        }
        let temp = temp_path(target);
        fs::write(&temp, content).map_err(|e| {
            cleanup_staged(&staged);
            SiteError::write(&temp, e)
        })?;
        staged.push((temp, target));
    }

    for (temp, target) in &staged {
        fs::rename(temp, target).map_err(|e| {
            cleanup_staged(&staged);
            SiteError::write(*target, e)
        })?;
    }
    Ok(())
}

/// `<target>.tmp`, appended rather than substituted so `a.html` and `a.css`
/// never stage to the same file.
fn temp_path(target: &Path) -> PathBuf {
    let mut name = target.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}

fn cleanup_staged(staged: &[(PathBuf, &PathBuf)]) {
    for (temp, _) in staged {
        if temp.exists() {
            if let Err(e) = fs::remove_file(temp) {
                tracing::warn!("failed to remove staged file {}: {e}", temp.display());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gen::GeneratedPage;
    use tempfile::TempDir;

    fn site(mode: Mode, pages: &[(&str, &str)]) -> GeneratedSite {
        GeneratedSite {
            mode,
            pages: pages
                .iter()
                .map(|(route, content)| GeneratedPage {
                    route: route.to_string(),
                    content: content.to_string(),
                })
                .collect(),
        }
    }

    fn config_in(dir: &TempDir) -> SiteConfig {
        let mut config: SiteConfig = toml::from_str("main_file = \"unused\"\n").unwrap();
        config.site_dir = dir.path().join("public");
        config.main_file = config.site_dir.join("js/main.js");
        config
    }

    #[test]
    fn writes_pages_creating_nested_directories() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        let generated = site(
            Mode::Combined,
            &[("index.html", "<p>root</p>"), ("news/index.html", "<p>news</p>")],
        );

        let written = write_site(&config, &generated).unwrap();

        assert_eq!(written.count(), 2);
        let news = dir.path().join("public/news/index.html");
        assert_eq!(fs::read_to_string(news).unwrap(), "<p>news</p>");
        // No staging leftovers.
        assert!(!dir.path().join("public/index.html.tmp").exists());
    }

    #[test]
    fn concatenates_stylesheets_in_order() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(&dir);
        let a = dir.path().join("a.css");
        let b = dir.path().join("b.css");
        fs::write(&a, "body { margin: 0 }").unwrap();
        fs::write(&b, "h1 { color: red }").unwrap();
        config.css = vec![a, b];

        let written = write_site(&config, &site(Mode::Combined, &[])).unwrap();

        let css_path = written.stylesheet.unwrap();
        let css = fs::read_to_string(css_path).unwrap();
        assert_eq!(css, "body { margin: 0 }\nh1 { color: red }");
    }

    #[test]
    fn missing_stylesheet_reports_its_path() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(&dir);
        config.css = vec![dir.path().join("absent.css")];

        let err = write_site(&config, &site(Mode::Combined, &[])).unwrap_err();
        match err {
            SiteError::ReadAsset { path, .. } => assert!(path.ends_with("absent.css")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn combined_bundle_outside_site_dir_is_copied_in() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(&dir);
        let external = dir.path().join("target/client.js");
        fs::create_dir_all(external.parent().unwrap()).unwrap();
        fs::write(&external, "// compiled\n").unwrap();
        config.main_file = external;

        let written = write_site(&config, &site(Mode::Combined, &[])).unwrap();

        let copy = written.bundle.unwrap();
        assert!(copy.ends_with("public/js/main.js"));
        assert_eq!(fs::read_to_string(copy).unwrap(), "// compiled\n");
    }

    #[test]
    fn bundle_inside_site_dir_is_not_copied() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        let written = write_site(&config, &site(Mode::Combined, &[])).unwrap();
        assert!(written.bundle.is_none());
    }

    #[test]
    fn incremental_mode_never_copies_the_bundle() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(&dir);
        config.main_file = dir.path().join("target/client.js");

        let written = write_site(&config, &site(Mode::Incremental, &[])).unwrap();
        assert!(written.bundle.is_none());
    }

    #[test]
    fn escaping_route_is_rejected_before_any_write() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        let generated = site(Mode::Combined, &[("../outside.html", "nope")]);

        let err = write_site(&config, &generated).unwrap_err();
        assert!(matches!(err, SiteError::UnsafePagePath(route) if route == "../outside.html"));
        assert!(!dir.path().join("outside.html").exists());
    }

    #[test]
    fn absolute_route_is_rejected() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        let generated = site(Mode::Combined, &[("/etc/motd", "nope")]);
        assert!(matches!(
            write_site(&config, &generated).unwrap_err(),
            SiteError::UnsafePagePath(_)
        ));
    }

    #[test]
    fn rewrites_existing_pages() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        write_site(&config, &site(Mode::Combined, &[("index.html", "old")])).unwrap();
        write_site(&config, &site(Mode::Combined, &[("index.html", "new")])).unwrap();
        let page = dir.path().join("public/index.html");
        assert_eq!(fs::read_to_string(page).unwrap(), "new");
    }
}
