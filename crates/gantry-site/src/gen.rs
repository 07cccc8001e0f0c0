//! Driving a loaded bundle to produce the site's pages.

use gantry_loader::{CallbackError, Loader, Mode, ModuleTable, Registry, Value};
use serde_json::{json, Value as Json};

use crate::config::SiteConfig;
use crate::error::{Result, SiteError};
use crate::page::render_page;

/// Registry symbol prefix under which modules publish pre-rendered page
/// bodies: `site.pages/<route>` holds the markup for `<route>`.
pub const PAGE_BODY_PREFIX: &str = "site.pages/";

/// One generated page; `route` is relative to the site directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPage {
    pub route: String,
    pub content: String,
}

/// Outcome of one generation run.
#[derive(Debug, Clone)]
pub struct GeneratedSite {
    pub mode: Mode,
    pub pages: Vec<GeneratedPage>,
}

/// Module table for sites using the built-in page shell.
///
/// Registers one initializer, for the page-function namespace, which binds
/// the configured `pages_fn` symbol to a renderer over the configured
/// routes. Sites with their own page function build their own table instead.
pub fn default_table(config: &SiteConfig) -> ModuleTable {
    let mut table = ModuleTable::new();
    let namespace = config.pages_namespace().to_string();
    let symbol = config.pages_fn.clone();
    let shell_config = config.clone();

    table.on_init(namespace, move |registry| {
        let shell_config = shell_config.clone();
        registry
            .bind(
                symbol.clone(),
                Value::function(move |registry, args| {
                    render_configured_pages(&shell_config, registry, args)
                }),
            )
            .map_err(|e| CallbackError::new(e.to_string()))
    });
    table
}

/// The built-in page function: one shell-rendered document per configured
/// route, with any published body markup dropped into the mount point.
fn render_configured_pages(
    config: &SiteConfig,
    registry: &Registry,
    args: &Json,
) -> std::result::Result<Json, CallbackError> {
    let opt_none = args
        .get("opt-none")
        .and_then(Json::as_bool)
        .unwrap_or(false);
    let mode = if opt_none {
        Mode::Incremental
    } else {
        Mode::Combined
    };

    let mut pages = Vec::with_capacity(config.pages.len());
    for route in &config.pages {
        let body_symbol = format!("{PAGE_BODY_PREFIX}{route}");
        let body = registry
            .get(&body_symbol)
            .and_then(Value::as_data)
            .and_then(Json::as_str);
        let content = render_page(config, mode, route, body);
        pages.push(json!({ "path": route, "content": content }));
    }
    Ok(Json::Array(pages))
}

/// Load the bundle described by `config` and invoke its page function once.
///
/// The page function is called with `{"opt-none": bool}` reporting whether
/// the build was incremental, and must return an array of
/// `{"path", "content"}` records.
pub fn generate(config: &SiteConfig, table: &ModuleTable) -> Result<GeneratedSite> {
    let mut registry = Registry::new();
    let mode = Loader::new(table).load(&config.bundle_location(), &mut registry)?;
    tracing::debug!(
        "bundle loaded in {mode} mode, {} files evaluated",
        registry.eval_log().len()
    );

    let args = json!({ "opt-none": mode.is_incremental() });
    let raw = registry.call(&config.pages_fn, &args)?;
    let pages = pages_from_json(&raw)?;
    tracing::debug!("page function produced {} pages", pages.len());
    Ok(GeneratedSite { mode, pages })
}

fn pages_from_json(raw: &Json) -> Result<Vec<GeneratedPage>> {
    let Some(records) = raw.as_array() else {
        return Err(SiteError::PageFormat(
            "expected an array of page records".to_string(),
        ));
    };

    let mut pages = Vec::with_capacity(records.len());
    for (idx, record) in records.iter().enumerate() {
        let route = record
            .get("path")
            .and_then(Json::as_str)
            .ok_or_else(|| SiteError::PageFormat(format!("record {idx} has no string 'path'")))?;
        let content = record.get("content").and_then(Json::as_str).ok_or_else(|| {
            SiteError::PageFormat(format!("record {idx} ('{route}') has no string 'content'"))
        })?;
        pages.push(GeneratedPage {
            route: route.to_string(),
            content: content.to_string(),
        });
    }
    Ok(pages)
}
