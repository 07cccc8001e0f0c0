//! The built-in HTML page shell.
//!
//! Every generated page shares one shell: a head with the site stylesheet, a
//! mount point div, and the script wiring that differs by build mode. Asset
//! references are relative so the site can be served from any prefix or
//! opened straight from the filesystem.

use gantry_loader::Mode;

use crate::config::SiteConfig;

/// Render the full HTML document for `route`.
///
/// `body` is pre-rendered markup placed inside the mount point (server-side
/// rendered content registered by the bundle). It is trusted as-is; `None`
/// leaves the mount point empty for purely client-rendered pages.
pub fn render_page(config: &SiteConfig, mode: Mode, route: &str, body: Option<&str>) -> String {
    let prefix = asset_prefix(route);
    let title = escape_text(&config.title);
    let css_href = format!("{prefix}{}", config.css_out);
    let scripts = script_block(config, mode, &prefix);
    let mount = match body {
        Some(markup) => format!("<div id=\"{}\">{markup}</div>", config.mount_id),
        None => format!("<div id=\"{}\"></div>", config.mount_id),
    };

    format!(
        "<!doctype html>\n\
         <html>\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>{title}</title>\n\
         <link rel=\"stylesheet\" href=\"{css_href}\">\n\
         </head>\n\
         <body>\n\
         {mount}\n\
         {scripts}\
         </body>\n\
         </html>\n"
    )
}

/// Relative prefix that climbs from `route` back to the site root: one `../`
/// per directory level.
pub fn asset_prefix(route: &str) -> String {
    "../".repeat(route.matches('/').count())
}

fn script_block(config: &SiteConfig, mode: Mode, prefix: &str) -> String {
    match mode {
        Mode::Combined => {
            let src = format!("{prefix}{}", config.bundle_href());
            format!("<script type=\"text/javascript\" src=\"{src}\"></script>\n")
        }
        Mode::Incremental => {
            // The bootstrap resolves further requires through the manifest it
            // loads next; the inline require pulls in the whole application.
            let out = config.output_href().unwrap_or_default();
            let base = join_href(prefix, &out, "goog/base.js");
            let deps = join_href(prefix, &out, "goog/deps.js");
            format!(
                "<script type=\"text/javascript\" src=\"{base}\"></script>\n\
                 <script type=\"text/javascript\" src=\"{deps}\"></script>\n\
                 <script type=\"text/javascript\">goog.require(\"{}\");</script>\n",
                config.dev_entry
            )
        }
    }
}

fn join_href(prefix: &str, dir: &str, file: &str) -> String {
    if dir.is_empty() {
        format!("{prefix}{file}")
    } else {
        format!("{prefix}{}/{file}", dir.trim_end_matches('/'))
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SiteConfig {
        toml::from_str(
            "main_file = \"public/js/main.js\"\n\
             output_dir = \"public/js/out\"\n\
             dev_entry = \"app.dev\"\n\
             title = \"Widgets & Co\"\n",
        )
        .unwrap()
    }

    #[test]
    fn root_page_uses_bare_relative_links() {
        let html = render_page(&config(), Mode::Combined, "index.html", None);
        assert!(html.contains("<link rel=\"stylesheet\" href=\"css/site.css\">"));
        assert!(html.contains("<script type=\"text/javascript\" src=\"js/main.js\"></script>"));
    }

    #[test]
    fn nested_page_climbs_to_the_site_root() {
        let html = render_page(&config(), Mode::Combined, "news/2026/index.html", None);
        assert!(html.contains("href=\"../../css/site.css\""));
        assert!(html.contains("src=\"../../js/main.js\""));
    }

    #[test]
    fn incremental_pages_load_bootstrap_manifest_then_require_entry() {
        let html = render_page(&config(), Mode::Incremental, "index.html", None);
        let base = html.find("src=\"js/out/goog/base.js\"").unwrap();
        let deps = html.find("src=\"js/out/goog/deps.js\"").unwrap();
        let require = html.find("goog.require(\"app.dev\");").unwrap();
        assert!(base < deps && deps < require);
        // No combined bundle reference in this mode.
        assert!(!html.contains("src=\"js/main.js\""));
    }

    #[test]
    fn mount_point_carries_prerendered_body() {
        let html = render_page(
            &config(),
            Mode::Combined,
            "index.html",
            Some("<h1>Hello</h1>"),
        );
        assert!(html.contains("<div id=\"main-content\"><h1>Hello</h1></div>"));
    }

    #[test]
    fn empty_mount_point_without_body() {
        let html = render_page(&config(), Mode::Combined, "index.html", None);
        assert!(html.contains("<div id=\"main-content\"></div>"));
    }

    #[test]
    fn title_is_escaped() {
        let html = render_page(&config(), Mode::Combined, "index.html", None);
        assert!(html.contains("<title>Widgets &amp; Co</title>"));
    }

    #[test]
    fn asset_prefix_counts_directories() {
        assert_eq!(asset_prefix("index.html"), "");
        assert_eq!(asset_prefix("news/index.html"), "../");
        assert_eq!(asset_prefix("a/b/c.html"), "../../");
    }
}
