//! Assembly of the namespace wrapper and the externs file.

use crate::config::ExternsConfig;
use crate::transform::{escape_source, event_names, literal_keys, strip_annotations};

/// Collect every name the wrapper must keep alive through whole-program
/// optimization: element factories, event handler props found in the source,
/// the component interface, and the dynamic property list, minus the names
/// that clash with module locals.
pub fn collect_names(config: &ExternsConfig, source: &str) -> Vec<String> {
    let events = event_names(&literal_keys(source));

    let mut names: Vec<String> = Vec::new();
    for name in config
        .dom_names
        .iter()
        .chain(events.iter())
        .chain(config.interface_names.iter())
        .chain(config.property_names.iter())
    {
        if config.skip_names.iter().any(|skip| skip == name) {
            continue;
        }
        if !names.iter().any(|seen| seen == name) {
            names.push(name.clone());
        }
    }
    tracing::debug!("collected {} exposed names", names.len());
    names
}

/// Build the wrapper document: a namespace declaration embedding the
/// (annotation-stripped, escaped) library source in a verbatim-js form,
/// followed by an exposure block and the global alias.
pub fn wrapper(config: &ExternsConfig, source: &str) -> String {
    let escaped = escape_source(&strip_annotations(source));
    let names = collect_names(config, source);

    let mut lines: Vec<String> = vec![
        format!("(ns {})", config.namespace),
        "(js* \"".to_string(),
        "/**".to_string(),
        format!(
            " * @fileoverview {}.js packaged for clojurescript",
            config.global_name
        ),
        " * @suppress {nonStandardJsDocs|checkRegExp}".to_string(),
        " */".to_string(),
        escaped,
        "(function () {".to_string(),
        "var X = {};".to_string(),
    ];
    for name in &names {
        lines.push(format!("/** @expose */\nX.{name} = true;"));
    }
    lines.push("})();".to_string());
    lines.push(format!(
        "{ns}.{global} = (typeof(window) != 'undefined' ? window.{global} : global.{global});",
        ns = config.namespace,
        global = config.global_name
    ));
    lines.push("\")".to_string());
    lines.join("\n")
}

/// Build a Closure externs file declaring each name as a bare var.
pub fn externs(config: &ExternsConfig, names: &[String]) -> String {
    let mut out = String::new();
    out.push_str("/**\n");
    out.push_str(&format!(
        " * @fileoverview Closure Compiler externs for {}\n",
        config.global_name
    ));
    out.push_str(" * @externs\n");
    out.push_str(" */\n\n");
    for name in names {
        out.push_str(&format!("var {name};\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ExternsConfig {
        toml::from_str(
            "namespace = \"site.react\"\n\
             global_name = \"React\"\n\
             source = \"vendor/react.js\"\n\
             dom_names = [\"div\", \"span\", \"map\"]\n",
        )
        .unwrap()
    }

    #[test]
    fn collect_names_merges_and_skips() {
        let cfg = config();
        let names = collect_names(&cfg, "({onClick: f, onBlur: g, width: 1})");
        // `map` is in the default skip list even though dom_names carries it.
        assert!(!names.contains(&"map".to_string()));
        assert!(names.contains(&"div".to_string()));
        assert!(names.contains(&"onClick".to_string()));
        assert!(names.contains(&"onBlur".to_string()));
        assert!(names.contains(&"render".to_string()));
        assert!(names.contains(&"displayName".to_string()));
        // width never appears: not an event, not configured.
        assert!(!names.contains(&"width".to_string()));
    }

    #[test]
    fn collect_names_deduplicates_across_sources() {
        let mut cfg = config();
        cfg.dom_names.push("onClick".to_string());
        let names = collect_names(&cfg, "({onClick: f})");
        let count = names.iter().filter(|n| *n == "onClick").count();
        assert_eq!(count, 1);
    }

    #[test]
    fn wrapper_opens_with_namespace_and_embeds_source() {
        let cfg = config();
        let doc = wrapper(&cfg, "var React = {};\n/* @license x */");
        assert!(doc.starts_with("(ns site.react)\n(js* \"\n"));
        assert!(doc.contains("var React = {};"));
        // The annotation is gone from the embedded comment.
        assert!(doc.contains("/* license x */"));
        assert!(doc.ends_with("\")"));
    }

    #[test]
    fn wrapper_exposes_collected_names() {
        let cfg = config();
        let doc = wrapper(&cfg, "({onClick: f})");
        assert!(doc.contains("/** @expose */\nX.div = true;"));
        assert!(doc.contains("/** @expose */\nX.onClick = true;"));
        assert!(!doc.contains("X.map = true;"));
    }

    #[test]
    fn wrapper_aliases_the_global_for_both_environments() {
        let cfg = config();
        let doc = wrapper(&cfg, "");
        assert!(doc.contains(
            "site.react.React = (typeof(window) != 'undefined' ? window.React : global.React);"
        ));
    }

    #[test]
    fn wrapper_escapes_quotes_in_source() {
        let cfg = config();
        let doc = wrapper(&cfg, "var s = \"hi\";");
        assert!(doc.contains("var s = \\\"hi\\\";"));
    }

    #[test]
    fn externs_declares_each_name_once() {
        let cfg = config();
        let names = vec!["topBlur".to_string(), "bubbled".to_string()];
        let out = externs(&cfg, &names);
        assert!(out.starts_with("/**\n * @fileoverview Closure Compiler externs for React\n"));
        assert!(out.contains(" * @externs\n"));
        assert!(out.contains("var topBlur;\n"));
        assert!(out.contains("var bubbled;\n"));
    }
}
