//! Configuration for wrapper and externs generation.

use std::path::PathBuf;

use serde::Deserialize;

/// Settings for embedding one JavaScript library.
///
/// The name lists default to the inventory a React-family library needs:
/// dynamically created property names the whole-program compiler would
/// otherwise rename out of existence. Other libraries override them.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExternsConfig {
    /// Namespace the wrapper declares, e.g. `site.react`.
    pub namespace: String,
    /// Global object the library installs, e.g. `React`.
    pub global_name: String,
    /// The library source file to embed.
    pub source: PathBuf,
    /// Where to write the generated wrapper. `None` skips it.
    #[serde(default)]
    pub wrapper_out: Option<PathBuf>,
    /// Where to write the generated externs file. `None` skips it.
    #[serde(default)]
    pub externs_out: Option<PathBuf>,
    /// Names excluded from exposure because they clash with module names.
    #[serde(default = "default_skip_names")]
    pub skip_names: Vec<String>,
    /// DOM attribute and property names created dynamically by the library.
    #[serde(default = "default_property_names")]
    pub property_names: Vec<String>,
    /// Component interface names (lifecycle hooks and friends).
    #[serde(default = "default_interface_names")]
    pub interface_names: Vec<String>,
    /// Element factory names. The scripted tooling read these off the live
    /// library object; here they are configuration.
    #[serde(default)]
    pub dom_names: Vec<String>,
}

fn default_skip_names() -> Vec<String> {
    to_strings(&["var", "object", "base", "map", "meta", "source", "time"])
}

fn default_property_names() -> Vec<String> {
    to_strings(&[
        "allowFullScreen",
        "autoComplete",
        "autoFocus",
        "autoPlay",
        "charSet",
        "encType",
        "icon",
        "preload",
        "radioGroup",
        "role",
        "spellCheck",
        "wmode",
        "autoCapitalize",
        "cx",
        "cy",
        "d",
        "fx",
        "fy",
        "gradientTransform",
        "gradientUnits",
        "points",
        "r",
        "rx",
        "ry",
        "spreadMethod",
        "stopColor",
        "stopOpacity",
        "strokeLinecap",
        "strokeWidth",
        "viewBox",
        "x1",
        "x2",
        "x",
        "y1",
        "y2",
        "y",
        "componentConstructor",
        "displayName",
    ])
}

fn default_interface_names() -> Vec<String> {
    to_strings(&[
        "mixins",
        "propTypes",
        "getDefaultProps",
        "getInitialState",
        "render",
        "componentWillMount",
        "componentDidMount",
        "componentWillReceiveProps",
        "shouldComponentUpdate",
        "componentWillUpdate",
        "componentDidUpdate",
        "componentWillUnmount",
        "updateComponent",
    ])
}

fn to_strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}
