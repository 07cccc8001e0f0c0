//! The symbol registry a load populates.
//!
//! Scripted build tooling for this kind of bundle traditionally evaluates
//! compiled output straight into a shared global scope. The registry replaces
//! that scope with an explicit, owned value: every binding a load produces
//! lands here, nothing is ambient, and two loads never observe each other.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value as Json;

use crate::error::{CallbackError, LoadError, Result};

/// A callable entry point installed by a module initializer.
///
/// The calling convention is JSON in, JSON out. Callbacks receive a shared
/// view of the registry so they can read sibling bindings (page bodies,
/// exported data) without reintroducing global state.
pub type Callback =
    Arc<dyn Fn(&Registry, &Json) -> std::result::Result<Json, CallbackError> + Send + Sync>;

/// What a registry symbol resolves to.
#[derive(Clone)]
pub enum Value {
    /// Inert data exported by a module.
    Data(Json),
    /// A callable entry point.
    Function(Callback),
    /// A bundle namespace with no host-side value, recording the file that
    /// provided it.
    Namespace(PathBuf),
}

impl Value {
    /// Convenience constructor for [`Value::Function`].
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&Registry, &Json) -> std::result::Result<Json, CallbackError>
            + Send
            + Sync
            + 'static,
    {
        Self::Function(Arc::new(f))
    }

    pub fn as_data(&self) -> Option<&Json> {
        match self {
            Self::Data(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Self::Function(_))
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Data(value) => f.debug_tuple("Data").field(value).finish(),
            Self::Function(_) => f.write_str("Function(..)"),
            Self::Namespace(path) => f.debug_tuple("Namespace").field(path).finish(),
        }
    }
}

/// Explicit replacement for script-global scope.
///
/// Bindings are append-only for the lifetime of one load: rebinding an
/// existing symbol is an error rather than a silent overwrite, which turns
/// manifest conflicts (two files providing the same namespace, a bundle
/// namespace shadowing a host module) into diagnostics instead of
/// load-order-dependent behavior.
///
/// The registry also tracks which files have been imported (so a file
/// required through several namespaces is evaluated once) and the order in
/// which files were evaluated, which is the observable loading contract.
#[derive(Debug, Default)]
pub struct Registry {
    values: IndexMap<String, Value>,
    imported: HashSet<PathBuf>,
    eval_log: Vec<PathBuf>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`.
    ///
    /// Fails with [`LoadError::Rebind`] if the symbol is already bound.
    pub fn bind(&mut self, name: impl Into<String>, value: Value) -> Result<()> {
        let name = name.into();
        if self.values.contains_key(&name) {
            return Err(LoadError::Rebind(name));
        }
        self.values.insert(name, value);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Invoke the callback bound at `name`.
    pub fn call(&self, name: &str, args: &Json) -> Result<Json> {
        match self.values.get(name) {
            Some(Value::Function(callback)) => {
                callback(self, args).map_err(|source| LoadError::Callback {
                    name: name.to_string(),
                    source,
                })
            }
            Some(_) => Err(LoadError::NotAFunction(name.to_string())),
            None => Err(LoadError::UnknownSymbol(name.to_string())),
        }
    }

    /// Bound symbols in binding order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Files evaluated by the load, in evaluation order.
    pub fn eval_log(&self) -> &[PathBuf] {
        &self.eval_log
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Mark `path` as imported. Returns `false` when the file was already
    /// imported, in which case the caller must not evaluate it again.
    pub(crate) fn begin_import(&mut self, path: &Path) -> bool {
        self.imported.insert(path.to_path_buf())
    }

    /// Append `path` to the evaluation log.
    pub(crate) fn record_eval(&mut self, path: &Path) {
        self.eval_log.push(path.to_path_buf());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bind_and_get() {
        let mut registry = Registry::new();
        registry
            .bind("app.config", Value::Data(json!({"debug": true})))
            .unwrap();
        let value = registry.get("app.config").unwrap();
        assert_eq!(value.as_data(), Some(&json!({"debug": true})));
    }

    #[test]
    fn rebind_is_rejected() {
        let mut registry = Registry::new();
        registry.bind("app.core", Value::Data(json!(1))).unwrap();
        let err = registry
            .bind("app.core", Value::Data(json!(2)))
            .unwrap_err();
        assert!(matches!(err, LoadError::Rebind(name) if name == "app.core"));
        // The original binding survives.
        assert_eq!(registry.get("app.core").unwrap().as_data(), Some(&json!(1)));
    }

    #[test]
    fn call_invokes_function_with_registry_view() {
        let mut registry = Registry::new();
        registry
            .bind("app.title", Value::Data(json!("Widgets")))
            .unwrap();
        registry
            .bind(
                "app.core/describe",
                Value::function(|reg, args| {
                    let title = reg
                        .get("app.title")
                        .and_then(Value::as_data)
                        .and_then(Json::as_str)
                        .unwrap_or("untitled");
                    Ok(json!({ "title": title, "echo": args.clone() }))
                }),
            )
            .unwrap();

        let out = registry.call("app.core/describe", &json!({"n": 3})).unwrap();
        assert_eq!(out, json!({"title": "Widgets", "echo": {"n": 3}}));
    }

    #[test]
    fn call_unknown_symbol() {
        let registry = Registry::new();
        let err = registry.call("nope", &Json::Null).unwrap_err();
        assert!(matches!(err, LoadError::UnknownSymbol(name) if name == "nope"));
    }

    #[test]
    fn call_non_function() {
        let mut registry = Registry::new();
        registry.bind("data", Value::Data(json!([]))).unwrap();
        let err = registry.call("data", &Json::Null).unwrap_err();
        assert!(matches!(err, LoadError::NotAFunction(name) if name == "data"));
    }

    #[test]
    fn callback_errors_carry_symbol_name() {
        let mut registry = Registry::new();
        registry
            .bind("app/fails", Value::function(|_, _| Err("kaput".into())))
            .unwrap();
        let err = registry.call("app/fails", &Json::Null).unwrap_err();
        match err {
            LoadError::Callback { name, source } => {
                assert_eq!(name, "app/fails");
                assert_eq!(source.to_string(), "kaput");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn import_cache_deduplicates() {
        let mut registry = Registry::new();
        assert!(registry.begin_import(Path::new("out/goog/base.js")));
        assert!(!registry.begin_import(Path::new("out/goog/base.js")));
        assert!(registry.begin_import(Path::new("out/app/core.js")));
    }

    #[test]
    fn eval_log_preserves_order() {
        let mut registry = Registry::new();
        registry.record_eval(Path::new("a.js"));
        registry.record_eval(Path::new("b.js"));
        assert_eq!(
            registry.eval_log(),
            &[PathBuf::from("a.js"), PathBuf::from("b.js")]
        );
    }

    #[test]
    fn symbols_iterate_in_binding_order() {
        let mut registry = Registry::new();
        registry.bind("zeta", Value::Data(Json::Null)).unwrap();
        registry.bind("alpha", Value::Data(Json::Null)).unwrap();
        let names: Vec<_> = registry.symbols().collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
    }
}
