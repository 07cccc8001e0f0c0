//! The statically known module table.
//!
//! The table declares, ahead of any load, every module the host can supply:
//! ambient library modules the bundle may require (the `react` family in the
//! original tooling) and initializers that run when a bundle namespace is
//! evaluated. "Evaluating" a module is therefore a function call against
//! this table, never interpretation of bundle text.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::{CallbackError, LoadError, Result};
use crate::registry::{Registry, Value};

/// Host-side initializer invoked when its namespace is evaluated.
///
/// Initializers bind the namespace's callable entry points into the registry.
/// By convention a callable is bound as `namespace/function`, mirroring the
/// fully qualified var names the compiled bundles use.
pub type ModuleInit =
    Arc<dyn Fn(&mut Registry) -> std::result::Result<(), CallbackError> + Send + Sync>;

/// Modules the host knows how to supply, fixed before loading starts.
#[derive(Clone, Default)]
pub struct ModuleTable {
    host: IndexMap<String, Value>,
    inits: IndexMap<String, ModuleInit>,
}

impl ModuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a host-provided module value, bound into the registry before
    /// any bundle file is touched. Redeclaring a name replaces the value;
    /// the table is host configuration, not a load-time scope.
    pub fn provide(&mut self, name: impl Into<String>, value: Value) -> &mut Self {
        self.host.insert(name.into(), value);
        self
    }

    /// Register an initializer for `namespace`.
    pub fn on_init<F>(&mut self, namespace: impl Into<String>, init: F) -> &mut Self
    where
        F: Fn(&mut Registry) -> std::result::Result<(), CallbackError> + Send + Sync + 'static,
    {
        self.inits.insert(namespace.into(), Arc::new(init));
        self
    }

    /// Whether the table can supply `name`, either as a host value or an
    /// initializer.
    pub fn knows(&self, name: &str) -> bool {
        self.host.contains_key(name) || self.inits.contains_key(name)
    }

    pub fn is_host_module(&self, name: &str) -> bool {
        self.host.contains_key(name)
    }

    pub fn has_init(&self, namespace: &str) -> bool {
        self.inits.contains_key(namespace)
    }

    /// Namespaces with registered initializers, in registration order.
    pub fn init_order(&self) -> impl Iterator<Item = &str> {
        self.inits.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.host.is_empty() && self.inits.is_empty()
    }

    /// Bind every host module value into `registry`, in declaration order.
    pub(crate) fn bind_host(&self, registry: &mut Registry) -> Result<()> {
        for (name, value) in &self.host {
            registry.bind(name.clone(), value.clone())?;
        }
        Ok(())
    }

    /// Run the initializer registered for `namespace`, if any.
    ///
    /// Returns `Ok(true)` when an initializer ran, `Ok(false)` when none is
    /// registered. Initializer failures surface as [`LoadError::Init`] with
    /// the namespace attached.
    pub(crate) fn run_init(&self, namespace: &str, registry: &mut Registry) -> Result<bool> {
        match self.inits.get(namespace) {
            Some(init) => {
                init(registry).map_err(|source| LoadError::Init {
                    module: namespace.to_string(),
                    source,
                })?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl std::fmt::Debug for ModuleTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleTable")
            .field("host", &self.host.keys().collect::<Vec<_>>())
            .field("inits", &self.inits.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn host_modules_bind_in_declaration_order() {
        let mut table = ModuleTable::new();
        table.provide("react", Value::Data(json!({"version": "0.12"})));
        table.provide("react-dom", Value::Data(json!({})));

        let mut registry = Registry::new();
        table.bind_host(&mut registry).unwrap();

        let names: Vec<_> = registry.symbols().collect();
        assert_eq!(names, vec!["react", "react-dom"]);
        assert!(table.is_host_module("react"));
        assert!(!table.is_host_module("app.core"));
    }

    #[test]
    fn run_init_binds_entry_points() {
        let mut table = ModuleTable::new();
        table.on_init("app.core", |registry| {
            registry
                .bind("app.core/start", Value::function(|_, _| Ok(json!("ok"))))
                .map_err(|e| CallbackError::new(e.to_string()))
        });

        let mut registry = Registry::new();
        assert!(table.run_init("app.core", &mut registry).unwrap());
        assert_eq!(registry.call("app.core/start", &json!(null)).unwrap(), json!("ok"));
    }

    #[test]
    fn run_init_without_registration_is_a_noop() {
        let table = ModuleTable::new();
        let mut registry = Registry::new();
        assert!(!table.run_init("app.missing", &mut registry).unwrap());
        assert!(registry.is_empty());
    }

    #[test]
    fn failing_init_names_its_module() {
        let mut table = ModuleTable::new();
        table.on_init("app.broken", |_| Err("bad wiring".into()));

        let mut registry = Registry::new();
        let err = table.run_init("app.broken", &mut registry).unwrap_err();
        match err {
            LoadError::Init { module, source } => {
                assert_eq!(module, "app.broken");
                assert_eq!(source.to_string(), "bad wiring");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn knows_covers_both_kinds() {
        let mut table = ModuleTable::new();
        table.provide("react", Value::Data(json!({})));
        table.on_init("app.core", |_| Ok(()));
        assert!(table.knows("react"));
        assert!(table.knows("app.core"));
        assert!(!table.knows("app.other"));
    }
}
