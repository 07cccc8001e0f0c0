//! Compiled-bundle loading for gantry.
//!
//! A compiled bundle arrives in one of two shapes. A whole-program build
//! produces a single **combined** file; an unoptimized build produces an
//! **incremental** layout with a runtime bootstrap (`goog/base.js`), a
//! dependency manifest (`goog/deps.js`), and one file per module. This crate
//! detects which shape is present and loads it, in dependency order, into an
//! explicit [`Registry`].
//!
//! Two deliberate departures from the scripted tooling this replaces:
//!
//! - No shared global scope. Everything a load produces lives in a
//!   [`Registry`] value owned by the caller.
//! - No code evaluation. The modules a bundle can activate are fixed ahead
//!   of time in a [`ModuleTable`]; evaluating a module means invoking its
//!   registered initializer.
//!
//! # Example
//!
//! ```no_run
//! use gantry_loader::{BundleLocation, Loader, Mode, ModuleTable, Registry, Value};
//! use serde_json::json;
//!
//! let mut table = ModuleTable::new();
//! table.on_init("app.core", |registry| {
//!     registry
//!         .bind("app.core/hello", Value::function(|_, _| Ok(json!("hi"))))
//!         .map_err(|e| e.to_string().into())
//! });
//!
//! let location = BundleLocation::new(
//!     "public/js/main.js",
//!     Some("public/js/out".into()),
//!     "app.dev",
//! );
//! let mut registry = Registry::new();
//! let mode = Loader::new(&table).load(&location, &mut registry)?;
//! if mode == Mode::Incremental {
//!     // base.js and deps.js were evaluated before any module file
//! }
//! # Ok::<(), gantry_loader::LoadError>(())
//! ```

pub mod error;
pub mod loader;
pub mod manifest;
pub mod registry;
pub mod table;

pub use error::{CallbackError, LoadError, Result};
pub use loader::{BundleLocation, Loader, Mode, BASE_FILE, DEPS_FILE, RUNTIME_DIR, RUNTIME_SYMBOL};
pub use manifest::{DepEntry, DepsManifest};
pub use registry::{Callback, Registry, Value};
pub use table::{ModuleInit, ModuleTable};
