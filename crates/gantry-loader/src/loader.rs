//! Build mode detection and ordered bundle loading.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use path_clean::PathClean;

use crate::error::{LoadError, Result};
use crate::manifest::DepsManifest;
use crate::registry::{Registry, Value};
use crate::table::ModuleTable;

/// Directory inside the compiler output that holds the runtime bootstrap.
pub const RUNTIME_DIR: &str = "goog";
/// The runtime bootstrap file.
pub const BASE_FILE: &str = "base.js";
/// The dependency manifest an incremental build writes next to the bootstrap.
pub const DEPS_FILE: &str = "deps.js";
/// Registry symbol the bootstrap binds.
pub const RUNTIME_SYMBOL: &str = "goog";

/// Which build strategy produced the bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Whole-program output: one self-contained file.
    Combined,
    /// Unoptimized output: a bootstrap, a dependency manifest, and one file
    /// per module.
    Incremental,
}

impl Mode {
    pub fn is_incremental(self) -> bool {
        matches!(self, Mode::Incremental)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Combined => f.write_str("combined"),
            Mode::Incremental => f.write_str("incremental"),
        }
    }
}

/// Where a compiled bundle lives and which namespace starts it.
#[derive(Debug, Clone)]
pub struct BundleLocation {
    /// The single-file bundle evaluated in combined mode.
    pub main_file: PathBuf,
    /// The compiler's output directory. `None` for build profiles that only
    /// ever produce a combined file.
    pub output_dir: Option<PathBuf>,
    /// Namespace required last in incremental mode, pulling in the whole
    /// application.
    pub dev_entry: String,
}

impl BundleLocation {
    pub fn new(
        main_file: impl Into<PathBuf>,
        output_dir: Option<PathBuf>,
        dev_entry: impl Into<String>,
    ) -> Self {
        Self {
            main_file: main_file.into(),
            output_dir,
            dev_entry: dev_entry.into(),
        }
    }

    /// Directory holding the runtime bootstrap, when an output directory is
    /// configured.
    pub fn runtime_dir(&self) -> Option<PathBuf> {
        self.output_dir.as_ref().map(|dir| dir.join(RUNTIME_DIR))
    }

    /// Path of the dependency manifest whose presence marks an incremental
    /// build.
    pub fn manifest_path(&self) -> Option<PathBuf> {
        self.runtime_dir().map(|dir| dir.join(DEPS_FILE))
    }
}

/// Loads a compiled bundle into a [`Registry`] using a fixed [`ModuleTable`].
///
/// The loader never interprets bundle text. Files are read to prove they
/// exist and to record them in the evaluation log; their effects on the
/// registry come entirely from the table's initializers.
pub struct Loader<'t> {
    table: &'t ModuleTable,
}

impl<'t> Loader<'t> {
    pub fn new(table: &'t ModuleTable) -> Self {
        Self { table }
    }

    /// Load the bundle at `location` into `registry` and report which build
    /// strategy produced it.
    ///
    /// The probe is the dependency manifest: if
    /// `<output_dir>/goog/deps.js` exists the build is incremental,
    /// otherwise (including when no output directory is configured) it is
    /// combined.
    pub fn load(&self, location: &BundleLocation, registry: &mut Registry) -> Result<Mode> {
        if let Some(runtime_dir) = location.runtime_dir() {
            if runtime_dir.join(DEPS_FILE).exists() {
                tracing::debug!(
                    "incremental build detected: {}",
                    runtime_dir.join(DEPS_FILE).display()
                );
                self.load_incremental(location, &runtime_dir, registry)?;
                return Ok(Mode::Incremental);
            }
        }
        tracing::debug!("combined build: {}", location.main_file.display());
        self.load_combined(&location.main_file, registry)?;
        Ok(Mode::Combined)
    }

    /// Combined mode: the single bundle file carries every module, so every
    /// registered initializer runs, in registration order.
    fn load_combined(&self, main_file: &Path, registry: &mut Registry) -> Result<()> {
        // Prove the bundle is readable before touching the registry, so a
        // missing file reports an error and leaves the registry empty.
        read_file(main_file)?;

        self.table.bind_host(registry)?;
        registry.begin_import(main_file);
        registry.record_eval(main_file);

        for namespace in self.table.init_order() {
            self.table.run_init(namespace, registry)?;
        }
        Ok(())
    }

    /// Incremental mode: bootstrap, then manifest, then the dev entry
    /// namespace with its requirements evaluated first.
    fn load_incremental(
        &self,
        location: &BundleLocation,
        runtime_dir: &Path,
        registry: &mut Registry,
    ) -> Result<()> {
        self.table.bind_host(registry)?;

        let base = runtime_dir.join(BASE_FILE);
        read_file(&base)?;
        registry.begin_import(&base);
        registry.record_eval(&base);
        registry.bind(RUNTIME_SYMBOL, Value::Namespace(base.clone()))?;

        let deps_path = runtime_dir.join(DEPS_FILE);
        let deps_source = read_file(&deps_path)?;
        registry.begin_import(&deps_path);
        registry.record_eval(&deps_path);
        let manifest = DepsManifest::parse(&deps_path, &deps_source)?;

        let mut in_flight = Vec::new();
        self.require(
            &location.dev_entry,
            "<entry>",
            &manifest,
            runtime_dir,
            registry,
            &mut in_flight,
        )
    }

    /// Satisfy one namespace requirement: evaluate its file after all of the
    /// file's own requirements, each file at most once.
    fn require(
        &self,
        namespace: &str,
        required_by: &str,
        manifest: &DepsManifest,
        runtime_dir: &Path,
        registry: &mut Registry,
        in_flight: &mut Vec<String>,
    ) -> Result<()> {
        // Host modules and already-evaluated namespaces are satisfied.
        if registry.contains(namespace) {
            return Ok(());
        }

        if in_flight.iter().any(|pending| pending == namespace) {
            let mut cycle: Vec<&str> = in_flight.iter().map(String::as_str).collect();
            cycle.push(namespace);
            return Err(LoadError::CircularRequire {
                cycle: cycle.join(" -> "),
            });
        }

        let Some(entry) = manifest.lookup(namespace) else {
            // Runtime-internal namespaces are carried by the bootstrap and
            // need no manifest record.
            if namespace == RUNTIME_SYMBOL || namespace.starts_with("goog.") {
                return Ok(());
            }
            // A host-only module may have an initializer even though no
            // bundle file provides it.
            if self.table.has_init(namespace) {
                self.table.run_init(namespace, registry)?;
                return Ok(());
            }
            return Err(LoadError::UnresolvedRequire {
                namespace: namespace.to_string(),
                required_by: required_by.to_string(),
            });
        };

        in_flight.push(namespace.to_string());
        for requirement in &entry.requires {
            self.require(
                requirement,
                namespace,
                manifest,
                runtime_dir,
                registry,
                in_flight,
            )?;
        }
        in_flight.pop();

        let resolved = runtime_dir.join(&entry.path).clean();
        if registry.begin_import(&resolved) {
            read_file(&resolved)?;
            registry.record_eval(&resolved);
            for provided in &entry.provides {
                registry.bind(provided.clone(), Value::Namespace(resolved.clone()))?;
            }
            for provided in &entry.provides {
                self.table.run_init(provided, registry)?;
            }
        }
        Ok(())
    }
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| LoadError::read(path, source))
}
