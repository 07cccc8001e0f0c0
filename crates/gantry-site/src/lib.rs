//! Documentation site generation for gantry.
//!
//! The pipeline is load, generate, write:
//!
//! 1. [`generate`] loads the compiled bundle through `gantry-loader` and
//!    invokes the configured page function with the detected build mode.
//! 2. The page function returns page records; the built-in one (installed by
//!    [`default_table`]) renders the shared HTML shell for every configured
//!    route.
//! 3. [`write_site`] stages pages, the concatenated stylesheet, and (for
//!    combined builds) a bundle copy under the site directory, then renames
//!    everything into place.
//!
//! [`testenv`] is a sibling concern: emitting karma runner configs for the
//! library's packaging test environments.

pub mod assets;
pub mod config;
pub mod error;
pub mod gen;
pub mod page;
pub mod testenv;

pub use assets::{write_site, WrittenAssets};
pub use config::SiteConfig;
pub use error::{Result, SiteError};
pub use gen::{default_table, generate, GeneratedPage, GeneratedSite, PAGE_BODY_PREFIX};
pub use page::render_page;
pub use testenv::{karma_conf, write_karma_conf, TestEnvConfig};
