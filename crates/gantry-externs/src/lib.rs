//! Packaging a plain JavaScript library for a whole-program-optimizing
//! compiler.
//!
//! Two artifacts come out of one library source file:
//!
//! - a **wrapper**: the source embedded verbatim in a namespace declaration,
//!   with jsdoc annotations neutralized and an exposure block that pins the
//!   names the optimizer must not rename;
//! - an **externs** file: bare `var` declarations for the same names, for
//!   builds that consume the library as an external module instead.
//!
//! Everything here is text-to-text. Reading sources and writing artifacts is
//! the caller's business.

pub mod config;
pub mod emit;
pub mod transform;

pub use config::ExternsConfig;
pub use emit::{collect_names, externs, wrapper};
pub use transform::{escape_source, event_names, literal_keys, strip_annotations};
