//! Configuration module
//!
//! Provides parsing, validation, and resolution of utility-CSS generator
//! configuration files (`tailwind.config.js` and friends).

pub mod loader;
pub mod schema;
pub mod source;

pub use loader::*;
pub use schema::*;
pub use source::{parse_source, SourceError, SourceFormat};
