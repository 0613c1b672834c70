//! Windcfg - configuration loader for utility-class CSS generators
//!
//! This library provides functionality to:
//! - Parse configuration sources (`tailwind.config.js`, JSON, JSON5, TOML)
//! - Validate them into a typed configuration with exact field paths on error
//! - Merge `theme.extend` additively over the generator's default tokens
//! - Compile content-source globs, including `{a,b}` alternation
//!
//! The resolved configuration is an immutable value; hand it to consumers by
//! reference.

pub mod cli;
pub mod color;
pub mod config;
pub mod content;
pub mod init;
pub mod logging;
pub mod theme;

pub use config::{load_config, ConfigError, ConfigLoader, Loaded, ResolvedConfig, SchemaError, ValueWarning};
pub use theme::{deep_merge_additive, Theme};
