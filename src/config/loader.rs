//! Configuration loading and discovery
//!
//! Provides functions to find, load, validate, and resolve a configuration
//! file against the generator's default theme.

use super::schema::{ResolvedConfig, SchemaError, ValidateOptions, ValidationLevel, ValueWarning, WindConfig};
use super::source::{parse_source, SourceError, SourceFormat};
use crate::color::ColorSyntax;
use crate::theme::{default_theme, Theme};
use serde_json::Value;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Configuration file names, in discovery priority order
pub const CONFIG_FILE_NAMES: &[&str] = &[
    "tailwind.config.js",
    "tailwind.config.cjs",
    "tailwind.config.mjs",
    "tailwind.config.json5",
    "tailwind.config.json",
    "tailwind.config.toml",
];

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// No configuration file could be found
    #[error("No configuration file found (looked for {})", CONFIG_FILE_NAMES.join(", "))]
    NotFound,
    /// File extension does not name a known format
    #[error("Unsupported config file type: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    /// Source text could not be parsed
    #[error("Failed to parse config: {0}")]
    Source(#[from] SourceError),
    /// Source parsed but has the wrong shape
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Schema(Vec<SchemaError>),
}

impl ConfigError {
    /// Schema errors carried by this error, if any
    pub fn schema_errors(&self) -> &[SchemaError] {
        match self {
            ConfigError::Schema(errors) => errors,
            _ => &[],
        }
    }
}

/// CLI arguments that can override loader options
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Treat malformed values as errors
    pub strict: Option<bool>,
    /// Explicit level for malformed colors
    pub color_level: Option<ValidationLevel>,
    /// Accepted color syntax
    pub color_syntax: Option<ColorSyntax>,
}

/// Merge CLI overrides into validation options.
///
/// An explicit `color_level` wins over `strict`.
pub fn merge_cli_overrides(options: &mut ValidateOptions, overrides: &CliOverrides) {
    if overrides.strict == Some(true) {
        options.color_level = ValidationLevel::Error;
    }

    if let Some(level) = overrides.color_level {
        options.color_level = level;
    }

    if let Some(syntax) = overrides.color_syntax {
        options.color_syntax = syntax;
    }
}

/// A successfully loaded configuration
#[derive(Debug, Clone)]
pub struct Loaded {
    /// File the configuration came from, if any
    pub path: Option<PathBuf>,
    /// The configuration as written
    pub source: WindConfig,
    /// The configuration with the theme merged over the defaults
    pub config: ResolvedConfig,
    /// Non-fatal value problems, in the order they were found
    pub warnings: Vec<ValueWarning>,
}

/// Lifecycle of a configuration load.
///
/// `Loaded` and `Failed` are terminal; loading again starts from a fresh
/// `Unloaded` state.
#[derive(Debug, Default)]
pub enum LoadState {
    #[default]
    Unloaded,
    Loaded(Box<Loaded>),
    Failed(ConfigError),
}

impl LoadState {
    /// Run a load from `Unloaded`. Terminal states are returned unchanged.
    pub fn load(self, loader: &ConfigLoader, path: Option<&Path>) -> LoadState {
        match self {
            LoadState::Unloaded => loader.load(path).into(),
            terminal => terminal,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadState::Loaded(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, LoadState::Failed(_))
    }

    /// The loaded configuration, if the load succeeded
    pub fn loaded(&self) -> Option<&Loaded> {
        match self {
            LoadState::Loaded(loaded) => Some(&**loaded),
            _ => None,
        }
    }

    pub fn into_result(self) -> Option<Result<Loaded, ConfigError>> {
        match self {
            LoadState::Unloaded => None,
            LoadState::Loaded(loaded) => Some(Ok(*loaded)),
            LoadState::Failed(err) => Some(Err(err)),
        }
    }
}

impl From<Result<Loaded, ConfigError>> for LoadState {
    fn from(result: Result<Loaded, ConfigError>) -> Self {
        match result {
            Ok(loaded) => LoadState::Loaded(Box::new(loaded)),
            Err(err) => LoadState::Failed(err),
        }
    }
}

/// Loads configurations against a fixed set of default tokens.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    options: ValidateOptions,
    defaults: Theme,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new(ValidateOptions::default())
    }
}

impl ConfigLoader {
    /// Create a loader using the built-in default theme.
    pub fn new(options: ValidateOptions) -> Self {
        Self { options, defaults: default_theme() }
    }

    /// Replace the default theme extensions are merged over.
    pub fn with_defaults(mut self, defaults: Theme) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn options(&self) -> &ValidateOptions {
        &self.options
    }

    pub fn defaults(&self) -> &Theme {
        &self.defaults
    }

    /// Load from `path`, or discover a config file from the current directory.
    pub fn load(&self, path: Option<&Path>) -> Result<Loaded, ConfigError> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => find_config().ok_or(ConfigError::NotFound)?,
        };
        self.load_file(&config_path)
    }

    /// Load a specific file; the format comes from its extension.
    pub fn load_file(&self, path: &Path) -> Result<Loaded, ConfigError> {
        let format =
            SourceFormat::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat(path.to_path_buf()))?;
        debug!(path = %path.display(), %format, "loading configuration");

        let contents = fs::read_to_string(path)?;
        let root = project_root(path).unwrap_or_else(|| Path::new("."));
        let mut loaded = self.load_str(&contents, format, root)?;
        loaded.path = Some(path.to_path_buf());
        Ok(loaded)
    }

    /// Load configuration source text. Content patterns resolve against `root`.
    pub fn load_str(&self, text: &str, format: SourceFormat, root: &Path) -> Result<Loaded, ConfigError> {
        let value = parse_source(text, format)?;
        self.load_value(&value, root)
    }

    /// Validate and resolve an already-parsed value tree.
    pub fn load_value(&self, value: &Value, root: &Path) -> Result<Loaded, ConfigError> {
        let validated = WindConfig::from_value(value, &self.options).map_err(ConfigError::Schema)?;

        for warning in &validated.warnings {
            warn!(field = %warning.field, value = %warning.value, "{}", warning.message);
        }

        let config = validated.config.resolve(&self.defaults, root);
        debug!(
            patterns = config.content.len(),
            categories = config.theme.len(),
            tokens = config.theme.token_count(),
            plugins = config.plugins.len(),
            "configuration resolved"
        );

        Ok(Loaded { path: None, source: validated.config, config, warnings: validated.warnings })
    }
}

/// Load with default options, from `path` or by discovery.
pub fn load_config(path: Option<&Path>) -> Result<Loaded, ConfigError> {
    ConfigLoader::default().load(path)
}

/// Find a config file by walking up from the current working directory.
pub fn find_config() -> Option<PathBuf> {
    let cwd = env::current_dir().ok()?;
    find_config_from(cwd)
}

/// Find a config file by walking up from a specific directory.
///
/// In each directory, names are tried in [`CONFIG_FILE_NAMES`] order.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        for name in CONFIG_FILE_NAMES {
            let config_path = current.join(name);
            if config_path.is_file() {
                return Some(config_path);
            }
        }

        // Move to parent directory
        if !current.pop() {
            // Reached root, no config found
            return None;
        }
    }
}

/// Get the project root directory from a config file path.
///
/// Returns the parent directory of the config file.
pub fn project_root(config_path: &Path) -> Option<&Path> {
    config_path.parent().filter(|p| !p.as_os_str().is_empty())
}
