//! Starter configuration files
//!
//! Writes a configuration that scans an HTML entry point plus Rust, HTML and
//! CSS sources, and extends the color palette with a `neon` group.

use crate::config::CONFIG_FILE_NAMES;
use std::fs;
use std::path::{Path, PathBuf};

/// Error while writing a starter configuration
#[derive(Debug)]
pub enum InitError {
    /// Config file already exists and `force` was not given
    FileExists(String),
    /// Failed to create directory
    CreateDir(std::io::Error),
    /// Failed to write file
    WriteFile(std::io::Error),
    /// Unknown output format
    UnknownFormat(String),
}

impl std::fmt::Display for InitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InitError::FileExists(path) => {
                write!(f, "Config file already exists: {} (use --force to overwrite)", path)
            }
            InitError::CreateDir(e) => write!(f, "Failed to create directory: {}", e),
            InitError::WriteFile(e) => write!(f, "Failed to write file: {}", e),
            InitError::UnknownFormat(format) => {
                write!(f, "Unknown format '{}'. Available: js, json, toml", format)
            }
        }
    }
}

impl std::error::Error for InitError {}

/// Formats a starter config can be written in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitFormat {
    Js,
    Json,
    Toml,
}

impl InitFormat {
    /// Parse format name from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "js" | "javascript" => Some(InitFormat::Js),
            "json" => Some(InitFormat::Json),
            "toml" => Some(InitFormat::Toml),
            _ => None,
        }
    }

    /// File name the config is written to
    pub fn file_name(self) -> &'static str {
        match self {
            InitFormat::Js => "tailwind.config.js",
            InitFormat::Json => "tailwind.config.json",
            InitFormat::Toml => "tailwind.config.toml",
        }
    }
}

/// Write a starter config into `dir`.
///
/// Refuses to overwrite any existing config file in `dir` unless `force` is
/// set. Returns the path written.
pub fn init_config(dir: &Path, format: &str, force: bool) -> Result<PathBuf, InitError> {
    let format = InitFormat::from_str(format).ok_or_else(|| InitError::UnknownFormat(format.to_string()))?;

    if !force {
        if let Some(existing) = CONFIG_FILE_NAMES.iter().map(|name| dir.join(name)).find(|p| p.exists()) {
            return Err(InitError::FileExists(existing.display().to_string()));
        }
    }

    fs::create_dir_all(dir).map_err(InitError::CreateDir)?;
    let path = dir.join(format.file_name());
    fs::write(&path, starter_config(format)).map_err(InitError::WriteFile)?;
    Ok(path)
}

/// Starter config text in the given format.
pub fn starter_config(format: InitFormat) -> String {
    match format {
        InitFormat::Js => generate_js_config(),
        InitFormat::Json => generate_json_config(),
        InitFormat::Toml => generate_toml_config(),
    }
}

fn generate_js_config() -> String {
    r##"/** @type {import('tailwindcss').Config} */
module.exports = {
  content: [
    "./index.html",
    "./src/**/*.{rs,html,css}",
  ],
  theme: {
    extend: {
      colors: {
        neon: {
          pink: '#ff0080',
          blue: '#0080ff',
          green: '#00ff80',
          yellow: '#ffff00',
          purple: '#8000ff',
        }
      }
    },
  },
  plugins: [],
}
"##
    .to_string()
}

fn generate_json_config() -> String {
    r##"{
  "content": ["./index.html", "./src/**/*.{rs,html,css}"],
  "theme": {
    "extend": {
      "colors": {
        "neon": {
          "pink": "#ff0080",
          "blue": "#0080ff",
          "green": "#00ff80",
          "yellow": "#ffff00",
          "purple": "#8000ff"
        }
      }
    }
  },
  "plugins": []
}
"##
    .to_string()
}

fn generate_toml_config() -> String {
    r##"content = ["./index.html", "./src/**/*.{rs,html,css}"]
plugins = []

[theme.extend.colors.neon]
pink = "#ff0080"
blue = "#0080ff"
green = "#00ff80"
yellow = "#ffff00"
purple = "#8000ff"
"##
    .to_string()
}
