//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod check;
mod init;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::color::ColorSyntax;
use crate::config::{merge_cli_overrides, CliOverrides, ConfigLoader, ValidateOptions, ValidationLevel};
use crate::logging::init_tracing;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Windcfg - check and resolve utility-CSS generator configuration
#[derive(Parser)]
#[command(name = "windcfg")]
#[command(about = "Windcfg - check and resolve utility-CSS generator configuration")]
#[command(version)]
pub struct Cli {
    /// Show debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command that loads a configuration
#[derive(Args, Debug, Clone, Default)]
pub struct LoadArgs {
    /// Config file (default: search upward from the current directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Strict mode: malformed token values fail the load
    #[arg(long)]
    pub strict: bool,

    /// What a malformed color does: error, warn, ignore
    #[arg(long)]
    pub color_level: Option<ValidationLevel>,

    /// Which color syntax is well-formed: hex (#RRGGBB) or css
    #[arg(long)]
    pub color_syntax: Option<ColorSyntax>,
}

impl LoadArgs {
    /// Build a loader with these overrides applied to the default options.
    pub fn loader(&self) -> ConfigLoader {
        let mut options = ValidateOptions::default();
        let overrides = CliOverrides {
            strict: Some(self.strict),
            color_level: self.color_level,
            color_syntax: self.color_syntax,
        };
        merge_cli_overrides(&mut options, &overrides);
        ConfigLoader::new(options)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load and validate a configuration, reporting warnings
    Check {
        #[command(flatten)]
        load: LoadArgs,

        /// Output the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration with the theme merged over the defaults
    Resolve {
        #[command(flatten)]
        load: LoadArgs,

        /// Output format: json, toml
        #[arg(long, default_value = "json")]
        format: String,
    },
    /// Write a starter configuration file
    Init {
        /// Directory to write into (default: current directory)
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Config format: js, json, toml
        #[arg(long, default_value = "js")]
        format: String,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Parse arguments and run the selected command
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Check { load, json } => check::run_check(&load, json),
        Commands::Resolve { load, format } => check::run_resolve(&load, &format),
        Commands::Init { dir, format, force } => init::run_init(dir.as_deref(), &format, force),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_check_flags() {
        let cli = Cli::parse_from([
            "windcfg",
            "check",
            "--config",
            "site/tailwind.config.js",
            "--color-level",
            "ignore",
            "--color-syntax",
            "css",
        ]);
        match cli.command {
            Commands::Check { load, json } => {
                assert_eq!(load.config, Some(PathBuf::from("site/tailwind.config.js")));
                assert_eq!(load.color_level, Some(ValidationLevel::Ignore));
                assert_eq!(load.color_syntax, Some(ColorSyntax::Css));
                assert!(!json);
            }
            _ => panic!("expected check"),
        }
    }

    #[test]
    fn test_load_args_strict_loader() {
        let args = LoadArgs { strict: true, ..Default::default() };
        assert_eq!(args.loader().options().color_level, ValidationLevel::Error);

        let args = LoadArgs::default();
        assert_eq!(args.loader().options().color_level, ValidationLevel::Warn);
    }
}
