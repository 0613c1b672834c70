//! Init command implementation

use std::path::Path;
use std::process::ExitCode;

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};
use crate::init::{init_config, InitError};

/// Execute the init command
pub fn run_init(dir: Option<&Path>, format: &str, force: bool) -> ExitCode {
    let dir = dir.unwrap_or_else(|| Path::new("."));

    match init_config(dir, format, force) {
        Ok(path) => {
            println!("Created {}", path.display());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e @ InitError::UnknownFormat(_)) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_INVALID_ARGS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
