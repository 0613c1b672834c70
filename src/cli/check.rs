//! Check and resolve command implementations

use std::process::ExitCode;

use super::{LoadArgs, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};
use crate::config::Loaded;

/// Execute the check command
pub fn run_check(args: &LoadArgs, json: bool) -> ExitCode {
    let result = args.loader().load(args.config.as_deref());

    if json {
        let report = match &result {
            Ok(loaded) => check_report_json(loaded),
            Err(e) => serde_json::json!({
                "valid": false,
                "error": e.to_string(),
                "fields": e.schema_errors().iter().map(|s| &s.field).collect::<Vec<_>>(),
            }),
        };
        println!("{}", report);
        return ExitCode::from(if result.is_ok() { EXIT_SUCCESS } else { EXIT_ERROR });
    }

    let loaded = match result {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    for warning in &loaded.warnings {
        eprintln!("Warning: {}", warning);
    }

    let config = &loaded.config;
    let source = loaded.path.as_ref().map(|p| p.display().to_string()).unwrap_or_default();
    println!("{}: OK", source);
    println!(
        "  content: {} pattern(s), {} unique",
        config.content.len(),
        config.content.unique_patterns().len()
    );
    println!(
        "  theme:   {} categories, {} tokens ({} extended)",
        config.theme.len(),
        config.theme.token_count(),
        loaded.source.theme.extend.token_count()
    );
    println!("  plugins: {}", config.plugins.len());
    if !loaded.warnings.is_empty() {
        println!("  {} warning(s)", loaded.warnings.len());
    }

    ExitCode::from(EXIT_SUCCESS)
}

fn check_report_json(loaded: &Loaded) -> serde_json::Value {
    serde_json::json!({
        "valid": true,
        "path": loaded.path,
        "content": loaded.config.content.unique_patterns(),
        "categories": loaded.config.theme.len(),
        "tokens": loaded.config.theme.token_count(),
        "plugins": loaded.config.plugins.len(),
        "warnings": loaded.warnings,
    })
}

/// Execute the resolve command
pub fn run_resolve(args: &LoadArgs, format: &str) -> ExitCode {
    if format != "json" && format != "toml" {
        eprintln!("Error: --format must be 'json' or 'toml'");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let loaded = match args.loader().load(args.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    for warning in &loaded.warnings {
        eprintln!("Warning: {}", warning);
    }

    let rendered = if format == "toml" {
        toml::to_string_pretty(&loaded.config).map_err(|e| e.to_string())
    } else {
        serde_json::to_string_pretty(&loaded.config).map_err(|e| e.to_string())
    };

    match rendered {
        Ok(text) => {
            println!("{}", text.trim_end());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: Failed to render configuration as {}: {}", format, e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
