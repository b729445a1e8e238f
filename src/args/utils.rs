//! Shared utilities for argument processing.

use std::path::Path;

use ghidra_dark::batch::RunSummary;
use ghidra_dark::{Overrides, Result};

/// What: Determine the log level based on command-line arguments.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - Log level string (trace, debug, info, warn, error).
///
/// Details:
/// - Debug flag overrides `log_level` argument.
/// - `RUST_LOG` still wins over both when the subscriber is built.
pub fn determine_log_level(args: &crate::args::Args) -> String {
    if args.debug {
        "debug".to_string()
    } else {
        args.log_level.clone()
    }
}

/// What: Resolve the config directory or explain how to pass it.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - The directory from `--config-dir` / `GHIDRA_DARK_CONFIG_DIR`, or `None`
///   after logging an error.
pub fn require_config_dir(args: &crate::args::Args) -> Option<&Path> {
    let dir = args.config_dir.as_deref();
    if dir.is_none() {
        tracing::error!("no Ghidra config directory given; pass --config-dir or set GHIDRA_DARK_CONFIG_DIR");
        eprintln!("error: missing --config-dir (or GHIDRA_DARK_CONFIG_DIR)");
    }
    dir
}

/// What: Load the overrides file when one was given.
///
/// Inputs:
/// - `path`: Optional TOML file from `--overrides`.
///
/// Output:
/// - Parsed overrides, empty overrides when `path` is `None`, or the load error.
pub fn load_overrides(path: Option<&Path>) -> Result<Overrides> {
    path.map_or_else(|| Ok(Overrides::default()), Overrides::load)
}

/// What: Print a run summary on stdout.
///
/// Inputs:
/// - `summary`: Finished run.
/// - `json`: Print JSON instead of one line per file.
///
/// Output:
/// - None.
pub fn print_summary(summary: &RunSummary, json: bool) {
    if json {
        match serde_json::to_string_pretty(summary) {
            Ok(text) => println!("{text}"),
            Err(e) => tracing::error!(error = %e, "failed to encode run summary"),
        }
        return;
    }
    for file in &summary.files {
        match &file.message {
            Some(message) => println!("{:<10} {}: {message}", file.status.to_string(), file.tool),
            None => println!("{:<10} {}", file.status.to_string(), file.tool),
        }
    }
    if summary.look_and_feel.changed {
        println!("{:<10} {}", "updated", summary.look_and_feel.path.display());
    }
    if summary.dry_run {
        println!("dry run: no files were written");
    }
}
