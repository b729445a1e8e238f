//! Command-line install functionality.

use std::path::Path;

use ghidra_dark::batch::{InstallOptions, install};
use ghidra_dark::dark_catalog;

use crate::args::{Args, utils};

/// What: Handle `install` by merging the dark catalog into every managed tool.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
/// - `overrides`: Optional TOML overrides file.
///
/// Output:
/// - Exits the process with 0 when no file failed, 1 otherwise.
///
/// Details:
/// - Overrides are loaded before anything is touched; an invalid file aborts.
/// - Missing config directory or `preferences` file aborts the run.
pub fn handle_install(args: &Args, overrides: Option<&Path>) -> ! {
    let Some(config_dir) = utils::require_config_dir(args) else {
        std::process::exit(2);
    };
    tracing::info!(path = %config_dir.display(), dry_run = args.dry_run, "Install requested from CLI");

    let overrides = match utils::load_overrides(overrides) {
        Ok(o) => o,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load overrides");
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    let mut catalog = dark_catalog();
    catalog.overlay(overrides.catalog);
    let options = InstallOptions {
        dry_run: args.dry_run,
        extra_tools: overrides.extra_tools,
    };

    match install(config_dir, &catalog, &options) {
        Ok(summary) => {
            utils::print_summary(&summary, args.json);
            std::process::exit(summary.exit_code());
        }
        Err(e) => {
            tracing::error!(error = %e, "Install aborted");
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}
