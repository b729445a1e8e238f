//! Command-line uninstall functionality.

use std::path::Path;

use ghidra_dark::batch::uninstall;

use crate::args::{Args, utils};

/// What: Handle `uninstall` by restoring every managed tool from its backup.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
/// - `overrides`: Optional overrides file naming extra tools.
///
/// Output:
/// - Exits the process with 0 unless a restore hit an I/O error.
///
/// Details:
/// - Files without a backup only produce warnings.
pub fn handle_uninstall(args: &Args, overrides: Option<&Path>) -> ! {
    let Some(config_dir) = utils::require_config_dir(args) else {
        std::process::exit(2);
    };
    tracing::info!(path = %config_dir.display(), dry_run = args.dry_run, "Uninstall requested from CLI");

    let extra_tools = match utils::load_overrides(overrides) {
        Ok(o) => o.extra_tools,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load overrides");
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    match uninstall(config_dir, &extra_tools, args.dry_run) {
        Ok(summary) => {
            utils::print_summary(&summary, args.json);
            std::process::exit(summary.exit_code());
        }
        Err(e) => {
            tracing::error!(error = %e, "Uninstall aborted");
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}
