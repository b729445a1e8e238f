//! Command-line argument definition and processing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// ghidra-dark - Merge a dark color scheme into Ghidra's tool preferences
#[derive(Parser, Debug)]
#[command(name = "ghidra-dark")]
#[command(version)]
#[command(about = "Merge a dark color scheme into Ghidra's tool preferences", long_about = None)]
pub struct Args {
    /// Ghidra user settings directory (e.g. ~/.ghidra/.ghidra_11.0_PUBLIC)
    #[arg(long, global = true, env = "GHIDRA_DARK_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Report what would change without writing any file
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Print the run summary as JSON on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Enable debug logging (equivalent to --log-level debug)
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Back up and merge the dark preferences into every managed tool
    Install {
        /// TOML file with preferences and extra tools layered over the built-in set
        #[arg(long)]
        overrides: Option<PathBuf>,
    },
    /// Restore every managed tool from its backup
    Uninstall {
        /// TOML overrides file whose extra tools should be restored as well
        #[arg(long)]
        overrides: Option<PathBuf>,
    },
    /// Print the effective preference catalog as JSON
    Catalog {
        /// TOML file with preferences layered over the built-in set
        #[arg(long)]
        overrides: Option<PathBuf>,
    },
}

/// What: Dispatch the parsed subcommand.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - Never returns; every handler exits the process with its status code.
pub fn process_args(args: &Args) -> ! {
    use crate::args::{catalog, install, uninstall};

    match &args.command {
        Command::Install { overrides } => install::handle_install(args, overrides.as_deref()),
        Command::Uninstall { overrides } => uninstall::handle_uninstall(args, overrides.as_deref()),
        Command::Catalog { overrides } => catalog::handle_catalog(overrides.as_deref()),
    }
}
