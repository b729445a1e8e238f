//! ghidra-dark binary entrypoint kept minimal. The merge logic lives in the library.

mod args;

use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

use clap::Parser;

/// Local wall-clock timestamps for log lines.
struct GhidraDarkTimer;

impl tracing_subscriber::fmt::time::FormatTime for GhidraDarkTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%dT%H:%M:%S"))
    }
}

/// Keeps the non-blocking file writer flushing until the process exits.
static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// What: Build the level filter, letting `RUST_LOG` win over the CLI level.
///
/// Inputs:
/// - `level`: Level chosen from `--log-level` / `--debug`.
///
/// Output:
/// - Filter for the subscriber.
fn env_filter(level: &str) -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level))
}

/// What: Initialize tracing to `log_file` or stderr.
///
/// Inputs:
/// - `level`: Default level.
/// - `log_file`: Optional log file; opened in append mode.
///
/// Output:
/// - None.
///
/// Details:
/// - Falls back to stderr when the file cannot be opened. Stdout is left for
///   the run summary.
fn init_logging(level: &str, log_file: Option<&Path>) {
    if let Some(log_path) = log_file {
        match std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)
        {
            Ok(file) => {
                let (non_blocking, guard) = tracing_appender::non_blocking(file);
                tracing_subscriber::fmt()
                    .with_env_filter(env_filter(level))
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(non_blocking)
                    .with_timer(GhidraDarkTimer)
                    .init();
                let _ = LOG_GUARD.set(guard);
                tracing::info!(path = %log_path.display(), "logging initialized");
                return;
            }
            Err(e) => {
                init_stderr(level);
                tracing::warn!(path = %log_path.display(), error = %e, "failed to open log file; using stderr");
                return;
            }
        }
    }
    init_stderr(level);
}

/// Stderr subscriber used by default and as the file fallback.
fn init_stderr(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_timer(GhidraDarkTimer)
        .init();
}

fn main() {
    let args = args::Args::parse();
    let level = args::determine_log_level(&args);
    init_logging(&level, args.log_file.as_deref());
    tracing::debug!(command = ?args.command, "ghidra-dark starting");
    args::process_args(&args);
}
