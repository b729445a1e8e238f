//! Install and uninstall runs over every managed tool file.
//!
//! Files are handled one at a time in a fixed order. A failure on one file is
//! recorded in the [`RunSummary`] and the run moves on to the next.

/// Backup creation and restore.
mod backup;

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

pub use backup::{BACKUP_SUFFIX, backup_path, ensure_backup, restore_backup};

use crate::error::{Error, Result};
use crate::laf::{PREFERENCES_FILE, ensure_system_laf, remove_system_laf};
use crate::merge::{MergeReport, merge};
use crate::prefs::PreferenceCatalog;
use crate::tool::ToolDocument;

/// Directory holding tool files, relative to the config directory.
pub const TOOLS_DIR: &str = "tools";
/// The code browser tool; every Ghidra user has it after the first start.
pub const PRIMARY_TOOL: &str = "_code_browser.tcd";
/// Tools that only exist once the user has opened them.
pub const OPTIONAL_TOOLS: [&str; 4] = [
    "_debugger.tcd",
    "_version_tracking.tcd",
    "Version Tracking (DESTINATION TOOL).tool",
    "Version Tracking (SOURCE TOOL).tool",
];

/// One tool file the run manages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManagedTool {
    /// File name inside the tools directory.
    pub file_name: String,
    /// Missing required tools are errors; missing optional ones are skipped.
    pub required: bool,
}

/// What: List the tool files to process, in order.
///
/// Inputs:
/// - `extra`: Additional optional tool file names.
///
/// Output:
/// - Primary tool, built-in optional tools, then `extra` without duplicates.
#[must_use]
pub fn managed_tools(extra: &[String]) -> Vec<ManagedTool> {
    let mut tools = vec![ManagedTool {
        file_name: PRIMARY_TOOL.to_string(),
        required: true,
    }];
    let optional = OPTIONAL_TOOLS.iter().map(ToString::to_string).chain(extra.iter().cloned());
    for file_name in optional {
        if tools.iter().any(|t| t.file_name == file_name) {
            continue;
        }
        tools.push(ManagedTool {
            file_name,
            required: false,
        });
    }
    tools
}

/// Which direction a run goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Merge the dark catalog into the tools.
    Install,
    /// Restore tools from their backups.
    Uninstall,
}

/// Result of processing one tool file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Catalog merged and file rewritten.
    Merged,
    /// File already matched the catalog.
    Unchanged,
    /// Optional file absent, or nothing to restore.
    Skipped,
    /// Backup put back in place.
    Restored,
    /// Non-fatal problem, e.g. no backup to restore.
    Warning,
    /// File could not be processed and was left untouched.
    Failed,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Merged => "merged",
            Self::Unchanged => "unchanged",
            Self::Skipped => "skipped",
            Self::Restored => "restored",
            Self::Warning => "warning",
            Self::Failed => "failed",
        })
    }
}

/// Outcome for one managed tool file.
#[derive(Clone, Debug, Serialize)]
pub struct FileOutcome {
    /// Tool file name.
    pub tool: String,
    /// Full path that was processed.
    pub path: PathBuf,
    /// What happened.
    pub status: Status,
    /// Error or warning text, when any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Merge counters for install runs that got as far as merging.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<MergeReport>,
}

impl FileOutcome {
    /// Outcome without message or report.
    fn new(tool: &ManagedTool, path: &Path, status: Status) -> Self {
        Self {
            tool: tool.file_name.clone(),
            path: path.to_path_buf(),
            status,
            message: None,
            report: None,
        }
    }

    /// Failed outcome carrying `error`.
    fn failed(tool: &ManagedTool, path: &Path, error: &Error) -> Self {
        Self {
            message: Some(error.to_string()),
            ..Self::new(tool, path, Status::Failed)
        }
    }
}

/// Outcome for the look-and-feel line in `preferences`.
#[derive(Clone, Debug, Serialize)]
pub struct LafOutcome {
    /// The `preferences` file.
    pub path: PathBuf,
    /// Whether the file was (or in a dry run would be) modified.
    pub changed: bool,
}

/// Everything one run did.
#[derive(Clone, Debug, Serialize)]
pub struct RunSummary {
    /// Install or uninstall.
    pub action: Action,
    /// No file was written.
    pub dry_run: bool,
    /// Look-and-feel step.
    pub look_and_feel: LafOutcome,
    /// Per-tool outcomes, in processing order.
    pub files: Vec<FileOutcome>,
}

impl RunSummary {
    /// `true` when any file failed.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.files.iter().any(|f| f.status == Status::Failed)
    }

    /// Number of outcomes with `status`.
    #[must_use]
    pub fn count(&self, status: Status) -> usize {
        self.files.iter().filter(|f| f.status == status).count()
    }

    /// Process exit code: 1 when any file failed, 0 otherwise.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        i32::from(self.has_errors())
    }

    /// Log one line per run with the status counts.
    fn log(&self) {
        tracing::info!(
            action = ?self.action,
            dry_run = self.dry_run,
            merged = self.count(Status::Merged),
            unchanged = self.count(Status::Unchanged),
            restored = self.count(Status::Restored),
            skipped = self.count(Status::Skipped),
            warnings = self.count(Status::Warning),
            failed = self.count(Status::Failed),
            "run finished"
        );
    }
}

/// Settings for an install run.
#[derive(Clone, Debug, Default)]
pub struct InstallOptions {
    /// Merge and report without backing up or writing.
    pub dry_run: bool,
    /// Optional tools to process after the built-in list.
    pub extra_tools: Vec<String>,
}

/// Fail early when the config directory is missing.
fn check_config_dir(config_dir: &Path) -> Result<()> {
    if config_dir.is_dir() {
        Ok(())
    } else {
        Err(Error::NotFound {
            path: config_dir.to_path_buf(),
        })
    }
}

/// Backup, load, merge and write back one existing tool file.
fn merge_file(path: &Path, catalog: &PreferenceCatalog, dry_run: bool) -> Result<MergeReport> {
    if !dry_run {
        ensure_backup(path)?;
    }
    let mut doc = ToolDocument::load(path)?;
    let report = merge(&mut doc, catalog)?;
    if report.changed() && !dry_run {
        doc.save()?;
    }
    Ok(report)
}

/// What: Install one tool file.
///
/// Inputs:
/// - `tool`: Tool being processed.
/// - `path`: Its full path.
/// - `catalog`: Preferences to merge.
/// - `dry_run`: Skip backup and write.
///
/// Output:
/// - Outcome for the file; errors are folded into [`Status::Failed`].
fn install_tool(tool: &ManagedTool, path: &Path, catalog: &PreferenceCatalog, dry_run: bool) -> FileOutcome {
    if !path.exists() {
        if tool.required {
            let err = Error::NotFound {
                path: path.to_path_buf(),
            };
            tracing::error!(path = %path.display(), "{err}; open Ghidra at least once before installing");
            return FileOutcome::failed(tool, path, &err);
        }
        tracing::debug!(path = %path.display(), "optional tool not present, skipping");
        return FileOutcome::new(tool, path, Status::Skipped);
    }

    match merge_file(path, catalog, dry_run) {
        Ok(report) => {
            let status = if report.changed() {
                Status::Merged
            } else {
                Status::Unchanged
            };
            tracing::info!(path = %path.display(), %status, dry_run, "processed tool");
            FileOutcome {
                report: Some(report),
                ..FileOutcome::new(tool, path, status)
            }
        }
        Err(err) => {
            tracing::error!(path = %path.display(), error = %err, "tool left untouched");
            FileOutcome::failed(tool, path, &err)
        }
    }
}

/// What: Apply `catalog` to every managed tool under `config_dir`.
///
/// Inputs:
/// - `config_dir`: Ghidra user settings directory.
/// - `catalog`: Preferences to merge.
/// - `options`: Dry run and extra tools.
///
/// Output:
/// - Run summary, or an error when a global precondition fails: missing config
///   directory or missing `preferences` file. No tool file is touched then.
///
/// Details:
/// - Per file: existence check, backup, load, merge, canonicalize, write.
pub fn install(config_dir: &Path, catalog: &PreferenceCatalog, options: &InstallOptions) -> Result<RunSummary> {
    check_config_dir(config_dir)?;
    let laf_path = config_dir.join(PREFERENCES_FILE);
    let laf_changed = ensure_system_laf(&laf_path, options.dry_run).inspect_err(|e| {
        tracing::error!(error = %e, "open Ghidra at least once before installing");
    })?;

    let tools_dir = config_dir.join(TOOLS_DIR);
    let files = managed_tools(&options.extra_tools)
        .iter()
        .map(|tool| install_tool(tool, &tools_dir.join(&tool.file_name), catalog, options.dry_run))
        .collect();

    let summary = RunSummary {
        action: Action::Install,
        dry_run: options.dry_run,
        look_and_feel: LafOutcome {
            path: laf_path,
            changed: laf_changed,
        },
        files,
    };
    summary.log();
    Ok(summary)
}

/// What: Restore one tool file from its backup.
///
/// Inputs:
/// - `tool`: Tool being processed.
/// - `path`: Its full path.
/// - `dry_run`: Report without renaming.
///
/// Output:
/// - `Restored` when a backup existed, `Warning` when the file exists without
///   a backup, `Skipped` when neither exists, `Failed` on I/O errors.
fn uninstall_tool(tool: &ManagedTool, path: &Path, dry_run: bool) -> FileOutcome {
    if backup_path(path).exists() {
        if !dry_run && let Err(err) = restore_backup(path) {
            tracing::error!(path = %path.display(), error = %err, "restore failed");
            return FileOutcome::failed(tool, path, &err);
        }
        tracing::info!(path = %path.display(), dry_run, "restored tool");
        return FileOutcome::new(tool, path, Status::Restored);
    }
    if path.exists() {
        let err = Error::Restore {
            path: path.to_path_buf(),
        };
        tracing::warn!(path = %path.display(), "{err}");
        return FileOutcome {
            message: Some(err.to_string()),
            ..FileOutcome::new(tool, path, Status::Warning)
        };
    }
    tracing::debug!(path = %path.display(), "nothing to restore");
    FileOutcome::new(tool, path, Status::Skipped)
}

/// What: Undo an install under `config_dir`.
///
/// Inputs:
/// - `config_dir`: Ghidra user settings directory.
/// - `extra_tools`: Additional optional tools to restore.
/// - `dry_run`: Report without modifying anything.
///
/// Output:
/// - Run summary, or an error when the config directory or the `preferences`
///   file is missing.
pub fn uninstall(config_dir: &Path, extra_tools: &[String], dry_run: bool) -> Result<RunSummary> {
    check_config_dir(config_dir)?;
    let laf_path = config_dir.join(PREFERENCES_FILE);
    let removed = remove_system_laf(&laf_path, dry_run).inspect_err(|e| {
        tracing::error!(error = %e, "cannot restore the look and feel");
    })?;

    let tools_dir = config_dir.join(TOOLS_DIR);
    let files = managed_tools(extra_tools)
        .iter()
        .map(|tool| uninstall_tool(tool, &tools_dir.join(&tool.file_name), dry_run))
        .collect();

    let summary = RunSummary {
        action: Action::Uninstall,
        dry_run,
        look_and_feel: LafOutcome {
            path: laf_path,
            changed: removed > 0,
        },
        files,
    };
    summary.log();
    Ok(summary)
}
