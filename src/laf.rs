//! Look-and-feel switch in Ghidra's flat `preferences` file.
//!
//! The dark colors only render correctly with the system look and feel, so
//! install pins `LastLookAndFeel=System` and uninstall drops it again.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::tool::write_atomic;

/// Name of the preferences file inside the config directory.
pub const PREFERENCES_FILE: &str = "preferences";
/// Line selecting the system look and feel.
pub const SYSTEM_LAF_LINE: &str = "LastLookAndFeel=System";

/// What: Add the system look-and-feel line when no line carries it.
///
/// Inputs:
/// - `content`: Current file contents.
///
/// Output:
/// - `Some(new contents)` when the line had to be appended, `None` otherwise.
///
/// Details:
/// - Existing lines are kept byte for byte; a missing final newline is added
///   before appending.
#[must_use]
pub fn with_system_laf(content: &str) -> Option<String> {
    if content.lines().any(|l| l.contains(SYSTEM_LAF_LINE)) {
        return None;
    }
    let mut out = String::with_capacity(content.len() + SYSTEM_LAF_LINE.len() + 2);
    out.push_str(content);
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(SYSTEM_LAF_LINE);
    out.push('\n');
    Some(out)
}

/// What: Drop every line carrying the system look-and-feel setting.
///
/// Inputs:
/// - `content`: Current file contents.
///
/// Output:
/// - Remaining contents and the number of lines removed.
#[must_use]
pub fn without_system_laf(content: &str) -> (String, usize) {
    let mut removed = 0;
    let kept: String = content
        .split_inclusive('\n')
        .filter(|line| {
            let hit = line.contains(SYSTEM_LAF_LINE);
            removed += usize::from(hit);
            !hit
        })
        .collect();
    (kept, removed)
}

/// Read the preferences file, mapping a missing file to `Error::NotFound`.
fn read_preferences(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// What: Ensure `path` selects the system look and feel.
///
/// Inputs:
/// - `path`: Ghidra `preferences` file.
/// - `dry_run`: Report without writing.
///
/// Output:
/// - `true` when the line was (or would be) appended; `Error::NotFound` when the
///   file does not exist yet.
pub fn ensure_system_laf(path: &Path, dry_run: bool) -> Result<bool> {
    let content = read_preferences(path)?;
    let Some(updated) = with_system_laf(&content) else {
        tracing::debug!(path = %path.display(), "look and feel already set");
        return Ok(false);
    };
    if !dry_run {
        write_atomic(path, updated.as_bytes())?;
    }
    tracing::info!(path = %path.display(), dry_run, "set {SYSTEM_LAF_LINE}");
    Ok(true)
}

/// What: Remove the system look-and-feel selection from `path`.
///
/// Inputs:
/// - `path`: Ghidra `preferences` file.
/// - `dry_run`: Report without writing.
///
/// Output:
/// - Number of lines removed; `Error::NotFound` when the file is missing.
pub fn remove_system_laf(path: &Path, dry_run: bool) -> Result<usize> {
    let content = read_preferences(path)?;
    let (updated, removed) = without_system_laf(&content);
    if removed > 0 && !dry_run {
        write_atomic(path, updated.as_bytes())?;
    }
    tracing::info!(path = %path.display(), removed, dry_run, "cleared look and feel");
    Ok(removed)
}
