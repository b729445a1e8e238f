use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Suffix appended to a tool file name for its backup.
pub const BACKUP_SUFFIX: &str = ".bak";

/// `<path>.bak`, keeping the full original file name.
#[must_use]
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// What: Copy `path` to its backup unless a backup already exists.
///
/// Inputs:
/// - `path`: Existing tool file.
///
/// Output:
/// - `true` when a backup was written, `false` when one was already present.
///
/// Details:
/// - An existing backup holds the file as it was before the first install and
///   is never overwritten by later runs.
pub fn ensure_backup(path: &Path) -> Result<bool> {
    let backup = backup_path(path);
    if backup.exists() {
        tracing::debug!(path = %backup.display(), "keeping existing backup");
        return Ok(false);
    }
    fs::copy(path, &backup).map_err(|e| Error::io(path, e))?;
    tracing::debug!(path = %backup.display(), "wrote backup");
    Ok(true)
}

/// What: Put the backup of `path` back in place.
///
/// Inputs:
/// - `path`: Tool file whose backup should be restored.
///
/// Output:
/// - `Ok(())` once the backup has been renamed over `path`.
///
/// Details:
/// - The current file is removed first so the rename also works where it
///   cannot replace an existing file.
pub fn restore_backup(path: &Path) -> Result<()> {
    let backup = backup_path(path);
    match fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(Error::io(path, e)),
    }
    fs::rename(&backup, path).map_err(|e| Error::io(&backup, e))?;
    tracing::debug!(path = %path.display(), "restored from backup");
    Ok(())
}
