//! Integration tests for uninstall runs.

#![cfg(test)]

use ghidra_dark::batch::{InstallOptions, Status, install, uninstall};
use ghidra_dark::dark_catalog;

use super::common::{CODE_BROWSER, ConfigDir, PREFERENCES, bak, read};

#[test]
/// What: Uninstall after install restores every file byte for byte.
///
/// Inputs:
/// - Primary and debugger tools installed, then uninstalled.
///
/// Output:
/// - Both tools equal their originals, backups gone, `preferences` restored.
fn install_then_uninstall_round_trip() {
    let cfg = ConfigDir::new();
    let primary = cfg.write_tool("_code_browser.tcd", CODE_BROWSER);
    let debugger_text = CODE_BROWSER.replace("CodeBrowser", "Debugger");
    let debugger = cfg.write_tool("_debugger.tcd", &debugger_text);

    install(cfg.path(), &dark_catalog(), &InstallOptions::default()).expect("install");
    assert_ne!(read(&primary), CODE_BROWSER);

    let summary = uninstall(cfg.path(), &[], false).expect("uninstall");
    assert_eq!(summary.count(Status::Restored), 2);
    assert_eq!(summary.count(Status::Skipped), 3);
    assert!(summary.look_and_feel.changed);
    assert_eq!(summary.exit_code(), 0);

    assert_eq!(read(&primary), CODE_BROWSER);
    assert_eq!(read(&debugger), debugger_text);
    assert!(!bak(&primary).exists());
    assert!(!bak(&debugger).exists());
    assert_eq!(cfg.preferences(), PREFERENCES);
}

#[test]
/// What: A dry-run uninstall reports restores without renaming anything.
///
/// Inputs:
/// - Installed primary tool, uninstall with `dry_run`.
///
/// Output:
/// - `Restored` reported, merged file and backup both still present.
fn dry_run_uninstall_keeps_files() {
    let cfg = ConfigDir::new();
    let primary = cfg.write_tool("_code_browser.tcd", CODE_BROWSER);
    install(cfg.path(), &dark_catalog(), &InstallOptions::default()).expect("install");
    let merged = read(&primary);

    let summary = uninstall(cfg.path(), &[], true).expect("uninstall");
    assert_eq!(summary.files[0].status, Status::Restored);
    assert_eq!(read(&primary), merged);
    assert!(bak(&primary).exists());
    assert!(cfg.preferences().contains("LastLookAndFeel=System"));
}

#[test]
/// What: Files without a backup produce warnings, not errors.
///
/// Inputs:
/// - Extra tool present without backup.
///
/// Output:
/// - `Warning` for the extra tool, exit code 0, file untouched.
fn missing_backup_is_a_warning() {
    let cfg = ConfigDir::new();
    let custom = cfg.write_tool("Custom.tool", CODE_BROWSER);

    let summary = uninstall(cfg.path(), &["Custom.tool".to_string()], false).expect("uninstall");
    let outcome = summary.files.last().expect("outcome");
    assert_eq!(outcome.tool, "Custom.tool");
    assert_eq!(outcome.status, Status::Warning);
    assert_eq!(summary.exit_code(), 0);
    assert_eq!(read(&custom), CODE_BROWSER);
}
