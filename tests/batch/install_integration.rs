//! Integration tests for install runs.
//!
//! Tests cover:
//! - Primary tool merged, optional tools skipped
//! - Malformed optional tool fails alone
//! - Re-running install changes nothing
//! - Overrides layered over the built-in catalog

#![cfg(test)]

use ghidra_dark::batch::{InstallOptions, Status, install};
use ghidra_dark::{Overrides, ToolDocument, dark_catalog};

use super::common::{CODE_BROWSER, ConfigDir, PREFERENCES, bak, read};

#[test]
/// What: Install merges the primary tool and skips absent optional tools.
///
/// Inputs:
/// - Config dir holding only `_code_browser.tcd`.
///
/// Output:
/// - Primary merged with a backup of the original, four skips, look and feel
///   appended, exit code 0.
fn install_primary_only() {
    let cfg = ConfigDir::new();
    let primary = cfg.write_tool("_code_browser.tcd", CODE_BROWSER);

    let summary = install(cfg.path(), &dark_catalog(), &InstallOptions::default()).expect("install");
    assert_eq!(summary.exit_code(), 0);
    assert_eq!(summary.files[0].status, Status::Merged);
    assert_eq!(summary.count(Status::Skipped), 4);
    assert!(summary.look_and_feel.changed);
    assert_eq!(cfg.preferences(), format!("{PREFERENCES}LastLookAndFeel=System\n"));

    assert_eq!(read(&bak(&primary)), CODE_BROWSER);
    let merged = read(&primary);
    assert!(merged.contains(r#"<STATE NAME="color" TYPE="int" VALUE="-11974594"/>"#));
    assert!(merged.contains(r#"<CATEGORY NAME="Listing Display">"#));
    assert!(merged.contains(r#"<STATE NAME="Show Tips" TYPE="boolean" VALUE="false"/>"#));
    assert_eq!(merged.matches(r#"NAME="Highlight Color""#).count(), 1);

    let doc = ToolDocument::load(&primary).expect("merged file parses");
    assert!(doc.anchors().is_ok());
}

#[test]
/// What: A malformed tool fails on its own and is left untouched.
///
/// Inputs:
/// - Valid primary tool, `_debugger.tcd` with an unclosed element.
///
/// Output:
/// - Debugger `Failed` with a malformed-XML message and original bytes; primary
///   still merged; exit code 1.
fn malformed_tool_fails_alone() {
    let cfg = ConfigDir::new();
    let primary = cfg.write_tool("_code_browser.tcd", CODE_BROWSER);
    let broken = "<TOOL_CONFIG><TOOL><OPTIONS></TOOL></TOOL_CONFIG>";
    let debugger = cfg.write_tool("_debugger.tcd", broken);

    let summary = install(cfg.path(), &dark_catalog(), &InstallOptions::default()).expect("install");
    let outcome = summary
        .files
        .iter()
        .find(|f| f.tool == "_debugger.tcd")
        .expect("debugger outcome");
    assert_eq!(outcome.status, Status::Failed);
    assert!(outcome.message.as_deref().is_some_and(|m| m.contains("malformed XML")));
    assert_eq!(read(&debugger), broken);
    assert_ne!(read(&primary), CODE_BROWSER);
    assert_eq!(summary.exit_code(), 1);
}

#[test]
/// What: A tool without `OPTIONS` is a structure failure.
///
/// Inputs:
/// - Primary tool whose `TOOL` has no `OPTIONS` child.
///
/// Output:
/// - `Failed` naming the anchor; file unchanged.
fn missing_options_anchor() {
    let cfg = ConfigDir::new();
    let text = "<TOOL_CONFIG><TOOL TOOL_NAME=\"CodeBrowser\"/></TOOL_CONFIG>";
    let primary = cfg.write_tool("_code_browser.tcd", text);

    let summary = install(cfg.path(), &dark_catalog(), &InstallOptions::default()).expect("install");
    assert_eq!(summary.files[0].status, Status::Failed);
    assert!(summary.files[0].message.as_deref().is_some_and(|m| m.contains("<OPTIONS>")));
    assert_eq!(read(&primary), text);
}

#[test]
/// What: Installing twice leaves files byte-identical and keeps the first backup.
///
/// Inputs:
/// - Two install runs over the same config dir.
///
/// Output:
/// - Second run reports `Unchanged`; tool, backup and `preferences` unchanged.
fn install_twice_is_stable() {
    let cfg = ConfigDir::new();
    let primary = cfg.write_tool("_code_browser.tcd", CODE_BROWSER);
    let catalog = dark_catalog();

    install(cfg.path(), &catalog, &InstallOptions::default()).expect("first install");
    let first = read(&primary);
    let prefs = cfg.preferences();

    let summary = install(cfg.path(), &catalog, &InstallOptions::default()).expect("second install");
    assert_eq!(summary.files[0].status, Status::Unchanged);
    assert!(!summary.look_and_feel.changed);
    assert_eq!(read(&primary), first);
    assert_eq!(read(&bak(&primary)), CODE_BROWSER);
    assert_eq!(cfg.preferences(), prefs);
}

#[test]
/// What: Overrides replace built-in values and add extra tools.
///
/// Inputs:
/// - Overrides changing `Search/Highlight Color` and naming `Custom.tool`.
///
/// Output:
/// - Override color written to both the primary and the extra tool.
fn overrides_and_extra_tools() {
    let cfg = ConfigDir::new();
    let primary = cfg.write_tool("_code_browser.tcd", CODE_BROWSER);
    let custom = cfg.write_tool("Custom.tool", CODE_BROWSER);
    let overrides = Overrides::parse(
        r#"
extra_tools = ["Custom.tool"]

[preferences."Search"]
"Highlight Color" = { color = -16777216 }
"#,
        std::path::Path::new("overrides.toml"),
    )
    .expect("overrides");

    let mut catalog = dark_catalog();
    catalog.overlay(overrides.catalog);
    let options = InstallOptions {
        dry_run: false,
        extra_tools: overrides.extra_tools,
    };
    let summary = install(cfg.path(), &catalog, &options).expect("install");
    assert_eq!(summary.files.last().map(|f| f.tool.as_str()), Some("Custom.tool"));
    for path in [&primary, &custom] {
        assert!(read(path).contains(r#"<STATE NAME="color" TYPE="int" VALUE="-16777216"/>"#));
    }
}
