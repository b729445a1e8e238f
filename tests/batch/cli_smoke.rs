//! Smoke tests driving the built binary.

#![cfg(test)]

use std::process::{Command, Output};

use super::common::{CODE_BROWSER, ConfigDir, bak, read};

/// Run the binary with `args`, without inheriting a config dir or log filter.
fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ghidra-dark"))
        .args(args)
        .env_remove("GHIDRA_DARK_CONFIG_DIR")
        .env_remove("RUST_LOG")
        .output()
        .expect("binary runs")
}

#[test]
/// What: `install --json` prints a parsable summary and exits 0.
///
/// Inputs:
/// - Config dir with the primary tool.
///
/// Output:
/// - Exit status 0, JSON summary with `merged` first, backup on disk.
fn install_json_summary() {
    let cfg = ConfigDir::new();
    let primary = cfg.write_tool("_code_browser.tcd", CODE_BROWSER);
    let dir = cfg.path().to_str().expect("utf-8 temp path");

    let out = run(&["install", "--config-dir", dir, "--json"]);
    assert_eq!(out.status.code(), Some(0), "{}", String::from_utf8_lossy(&out.stderr));
    let summary: serde_json::Value = serde_json::from_slice(&out.stdout).expect("json on stdout");
    assert_eq!(summary["action"], "install");
    assert_eq!(summary["files"][0]["status"], "merged");
    assert!(summary["files"][0]["report"]["preferences_added"].as_u64() > Some(0));
    assert_eq!(read(&bak(&primary)), CODE_BROWSER);
}

#[test]
/// What: Missing primary tool and missing config dir give non-zero exits.
///
/// Inputs:
/// - Config dir without tools; a path that does not exist.
///
/// Output:
/// - Exit status 1 in both cases.
fn failures_exit_non_zero() {
    let cfg = ConfigDir::new();
    let dir = cfg.path().to_str().expect("utf-8 temp path");
    assert_eq!(run(&["install", "--config-dir", dir]).status.code(), Some(1));

    let missing = cfg.path().join("absent");
    let missing = missing.to_str().expect("utf-8 temp path");
    assert_eq!(run(&["uninstall", "--config-dir", missing]).status.code(), Some(1));
}

#[test]
/// What: `catalog` dumps the built-in catalog as JSON.
///
/// Inputs:
/// - No arguments besides the subcommand.
///
/// Output:
/// - Object keyed by category with tagged preference values.
fn catalog_dump() {
    let out = run(&["catalog"]);
    assert!(out.status.success());
    let catalog: serde_json::Value = serde_json::from_slice(&out.stdout).expect("json on stdout");
    assert_eq!(catalog["Comments"]["Enter accepts comment"]["shape"], "scalar");
    assert_eq!(catalog["Search"]["Highlight Color"]["shape"], "composite");
}
