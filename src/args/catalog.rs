//! Command-line catalog dump.

use std::path::Path;

use ghidra_dark::dark_catalog;

use crate::args::utils;

/// What: Print the effective preference catalog as JSON.
///
/// Inputs:
/// - `overrides`: Optional overrides layered over the built-in catalog.
///
/// Output:
/// - Exits the process with 0 on success, 1 when overrides or encoding fail.
pub fn handle_catalog(overrides: Option<&Path>) -> ! {
    let mut catalog = dark_catalog();
    match utils::load_overrides(overrides) {
        Ok(o) => catalog.overlay(o.catalog),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load overrides");
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
    match serde_json::to_string_pretty(&catalog) {
        Ok(text) => {
            println!("{text}");
            std::process::exit(0);
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode catalog");
            std::process::exit(1);
        }
    }
}
