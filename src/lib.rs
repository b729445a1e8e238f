//! Library entry for ghidra-dark exposing the merge engine for the binary and
//! integration tests.

pub mod batch;
pub mod error;
pub mod laf;
pub mod merge;
pub mod prefs;
pub mod tool;

#[cfg(test)]
mod test_utils;

pub use batch::{InstallOptions, RunSummary, Status, install, uninstall};
pub use error::{Error, Result};
pub use merge::{MergeReport, merge};
pub use prefs::{Overrides, PreferenceCatalog, PreferenceValue, dark_catalog};
pub use tool::ToolDocument;
