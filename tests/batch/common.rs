//! Shared fixtures for batch integration tests.

#![cfg(test)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Tool file as Ghidra writes it after a first start.
pub const CODE_BROWSER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<TOOL_CONFIG CONFIG_NAME="NO_LONGER_USED">
    <SUPPORTED_DATA_TYPE CLASS_NAME="ghidra.program.model.listing.Program" />
    <TOOL TOOL_NAME="CodeBrowser" INSTANCE_NAME="">
        <OPTIONS>
            <CATEGORY NAME="Search">
                <WRAPPED_OPTION NAME="Highlight Color" CLASS="ghidra.framework.options.WrappedColor">
                    <STATE NAME="color" TYPE="int" VALUE="-1" />
                </WRAPPED_OPTION>
            </CATEGORY>
            <CATEGORY NAME="Tool">
                <STATE NAME="Show Tips" TYPE="boolean" VALUE="false" />
            </CATEGORY>
        </OPTIONS>
        <PACKAGE NAME="Ghidra Core" />
    </TOOL>
</TOOL_CONFIG>
"#;

/// `preferences` contents before install.
pub const PREFERENCES: &str = "GhidraShowWhatsNew=false\nSHOW.HELP.NAVIGATION.AID=true\n";

/// A Ghidra config directory in a temp dir.
pub struct ConfigDir {
    /// Owns the directory.
    dir: TempDir,
}

impl ConfigDir {
    /// What: Config dir with `preferences` and an empty `tools` directory.
    ///
    /// Inputs: None
    ///
    /// Output: Fresh directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("preferences"), PREFERENCES).expect("preferences");
        fs::create_dir(dir.path().join("tools")).expect("tools");
        Self { dir }
    }

    /// Config directory root.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of a tool file.
    pub fn tool(&self, name: &str) -> PathBuf {
        self.dir.path().join("tools").join(name)
    }

    /// Write a tool file and return its path.
    pub fn write_tool(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.tool(name);
        fs::write(&path, contents).expect("write tool");
        path
    }

    /// Current `preferences` contents.
    pub fn preferences(&self) -> String {
        fs::read_to_string(self.dir.path().join("preferences")).expect("read preferences")
    }
}

/// Read a file to a string.
pub fn read(path: &Path) -> String {
    fs::read_to_string(path).expect("read")
}

/// `<path>.bak`.
pub fn bak(path: &Path) -> PathBuf {
    ghidra_dark::batch::backup_path(path)
}
