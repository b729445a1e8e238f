//! Test utilities for common test setup.
//!
//! This module provides shared fixtures used across multiple test modules.

#[cfg(test)]
use crate::prefs::{PreferenceCatalog, PreferenceValue};
#[cfg(test)]
use crate::tool::ToolDocument;

/// Code browser layout with a few categories and unrelated plugin state.
#[cfg(test)]
pub const CODE_BROWSER_TCD: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<TOOL_CONFIG CONFIG_NAME="NO_LONGER_USED">
    <SUPPORTED_DATA_TYPE CLASS_NAME="ghidra.program.model.listing.Program" />
    <ICON LOCATION="images/dragon_head.gif" />
    <TOOL TOOL_NAME="CodeBrowser" INSTANCE_NAME="">
        <OPTIONS>
            <CATEGORY NAME="Search">
                <WRAPPED_OPTION NAME="Highlight Color" CLASS="ghidra.framework.options.WrappedColor">
                    <STATE NAME="color" TYPE="int" VALUE="-1" />
                </WRAPPED_OPTION>
                <STATE NAME="Search Limit" TYPE="int" VALUE="500" />
            </CATEGORY>
            <!-- user tweaks -->
            <CATEGORY NAME="Key Bindings">
                <WRAPPED_OPTION NAME="Go To" CLASS="ghidra.framework.options.WrappedKeyStroke">
                    <STATE NAME="KeyCode" TYPE="int" VALUE="71" />
                    <STATE NAME="Modifiers" TYPE="int" VALUE="0" />
                </WRAPPED_OPTION>
            </CATEGORY>
        </OPTIONS>
        <PACKAGE NAME="Ghidra Core">
            <INCLUDE CLASS="ghidra.app.plugin.core.codebrowser.CodeBrowserPlugin" />
        </PACKAGE>
        <ROOT_NODE X_POS="0" Y_POS="0" WIDTH="1920" HEIGHT="1080" EX_STATE="0" FOCUSED="true" TITLE="CodeBrowser">
            <SPLIT_NODE WIDTH="1916" HEIGHT="946" DIVIDER_LOCATION="771" ORIENTATION="HORIZONTAL">
                <COMPONENT_NODE TOP_INFO="0">
                    <COMPONENT_INFO NAME="Listing" OWNER="CodeBrowserPlugin" TITLE="Listing: " ACTIVE="true" GROUP="Core" INSTANCE_ID="1" />
                </COMPONENT_NODE>
            </SPLIT_NODE>
        </ROOT_NODE>
        <PREFERENCES>
            <ARRAY NAME="Recent Files">Program &amp; Notes</ARRAY>
        </PREFERENCES>
    </TOOL>
</TOOL_CONFIG>
"#;

/// Smallest document the merge engine accepts.
#[cfg(test)]
pub const EMPTY_OPTIONS_TCD: &str =
    r#"<?xml version="1.0" encoding="UTF-8"?><TOOL_CONFIG><TOOL TOOL_NAME="Debugger"><OPTIONS /></TOOL></TOOL_CONFIG>"#;

#[cfg(test)]
/// What: Parse a fixture as an in-memory tool document.
///
/// Inputs:
/// - `xml`: Fixture text.
///
/// Output:
/// - Parsed document with a placeholder path.
pub fn doc(xml: &str) -> ToolDocument {
    ToolDocument::parse(xml, "fixture.tcd").expect("fixture parses")
}

#[cfg(test)]
/// What: A compact catalog touching every value shape.
///
/// Inputs: None
///
/// Output: Catalog with a color, a font, a key stroke and a boolean.
pub fn small_catalog() -> PreferenceCatalog {
    PreferenceCatalog::new()
        .with("Search", "Highlight Color", PreferenceValue::color(-11_974_594))
        .with("Decompiler", "Display.Font", PreferenceValue::font(14, 0, "Monospaced"))
        .with("Key Bindings", "Go To", PreferenceValue::key_stroke(71, 128))
        .with("Comments", "Enter accepts comment", true)
}
