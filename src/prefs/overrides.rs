//! User overrides layered over the built-in catalog.
//!
//! The file is TOML:
//!
//! ```toml
//! extra_tools = ["My Tool.tool"]
//!
//! [preferences."Search"]
//! "Highlight Color" = { color = -11974594 }
//! "Display.Font" = { font = { size = 14, style = 0, family = "Monospaced" } }
//! "Goto" = { keystroke = { key_code = 71, modifiers = 128 } }
//! "Enter accepts comment" = true
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::catalog::PreferenceCatalog;
use super::value::PreferenceValue;
use crate::error::{Error, Result};

/// Font fields as written in the overrides file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FontSpec {
    /// Point size.
    size: i32,
    /// Style bit flags; plain when omitted.
    #[serde(default)]
    style: i32,
    /// Font family.
    family: String,
}

/// Key stroke fields as written in the overrides file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct KeyStrokeSpec {
    /// Virtual key code.
    key_code: i32,
    /// Modifier bit flags; none when omitted.
    #[serde(default)]
    modifiers: i32,
}

/// `{ color = ... }` table.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ColorEntry {
    /// Packed ARGB value.
    color: i32,
}

/// `{ font = { ... } }` table.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FontEntry {
    /// Font fields.
    font: FontSpec,
}

/// `{ keystroke = { ... } }` table.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct KeyStrokeEntry {
    /// Key stroke fields.
    keystroke: KeyStrokeSpec,
}

/// One preference as written in the overrides file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PreferenceSpec {
    /// `true` / `false`.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Text.
    Text(String),
    /// Float, stored with the `unknown` kind.
    Float(f64),
    /// Color table.
    Color(ColorEntry),
    /// Font table.
    Font(FontEntry),
    /// Key stroke table.
    KeyStroke(KeyStrokeEntry),
}

impl From<PreferenceSpec> for PreferenceValue {
    fn from(spec: PreferenceSpec) -> Self {
        match spec {
            PreferenceSpec::Bool(b) => b.into(),
            PreferenceSpec::Int(i) => i.into(),
            PreferenceSpec::Text(s) => s.into(),
            PreferenceSpec::Float(f) => f.into(),
            PreferenceSpec::Color(c) => Self::color(c.color),
            PreferenceSpec::Font(FontEntry { font }) => {
                Self::font(font.size, font.style, font.family)
            }
            PreferenceSpec::KeyStroke(KeyStrokeEntry { keystroke }) => {
                Self::key_stroke(keystroke.key_code, keystroke.modifiers)
            }
        }
    }
}

/// Raw file layout.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct OverridesFile {
    /// Optional tool files to manage in addition to the built-in list.
    #[serde(default)]
    extra_tools: Vec<String>,
    /// Category → preference → value.
    #[serde(default)]
    preferences: BTreeMap<String, BTreeMap<String, PreferenceSpec>>,
}

/// Parsed overrides.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Overrides {
    /// Preferences replacing or extending the built-in catalog.
    pub catalog: PreferenceCatalog,
    /// Extra optional tool file names, relative to the tools directory.
    pub extra_tools: Vec<String>,
}

impl Overrides {
    /// What: Parse overrides from TOML text.
    ///
    /// Inputs:
    /// - `text`: File contents.
    /// - `origin`: Path used in error messages.
    ///
    /// Output:
    /// - Parsed overrides, or `Error::Config` with the TOML diagnostic.
    pub fn parse(text: &str, origin: &Path) -> Result<Self> {
        let raw: OverridesFile = toml::from_str(text).map_err(|e| Error::Config {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?;
        let mut catalog = PreferenceCatalog::new();
        for (category, prefs) in raw.preferences {
            for (name, spec) in prefs {
                catalog.insert(category.as_str(), name, PreferenceValue::from(spec));
            }
        }
        Ok(Self {
            catalog,
            extra_tools: raw.extra_tools,
        })
    }

    /// What: Read and parse an overrides file.
    ///
    /// Inputs:
    /// - `path`: TOML file.
    ///
    /// Output:
    /// - Parsed overrides; `Error::NotFound` when the file is missing.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let overrides = Self::parse(&text, path)?;
        tracing::debug!(
            path = %path.display(),
            preferences = overrides.catalog.len(),
            extra_tools = overrides.extra_tools.len(),
            "loaded overrides"
        );
        Ok(overrides)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::Overrides;
    use crate::error::Error;
    use crate::prefs::{PreferenceValue, ScalarKind};

    #[test]
    /// What: Every supported value shape parses into the matching preference.
    ///
    /// Inputs:
    /// - TOML with color, font, key stroke, bool, int, text and float entries.
    ///
    /// Output:
    /// - Catalog entries equal to the explicit constructors; float is `unknown`.
    fn parse_all_shapes() {
        let text = r#"
extra_tools = ["Custom.tool"]

[preferences."Search"]
"Highlight Color" = { color = -11974594 }

[preferences."Decompiler"]
"Display.Font" = { font = { size = 12, family = "Hack" } }

[preferences."Key Bindings"]
"Goto" = { keystroke = { key_code = 71, modifiers = 128 } }

[preferences."Misc"]
"Flag" = true
"Count" = 7
"Label" = "abc"
"Ratio" = 1.5
"#;
        let o = Overrides::parse(text, Path::new("theme.toml")).expect("valid overrides");
        assert_eq!(o.extra_tools, ["Custom.tool"]);
        assert_eq!(
            o.catalog.get("Search", "Highlight Color"),
            Some(&PreferenceValue::color(-11_974_594))
        );
        assert_eq!(
            o.catalog.get("Decompiler", "Display.Font"),
            Some(&PreferenceValue::font(12, 0, "Hack"))
        );
        assert_eq!(
            o.catalog.get("Key Bindings", "Goto"),
            Some(&PreferenceValue::key_stroke(71, 128))
        );
        assert_eq!(o.catalog.get("Misc", "Flag"), Some(&PreferenceValue::from(true)));
        assert_eq!(o.catalog.get("Misc", "Count"), Some(&PreferenceValue::from(7)));
        assert_eq!(o.catalog.get("Misc", "Label"), Some(&PreferenceValue::from("abc")));
        let ratio = o.catalog.get("Misc", "Ratio").expect("ratio");
        assert_eq!(ratio.kind(), Some(ScalarKind::Unknown));
        assert_eq!(ratio.encoded_value(), Some("1.5"));
    }

    #[test]
    /// What: Unknown table keys are rejected with a config error.
    ///
    /// Inputs:
    /// - Preference table with a misspelled `colour` key.
    ///
    /// Output:
    /// - `Error::Config` naming the file.
    fn rejects_unknown_shape() {
        let text = "[preferences.Search]\n\"Highlight Color\" = { colour = 1 }\n";
        let err = Overrides::parse(text, Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    /// What: A missing overrides file reports `NotFound`.
    ///
    /// Inputs:
    /// - Path inside an empty temporary directory.
    ///
    /// Output:
    /// - `Error::NotFound`.
    fn load_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = Overrides::load(&dir.path().join("theme.toml")).unwrap_err();
        assert!(err.is_not_found());
    }
}
