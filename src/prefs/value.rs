use std::fmt;

use serde::Serialize;

/// Element tag used for scalar preferences and for composite sub-states.
pub const STATE_TAG: &str = "STATE";
/// Element tag used for composite preferences.
pub const WRAPPED_TAG: &str = "WRAPPED_OPTION";

/// Package prefix of Ghidra's wrapped option classes.
const WRAPPED_CLASS_PREFIX: &str = "ghidra.framework.options.Wrapped";

/// Value classification written to the `TYPE` attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    /// Free text.
    String,
    /// `true` / `false`.
    Boolean,
    /// Signed integer.
    Int,
    /// Anything else; still encoded through its textual form.
    Unknown,
}

impl ScalarKind {
    /// Attribute text for this kind, as Ghidra spells it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Int => "int",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single named state: `NAME`, `TYPE` and text-encoded `VALUE`.
///
/// The name is empty for top-level scalars (the catalog key names them) and
/// set for composite sub-states.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Scalar {
    /// Sub-state name.
    name: String,
    /// Classification fixed at construction.
    kind: ScalarKind,
    /// Textual encoding of the value.
    value: String,
}

impl Scalar {
    /// Text scalar.
    pub fn string(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ScalarKind::String,
            value: value.into(),
        }
    }

    /// Boolean scalar, encoded `true` / `false`.
    pub fn boolean(name: impl Into<String>, value: bool) -> Self {
        Self {
            name: name.into(),
            kind: ScalarKind::Boolean,
            value: value.to_string(),
        }
    }

    /// Integer scalar, encoded in decimal.
    pub fn int(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            kind: ScalarKind::Int,
            value: value.to_string(),
        }
    }

    /// Scalar of a type outside the known set, encoded with `Display`.
    pub fn unknown(name: impl Into<String>, value: impl fmt::Display) -> Self {
        Self {
            name: name.into(),
            kind: ScalarKind::Unknown,
            value: value.to_string(),
        }
    }

    /// Sub-state name (empty for top-level scalars).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value classification.
    #[must_use]
    pub const fn kind(&self) -> ScalarKind {
        self.kind
    }

    /// Text written to the `VALUE` attribute.
    #[must_use]
    pub fn encoded_value(&self) -> &str {
        &self.value
    }
}

/// A structured preference stored as a `WRAPPED_OPTION` with child states.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Composite {
    /// Fully qualified class name emitted into `CLASS`.
    class_name: String,
    /// Sub-states in emission order.
    fields: Vec<Scalar>,
}

impl Composite {
    /// What: Build a composite from a class name and ordered sub-states.
    ///
    /// Inputs:
    /// - `class_name`: Value for the `CLASS` attribute, emitted verbatim.
    /// - `fields`: Named sub-states; their order is the order written to disk.
    ///
    /// Output:
    /// - The composite.
    pub fn new(class_name: impl Into<String>, fields: Vec<Scalar>) -> Self {
        Self {
            class_name: class_name.into(),
            fields,
        }
    }

    /// Fully qualified class name.
    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Ordered sub-states.
    #[must_use]
    pub fn fields(&self) -> &[Scalar] {
        &self.fields
    }

    /// Sub-state by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Scalar> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A preference value as stored in the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum PreferenceValue {
    /// Stored as a `STATE` element with `TYPE` and `VALUE`.
    Scalar(Scalar),
    /// Stored as a `WRAPPED_OPTION` element with `CLASS` and child states.
    Composite(Composite),
}

/// Class name for a `Wrapped<suffix>` option.
fn wrapped_class(suffix: &str) -> String {
    format!("{WRAPPED_CLASS_PREFIX}{suffix}")
}

impl PreferenceValue {
    /// Color stored as a packed ARGB integer in a single `color` state.
    #[must_use]
    pub fn color(argb: i32) -> Self {
        Self::Composite(Composite::new(
            wrapped_class("Color"),
            vec![Scalar::int("color", i64::from(argb))],
        ))
    }

    /// What: Font as `size`, `style` and `family` states.
    ///
    /// Inputs:
    /// - `size`: Point size.
    /// - `style`: AWT style bit flags (0 plain, 1 bold, 2 italic).
    /// - `family`: Font family name.
    ///
    /// Output:
    /// - Composite of class `WrappedFont` with three ordered fields.
    pub fn font(size: i32, style: i32, family: impl Into<String>) -> Self {
        Self::Composite(Composite::new(
            wrapped_class("Font"),
            vec![
                Scalar::int("size", i64::from(size)),
                Scalar::int("style", i64::from(style)),
                Scalar::string("family", family),
            ],
        ))
    }

    /// Key binding as `KeyCode` and `Modifiers` states.
    #[must_use]
    pub fn key_stroke(key_code: i32, modifiers: i32) -> Self {
        Self::Composite(Composite::new(
            wrapped_class("KeyStroke"),
            vec![
                Scalar::int("KeyCode", i64::from(key_code)),
                Scalar::int("Modifiers", i64::from(modifiers)),
            ],
        ))
    }

    /// Element tag this value is stored under.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Scalar(_) => STATE_TAG,
            Self::Composite(_) => WRAPPED_TAG,
        }
    }

    /// Scalar kind, `None` for composites.
    #[must_use]
    pub const fn kind(&self) -> Option<ScalarKind> {
        match self {
            Self::Scalar(s) => Some(s.kind),
            Self::Composite(_) => None,
        }
    }

    /// Encoded scalar value, `None` for composites.
    #[must_use]
    pub fn encoded_value(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => Some(s.encoded_value()),
            Self::Composite(_) => None,
        }
    }

    /// Composite sub-states, `None` for scalars.
    #[must_use]
    pub fn fields(&self) -> Option<&[Scalar]> {
        match self {
            Self::Scalar(_) => None,
            Self::Composite(c) => Some(c.fields()),
        }
    }
}

impl From<bool> for PreferenceValue {
    fn from(value: bool) -> Self {
        Self::Scalar(Scalar::boolean("", value))
    }
}

impl From<i32> for PreferenceValue {
    fn from(value: i32) -> Self {
        Self::Scalar(Scalar::int("", i64::from(value)))
    }
}

impl From<i64> for PreferenceValue {
    fn from(value: i64) -> Self {
        Self::Scalar(Scalar::int("", value))
    }
}

impl From<&str> for PreferenceValue {
    fn from(value: &str) -> Self {
        Self::Scalar(Scalar::string("", value))
    }
}

impl From<String> for PreferenceValue {
    fn from(value: String) -> Self {
        Self::Scalar(Scalar::string("", value))
    }
}

impl From<f64> for PreferenceValue {
    fn from(value: f64) -> Self {
        Self::Scalar(Scalar::unknown("", value))
    }
}

impl From<Scalar> for PreferenceValue {
    fn from(value: Scalar) -> Self {
        Self::Scalar(value)
    }
}
