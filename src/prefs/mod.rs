//! Preference model: typed values, the catalog, the built-in dark palette
//! and user overrides.

/// Category → name → value map.
mod catalog;
/// Built-in dark theme data.
mod dark;
/// TOML overrides file.
mod overrides;
/// Scalar and composite preference values.
mod value;

pub use catalog::{CategoryPrefs, PreferenceCatalog};
pub use dark::dark_catalog;
pub use overrides::Overrides;
pub use value::{Composite, PreferenceValue, STATE_TAG, Scalar, ScalarKind, WRAPPED_TAG};
