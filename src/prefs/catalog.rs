use std::collections::BTreeMap;

use serde::Serialize;

use super::value::PreferenceValue;

/// Preferences of one category, keyed by preference name.
pub type CategoryPrefs = BTreeMap<String, PreferenceValue>;

/// Desired end state: category name → preference name → value.
///
/// Both levels are ordered maps so that categories and preferences appended
/// to a document always come out in the same order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PreferenceCatalog {
    /// Category map.
    categories: BTreeMap<String, CategoryPrefs>,
}

impl PreferenceCatalog {
    /// Empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// What: Insert or replace a single preference.
    ///
    /// Inputs:
    /// - `category`: Category name (`CATEGORY NAME=...`).
    /// - `name`: Preference name within the category.
    /// - `value`: Desired value.
    ///
    /// Output:
    /// - The previous value for that key, if any.
    pub fn insert(
        &mut self,
        category: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<PreferenceValue>,
    ) -> Option<PreferenceValue> {
        self.categories
            .entry(category.into())
            .or_default()
            .insert(name.into(), value.into())
    }

    /// Builder form of [`PreferenceCatalog::insert`].
    #[must_use]
    pub fn with(
        mut self,
        category: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<PreferenceValue>,
    ) -> Self {
        self.insert(category, name, value);
        self
    }

    /// What: Layer another catalog over this one.
    ///
    /// Inputs:
    /// - `other`: Catalog whose entries win on conflict.
    ///
    /// Output:
    /// - None; `self` gains every entry of `other`.
    pub fn overlay(&mut self, other: Self) {
        for (category, prefs) in other.categories {
            self.categories.entry(category).or_default().extend(prefs);
        }
    }

    /// Iterate categories in name order.
    pub fn categories(&self) -> impl Iterator<Item = (&str, &CategoryPrefs)> {
        self.categories.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Category names in name order.
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// Look up one preference.
    #[must_use]
    pub fn get(&self, category: &str, name: &str) -> Option<&PreferenceValue> {
        self.categories.get(category).and_then(|c| c.get(name))
    }

    /// Total number of preferences across all categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.values().map(BTreeMap::len).sum()
    }

    /// `true` when no preference is defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
