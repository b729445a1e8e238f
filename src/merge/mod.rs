//! Applies a preference catalog to a tool document.
//!
//! The engine only ever appends elements or rewrites `VALUE` attributes, so a
//! second pass with the same catalog finds nothing left to do.

use std::collections::HashMap;

use ego_tree::NodeId;
use serde::Serialize;

use crate::error::Result;
use crate::prefs::{Composite, PreferenceCatalog, PreferenceValue, STATE_TAG, Scalar, WRAPPED_TAG};
use crate::tool::{CATEGORY_TAG, Element, ToolDocument};

/// Counters describing what one merge pass changed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    /// `CATEGORY` elements appended to `OPTIONS`.
    pub categories_added: usize,
    /// `STATE` or `WRAPPED_OPTION` elements appended to a category.
    pub preferences_added: usize,
    /// Existing `VALUE` attributes rewritten.
    pub values_updated: usize,
    /// Sub-states created inside an existing `WRAPPED_OPTION`.
    pub substates_added: usize,
    /// `category/name` of preferences left alone because the stored element
    /// does not match the catalog value's shape.
    pub kind_mismatches: Vec<String>,
}

impl MergeReport {
    /// `true` when the pass modified the document.
    #[must_use]
    pub const fn changed(&self) -> bool {
        self.categories_added > 0
            || self.preferences_added > 0
            || self.values_updated > 0
            || self.substates_added > 0
    }
}

/// What: Build a `STATE` element for a scalar.
///
/// Inputs:
/// - `name`: `NAME` attribute.
/// - `scalar`: Kind and encoded value.
///
/// Output:
/// - `<STATE NAME TYPE VALUE/>`.
fn state_element(name: &str, scalar: &Scalar) -> Element {
    Element::new(STATE_TAG)
        .with_attr("NAME", name)
        .with_attr("TYPE", scalar.kind().as_str())
        .with_attr("VALUE", scalar.encoded_value())
}

/// Append a fresh element for `value` at the end of `category`.
fn append_preference(doc: &mut ToolDocument, category: NodeId, name: &str, value: &PreferenceValue) {
    match value {
        PreferenceValue::Scalar(scalar) => {
            doc.append_element(category, state_element(name, scalar));
        }
        PreferenceValue::Composite(composite) => {
            let wrapped = Element::new(WRAPPED_TAG)
                .with_attr("NAME", name)
                .with_attr("CLASS", composite.class_name());
            if let Some(id) = doc.append_element(category, wrapped) {
                for field in composite.fields() {
                    doc.append_element(id, state_element(field.name(), field));
                }
            }
        }
    }
}

/// What: Bring the sub-states of an existing `WRAPPED_OPTION` in line with `composite`.
///
/// Inputs:
/// - `doc`: Document being merged.
/// - `wrapped`: Existing `WRAPPED_OPTION` node.
/// - `composite`: Desired value.
/// - `report`: Counters to update.
///
/// Details:
/// - Missing sub-states are appended; `CLASS` is not touched.
fn update_composite(
    doc: &mut ToolDocument,
    wrapped: NodeId,
    composite: &Composite,
    report: &mut MergeReport,
) {
    let states = doc.index_by_name(wrapped, Some(STATE_TAG));
    for field in composite.fields() {
        match states.get(field.name()) {
            Some(&id) => {
                if doc.set_attr(id, "VALUE", field.encoded_value()) {
                    report.values_updated += 1;
                }
            }
            None => {
                doc.append_element(wrapped, state_element(field.name(), field));
                report.substates_added += 1;
            }
        }
    }
}

/// What: Merge `catalog` into `doc`.
///
/// Inputs:
/// - `doc`: Parsed tool document, modified in place.
/// - `catalog`: Desired preferences.
///
/// Output:
/// - Report of what changed, or `Error::Structure` when the `TOOL`/`OPTIONS`
///   anchors cannot be located. The document is untouched on error.
///
/// Details:
/// - Categories and preferences are looked up by `NAME` among direct children,
///   first occurrence wins. Absent ones are appended at the end of their parent.
/// - Preference lookup stops at the category's direct children rather than
///   searching all descendants, so a sub-state nested in a `WRAPPED_OPTION`
///   (`color`, `size`, ...) never matches a catalog preference of that name.
/// - Existing scalars get their `VALUE` rewritten; `TYPE` is left as stored.
/// - An existing element whose tag does not match the value shape is skipped
///   and recorded in [`MergeReport::kind_mismatches`].
/// - Does not canonicalize.
pub fn merge(doc: &mut ToolDocument, catalog: &PreferenceCatalog) -> Result<MergeReport> {
    let anchors = doc.anchors()?;
    let mut report = MergeReport::default();

    let mut categories: HashMap<String, NodeId> = doc.index_by_name(anchors.options, Some(CATEGORY_TAG));
    for name in catalog.category_names() {
        if categories.contains_key(name) {
            continue;
        }
        let element = Element::new(CATEGORY_TAG).with_attr("NAME", name);
        if let Some(id) = doc.append_element(anchors.options, element) {
            tracing::debug!(path = %doc.path().display(), category = name, "adding category");
            categories.insert(name.to_string(), id);
            report.categories_added += 1;
        }
    }

    for (category_name, prefs) in catalog.categories() {
        let Some(&category) = categories.get(category_name) else {
            continue;
        };
        let existing = doc.index_by_name(category, None);
        for (name, value) in prefs {
            let Some(&id) = existing.get(name.as_str()) else {
                append_preference(doc, category, name, value);
                report.preferences_added += 1;
                continue;
            };
            let stored_tag = doc.element(id).map(|e| e.name().to_string());
            match (value, stored_tag.as_deref()) {
                (PreferenceValue::Scalar(scalar), Some(STATE_TAG)) => {
                    if doc.set_attr(id, "VALUE", scalar.encoded_value()) {
                        report.values_updated += 1;
                    }
                }
                (PreferenceValue::Composite(composite), Some(WRAPPED_TAG)) => {
                    update_composite(doc, id, composite, &mut report);
                }
                (_, found) => {
                    tracing::warn!(
                        path = %doc.path().display(),
                        category = category_name,
                        preference = %name,
                        expected = value.tag(),
                        found = found.unwrap_or_default(),
                        "stored preference has a different shape, leaving it unchanged"
                    );
                    report.kind_mismatches.push(format!("{category_name}/{name}"));
                }
            }
        }
    }

    tracing::debug!(
        path = %doc.path().display(),
        categories_added = report.categories_added,
        preferences_added = report.preferences_added,
        values_updated = report.values_updated,
        substates_added = report.substates_added,
        "merged catalog"
    );
    Ok(report)
}
