//! Built-in dark palette.

use super::catalog::PreferenceCatalog;
use super::value::PreferenceValue;

/// Editor font used by the listing and the decompiler.
const MONO_FONT: (i32, i32, &str) = (14, 0, "Monospaced");

/// Colors for the `Listing Fields` category.
const LISTING_FIELDS: &[(&str, i32)] = &[
    ("Cursor Text Highlight.Highlight Color", -13_157_567),
    ("Cursor Text Highlight.Scoped Write Highlight Color", -13_157_567),
    ("Cursor Text Highlight.Scoped Read Highlight Color", -13_157_567),
    ("Selection Colors.Selection Color", -11_118_501),
    ("Selection Colors.Difference Color", -11_118_501),
    ("Selection Colors.Highlight Color", -11_118_501),
    ("Cursor.Cursor Color - Focused", -3_815_226),
    ("Cursor.Cursor Color - Unfocused", -13_157_567),
    ("Cursor.Highlight Cursor Line Color", -13_157_567),
];

/// Colors for the `Decompiler` category.
const DECOMPILER: &[(&str, i32)] = &[
    ("Display.Color for Keywords", -2_190_497),
    ("Display.Background Color", -14_144_978),
    ("Display.Color for Parameters", -8_034_417),
    ("Display.Color for Constants", -5_946_814),
    ("Display.Color for Current Variable Highlight", -13_157_567),
    ("Display.Color Default", -3_815_226),
    ("Display.Color for Types", -7_564_224),
    ("Display.Color for Variables", -3_815_226),
    ("Display.Color for Comments", -10_518_115),
    ("Display.Color for Function names", -10_580_601),
];

/// Colors for the `Search` category.
const SEARCH: &[(&str, i32)] = &[
    ("Highlight Color for Current Match", -11_974_594),
    ("Highlight Color", -11_974_594),
];

/// Colors for the `Listing Display` category.
const LISTING_DISPLAY: &[(&str, i32)] = &[
    ("Background Color", -14_144_978),
    ("Mnemonic Color", -3_815_226),
    ("Bad Reference Address Color", -5_946_814),
    ("XRef Write Color", -2_190_497),
    ("Address Color", -10_066_330),
    ("Function Parameters Color", -3_815_226),
    ("Function Return Type Color", -3_815_226),
    ("Comment, Referenced Repeatable Color", -10_518_115),
    ("Constant Color", -5_946_814),
    ("XRef Other Color", -3_815_226),
    ("EOL Comment Color", -10_518_115),
    ("Labels, Primary Color", -10_518_115),
    ("Function Tag Color", -8_034_417),
    ("Bytes Color", -8_281_410),
    ("Post-Comment Color", -10_518_115),
    ("Function Call-Fixup Color", -5_073_733),
    ("Plate Comment Color", -10_518_115),
    ("Labels, Unreferenced Color", -3_815_226),
    ("Entry Point Color", -3_815_226),
    ("Pre-Comment Color", -10_518_115),
    ("Mnemonic, Override Color", -3_815_226),
    ("External Reference, Resolved Color", -10_580_601),
    ("Parameter, Dynamic Storage Color", -10_580_601),
    ("Parameter, Custom Storage Color", -8_034_417),
    ("Underline Color", -5_073_733),
    ("Field Name Color", -3_815_226),
    ("XRef Read Color", -10_518_115),
    ("Separator Color", -3_815_226),
    ("Version Track Color", -5_073_733),
    ("Comment, Automatic Color", -10_518_115),
    ("XRef Color", -7_564_224),
    ("Variable Color", -8_034_417),
    ("Flow Arrow, Active Color", -3_815_226),
    ("Labels, Local Color", -7_564_224),
    ("Function Name Color", -10_580_601),
    ("Comment, Repeatable Color", -10_518_115),
];

/// Insert a table of colors under one category.
fn insert_colors(catalog: &mut PreferenceCatalog, category: &str, colors: &[(&str, i32)]) {
    for (name, argb) in colors {
        catalog.insert(category, *name, PreferenceValue::color(*argb));
    }
}

/// What: Build the dark theme catalog shipped with the binary.
///
/// Inputs:
/// - None.
///
/// Output:
/// - Catalog covering listing, decompiler, search and comment preferences.
///
/// Details:
/// - Colors are packed ARGB integers as Ghidra stores them (`-14144978` is `#282A2E`).
/// - The editor font is set for both the listing and the decompiler.
#[must_use]
pub fn dark_catalog() -> PreferenceCatalog {
    let (size, style, family) = MONO_FONT;
    let mut catalog = PreferenceCatalog::new();
    insert_colors(&mut catalog, "Listing Fields", LISTING_FIELDS);
    insert_colors(&mut catalog, "Decompiler", DECOMPILER);
    catalog.insert(
        "Decompiler",
        "Display.Font",
        PreferenceValue::font(size, style, family),
    );
    insert_colors(&mut catalog, "Search", SEARCH);
    insert_colors(&mut catalog, "Listing Display", LISTING_DISPLAY);
    catalog.insert(
        "Listing Display",
        "BASE FONT",
        PreferenceValue::font(size, style, family),
    );
    catalog.insert("Comments", "Enter accepts comment", true);
    catalog
}
