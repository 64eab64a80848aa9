use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Vocabulary used to recognize the line shapes of a specification document.
///
/// Phrases may contain several words; any run of whitespace in the document
/// matches the single spaces written here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternProfile {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    /// Structural element code prefixes, e.g. "Км" for `Км-1`.
    pub element_prefixes: Vec<String>,
    #[serde(default)]
    pub element_descriptions: BTreeMap<String, String>,
    /// Category names that open an element header ("Колонна Км-1").
    pub element_categories: Vec<String>,
    /// Phrase announcing a section of element specifications.
    pub section_marker: String,
    pub embedded_item_label: String,
    /// Code prefix of embedded items, e.g. "ЗД" for `ЗД-3`.
    pub embedded_item_prefix: String,
    pub rod_keyword: String,
    /// Standards reference that may precede the rod keyword ("ГОСТ 5781-82").
    pub standard_prefix: String,
}
