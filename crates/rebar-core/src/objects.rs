use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::ElementCode;
use crate::patterns::LinePatternSet;

/// Number of physical instances of each element type in the project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectCounts(BTreeMap<ElementCode, u64>);

impl ObjectCounts {
    /// Instance count of an element, or 1 when the summary page does not list it.
    pub fn get(&self, code: &ElementCode) -> u64 {
        self.0.get(code).copied().unwrap_or(1)
    }

    pub fn contains(&self, code: &ElementCode) -> bool {
        self.0.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(ElementCode, u64)> for ObjectCounts {
    /// Later pairs for the same code replace earlier ones.
    fn from_iter<I: IntoIterator<Item = (ElementCode, u64)>>(iter: I) -> Self {
        ObjectCounts(iter.into_iter().collect())
    }
}

/// Read the element instance counts from the summary page.
///
/// Every `code count` pair anywhere on the page is taken; a page without
/// text yields an empty map.
pub fn extract_object_counts(page_text: Option<&str>, patterns: &LinePatternSet) -> ObjectCounts {
    let text = match page_text {
        Some(t) if !t.trim().is_empty() => t,
        _ => {
            tracing::debug!("summary page has no text, every element counts once");
            return ObjectCounts::default();
        }
    };

    let counts: ObjectCounts = patterns.object_pairs(text).collect();
    tracing::debug!(elements = counts.len(), "read object counts from summary page");
    counts
}
