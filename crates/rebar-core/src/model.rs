use serde::{Deserialize, Serialize};
use std::fmt;

use crate::objects::ObjectCounts;

/// Column names of the exported bill of materials, in order.
///
/// The exporter writes these verbatim; they are the contract with the
/// spreadsheet consumers.
pub const COLUMNS: [&str; 9] = [
    "Элемент",
    "Наименование",
    "Диаметр",
    "Длина, мм",
    "Прутки напрямую",
    "Прутки в ЗД",
    "Количество объектов",
    "Количество ЗД",
    "Общее количество",
];

/// Code of a structural element type, e.g. `Км-1` or `СЖм-12`.
///
/// Identifies a design, not a single physical instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementCode(String);

impl ElementCode {
    pub fn new(code: impl Into<String>) -> Self {
        ElementCode(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementCode {
    fn from(s: &str) -> Self {
        ElementCode::new(s)
    }
}

/// Diameter and length parsed out of a rod name, in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RodSize {
    pub diameter_mm: u64,
    pub length_mm: u64,
}

impl fmt::Display for RodSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ø{}x{}", self.diameter_mm, self.length_mm)
    }
}

/// Identity of one reinforcing-rod specification.
///
/// The full descriptive name is part of the identity: two lines with the same
/// size but a different standards reference are different specs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RodSpec {
    pub name: String,
    pub diameter_mm: u64,
    pub length_mm: u64,
}

impl RodSpec {
    pub fn new(name: impl Into<String>, size: RodSize) -> Self {
        RodSpec {
            name: name.into(),
            diameter_mm: size.diameter_mm,
            length_mm: size.length_mm,
        }
    }
}

/// One row of the bill of materials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRow {
    #[serde(rename = "Элемент")]
    pub element: ElementCode,
    #[serde(rename = "Наименование")]
    pub name: String,
    #[serde(rename = "Диаметр")]
    pub diameter_mm: u64,
    #[serde(rename = "Длина, мм")]
    pub length_mm: u64,
    #[serde(rename = "Прутки напрямую")]
    pub direct_rods: u64,
    #[serde(rename = "Прутки в ЗД")]
    pub rods_per_embedded: u64,
    #[serde(rename = "Количество объектов")]
    pub object_count: u64,
    #[serde(rename = "Количество ЗД")]
    pub embedded_count: u64,
    #[serde(rename = "Общее количество")]
    pub total: u64,
}

/// A recognized line whose numbers could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedLine {
    pub page_number: usize,
    pub line_text: String,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// A body page had no extractable text.
    EmptyPage,
    /// An element has rows but no entry on the summary page; multiplier 1 was used.
    MissingObjectCount,
    /// An embedded-item count replaced a different earlier count for the same row.
    EmbeddedCountOverwritten,
    /// No element header was found anywhere in the body pages.
    NoElementHeaders,
}

/// Non-fatal condition noticed while digitizing a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number: Option<usize>,
    pub kind: WarningKind,
    pub message: String,
}

/// Result of digitizing one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Digitization {
    pub rows: Vec<OutputRow>,
    pub object_counts: ObjectCounts,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<Warning>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_lines: Vec<SkippedLine>,
}

impl Digitization {
    /// Project-wide totals per rod spec, summed over every element.
    ///
    /// Specs appear in the order of their first row.
    pub fn totals_by_spec(&self) -> Vec<(RodSpec, u64)> {
        let mut totals: Vec<(RodSpec, u64)> = Vec::new();
        for row in &self.rows {
            let spec = RodSpec {
                name: row.name.clone(),
                diameter_mm: row.diameter_mm,
                length_mm: row.length_mm,
            };
            match totals.iter_mut().find(|(s, _)| *s == spec) {
                Some((_, total)) => *total = total.saturating_add(row.total),
                None => totals.push((spec, row.total)),
            }
        }
        totals
    }
}
