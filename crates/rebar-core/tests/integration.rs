//! Integration tests for the digitize_pdf() end-to-end pipeline.
//!
//! Uses a MockExtractor that returns pre-built PageContent without
//! invoking pdftotext, so these tests run without poppler-utils.

use pretty_assertions::assert_eq;
use rebar_core::error::RebarError;
use rebar_core::extraction::{PageContent, PdfExtractor};
use rebar_core::model::{OutputRow, WarningKind};
use rebar_core::patterns::LinePatternSet;
use rebar_core::{digitize_pages, digitize_pdf};

struct MockExtractor {
    pages: Vec<PageContent>,
}

impl PdfExtractor for MockExtractor {
    fn extract_pages(&self, _pdf_bytes: &[u8]) -> Result<Vec<PageContent>, RebarError> {
        Ok(self.pages.clone())
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

fn page(number: usize, lines: &[&str]) -> PageContent {
    PageContent::new(number, Some(lines.join("\n")))
}

fn mock(pages: Vec<PageContent>) -> MockExtractor {
    MockExtractor { pages }
}

fn patterns() -> &'static LinePatternSet {
    LinePatternSet::builtin()
}

// ---------------------------------------------------------------------------
// Test 1: direct rods scaled by the element's instance count
// ---------------------------------------------------------------------------
#[test]
fn direct_rods_scaled_by_object_count() {
    let extractor = mock(vec![
        page(1, &["Ведомость элементов", "Марка   Кол.", "Км-1    3"]),
        page(2, &["Колонна Км-1", "Пруток ⌀12x500 5"]),
    ]);

    let result = digitize_pdf(&[], &extractor, patterns()).unwrap();

    assert_eq!(
        result.rows,
        vec![OutputRow {
            element: "Км-1".into(),
            name: "Пруток ⌀12x500".into(),
            diameter_mm: 12,
            length_mm: 500,
            direct_rods: 5,
            rods_per_embedded: 0,
            object_count: 3,
            embedded_count: 0,
            total: 15,
        }]
    );
    assert!(result.warnings.is_empty());
}

// ---------------------------------------------------------------------------
// Test 2: rods inside an embedded item use both multipliers
// ---------------------------------------------------------------------------
#[test]
fn embedded_rods_use_both_multipliers() {
    let extractor = mock(vec![
        page(1, &["Км-1 3"]),
        page(
            2,
            &[
                "Колонна Км-1",
                "Изделие закладное ЗД-1",
                "Изделие закладное ЗД-1 4",
                "Пруток ⌀10x300 2",
            ],
        ),
    ]);

    let result = digitize_pdf(&[], &extractor, patterns()).unwrap();

    assert_eq!(result.rows.len(), 1);
    let row = &result.rows[0];
    assert_eq!(row.direct_rods, 0);
    assert_eq!(row.rods_per_embedded, 2);
    assert_eq!(row.embedded_count, 4);
    assert_eq!(row.total, 2 * 4 * 3);
}

// ---------------------------------------------------------------------------
// Test 3: element missing from the summary page counts once
// ---------------------------------------------------------------------------
#[test]
fn element_missing_from_summary_counts_once() {
    let extractor = mock(vec![
        page(1, &["Км-1 3"]),
        page(2, &["Балка Бм-4", "Пруток Ø16x2950 6"]),
    ]);

    let result = digitize_pdf(&[], &extractor, patterns()).unwrap();

    assert_eq!(result.rows[0].element.as_str(), "Бм-4");
    assert_eq!(result.rows[0].object_count, 1);
    assert_eq!(result.rows[0].total, 6);
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].kind, WarningKind::MissingObjectCount);
}

// ---------------------------------------------------------------------------
// Test 4: a new element header ends the previous embedded item
// ---------------------------------------------------------------------------
#[test]
fn new_header_resets_embedded_context() {
    let extractor = mock(vec![
        page(1, &["Км-1 2", "Км-2 5"]),
        page(
            2,
            &[
                "Спецификация элементов Км-1",
                "Изделие закладное ЗД-1",
                "Изделие закладное ЗД-1 4",
                "Пруток Ø10x300 2",
            ],
        ),
        page(3, &["Колонна Км-2", "Пруток Ø10x300 7"]),
    ]);

    let result = digitize_pdf(&[], &extractor, patterns()).unwrap();

    assert_eq!(result.rows.len(), 2);
    let second = &result.rows[1];
    assert_eq!(second.element.as_str(), "Км-2");
    assert_eq!(second.direct_rods, 7);
    assert_eq!(second.rods_per_embedded, 0);
    assert_eq!(second.embedded_count, 0);
    assert_eq!(second.total, 35);
}

// ---------------------------------------------------------------------------
// Test 5: a rod line without a usable size is dropped, not an error
// ---------------------------------------------------------------------------
#[test]
fn unusable_rod_size_is_skipped() {
    let extractor = mock(vec![
        page(1, &["Км-1 1"]),
        page(
            2,
            &[
                "Колонна Км-1",
                "Пруток Ø99999999999999999999999x500 5",
                "Пруток Ø12x500 1",
            ],
        ),
    ]);

    let result = digitize_pdf(&[], &extractor, patterns()).unwrap();

    assert_eq!(result.rows.len(), 1);
    assert_eq!(result.rows[0].diameter_mm, 12);
    assert_eq!(result.skipped_lines.len(), 1);
    assert_eq!(result.skipped_lines[0].page_number, 2);
}

// ---------------------------------------------------------------------------
// Test 6: identical input gives identical output
// ---------------------------------------------------------------------------
#[test]
fn output_is_deterministic() {
    let pages = vec![
        page(1, &["Пм-1 2  Км-1 4  СЖм-3 1"]),
        page(
            2,
            &[
                "Плита Пм-1",
                "ГОСТ 34028-2016 Пруток Ø12x6000-А500С 14",
                "Пруток Ø8x250 40",
                "Колонна Км-1",
                "Пруток Ø20x3100 4",
                "Изделие закладное ЗД-2",
                "Изделие закладное ЗД-2 2",
                "Пруток Ø8x250 6",
            ],
        ),
        page(3, &["Стена СЖм-3", "Пруток Ø12x6000-А500С 9", "Пруток Ø8x250 12"]),
    ];

    let first = digitize_pages(&pages, patterns()).unwrap();
    let second = digitize_pages(&pages, patterns()).unwrap();

    assert_eq!(first.rows, second.rows);
    let order: Vec<(&str, &str)> = first
        .rows
        .iter()
        .map(|r| (r.element.as_str(), r.name.as_str()))
        .collect();
    assert_eq!(
        order,
        vec![
            ("Пм-1", "ГОСТ 34028-2016 Пруток Ø12x6000-А500С"),
            ("Пм-1", "Пруток Ø8x250"),
            ("Км-1", "Пруток Ø20x3100"),
            ("Км-1", "Пруток Ø8x250"),
            ("СЖм-3", "Пруток Ø12x6000-А500С"),
            ("СЖм-3", "Пруток Ø8x250"),
        ]
    );
    // Км-1 Ø8x250 sits in an embedded item: 6 rods * 2 items * 4 columns
    assert_eq!(first.rows[3].total, 48);
}

// ---------------------------------------------------------------------------
// Test 7: empty and prose-only pages produce nothing
// ---------------------------------------------------------------------------
#[test]
fn empty_and_prose_pages_produce_nothing() {
    let extractor = mock(vec![
        PageContent::new(1, None),
        PageContent::new(2, None),
        page(3, &["Общие указания", "Бетон класса B25, W6, F150"]),
        PageContent::new(4, Some(String::new())),
    ]);

    let result = digitize_pdf(&[], &extractor, patterns()).unwrap();

    assert!(result.rows.is_empty());
    assert!(result.object_counts.is_empty());
    let kinds: Vec<WarningKind> = result.warnings.iter().map(|w| w.kind).collect();
    assert_eq!(
        kinds,
        vec![
            WarningKind::EmptyPage,
            WarningKind::EmptyPage,
            WarningKind::NoElementHeaders
        ]
    );
}

// ---------------------------------------------------------------------------
// Test 8: context carries over a page break
// ---------------------------------------------------------------------------
#[test]
fn context_carries_over_page_break() {
    let extractor = mock(vec![
        page(1, &["СТм-2 10"]),
        page(2, &["Стены монолитные СТм-2", "Пруток Ø12x1500 8"]),
        page(3, &["Пруток Ø12x1500 4"]),
    ]);

    let result = digitize_pdf(&[], &extractor, patterns()).unwrap();

    assert_eq!(result.rows.len(), 1);
    assert_eq!(result.rows[0].direct_rods, 12);
    assert_eq!(result.rows[0].total, 120);
}

// ---------------------------------------------------------------------------
// Test 9: repeated embedded counts keep the last one and warn
// ---------------------------------------------------------------------------
#[test]
fn changed_embedded_count_keeps_last_and_warns() {
    let extractor = mock(vec![
        page(1, &["Км-1 1"]),
        page(
            2,
            &[
                "Колонна Км-1",
                "Изделие закладное ЗД-1",
                "Изделие закладное ЗД-1 4",
                "Пруток Ø10x300 2",
                "Изделие закладное ЗД-2 6",
                "Пруток Ø10x300 1",
            ],
        ),
    ]);

    let result = digitize_pdf(&[], &extractor, patterns()).unwrap();

    let row = &result.rows[0];
    assert_eq!(row.rods_per_embedded, 3);
    assert_eq!(row.embedded_count, 6);
    assert_eq!(row.total, 18);
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(
        result.warnings[0].kind,
        WarningKind::EmbeddedCountOverwritten
    );
    assert_eq!(result.warnings[0].page_number, Some(2));
}

#[test]
fn embedded_count_after_zero_scales_earlier_rods_without_warning() {
    let extractor = mock(vec![
        page(1, &["Км-1 1"]),
        page(
            2,
            &[
                "Колонна Км-1",
                "Изделие закладное ЗД-1",
                "Пруток Ø10x300 2",
                "Изделие закладное ЗД-1 4",
                "Пруток Ø10x300 1",
            ],
        ),
    ]);

    let result = digitize_pdf(&[], &extractor, patterns()).unwrap();

    assert_eq!(result.rows.len(), 1);
    assert_eq!(result.rows[0].rods_per_embedded, 3);
    assert_eq!(result.rows[0].embedded_count, 4);
    assert_eq!(result.rows[0].total, 12);
    assert!(result.warnings.is_empty());
}

// ---------------------------------------------------------------------------
// Test 10: numbers too large for a count are dropped, not fatal
// ---------------------------------------------------------------------------
#[test]
fn oversized_numbers_are_dropped() {
    let extractor = mock(vec![
        page(1, &["Км-1 99999999999999999999999 Бм-1 2"]),
        page(
            2,
            &[
                "Колонна Км-1",
                "Изделие закладное ЗД-1",
                "Изделие закладное ЗД-1 99999999999999999999999",
                "Пруток Ø10x300 2",
            ],
        ),
    ]);

    let result = digitize_pdf(&[], &extractor, patterns()).unwrap();

    assert_eq!(result.object_counts.len(), 1);
    assert!(!result.object_counts.contains(&"Км-1".into()));
    assert_eq!(result.skipped_lines.len(), 1);
    assert_eq!(result.skipped_lines[0].page_number, 2);
    assert_eq!(
        result.skipped_lines[0].line_text,
        "Изделие закладное ЗД-1 99999999999999999999999"
    );
    assert_eq!(result.rows[0].embedded_count, 0);
    assert_eq!(result.rows[0].total, 0);
}

// ---------------------------------------------------------------------------
// Test 11: summary page must exist
// ---------------------------------------------------------------------------
#[test]
fn missing_summary_page_is_an_error() {
    let err = digitize_pdf(&[], &mock(vec![]), patterns()).unwrap_err();
    assert!(matches!(err, RebarError::MissingSummaryPage));
}

#[test]
fn summary_page_alone_gives_empty_result() {
    let result = digitize_pages(&[page(1, &["Км-1 3"])], patterns()).unwrap();
    assert!(result.rows.is_empty());
    assert!(result.warnings.is_empty());
    assert_eq!(result.object_counts.len(), 1);
}

#[test]
fn totals_by_spec_sum_across_elements() {
    let pages = vec![
        page(1, &["Км-1 2", "Км-2 3"]),
        page(
            2,
            &[
                "Колонна Км-1",
                "Пруток Ø8x250 4",
                "Колонна Км-2",
                "Пруток Ø8x250 5",
            ],
        ),
    ];

    let result = digitize_pages(&pages, patterns()).unwrap();

    let totals = result.totals_by_spec();
    assert_eq!(totals.len(), 1);
    assert_eq!(totals[0].0.name, "Пруток Ø8x250");
    assert_eq!(totals[0].1, 4 * 2 + 5 * 3);
}
