pub mod aggregate;
pub mod error;
pub mod extraction;
pub mod model;
pub mod objects;
pub mod patterns;
pub mod profile;
pub mod project;
pub mod scan;

use std::collections::BTreeSet;

use aggregate::AggregationTable;
use error::RebarError;
use extraction::{PageContent, PdfExtractor};
use model::{Digitization, ElementCode, Warning, WarningKind};
use patterns::LinePatternSet;

pub use model::COLUMNS;

/// Main API entry point: digitize a PDF specification into a bill of materials.
///
/// The first page is the summary page with element instance counts; every
/// following page is read as specification body.
pub fn digitize_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    patterns: &LinePatternSet,
) -> Result<Digitization, RebarError> {
    let pages = extractor.extract_pages(pdf_bytes)?;
    tracing::debug!(
        backend = extractor.backend_name(),
        pages = pages.len(),
        "extracted page text"
    );
    digitize_pages(&pages, patterns)
}

/// Digitize already-extracted page text.
///
/// `pages[0]` is the summary page and must be present, even if it has no
/// text. Beyond that, content never causes an error: pages, lines and rods
/// that cannot be used are dropped and reported in the result's warnings
/// and skipped lines.
pub fn digitize_pages(
    pages: &[PageContent],
    patterns: &LinePatternSet,
) -> Result<Digitization, RebarError> {
    let (summary_page, body) = pages.split_first().ok_or(RebarError::MissingSummaryPage)?;

    let object_counts = objects::extract_object_counts(summary_page.text(), patterns);

    let mut table = AggregationTable::new();
    let mut overwrites = Vec::new();
    let summary = scan::scan_pages(body, patterns, |page_number, event| {
        if let Some(overwrite) = table.record(event) {
            overwrites.push((page_number, overwrite));
        }
    });

    let rows = project::project_rows(&table, &object_counts);

    let mut warnings: Vec<Warning> = summary
        .empty_pages
        .iter()
        .map(|&page_number| Warning {
            page_number: Some(page_number),
            kind: WarningKind::EmptyPage,
            message: "page has no extractable text".into(),
        })
        .collect();

    for (page_number, overwrite) in overwrites {
        warnings.push(Warning {
            page_number: Some(page_number),
            kind: WarningKind::EmbeddedCountOverwritten,
            message: format!(
                "{} / {}: embedded item count {} replaced earlier count {}; earlier embedded rods are now scaled by {}",
                overwrite.key.element,
                overwrite.key.rod.name,
                overwrite.current,
                overwrite.previous,
                overwrite.current
            ),
        });
    }

    let unlisted: BTreeSet<&ElementCode> = rows
        .iter()
        .map(|r| &r.element)
        .filter(|e| !object_counts.contains(e))
        .collect();
    for element in unlisted {
        warnings.push(Warning {
            page_number: None,
            kind: WarningKind::MissingObjectCount,
            message: format!("{element} is not listed on the summary page, counted once"),
        });
    }

    if !body.is_empty() && !summary.saw_element {
        warnings.push(Warning {
            page_number: None,
            kind: WarningKind::NoElementHeaders,
            message: "no element header found in the document".into(),
        });
    }

    tracing::info!(
        pages = pages.len(),
        elements = object_counts.len(),
        rows = rows.len(),
        warnings = warnings.len(),
        skipped = summary.skipped_lines.len(),
        "digitized document"
    );

    Ok(Digitization {
        rows,
        object_counts,
        warnings,
        skipped_lines: summary.skipped_lines,
    })
}
