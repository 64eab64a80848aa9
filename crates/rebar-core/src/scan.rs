use crate::extraction::PageContent;
use crate::model::{ElementCode, RodSize, SkippedLine};
use crate::patterns::{LinePatternSet, LineKind};

/// Scan state between two lines of the body pages.
///
/// Holds the element being read, whether rods now belong to an embedded
/// item, and how many instances of that item the element holds. Each line
/// produces the next value and at most one rod event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanContext {
    pub current_element: Option<ElementCode>,
    pub in_embedded: bool,
    /// Last embedded-item instance count seen in the current element.
    pub embedded_quantity: u64,
}

/// Rod quantity read from one rod line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RodEvent {
    pub element: ElementCode,
    pub name: String,
    pub size: RodSize,
    pub quantity: u64,
    /// Embedded-item instance count active at the line, `None` for rods
    /// placed directly in the element.
    pub embedded: Option<u64>,
}

/// What a line did to the scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The context changed (header or embedded-item line).
    Context,
    Event(RodEvent),
    /// A recognized line was dropped because its numbers could not be used.
    Skipped { reason: String },
    Ignored,
}

impl ScanContext {
    /// Context right after an element header: direct rods, no embedded count.
    pub fn enter(element: ElementCode) -> Self {
        ScanContext {
            current_element: Some(element),
            in_embedded: false,
            embedded_quantity: 0,
        }
    }

    /// Classify one line and compute the context for the next line.
    pub fn step(self, line: &str, patterns: &LinePatternSet) -> (ScanContext, Outcome) {
        match patterns.classify(line, self.current_element.is_some()) {
            LineKind::SectionMarker(code) => {
                tracing::debug!(element = %code, "entering element section");
                (ScanContext::enter(code), Outcome::Context)
            }
            LineKind::ElementHeader { category, code } => {
                tracing::debug!(element = %code, %category, "entering element");
                (ScanContext::enter(code), Outcome::Context)
            }
            LineKind::EmbeddedQuantity { item, quantity } => {
                tracing::debug!(%item, quantity, "embedded item count");
                (
                    ScanContext {
                        embedded_quantity: quantity,
                        ..self
                    },
                    Outcome::Context,
                )
            }
            LineKind::EmbeddedHeader { item } => {
                tracing::debug!(%item, "entering embedded item");
                (
                    ScanContext {
                        in_embedded: true,
                        ..self
                    },
                    Outcome::Context,
                )
            }
            LineKind::RodLine {
                name,
                size,
                quantity,
            } => {
                let element = match self.current_element.clone() {
                    Some(e) => e,
                    None => return (self, Outcome::Ignored),
                };
                let event = RodEvent {
                    element,
                    name,
                    size,
                    quantity,
                    embedded: self.in_embedded.then_some(self.embedded_quantity),
                };
                (self, Outcome::Event(event))
            }
            LineKind::Unparseable { reason } => (self, Outcome::Skipped { reason }),
            LineKind::Unrecognized => (self, Outcome::Ignored),
        }
    }
}

/// Summary of a scan over the body pages.
#[derive(Debug, Clone, Default)]
pub struct ScanSummary {
    /// Context after the last line.
    pub context: ScanContext,
    pub events: usize,
    /// Page numbers of body pages without text.
    pub empty_pages: Vec<usize>,
    pub skipped_lines: Vec<SkippedLine>,
    pub saw_element: bool,
}

/// Walk the body pages in order, handing every rod event to `on_event`
/// together with its page number.
///
/// Context carries over page breaks; only a new element header resets it.
pub fn scan_pages<F>(
    pages: &[PageContent],
    patterns: &LinePatternSet,
    mut on_event: F,
) -> ScanSummary
where
    F: FnMut(usize, RodEvent),
{
    let mut summary = ScanSummary::default();
    let mut context = ScanContext::default();

    for page in pages {
        let text = match page.text() {
            Some(t) => t,
            None => {
                tracing::warn!(page = page.page_number, "page has no text, skipping");
                summary.empty_pages.push(page.page_number);
                continue;
            }
        };

        for line in text.lines() {
            if line.trim().is_empty() {
                continue;
            }

            let (next, outcome) = context.step(line, patterns);
            context = next;

            match outcome {
                Outcome::Context => summary.saw_element = true,
                Outcome::Event(event) => {
                    summary.events += 1;
                    on_event(page.page_number, event);
                }
                Outcome::Skipped { reason } => {
                    tracing::warn!(page = page.page_number, %reason, "skipping line");
                    summary.skipped_lines.push(SkippedLine {
                        page_number: page.page_number,
                        line_text: line.trim().to_string(),
                        reason,
                    });
                }
                Outcome::Ignored => {}
            }
        }
    }

    summary.context = context;
    summary
}
