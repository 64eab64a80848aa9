pub mod pdftotext;

use crate::error::RebarError;

/// Text of a single page of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContent {
    /// 1-based physical page number.
    pub page_number: usize,
    /// `None` when the page has no extractable text.
    pub text: Option<String>,
}

impl PageContent {
    pub fn new(page_number: usize, text: Option<String>) -> Self {
        PageContent { page_number, text }
    }

    /// The page text, or `None` if it is absent or blank.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.trim().is_empty())
    }
}

/// Number page texts in document order, starting at 1.
pub fn pages_from_texts(texts: Vec<Option<String>>) -> Vec<PageContent> {
    texts
        .into_iter()
        .enumerate()
        .map(|(i, text)| PageContent::new(i + 1, text))
        .collect()
}

/// Trait for PDF text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract text from PDF bytes, returning one PageContent per physical page
    /// in page order.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, RebarError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
