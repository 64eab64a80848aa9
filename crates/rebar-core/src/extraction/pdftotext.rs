use crate::error::RebarError;
use crate::extraction::{PageContent, PdfExtractor};
use std::io::Write;
use std::process::Command;

/// PDF extraction backend using pdftotext (from poppler-utils).
///
/// Uses `pdftotext -layout` so that each table row of the specification
/// stays on one line.
pub struct PdftotextExtractor;

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for PdftotextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, RebarError> {
        // pdftotext only reads from a path; the temp file is removed on drop.
        let mut tmpfile =
            tempfile::NamedTempFile::new().map_err(|e| RebarError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(pdf_bytes)
            .map_err(|e| RebarError::Extraction(e.to_string()))?;

        let output = Command::new("pdftotext")
            .arg("-layout")
            .arg("-enc")
            .arg("UTF-8")
            .arg(tmpfile.path())
            .arg("-") // output to stdout
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    RebarError::PdftotextNotFound
                } else {
                    RebarError::Extraction(format!("pdftotext failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(RebarError::PdftotextFailed { code, stderr });
        }

        let text = String::from_utf8_lossy(&output.stdout);
        let pages = split_pages(&text);
        tracing::debug!(pages = pages.len(), "pdftotext extracted document");
        Ok(pages)
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

/// Split pdftotext output into pages.
///
/// pdftotext ends every page with a form feed, so the piece after the last
/// one is not a page.
fn split_pages(text: &str) -> Vec<PageContent> {
    let mut pieces: Vec<&str> = text.split('\x0c').collect();
    if pieces.len() > 1 && pieces.last().is_some_and(|p| p.trim().is_empty()) {
        pieces.pop();
    }

    pieces
        .into_iter()
        .enumerate()
        .map(|(i, page_text)| {
            let text = if page_text.trim().is_empty() {
                None
            } else {
                Some(page_text.to_string())
            };
            PageContent::new(i + 1, text)
        })
        .collect()
}
