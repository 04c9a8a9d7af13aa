//! PDF text extraction module.
//!
//! Produces the single normalized string the extraction pipeline expects: all pages
//! concatenated, page breaks collapsed to newlines, each line stripped and blank lines
//! removed.

#[cfg(feature = "pdf")]
mod extractor;

#[cfg(feature = "pdf")]
pub use extractor::{PdfContent, PdfExtractor};

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF text producers.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract the raw text of each page, in order.
    fn extract_pages(&self) -> Result<Vec<String>>;

    /// Extract normalized text from the entire PDF.
    fn extract_text(&self) -> Result<String> {
        let pages = self.extract_pages()?;
        Ok(normalize_text(&pages.join("\n")))
    }
}

/// Normalize raw document text into the form the field extractor expects.
///
/// Form feeds and carriage returns become line breaks, every line is trimmed and empty
/// lines are dropped.
pub fn normalize_text(raw: &str) -> String {
    raw.split(['\n', '\r', '\u{000c}'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_text_strips_and_drops_blank_lines() {
        let raw = "  Name: RAM  \n\n\t\nGender: M\r\n";
        assert_eq!(normalize_text(raw), "Name: RAM\nGender: M");
    }

    #[test]
    fn test_normalize_text_collapses_page_breaks() {
        let raw = "Page one end\u{000c}Page two start";
        assert_eq!(normalize_text(raw), "Page one end\nPage two start");
    }

    #[test]
    fn test_normalize_text_empty() {
        assert_eq!(normalize_text("   \n \n"), "");
    }
}
