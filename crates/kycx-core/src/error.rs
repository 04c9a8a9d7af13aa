//! Error types for the kycx-core library.

use thiserror::Error;

/// Main error type for the kycx library.
#[derive(Error, Debug)]
pub enum KycxError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Form template error.
    #[error("form error: {0}")]
    Form(#[from] FormError),

    /// Field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF text extraction.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors related to filling a form template.
#[derive(Error, Debug)]
pub enum FormError {
    /// The template could not be loaded or saved.
    #[error("failed to process template: {0}")]
    Template(String),

    /// The template has no interactive form.
    #[error("template has no AcroForm fields")]
    NoAcroForm,
}

/// Errors raised by a category extractor.
///
/// Individual rule failures never surface here; they are logged and skipped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// The catalog has no rules for a field the extractor needs.
    #[error("catalog has no rules for {category}.{field}")]
    UnknownField { category: String, field: String },

    /// A category extractor failed for another reason.
    #[error("{category} extraction failed: {reason}")]
    Category { category: String, reason: String },
}

/// Result type for the kycx library.
pub type Result<T> = std::result::Result<T, KycxError>;
