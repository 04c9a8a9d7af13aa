//! Core library for KYC form extraction.
//!
//! This crate provides:
//! - PDF text extraction and text normalization
//! - A pattern catalog of guarded regex rules per form field
//! - Section-aware field extraction with per-field normalization
//! - Mapping of extracted records onto AcroForm templates

pub mod error;
pub mod extract;
pub mod form;
pub mod models;
pub mod pdf;

pub use error::{KycxError, Result};
pub use extract::{
    Category, DocumentParser, ExtractionResult, ExtractionStatus, FieldCatalog, FieldRule, FormParser,
    RuleOutcome,
};
pub use form::{FieldMapper, FieldSink, FieldUpdates, FillReport, SinkValue};
pub use models::config::KycxConfig;
pub use models::record::{ExtractedRecord, ExtractionSummary};
pub use pdf::{normalize_text, PdfProcessor};

#[cfg(feature = "pdf")]
pub use form::AcroFormFiller;
#[cfg(feature = "pdf")]
pub use pdf::{PdfContent, PdfExtractor};
