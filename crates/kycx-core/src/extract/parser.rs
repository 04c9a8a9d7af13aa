//! Extraction orchestrator: one pass over a document's text into a flat record.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, trace, warn};

use super::catalog::FieldCatalog;
use super::field::{extract_field, FieldMatch};
use super::normalize::{
    clean_occupation_value, clean_text, cross_validate, digits_only, normalize_account_type,
    normalize_beneficiary_id, normalize_citizenship, normalize_date_of_birth, normalize_gender,
    normalize_issue_date, normalize_pan, normalize_person_name, normalize_yes_no,
    strip_whitespace, truncate_at_label,
};
use super::rule::FieldRule;
use super::sections::{without_other_blocks, AddressSections};
use super::{Category, DocumentParser, Result};
use crate::error::ExtractionError;
use crate::models::config::{ExtractionConfig, FailurePolicy};
use crate::models::record::{ExtractedRecord, ExtractionSummary};

/// Confidence multiplier for address values found outside their section view.
const FULL_TEXT_PENALTY: f32 = 0.75;

/// How a parse ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ExtractionStatus {
    /// Every category extractor ran.
    Complete,
    /// Some categories failed and were left out.
    Partial { failed: Vec<Category> },
    /// A category failed and the record was discarded.
    Failed { category: Category, reason: String },
}

impl ExtractionStatus {
    pub fn is_complete(&self) -> bool {
        matches!(self, ExtractionStatus::Complete)
    }
}

/// Result of extracting one document.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    /// Extracted fields.
    pub record: ExtractedRecord,
    /// Field counts per category.
    pub summary: ExtractionSummary,
    /// Extraction warnings.
    pub warnings: Vec<String>,
    /// Confidence of every field in the record.
    pub field_confidence: BTreeMap<String, f32>,
    /// How the parse ended.
    pub status: ExtractionStatus,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

impl ExtractionResult {
    fn empty(status: ExtractionStatus, warnings: Vec<String>, started: Instant) -> Self {
        Self {
            record: ExtractedRecord::new(),
            summary: ExtractionSummary::default(),
            warnings,
            field_confidence: BTreeMap::new(),
            status,
            processing_time_ms: started.elapsed().as_millis() as u64,
        }
    }

    /// Confidence of a record key.
    pub fn confidence(&self, key: &str) -> Option<f32> {
        self.field_confidence.get(key).copied()
    }
}

struct Extracted {
    key: String,
    value: String,
    confidence: f32,
}

/// What one category extractor produced.
#[derive(Default)]
struct CategoryOutput {
    values: Vec<Extracted>,
    warnings: Vec<String>,
}

impl CategoryOutput {
    fn push(&mut self, category: Category, field: &str, value: Option<String>, confidence: f32) {
        match value {
            Some(value) => {
                trace!("{}.{} = {:?} ({:.2})", category, field, value, confidence);
                self.values.push(Extracted {
                    key: category.output_key(field),
                    value,
                    confidence,
                });
            }
            None => trace!("{}.{} rejected by normalization", category, field),
        }
    }

    fn get(&self, key: &str) -> Option<&Extracted> {
        self.values.iter().find(|v| v.key == key)
    }
}

/// Catalog-driven KYC form parser.
pub struct FormParser {
    catalog: Arc<FieldCatalog>,
    failure_policy: FailurePolicy,
    address_full_text_fallback: bool,
    validate_dates: bool,
}

impl FormParser {
    /// Create a parser over a shared catalog with default settings.
    pub fn new(catalog: Arc<FieldCatalog>) -> Self {
        let defaults = ExtractionConfig::default();
        Self {
            catalog,
            failure_policy: defaults.failure_policy,
            address_full_text_fallback: defaults.address_full_text_fallback,
            validate_dates: defaults.validate_dates,
        }
    }

    /// Apply extraction configuration.
    pub fn with_config(mut self, config: &ExtractionConfig) -> Self {
        self.failure_policy = config.failure_policy;
        self.address_full_text_fallback = config.address_full_text_fallback;
        self.validate_dates = config.validate_dates;
        self
    }

    /// Set the behaviour when a category extractor fails.
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Retry address rules on the whole text when a section view yields nothing.
    pub fn with_address_fallback(mut self, enabled: bool) -> Self {
        self.address_full_text_fallback = enabled;
        self
    }

    /// Set calendar validation of dates of birth.
    pub fn with_date_validation(mut self, validate: bool) -> Self {
        self.validate_dates = validate;
        self
    }

    pub fn catalog(&self) -> &FieldCatalog {
        &self.catalog
    }

    fn rules(&self, category: Category, field: &str) -> Result<&[FieldRule]> {
        self.catalog
            .rules(category, field)
            .ok_or_else(|| ExtractionError::UnknownField {
                category: category.to_string(),
                field: field.to_string(),
            })
    }

    fn extract_category(
        &self,
        category: Category,
        text: &str,
        sections: &AddressSections,
    ) -> Result<CategoryOutput> {
        match category {
            Category::Personal => self.extract_fields(category, text, |f, v| self.normalize_personal(f, v)),
            Category::CurrentAddress | Category::PermanentAddress => {
                self.extract_address(category, text, sections)
            }
            Category::FamilyMembers => self.extract_family(text),
            Category::BankDetails => self.extract_fields(category, text, |field, value| match field {
                "account_type" => normalize_account_type(value),
                "account_number" => digits_only(value),
                _ => clean_text(value),
            }),
            Category::Occupation => self.extract_occupation(text),
            Category::GuardianDetails | Category::FinancialDetails => {
                self.extract_fields(category, text, |_, value| clean_text(value))
            }
            Category::MinorContact => self.extract_fields(category, text, |_, value| strip_whitespace(value)),
            Category::TemporaryAddress => self.extract_fields(category, text, truncate_at_label),
            Category::MoneyLaundering => self.extract_fields(category, text, |_, value| normalize_yes_no(value)),
        }
    }

    /// Run every field of a category against `text` and normalize what matched.
    fn extract_fields<F>(&self, category: Category, text: &str, normalize: F) -> Result<CategoryOutput>
    where
        F: Fn(&str, &str) -> Option<String>,
    {
        let mut output = CategoryOutput::default();
        for field in category.fields() {
            let rules = self.rules(category, field)?;
            if let Some(found) = extract_field(text, rules) {
                output.push(category, field, normalize(field, &found.value), found.confidence());
            }
        }
        Ok(output)
    }

    fn normalize_personal(&self, field: &str, value: &str) -> Option<String> {
        match field {
            "name" => normalize_person_name(value, field),
            "date_of_birth" => normalize_date_of_birth(value, self.validate_dates),
            "gender" => normalize_gender(value),
            "citizenship_no" => normalize_citizenship(value),
            "beneficiary_id" => normalize_beneficiary_id(value),
            "pan_no" => normalize_pan(value),
            "issue_date" => normalize_issue_date(value),
            _ => clean_text(value),
        }
    }

    fn extract_address(
        &self,
        category: Category,
        text: &str,
        sections: &AddressSections,
    ) -> Result<CategoryOutput> {
        let section = category.section();
        let view = section
            .and_then(|section| sections.view(section))
            .unwrap_or_default();

        // The other address block never supplies values for this one.
        let scope = match section {
            Some(section) if self.address_full_text_fallback => Some(without_other_blocks(text, section)),
            None if self.address_full_text_fallback => Some(text.to_string()),
            _ => None,
        };

        let mut output = CategoryOutput::default();
        for field in category.fields() {
            let rules = self.rules(category, field)?;
            if let Some((found, confidence)) = find_address(view, scope.as_deref(), rules) {
                output.push(category, field, truncate_at_label(field, &found.value), confidence);
            }
        }
        Ok(output)
    }

    fn extract_family(&self, text: &str) -> Result<CategoryOutput> {
        let category = Category::FamilyMembers;
        let mut names = BTreeMap::new();
        let mut scores = BTreeMap::new();

        for field in category.fields() {
            let rules = self.rules(category, field)?;
            let Some(found) = extract_field(text, rules) else {
                continue;
            };
            if let Some(name) = normalize_person_name(&found.value, field) {
                scores.insert(*field, found.confidence());
                names.insert(field.to_string(), name);
            }
        }

        let warnings = cross_validate(&mut names);
        let mut output = CategoryOutput {
            values: Vec::new(),
            warnings,
        };
        for field in category.fields() {
            if let Some(name) = names.remove(*field) {
                let confidence = scores.get(field).copied().unwrap_or_default();
                output.push(category, field, Some(name), confidence);
            }
        }
        Ok(output)
    }

    fn extract_occupation(&self, text: &str) -> Result<CategoryOutput> {
        let category = Category::Occupation;
        let mut output = self.extract_fields(category, text, |field, value| match field {
            "investment_involvement" => normalize_yes_no(value),
            _ => clean_occupation_value(field, value),
        })?;

        if output.get("occupation").is_none() {
            let sector = output
                .get("sector")
                .map(|s| (s.value.clone(), s.confidence));
            if let Some((value, confidence)) = sector {
                debug!("No occupation value, using sector {:?}", value);
                output.push(category, "occupation", Some(value), confidence);
            }
        }

        Ok(output)
    }
}

/// Search the section view first, then the wider scope if there is one.
fn find_address(view: &str, scope: Option<&str>, rules: &[FieldRule]) -> Option<(FieldMatch, f32)> {
    if !view.is_empty() {
        if let Some(found) = extract_field(view, rules) {
            let confidence = found.confidence();
            return Some((found, confidence));
        }
    }

    extract_field(scope?, rules).map(|found| {
        let confidence = found.confidence() * FULL_TEXT_PENALTY;
        (found, confidence)
    })
}

impl Default for FormParser {
    fn default() -> Self {
        Self::new(Arc::new(FieldCatalog::standard()))
    }
}

impl DocumentParser for FormParser {
    fn parse(&self, text: &str) -> ExtractionResult {
        let started = Instant::now();

        if text.trim().is_empty() {
            debug!("Empty input text, nothing to extract");
            return ExtractionResult::empty(ExtractionStatus::Complete, Vec::new(), started);
        }

        let sections = AddressSections::segment(text);
        debug!(
            "Address views: current {} bytes, permanent {} bytes",
            sections.current.len(),
            sections.permanent.len()
        );

        let mut record = ExtractedRecord::new();
        let mut summary = ExtractionSummary::default();
        let mut field_confidence = BTreeMap::new();
        let mut warnings = Vec::new();
        let mut failed = Vec::new();

        for category in Category::ALL {
            let output = match self.extract_category(category, text, &sections) {
                Ok(output) => output,
                Err(e) => match self.failure_policy {
                    FailurePolicy::DiscardRecord => {
                        warn!("{} extraction failed, discarding record: {}", category, e);
                        let status = ExtractionStatus::Failed {
                            category,
                            reason: e.to_string(),
                        };
                        return ExtractionResult::empty(status, vec![e.to_string()], started);
                    }
                    FailurePolicy::SkipCategory => {
                        warn!("{} extraction failed, skipping category: {}", category, e);
                        warnings.push(e.to_string());
                        failed.push(category);
                        continue;
                    }
                },
            };

            let mut count = 0;
            for Extracted { key, value, confidence } in output.values {
                if record.insert(key.clone(), value) {
                    field_confidence.insert(key, confidence);
                    count += 1;
                }
            }
            debug!("{}: {} fields", category, count);

            summary.categories.insert(category, count);
            warnings.extend(output.warnings);
        }

        summary.total_fields = record.len();

        let status = if failed.is_empty() {
            ExtractionStatus::Complete
        } else {
            ExtractionStatus::Partial { failed }
        };

        let processing_time_ms = started.elapsed().as_millis() as u64;
        info!(
            "Extracted {} fields ({} warnings) in {}ms",
            record.len(),
            warnings.len(),
            processing_time_ms
        );

        ExtractionResult {
            record,
            summary,
            warnings,
            field_confidence,
            status,
            processing_time_ms,
        }
    }
}
