//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Main configuration for the kycx pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KycxConfig {
    /// PDF text extraction configuration.
    pub pdf: PdfConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Form filling configuration.
    pub form: FormConfig,
}

/// PDF text extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Minimum text length to consider a PDF as having a usable text layer.
    pub min_text_length: usize,

    /// Maximum pages to read (0 = unlimited).
    pub max_pages: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            min_text_length: 20,
            max_pages: 0,
        }
    }
}

/// What the parser does when one category extractor fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Return an empty record for the whole document.
    #[default]
    DiscardRecord,
    /// Leave out the failed category and keep everything else.
    SkipCategory,
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Behaviour when a category extractor fails.
    pub failure_policy: FailurePolicy,

    /// Retry address rules on the whole text when the section view yields nothing.
    pub address_full_text_fallback: bool,

    /// Reject dates of birth that are not real calendar dates.
    pub validate_dates: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            failure_policy: FailurePolicy::DiscardRecord,
            address_full_text_fallback: true,
            validate_dates: true,
        }
    }
}

/// Form filling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Editable PDF template to fill.
    pub template: Option<PathBuf>,

    /// Suffix appended to the input file stem for filled output.
    pub output_suffix: String,

    /// Ask viewers to regenerate field appearances.
    pub need_appearances: bool,

    /// Extra or replacement record key -> template field name mappings.
    pub field_overrides: BTreeMap<String, String>,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            template: None,
            output_suffix: "_filled".to_string(),
            need_appearances: true,
            field_overrides: BTreeMap::new(),
        }
    }
}

impl KycxConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
