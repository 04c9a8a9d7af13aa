//! Filling editable PDF forms from extracted records.
//!
//! [`FieldMapper`] turns a record into named form updates (text values and checkbox
//! toggles); a [`FieldSink`] writes them into a template.

#[cfg(feature = "pdf")]
mod filler;
mod mapping;

#[cfg(feature = "pdf")]
pub use filler::AcroFormFiller;
pub use mapping::FieldMapper;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::FormError;

/// Result type for form operations.
pub type Result<T> = std::result::Result<T, FormError>;

/// Tokens a checkbox treats as checked.
const TRUTHY: &[&str] = &["yes", "on", "true", "1"];

/// Value written to one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkValue {
    /// Text content.
    Text(String),
    /// Checkbox state.
    Toggle(bool),
}

impl SinkValue {
    pub fn text(value: impl Into<String>) -> Self {
        SinkValue::Text(value.into())
    }

    /// String form: text as-is, toggles as `Yes`/`Off`.
    pub fn as_str(&self) -> &str {
        match self {
            SinkValue::Text(text) => text,
            SinkValue::Toggle(true) => "Yes",
            SinkValue::Toggle(false) => "Off",
        }
    }

    /// Whether a checkbox receiving this value should be checked.
    pub fn is_checked(&self) -> bool {
        match self {
            SinkValue::Toggle(on) => *on,
            SinkValue::Text(text) => {
                let lower = text.trim().to_lowercase();
                TRUTHY.contains(&lower.as_str())
            }
        }
    }
}

impl fmt::Display for SinkValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SinkValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Form field name -> value.
pub type FieldUpdates = BTreeMap<String, SinkValue>;

/// Outcome of filling a template.
#[derive(Debug, Clone, Default)]
pub struct FillReport {
    /// The filled document.
    pub bytes: Vec<u8>,
    /// Number of form fields that received a value.
    pub filled: usize,
    /// Update names with no matching form field.
    pub unmatched: Vec<String>,
}

/// Destination for form updates.
pub trait FieldSink {
    /// Fully qualified names of the fields the template defines.
    fn field_names(&self) -> Result<Vec<String>>;

    /// Apply updates and produce the filled document.
    fn fill(&mut self, updates: &FieldUpdates) -> Result<FillReport>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_tokens() {
        assert_eq!(SinkValue::Toggle(true).as_str(), "Yes");
        assert_eq!(SinkValue::Toggle(false).to_string(), "Off");
        assert!(SinkValue::text("ON").is_checked());
        assert!(SinkValue::text("1").is_checked());
        assert!(!SinkValue::text("No").is_checked());
    }

    #[test]
    fn test_updates_serialize_as_strings() {
        let mut updates = FieldUpdates::new();
        updates.insert("MaleCheck".to_string(), SinkValue::Toggle(true));
        updates.insert("Father".to_string(), SinkValue::text("HARI"));

        let json = serde_json::to_string(&updates).unwrap();
        assert_eq!(json, r#"{"Father":"HARI","MaleCheck":"Yes"}"#);
    }
}
