//! Extracted record and summary models.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::extract::Category;

/// The placeholder a blank form field is printed with.
pub const PLACEHOLDER: &str = "-";

/// Flat map of output key to cleaned value for one document.
///
/// Keys are only present when a value was recovered: empty strings and the
/// placeholder token are refused on insert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractedRecord {
    fields: BTreeMap<String, String>,
}

impl ExtractedRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning `false` if it was refused.
    ///
    /// Refused values: empty or placeholder values, and keys that are already set.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let key = key.into();
        let value = value.into();
        let trimmed = value.trim();

        if trimmed.is_empty() || trimmed == PLACEHOLDER || self.fields.contains_key(&key) {
            return false;
        }

        self.fields.insert(key, trimmed.to_string());
        true
    }

    /// Get a value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Check whether a key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Number of fields in the record.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<'a> IntoIterator for &'a ExtractedRecord {
    type Item = (&'a String, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// Field counts for one extracted record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionSummary {
    /// Total number of fields in the record.
    pub total_fields: usize,
    /// Fields per category.
    pub categories: BTreeMap<Category, usize>,
}

impl ExtractionSummary {
    /// Count of fields recovered for a category.
    pub fn count(&self, category: Category) -> usize {
        self.categories.get(&category).copied().unwrap_or(0)
    }
}
