//! Per-field cleanup and validation of raw captures.
//!
//! Normalizers never fail: a value that does not survive cleanup is returned as `None`
//! and simply left out of the record.

mod address;
mod answers;
mod dates;
mod family;
mod identifiers;
mod names;
mod occupation;

pub use address::truncate_at_label;
pub use answers::{normalize_account_type, normalize_yes_no};
pub use dates::{normalize_date_of_birth, normalize_issue_date};
pub use family::cross_validate;
pub use identifiers::{
    digits_only, normalize_beneficiary_id, normalize_citizenship, normalize_gender, normalize_pan,
};
pub use names::normalize_person_name;
pub use occupation::clean_occupation_value;

use crate::models::record::PLACEHOLDER;

/// Collapse every whitespace run to a single space and trim.
pub fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Collapse whitespace, dropping values that end up empty or a placeholder.
pub fn clean_text(value: &str) -> Option<String> {
    non_blank(collapse_whitespace(value))
}

/// Remove all whitespace.
pub fn strip_whitespace(value: &str) -> Option<String> {
    non_blank(value.split_whitespace().collect())
}

/// The words a field's label reads as, e.g. `daughter_in_law_name` -> `daughter in law`.
pub fn label_words(field: &str) -> String {
    let base = field.strip_suffix("_name").unwrap_or(field);
    base.replace('_', " ").trim().to_string()
}

pub(crate) fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == PLACEHOLDER {
        None
    } else if trimmed.len() == value.len() {
        Some(value)
    } else {
        Some(trimmed.to_string())
    }
}
