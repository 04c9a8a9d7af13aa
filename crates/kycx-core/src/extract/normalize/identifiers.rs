//! Identity document numbers and gender.

use lazy_static::lazy_static;
use regex::Regex;

use super::non_blank;

lazy_static! {
    static ref FULL_DATE: Regex = Regex::new(r"^\d{4}[-/]\d{2}[-/]\d{2}$").unwrap();
}

/// Keep digits, hyphens and slashes. Rejects dates, values that start like a
/// 19xx/20xx year and anything shorter than three characters.
pub fn normalize_citizenship(value: &str) -> Option<String> {
    let cleaned: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-' || *c == '/')
        .collect();

    if cleaned.len() < 3
        || FULL_DATE.is_match(&cleaned)
        || cleaned.starts_with("19")
        || cleaned.starts_with("20")
    {
        return None;
    }

    Some(cleaned)
}

/// Keep only ASCII digits.
pub fn digits_only(value: &str) -> Option<String> {
    non_blank(value.chars().filter(char::is_ascii_digit).collect())
}

pub fn normalize_beneficiary_id(value: &str) -> Option<String> {
    digits_only(value)
}

/// PAN must be at least nine characters, alphanumeric apart from hyphens, and not a
/// word such as "Companies" caught by the label rule.
pub fn normalize_pan(value: &str) -> Option<String> {
    let pan = value.trim();

    if pan.to_lowercase().ends_with("ies") {
        return None;
    }
    if pan.chars().count() < 9 || !pan.chars().filter(|c| *c != '-').all(char::is_alphanumeric) {
        return None;
    }

    non_blank(pan.to_string())
}

/// Map letter or word forms to `Male`/`Female`; anything else passes through trimmed.
pub fn normalize_gender(value: &str) -> Option<String> {
    let gender = value.trim();
    match gender.to_uppercase().as_str() {
        "M" | "MALE" => Some("Male".to_string()),
        "F" | "FEMALE" => Some("Female".to_string()),
        _ => non_blank(gender.to_string()),
    }
}
