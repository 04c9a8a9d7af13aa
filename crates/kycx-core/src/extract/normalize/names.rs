use super::{collapse_whitespace, label_words, non_blank};

/// Values the name rules pick up from neighbouring labels.
const JUNK_NAMES: &[&str] = &["DAUGHTER", "SON", "MOTHER", "FATHER", "MONEY LAUNDERING"];

/// Uppercase a personal name and collapse its whitespace.
///
/// Returns `None` when the value is just the field's own label or a known junk token.
pub fn normalize_person_name(value: &str, field: &str) -> Option<String> {
    let cleaned = non_blank(collapse_whitespace(value).to_uppercase())?;

    if cleaned == label_words(field).to_uppercase() || JUNK_NAMES.contains(&cleaned.as_str()) {
        return None;
    }

    Some(cleaned)
}
