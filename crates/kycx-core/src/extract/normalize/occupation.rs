use lazy_static::lazy_static;
use regex::Regex;

use super::{clean_text, label_words};

/// Section words that show up where an occupation value should be.
const LAYOUT_ARTIFACTS: &[&str] = &["permanent", "current", "temporary", "occupation", "address"];

lazy_static! {
    // Labels whose text tends to spill into an occupation value.
    static ref SPILL: Regex = Regex::new(r"\b(?:Address|Designation|ID No)\b").unwrap();
}

/// Cut an occupation-category value at label spill-over and collapse its whitespace.
///
/// Layout artifacts and values equal to the field's own label are dropped.
pub fn clean_occupation_value(field: &str, value: &str) -> Option<String> {
    let cut = match SPILL.find(value) {
        Some(m) => &value[..m.start()],
        None => value,
    };
    let cleaned = clean_text(cut)?;
    let lower = cleaned.to_lowercase();

    if LAYOUT_ARTIFACTS.contains(&lower.as_str()) || lower == label_words(field) {
        return None;
    }

    Some(cleaned)
}
