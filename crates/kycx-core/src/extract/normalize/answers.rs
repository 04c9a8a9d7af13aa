use super::clean_text;

/// Questionnaire answers must be exactly yes or no.
pub fn normalize_yes_no(value: &str) -> Option<String> {
    match value.trim().to_lowercase().as_str() {
        "yes" => Some("Yes".to_string()),
        "no" => Some("No".to_string()),
        _ => None,
    }
}

/// Map the Latin or transliterated account type to `Saving`/`Current`.
pub fn normalize_account_type(value: &str) -> Option<String> {
    let cleaned = clean_text(value)?;
    match cleaned.to_lowercase().as_str() {
        "saving" | "savings" | "art" => Some("Saving".to_string()),
        "current" | "rntl" => Some("Current".to_string()),
        _ => Some(cleaned),
    }
}
