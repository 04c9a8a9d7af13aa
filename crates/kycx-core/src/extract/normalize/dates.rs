use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ISO_DATE: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
}

/// Date of birth (AD). With `validate`, the value must also be a real calendar date.
pub fn normalize_date_of_birth(value: &str, validate: bool) -> Option<String> {
    let date = value.trim();
    if !ISO_DATE.is_match(date) {
        return None;
    }
    if validate && NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
        return None;
    }
    Some(date.to_string())
}

/// Issue dates are usually Bikram Sambat, so only the shape is checked.
pub fn normalize_issue_date(value: &str) -> Option<String> {
    let date = value.trim();
    ISO_DATE.is_match(date).then(|| date.to_string())
}
