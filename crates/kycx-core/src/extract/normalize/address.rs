use lazy_static::lazy_static;
use regex::Regex;

use super::clean_text;

lazy_static! {
    static ref COUNTRY_SPILL: Regex = Regex::new(r"(?i)\b(?:Province|District)\b").unwrap();
    static ref PROVINCE_SPILL: Regex = Regex::new(r"(?i)\b(?:District|Municipality)\b").unwrap();
    static ref DISTRICT_SPILL: Regex = Regex::new(r"(?i)\b(?:Municipality|Ward)\b").unwrap();
    static ref MUNICIPALITY_SPILL: Regex = Regex::new(r"(?i)\b(?:Ward|Tole)\b").unwrap();
}

/// Cut an address sub-field at the first label of the sub-field that follows it, then
/// strip leftover colons and whitespace. Fields without a following label are only
/// whitespace-collapsed.
pub fn truncate_at_label(field: &str, value: &str) -> Option<String> {
    let spill: Option<&Regex> = match field {
        "country" => Some(&*COUNTRY_SPILL),
        "province" => Some(&*PROVINCE_SPILL),
        "district" => Some(&*DISTRICT_SPILL),
        "municipality" => Some(&*MUNICIPALITY_SPILL),
        _ => None,
    };

    let cut = match spill.and_then(|re| re.find(value)) {
        Some(m) => &value[..m.start()],
        None => value,
    };

    clean_text(cut.trim_matches(|c: char| c == ':' || c.is_whitespace()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncates_at_next_label() {
        assert_eq!(truncate_at_label("country", "Nepal Province").as_deref(), Some("Nepal"));
        assert_eq!(
            truncate_at_label("district", "Kathmandu\nMunicipality").as_deref(),
            Some("Kathmandu")
        );
        assert_eq!(truncate_at_label("municipality", "Damak Ward").as_deref(), Some("Damak"));
    }

    #[test]
    fn test_label_must_be_a_whole_word() {
        assert_eq!(
            truncate_at_label("municipality", "Towardsville").as_deref(),
            Some("Towardsville")
        );
    }

    #[test]
    fn test_strips_colons_and_other_fields_pass_through() {
        assert_eq!(truncate_at_label("province", ": Bagmati :").as_deref(), Some("Bagmati"));
        assert_eq!(truncate_at_label("tole", "New  Road").as_deref(), Some("New Road"));
        assert_eq!(truncate_at_label("country", "Province"), None);
    }
}
