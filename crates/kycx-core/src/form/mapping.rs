//! Record key -> form field mapping and checkbox derivation.

use std::collections::BTreeMap;

use tracing::debug;

use super::{FieldUpdates, SinkValue};
use crate::extract::normalize::collapse_whitespace;
use crate::models::config::FormConfig;
use crate::models::record::ExtractedRecord;

/// Text fields of the standard KYC template.
const TEXT_FIELDS: &[(&str, &str)] = &[
    ("name", "Name In Block Letter"),
    ("date_of_birth", "O    A D"),
    ("gender", "Gender"),
    ("citizenship_no", "Citizenship Number"),
    ("beneficiary_id", "Beneficiary ID Number"),
    ("pan_no", "PAN"),
    ("national_id", "National ID Number"),
    ("issue_district", "IssueDistrict"),
    ("issue_date", "hfL ldlt Issue Date"),
    ("current_country", "Current Address Country"),
    ("current_province", "Current Address Province"),
    ("current_district", "Current Address District"),
    ("current_municipality", "Current Address Municipality"),
    ("current_ward_no", "Current Address Ward Number"),
    ("current_tole", "Current Address Tole"),
    ("current_telephone", "Telephone Number"),
    ("current_mobile", "Mobile Number"),
    ("current_email", "Email Address"),
    ("permanent_country", "Permanent Address Country"),
    ("permanent_province", "Permanent Address Province"),
    ("permanent_district", "Permanent Address District"),
    ("permanent_municipality", "Permanent municipality"),
    ("permanent_ward_no", "Permanent Ward Number"),
    ("permanent_tole", "Permanent Address Tole"),
    ("permanent_telephone", "Permanent Telephone Number"),
    ("permanent_block_no", "Permanent Block Number"),
    ("income_limit", "Financial Details"),
    ("father_name", "Father"),
    ("mother_name", "Mother"),
    ("grandfather_name", "GrandFather"),
    ("spouse_name", "Spouses Name"),
    ("son_name", "Son"),
    ("daughter_name", "Daughter"),
    ("daughter_in_law_name", "DaughterInLawName"),
    ("father_in_law_name", "Father in Laws Name"),
    ("mother_in_law_name", "Mother in Laws Name"),
    ("bank_account_number", "Bank Account Number"),
    ("bank_name", "Bank Name and Address"),
    ("organization_name", "Organization's Name"),
    ("designation", "Designation"),
    ("business_type", "TypeOfBusiness"),
    ("guardian_name", "NameSurname  In Block letter"),
    ("guardian_relationship", "Relationship with applicant"),
    ("minor_telephone", "Minor Telephone No"),
    ("minor_mobile", "Minor Mobile No"),
];

const ACCOUNT_TYPE_BOXES: &[&str] = &["Saving Account", "Current Account"];

/// Income bracket text (lowercase) and its checkbox.
const INCOME_BRACKETS: &[(&str, &str)] = &[
    ("upto 5,00,000", "Upto 5,00,000"),
    ("from rs. 5,00,001 to rs. 10,00,000", "From Rs. 5,00,001 to Rs. 10,00,000"),
    ("above rs. 10,00,000", "Above Rs. 10,00,000"),
];

/// Occupation keywords in priority order. The first hit is the only box checked.
const OCCUPATION_BOXES: &[(&[&str], &str)] = &[
    (&["agriculture"], "Agriculture"),
    (&["business"], "Businessperson"),
    (&["expert"], "Expert"),
    (&["others"], "Other Occupation"),
    (&["service", "govt"], "Govt"),
    (&["student"], "Student"),
    (&["retired"], "Retired"),
    (&["house", "wife"], "House Wife"),
    (&["foreign", "employment"], "Foreign Employment"),
    (&["public", "private"], "Public/Private Sector"),
    (&["ngo", "ingo"], "NGO/INGO"),
];

/// Declaration key and its yes/no checkbox pair.
const DECLARATION_BOXES: &[(&str, &str, &str)] = &[
    ("politician_or_high_ranking_person", "Rajniti/padh yes", "Rajniti/padh no"),
    (
        "related_to_politician_or_high_ranking_official",
        "Rajniti/padh sambandha yes",
        "Rajniti/padh sambandha no",
    ),
    ("have_a_beneficiary", "hitadhikari yes", "hitadhikari no"),
    ("convicted_of_felony", "Dosh yes", "Dosh no"),
];

/// Business type (lowercase) and its checkbox.
const BUSINESS_TYPE_BOXES: &[(&str, &str)] = &[
    ("manufacturing", "Manufacturing"),
    ("service oriented", "Check"),
    ("others", "Check Box12"),
];

/// Maps extracted records onto the field names of a form template.
#[derive(Debug, Clone)]
pub struct FieldMapper {
    text_fields: BTreeMap<String, String>,
}

impl FieldMapper {
    /// Create a mapper for the standard template.
    pub fn new() -> Self {
        Self {
            text_fields: TEXT_FIELDS
                .iter()
                .map(|(key, field)| (key.to_string(), field.to_string()))
                .collect(),
        }
    }

    /// Create a mapper with the overrides from a form configuration.
    pub fn from_config(config: &FormConfig) -> Self {
        Self::new().with_overrides(&config.field_overrides)
    }

    /// Add or replace text field mappings.
    pub fn with_overrides(mut self, overrides: &BTreeMap<String, String>) -> Self {
        for (key, field) in overrides {
            self.text_fields.insert(key.clone(), field.clone());
        }
        self
    }

    /// Template field for a record key.
    pub fn target(&self, key: &str) -> Option<&str> {
        self.text_fields.get(key).map(String::as_str)
    }

    /// All text mappings, by record key.
    pub fn text_mappings(&self) -> impl Iterator<Item = (&str, &str)> {
        self.text_fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Build the form updates for a record. Keys without a mapping are ignored.
    pub fn map(&self, record: &ExtractedRecord) -> FieldUpdates {
        let mut updates = FieldUpdates::new();

        for (key, field) in &self.text_fields {
            if let Some(value) = record.get(key) {
                updates.insert(field.clone(), SinkValue::text(value));
            }
        }

        map_gender(record, &mut updates);
        map_account_type(record, &mut updates);
        map_income_bracket(record, &mut updates);
        map_occupation(record, &mut updates);
        map_declarations(record, &mut updates);
        map_business_type(record, &mut updates);

        debug!("Mapped {} record fields to {} form updates", record.len(), updates.len());
        updates
    }
}

impl Default for FieldMapper {
    fn default() -> Self {
        Self::new()
    }
}

/// Check `chosen` and clear the rest of `boxes`.
fn check_one(updates: &mut FieldUpdates, boxes: impl IntoIterator<Item = &'static str>, chosen: &str) {
    for field in boxes {
        updates.insert(field.to_string(), SinkValue::Toggle(field == chosen));
    }
}

fn map_gender(record: &ExtractedRecord, updates: &mut FieldUpdates) {
    let Some(gender) = record.get("gender") else {
        return;
    };
    let chosen = match gender.trim().to_uppercase().as_str() {
        "M" | "MALE" => "MaleCheck",
        "F" | "FEMALE" => "FemaleCheck",
        _ => return,
    };
    check_one(updates, ["MaleCheck", "FemaleCheck"], chosen);
}

fn map_account_type(record: &ExtractedRecord, updates: &mut FieldUpdates) {
    let Some(account_type) = record.get("bank_account_type") else {
        return;
    };
    let lower = account_type.to_lowercase();
    let chosen = if lower.contains("saving") {
        "Saving Account"
    } else if lower.contains("current") {
        "Current Account"
    } else {
        return;
    };
    check_one(updates, ACCOUNT_TYPE_BOXES.iter().copied(), chosen);
}

fn map_income_bracket(record: &ExtractedRecord, updates: &mut FieldUpdates) {
    let Some(limit) = record.get("income_limit") else {
        return;
    };
    let lower = limit.to_lowercase();
    if let Some((_, chosen)) = INCOME_BRACKETS.iter().find(|(text, _)| lower.contains(text)) {
        check_one(updates, INCOME_BRACKETS.iter().map(|(_, field)| *field), chosen);
    }
}

fn map_occupation(record: &ExtractedRecord, updates: &mut FieldUpdates) {
    let occupation = record
        .get("occupation")
        .map(|value| collapse_whitespace(value).to_lowercase())
        .filter(|value| !value.is_empty() && value != "occupation")
        .or_else(|| record.get("sector").map(|value| collapse_whitespace(value).to_lowercase()));

    let Some(occupation) = occupation else {
        return;
    };

    let hit = OCCUPATION_BOXES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| occupation.contains(k)));
    if let Some((_, field)) = hit {
        updates.insert(field.to_string(), SinkValue::Toggle(true));
    }
}

fn map_declarations(record: &ExtractedRecord, updates: &mut FieldUpdates) {
    for (key, yes_box, no_box) in DECLARATION_BOXES {
        if let Some(answer) = record.get(key) {
            let yes = answer == "Yes";
            updates.insert(yes_box.to_string(), SinkValue::Toggle(yes));
            updates.insert(no_box.to_string(), SinkValue::Toggle(!yes));
        }
    }
}

fn map_business_type(record: &ExtractedRecord, updates: &mut FieldUpdates) {
    let Some(business_type) = record.get("business_type") else {
        return;
    };
    let lower = business_type.trim().to_lowercase();
    if let Some((_, chosen)) = BUSINESS_TYPE_BOXES.iter().find(|(text, _)| lower == *text) {
        check_one(updates, BUSINESS_TYPE_BOXES.iter().map(|(_, field)| *field), chosen);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(pairs: &[(&str, &str)]) -> ExtractedRecord {
        let mut record = ExtractedRecord::new();
        for (key, value) in pairs {
            record.insert(*key, *value);
        }
        record
    }

    fn toggle(updates: &FieldUpdates, field: &str) -> Option<bool> {
        match updates.get(field) {
            Some(SinkValue::Toggle(on)) => Some(*on),
            _ => None,
        }
    }

    #[test]
    fn test_text_fields_and_unmapped_keys() {
        let updates = FieldMapper::new().map(&record(&[
            ("spouse_name", "SITA"),
            ("current_tole", "Baneshwor"),
            ("sector", "Banking"),
        ]));

        assert_eq!(updates.get("Spouses Name"), Some(&SinkValue::text("SITA")));
        assert_eq!(updates.get("Current Address Tole"), Some(&SinkValue::text("Baneshwor")));
        assert!(!updates.values().any(|v| v.as_str() == "Banking"));
    }

    #[test]
    fn test_gender_checkboxes() {
        let updates = FieldMapper::new().map(&record(&[("gender", "Male")]));
        assert_eq!(toggle(&updates, "MaleCheck"), Some(true));
        assert_eq!(toggle(&updates, "FemaleCheck"), Some(false));
        assert_eq!(updates.get("Gender"), Some(&SinkValue::text("Male")));

        let updates = FieldMapper::new().map(&record(&[("gender", "Other")]));
        assert_eq!(toggle(&updates, "MaleCheck"), None);
    }

    #[test]
    fn test_account_type_and_income_bracket() {
        let updates = FieldMapper::new().map(&record(&[
            ("bank_account_type", "Saving"),
            ("income_limit", "From Rs. 5,00,001 to Rs. 10,00,000"),
        ]));

        assert_eq!(toggle(&updates, "Saving Account"), Some(true));
        assert_eq!(toggle(&updates, "Current Account"), Some(false));
        assert_eq!(toggle(&updates, "Upto 5,00,000"), Some(false));
        assert_eq!(toggle(&updates, "From Rs. 5,00,001 to Rs. 10,00,000"), Some(true));
        assert_eq!(toggle(&updates, "Above Rs. 10,00,000"), Some(false));
    }

    #[test]
    fn test_occupation_first_keyword_wins() {
        let updates = FieldMapper::new().map(&record(&[("occupation", "Business Service")]));
        assert_eq!(toggle(&updates, "Businessperson"), Some(true));
        assert_eq!(toggle(&updates, "Govt"), None);

        let updates = FieldMapper::new().map(&record(&[("sector", "Government  Service")]));
        assert_eq!(toggle(&updates, "Govt"), Some(true));
    }

    #[test]
    fn test_declaration_pairs() {
        let updates = FieldMapper::new().map(&record(&[
            ("politician_or_high_ranking_person", "No"),
            ("convicted_of_felony", "Yes"),
        ]));

        assert_eq!(toggle(&updates, "Rajniti/padh yes"), Some(false));
        assert_eq!(toggle(&updates, "Rajniti/padh no"), Some(true));
        assert_eq!(toggle(&updates, "Dosh yes"), Some(true));
        assert_eq!(toggle(&updates, "Dosh no"), Some(false));
        assert_eq!(toggle(&updates, "hitadhikari yes"), None);
    }

    #[test]
    fn test_business_type_is_exclusive() {
        let updates = FieldMapper::new().map(&record(&[("business_type", "Service Oriented")]));

        assert_eq!(toggle(&updates, "Check"), Some(true));
        assert_eq!(toggle(&updates, "Manufacturing"), Some(false));
        assert_eq!(toggle(&updates, "Check Box12"), Some(false));
        assert_eq!(updates.get("TypeOfBusiness"), Some(&SinkValue::text("Service Oriented")));
    }

    #[test]
    fn test_overrides() {
        let mut overrides = BTreeMap::new();
        overrides.insert("name".to_string(), "Applicant".to_string());
        overrides.insert("sector".to_string(), "Sector".to_string());
        let mapper = FieldMapper::new().with_overrides(&overrides);

        assert_eq!(mapper.target("name"), Some("Applicant"));
        let updates = mapper.map(&record(&[("name", "RAM"), ("sector", "Banking")]));
        assert_eq!(updates.get("Applicant"), Some(&SinkValue::text("RAM")));
        assert_eq!(updates.get("Sector"), Some(&SinkValue::text("Banking")));
        assert!(!updates.contains_key("Name In Block Letter"));
    }
}
