//! Guardian, minor contact and money-laundering questionnaire rules.

use super::{FieldCatalog, ANSWER};
use crate::extract::rule::FieldRule;
use crate::extract::Category;

const QUESTIONS: &[(&str, &str)] = &[
    (
        "politician_or_high_ranking_person",
        r"Are You A Politician Or A High-Ranking Person\?\s*",
    ),
    (
        "related_to_politician_or_high_ranking_official",
        r"Are You Related To A Politician Or A High-Ranking Official\?\s*",
    ),
    ("have_a_beneficiary", r"Do You Have A Beneficiary\?\s*"),
    (
        "convicted_of_felony",
        r"Have You Been Convicted Of A Felony In The Past\?\s*",
    ),
];

pub(super) fn register(catalog: &mut FieldCatalog) {
    let guardian = Category::GuardianDetails;
    catalog.insert(guardian, "guardian_name", vec![FieldRule::anchored(
        r"Name/Surname[\s:]+",
        r"[A-Z\s]{3,20}",
        &["Relationship"],
    )]);
    catalog.insert(guardian, "guardian_relationship", vec![FieldRule::anchored(
        r"Relationship with\s+applicant[\s:]+",
        r"[A-Z\s]{3,15}",
        &["Correspondence", "Address"],
    )]);

    let minor = Category::MinorContact;
    catalog.insert(minor, "minor_telephone", vec![FieldRule::open(r"Telephone\s+No[:\s]+", "[0-9]{6,15}")]);
    catalog.insert(minor, "minor_mobile", vec![FieldRule::open(r"Mobile\s+No[:\s]+", "[0-9]{6,15}")]);

    for (field, question) in QUESTIONS {
        catalog.insert(Category::MoneyLaundering, *field, vec![FieldRule::open(question, ANSWER)]);
    }
}

#[cfg(test)]
mod tests {
    use crate::extract::catalog::FieldCatalog;
    use crate::extract::{extract_field, Category};

    #[test]
    fn test_guardian_name_stops_at_relationship() {
        let catalog = FieldCatalog::standard();
        let rules = catalog.rules(Category::GuardianDetails, "guardian_name").unwrap();

        let found = extract_field("Name/Surname: RAM BAHADUR Relationship with applicant FATHER", rules);
        assert_eq!(found.map(|m| m.value).as_deref(), Some("RAM BAHADUR"));
    }

    #[test]
    fn test_questionnaire_answers() {
        let catalog = FieldCatalog::standard();
        let rules = catalog
            .rules(Category::MoneyLaundering, "have_a_beneficiary")
            .unwrap();

        let found = extract_field("Do You Have A Beneficiary? No", rules);
        assert_eq!(found.map(|m| m.value).as_deref(), Some("No"));
    }

    #[test]
    fn test_answer_must_be_a_whole_word() {
        let catalog = FieldCatalog::standard();
        let rules = catalog
            .rules(Category::MoneyLaundering, "have_a_beneficiary")
            .unwrap();

        assert!(extract_field("Do You Have A Beneficiary? Not applicable", rules).is_none());
        assert!(extract_field("Do You Have A Beneficiary? Yesterday", rules).is_none());

        let found = extract_field("Do You Have A Beneficiary? Yes (spouse)", rules);
        assert_eq!(found.map(|m| m.value).as_deref(), Some("Yes"));
    }
}
