//! Family member names.

use super::{FieldCatalog, NAME, NAME_LINE};
use crate::extract::rule::{FieldRule, Guard};
use crate::extract::Category;

const FATHER_STOPS: &[&str] = &[
    r"Mother'?s?\s*Name",
    r"Spouse'?s?\s*Name",
    r"Son'?s?\s*Name",
    r"Daughter'?s?\s*Name",
];

const NOT_GRAND: Guard = Guard::NotPrecededBy(&["grand"]);
const NOT_IN_LAW: Guard = Guard::LineExcludes(&["in law", "in-law"]);

pub(super) fn register(catalog: &mut FieldCatalog) {
    let c = Category::FamilyMembers;

    catalog.insert(c, "grandfather_name", vec![
        FieldRule::anchored(r"Grand\s*Father'?s?\s*Name[:\s]*", NAME, &[r"Father'?s?\s*Name"]),
        FieldRule::anchored(r"Grand\s*Father[:\s]*", NAME, &[r"Father'?s?\s*Name"]),
    ]);

    catalog.insert(c, "father_name", vec![
        FieldRule::anchored(r"Father'?s?\s*Name[:\s]*", NAME, FATHER_STOPS).guard(NOT_GRAND),
        FieldRule::anchored(
            r"Father[:\s]*",
            NAME,
            &[
                "Name",
                r"Mother'?s?\s*Name",
                r"Spouse'?s?\s*Name",
                r"Son'?s?\s*Name",
                r"Daughter'?s?\s*Name",
            ],
        )
        .guard(NOT_GRAND)
        .guard(NOT_IN_LAW),
    ]);

    catalog.insert(c, "mother_name", vec![
        FieldRule::anchored(r"\bMother'?s?\s*Name[:\s]*", NAME, &["Spouse", "Son", "Daughter"]),
        FieldRule::anchored(r"cfdfsf\]\s*gfd[:\s]*", NAME, &[r"klt÷kTgLsf\]", r"5f\]/fsf\]"]),
    ]);

    catalog.insert(c, "spouse_name", vec![
        FieldRule::anchored(r"Spouse'?s?\s*Name[:\s]*", NAME, &["Son", "Daughter", "Bank"]),
        FieldRule::anchored(r"klt÷kTgLsf\]\s*gfd[:\s]*", NAME, &[r"5f\]/fsf\]", r"5f\]/Lsf\]"]),
    ]);

    catalog.insert(c, "son_name", vec![
        FieldRule::anchored(r"\bSon'?s?\s*Name[:\s]*", NAME, &["Daughter", "Bank", "Details"]),
        FieldRule::anchored(r"5f\]/fsf\]\s*gfd[:\s]*", NAME, &[r"5f\]/Lsf\]", r"a\}\+s"]),
    ]);

    catalog.insert(c, "daughter_name", vec![
        FieldRule::anchored(r"Daughters?\s*Name[:\s]*", NAME, &["Bank", "Details", "Money"]),
        FieldRule::anchored(r"Daughter's?\s*Name[:\s]*", NAME, &["Bank", "Details", "Money", r"in.*law"]),
        FieldRule::anchored(r"5f\]/Lsf\]\s*gfd[:\s]*", NAME, &[r"a\}\+s", r"k\]zf"]),
    ]);

    let in_law_stops = &["Father", "Mother", "Bank", "Details"];
    catalog.insert(c, "daughter_in_law_name", vec![
        FieldRule::anchored(r"Daughter\s*-?\s*in\s*-?\s*Law's?\s*Name[:\s]*", NAME, in_law_stops),
        FieldRule::open(r"a'xf/Lsf\]\s*gfd[:\s]*", NAME_LINE),
        FieldRule::anchored(r"Daughters?\s*in\s*law[:\s]*", NAME, in_law_stops),
        FieldRule::anchored(r"Daughter\s*in\s*law\s*name[:\s]*", NAME, &[]),
        FieldRule::open(r"Daughter\s*-?in\s*-?law[:\s]*", NAME_LINE),
    ]);

    catalog.insert(c, "father_in_law_name", vec![
        FieldRule::open(r"Father\s*in\s*Law'?s?\s*Name[:\s]*", NAME_LINE),
        FieldRule::anchored(
            r"Father\s*-?\s*in\s*-?\s*Law's?\s*Name[:\s]*",
            NAME,
            &["Mother", "Bank", "Details"],
        ),
        FieldRule::open(r"Father\s*-?in\s*-?law[:\s]*", NAME_LINE),
    ]);

    catalog.insert(c, "mother_in_law_name", vec![
        FieldRule::open(r"Mother\s*in\s*Law'?s?\s*Name[:\s]*", NAME_LINE),
        FieldRule::anchored(
            r"Mother\s*-?\s*in\s*-?\s*Law's?\s*Name[:\s]*",
            NAME,
            &["Bank", "Details", "Occupation"],
        ),
        FieldRule::open(r"Mother\s*-?in\s*-?law[:\s]*", NAME_LINE),
    ]);
}

#[cfg(test)]
mod tests {
    use crate::extract::catalog::FieldCatalog;
    use crate::extract::{extract_field, Category};

    fn find(field: &str, text: &str) -> Option<String> {
        let catalog = FieldCatalog::standard();
        extract_field(text, catalog.rules(Category::FamilyMembers, field)?).map(|m| m.value)
    }

    const FAMILY: &str = "Grand Father's Name: HARI PRASAD Father's Name: SHYAM LAL\n\
        Mother's Name: GITA DEVI\n\
        Spouse's Name: SITA\n\
        Father in Law's Name: RAM NATH\n\
        Mother in Law's Name: KAMALA";

    #[test]
    fn test_father_and_grandfather_are_distinct() {
        assert_eq!(find("grandfather_name", FAMILY).as_deref(), Some("HARI PRASAD"));
        assert_eq!(find("father_name", FAMILY).as_deref(), Some("SHYAM LAL"));
    }

    #[test]
    fn test_in_law_names() {
        assert_eq!(find("father_in_law_name", FAMILY).as_deref(), Some("RAM NATH"));
        assert_eq!(find("mother_in_law_name", FAMILY).as_deref(), Some("KAMALA"));
        assert_eq!(find("mother_name", FAMILY).as_deref(), Some("GITA DEVI"));
    }

    #[test]
    fn test_son_does_not_match_inside_words() {
        assert_eq!(find("son_name", "Contact Person's Name: BINOD"), None);
        assert_eq!(find("son_name", "Son's Name: BINOD").as_deref(), Some("BINOD"));
    }

    #[test]
    fn test_father_rule_ignores_in_law_line() {
        assert_eq!(find("father_name", "Father in Law Name: RAM"), None);
    }
}
