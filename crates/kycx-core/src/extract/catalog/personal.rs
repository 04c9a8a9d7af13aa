//! Personal details: name, birth date, identity documents.

use super::{FieldCatalog, ALPHA, NAME};
use crate::extract::rule::{FieldRule, Guard};
use crate::extract::Category;

const DATE: &str = r"\d{4}-\d{2}-\d{2}";

const CITIZENSHIP_STOPS: &[&str] = &["Issue", "District", "hf/L", "lhNnf"];

/// Labels that end in "Name" but belong to someone else.
const OTHER_NAME_LABELS: &[&str] = &[
    "father's",
    "father",
    "mother's",
    "mother",
    "spouse's",
    "spouse",
    "son's",
    "daughter's",
    "law's",
    "organization's",
    "& address of bank",
];

pub(super) fn register(catalog: &mut FieldCatalog) {
    let c = Category::Personal;

    catalog.insert(c, "name", vec![
        FieldRule::anchored(
            r"Name[:\s]+",
            NAME,
            &["Date of Birth", "Gender", "Father", "Mother", "Occupation"],
        )
        .guard(Guard::NotPrecededBy(OTHER_NAME_LABELS)),
        FieldRule::anchored(r"gfd[:\s]+", NAME, &["hGd ldlt", "ln·"]),
        FieldRule::anchored(
            r"Name \(In Block Letter\)[:\s]+",
            NAME,
            &["Date of Birth", "Gender"],
        ),
    ]);

    catalog.insert(c, "date_of_birth", vec![
        FieldRule::open(r"Date of Birth[:\s]+AD[:\s]*", DATE),
        FieldRule::open(r"\bAD[:\s]*:\s*", DATE),
        FieldRule::open(r"hGd ldlt[:\s]+O\{=[:\s]*", DATE),
    ]);

    catalog.insert(c, "gender", vec![
        FieldRule::anchored(r"Gender[:\s]+", r"[A-Za-z]+?", &["Nationality", "Citizenship"]),
        FieldRule::anchored(r"ln·[:\s]+", "M|F", &["/fli6«otf", "gful/stf"]),
    ]);

    catalog.insert(c, "citizenship_no", vec![
        FieldRule::anchored(r"Citizenship No[.:]?\s*", r"\d[\d\-/]*", CITIZENSHIP_STOPS),
        FieldRule::anchored(r"Citizenship Number[:\s]*", r"\d+", CITIZENSHIP_STOPS),
        FieldRule::anchored(r"gful/stf gDa/[:\s]*", r"\d+", CITIZENSHIP_STOPS),
        FieldRule::anchored(r"gful/stf g\+=[:\s]*", r"\d+", CITIZENSHIP_STOPS),
        FieldRule::anchored(r"Citizenship[:\s]*", r"\d+", CITIZENSHIP_STOPS),
        FieldRule::bounded(r"\b", r"\d{3,6}", CITIZENSHIP_STOPS)
            .guard(Guard::NotPrecededBy(&["date", "birth"]))
            .fallback(),
    ]);

    catalog.insert(c, "beneficiary_id", vec![
        FieldRule::open(r"Beneficiary ID No[.:]?\s*", r"\d+"),
        FieldRule::open(r"Beneficiary ID Number[:\s]*", r"\d+"),
        FieldRule::open(r"Beneficiary.*?ID.*?", r"\d+"),
        FieldRule::open(r"lxtu\|fxL.*?vftf g\+=[:\s]*", r"\d+"),
        FieldRule::open(r"lxtu\|fxL.*?", r"\d+"),
        FieldRule::open(r"\bID\b.*?No[.:]?\s*", r"\d+")
            .guard(Guard::NotPrecededBy(&["national"]))
            .fallback(),
        FieldRule::open(r"Beneficiary.*?", r"\d+").fallback(),
    ]);

    catalog.insert(c, "pan_no", vec![
        FieldRule::open(r"Permanent Account No[.:]?\s*\(PAN\)[:\s]*", "[A-Z0-9]{9,12}"),
        FieldRule::open(r"PAN[:\s]*", "[A-Z0-9]{9,12}")
            .guard(Guard::NotFollowedBy(&["ies", "no", "number"])),
        FieldRule::open(r":yfoL n\]vf g\+=[:\s]*", "[A-Z0-9]{9,12}"),
    ]);

    catalog.insert(c, "national_id", vec![
        FieldRule::open(r"National ID No[.:]?\s*", r"\d+"),
        FieldRule::open(r"National ID Number[:\s]*", r"\d+"),
        FieldRule::open(r"/fli6«o kl/ro kq g\+=[:\s]*", r"\d+"),
    ]);

    catalog.insert(c, "issue_district", vec![
        FieldRule::anchored(
            r"Citizenship\s+Details(?s:.){0,100}?Issue\s+District[:\s]*",
            ALPHA,
            &[r"Issue\s+Date", "Beneficiary"],
        ),
        FieldRule::anchored(r"Issue\s+District[:\s]*", ALPHA, &[r"Issue\s+Date", "Beneficiary"]),
    ]);

    catalog.insert(c, "issue_date", vec![
        FieldRule::open(r"Issue Date[:\s]+", DATE),
        FieldRule::open(r"hf/L ldlt[:\s]*", DATE),
    ]);
}

#[cfg(test)]
mod tests {
    use crate::extract::catalog::FieldCatalog;
    use crate::extract::{extract_field, Category};

    fn find(field: &str, text: &str) -> Option<String> {
        let catalog = FieldCatalog::standard();
        let rules = catalog.rules(Category::Personal, field)?;
        extract_field(text, rules).map(|m| m.value)
    }

    #[test]
    fn test_name_skips_relation_labels() {
        let text = "Father's Name: HARI PRASAD\nName: SITA KUMARI";
        assert_eq!(find("name", text).as_deref(), Some("SITA KUMARI"));
    }

    #[test]
    fn test_name_stops_at_next_label() {
        let text = "Name: RAM BAHADUR Date of Birth AD: 1990-01-01";
        assert_eq!(find("name", text).as_deref(), Some("RAM BAHADUR"));
    }

    #[test]
    fn test_citizenship_fallback_ignores_dates() {
        let text = "Date of Birth 20451 District\n12345 Issue District Kathmandu";
        assert_eq!(find("citizenship_no", text).as_deref(), Some("12345"));
    }

    #[test]
    fn test_pan_rejects_label_followed_value() {
        assert_eq!(find("pan_no", "PAN 123456789 Number"), None);
        assert_eq!(find("pan_no", "PAN: 301234567").as_deref(), Some("301234567"));
    }

    #[test]
    fn test_beneficiary_prefers_labelled_id() {
        let text = "National ID No: 999\nBeneficiary ID No: 1301000012345";
        assert_eq!(find("beneficiary_id", text).as_deref(), Some("1301000012345"));
    }

    #[test]
    fn test_issue_district_in_citizenship_block() {
        let text = "Citizenship Details\nCitizenship No: 123\nIssue District: Kaski\nIssue Date 2065-01-02";
        assert_eq!(find("issue_district", text).as_deref(), Some("Kaski"));
        assert_eq!(find("issue_date", text).as_deref(), Some("2065-01-02"));
    }

    #[test]
    fn test_gender_captures_one_word() {
        assert_eq!(find("gender", "Gender: M\nCitizenship No: 1").as_deref(), Some("M"));
        assert_eq!(find("gender", "Gender: Female Nationality: Nepali").as_deref(), Some("Female"));
        assert_eq!(find("gender", "Gender: MaleNationality").as_deref(), Some("Male"));
        assert_eq!(find("gender", "Gender: Other").as_deref(), Some("Other"));
    }

    #[test]
    fn test_transliterated_labels() {
        assert_eq!(find("date_of_birth", "hGd ldlt O{= 1988-02-03").as_deref(), Some("1988-02-03"));
        assert_eq!(find("citizenship_no", "gful/stf g+= 4455 hf/L").as_deref(), Some("4455"));
    }
}
