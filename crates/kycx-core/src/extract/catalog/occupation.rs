//! Occupation and employer rules.

use super::{FieldCatalog, ANSWER};
use crate::extract::rule::{FieldRule, Guard};
use crate::extract::Category;

const OCCUPATION: &str = r"[A-Za-z/ ]{3,50}";
const DESIGNATION: &str = r"[A-Za-z\s\-]{2,50}";
const ADDRESS: &str = r"[A-Z0-9 ,\-]{3,50}";

pub(super) fn register(catalog: &mut FieldCatalog) {
    let c = Category::Occupation;

    catalog.insert(c, "occupation", vec![
        // The label is often printed more than once before the value.
        FieldRule::anchored(
            r"Occupation(?:[\s:]+Occupation)*[\s:]+",
            &format!("{OCCUPATION}?"),
            &["Types", "Organization", "Name"],
        ),
        FieldRule::open(r"Details of Occupation[\s:]*Occupation[\s:]*", OCCUPATION),
        FieldRule::anchored(r"k\]zf[:\s]*", OCCUPATION, &["k", "sf/", r";\+:yf"]),
    ]);

    catalog.insert(c, "organization_name", vec![FieldRule::open(
        r"Organization'?s?\s*Name\s*",
        r"(?:[A-Z0-9 ,\-&]{2,}(?:\n| ){0,2}){1,5}",
    )]);

    catalog.insert(c, "organization", vec![
        FieldRule::anchored(r"Organization's Name[:\s]+", r"[A-Za-z\s\-]+?", &["Address", "Designation"]),
        FieldRule::anchored(r";\+:yfsf\] gfd[:\s]+", r"[A-Za-z\s\-]+?", &[r"7\]ufgf", "kb"]),
    ]);

    catalog.insert(c, "designation", vec![
        FieldRule::anchored(r"Designation\s+", DESIGNATION, &["ID No", "Employee", "Number"]),
        FieldRule::anchored(r"\bkb\s+", DESIGNATION, &[r"sd\{rf/L", "k", "lr/rokq"]),
    ]);

    catalog.insert(c, "sector", vec![FieldRule::open(r"Occupation\s*[:\s]*", r"[^\n]+")]);

    catalog.insert(c, "organization_address", vec![
        FieldRule::open(r"Organization'?s?\s*Address[:\s]*", ADDRESS),
        FieldRule::open(r"Address[:\s]*", ADDRESS)
            .guard(Guard::NotPrecededBy(&["current", "permanent", "temporary", "&", "email"]))
            .fallback(),
    ]);

    catalog.insert(c, "investment_involvement", vec![FieldRule::open(
        r"Involvement in Investment companies which were established for securities trading\s*",
        ANSWER,
    )]);

    catalog.insert(c, "business_type", vec![
        FieldRule::open(r"Types of\s*Business\s*", "[A-Za-z ]+"),
        FieldRule::open(r"Service Oriented\s*", "[A-Za-z ]+"),
        FieldRule::open(r"Manufacturing\s*", "[A-Za-z ]+"),
        FieldRule::open(r"Others\s*", "[A-Za-z ]+"),
    ]);
}

#[cfg(test)]
mod tests {
    use crate::extract::catalog::FieldCatalog;
    use crate::extract::{extract_field, Category};

    fn find(field: &str, text: &str) -> Option<String> {
        let catalog = FieldCatalog::standard();
        extract_field(text, catalog.rules(Category::Occupation, field)?).map(|m| m.value)
    }

    #[test]
    fn test_occupation_skips_repeated_label() {
        assert_eq!(find("occupation", "Occupation\nOccupation\nStudent").as_deref(), Some("Student"));
        assert_eq!(
            find("occupation", "Occupation: Service Types of Business").as_deref(),
            Some("Service")
        );
    }

    #[test]
    fn test_designation_and_organization() {
        let text = "Organization's Name: Himal Traders Address: Pokhara\nDesignation Manager\nID No 55";
        assert_eq!(find("organization", text).as_deref(), Some("Himal Traders"));
        assert_eq!(find("designation", text).as_deref(), Some("Manager"));
    }

    #[test]
    fn test_organization_address_ignores_residential_blocks() {
        let text = "Current Address\nOrganization Address: LAKESIDE, POKHARA";
        assert_eq!(find("organization_address", text).as_deref(), Some("LAKESIDE, POKHARA"));
        assert_eq!(find("organization_address", "Permanent Address KASKI"), None);
    }

    #[test]
    fn test_investment_involvement() {
        let text = "Involvement in Investment companies which were established for securities trading No";
        assert_eq!(find("investment_involvement", text).as_deref(), Some("No"));
    }
}
