use std::collections::BTreeMap;

use tracing::warn;

/// Cross-check family names, keyed by field name.
///
/// A spouse equal to either parent is dropped. A father equal to the grandfather is kept
/// but reported in the returned warnings.
pub fn cross_validate(family: &mut BTreeMap<String, String>) -> Vec<String> {
    let mut warnings = Vec::new();

    if let (Some(father), Some(grandfather)) = (family.get("father_name"), family.get("grandfather_name")) {
        if father == grandfather {
            let message = format!("Father and grandfather names are identical ({father}), likely an extraction error");
            warn!("{}", message);
            warnings.push(message);
        }
    }

    let spouse_is_parent = family.get("spouse_name").is_some_and(|spouse| {
        family.get("father_name") == Some(spouse) || family.get("mother_name") == Some(spouse)
    });
    if spouse_is_parent {
        family.remove("spouse_name");
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn family(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_spouse_equal_to_parent_is_dropped() {
        let mut names = family(&[("father_name", "HARI"), ("spouse_name", "HARI")]);
        assert!(cross_validate(&mut names).is_empty());
        assert!(!names.contains_key("spouse_name"));

        let mut names = family(&[("mother_name", "GITA"), ("spouse_name", "GITA")]);
        cross_validate(&mut names);
        assert!(!names.contains_key("spouse_name"));
    }

    #[test]
    fn test_father_equal_to_grandfather_warns_but_keeps() {
        let mut names = family(&[("father_name", "HARI"), ("grandfather_name", "HARI")]);
        let warnings = cross_validate(&mut names);

        assert_eq!(warnings.len(), 1);
        assert_eq!(names.len(), 2);
    }

    #[test]
    fn test_distinct_names_untouched() {
        let mut names = family(&[("father_name", "HARI"), ("spouse_name", "SITA")]);
        assert!(cross_validate(&mut names).is_empty());
        assert_eq!(names.get("spouse_name").map(String::as_str), Some("SITA"));
    }
}
