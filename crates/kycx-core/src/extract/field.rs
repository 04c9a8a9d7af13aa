//! Ordered rule evaluation for a single field.

use tracing::{trace, warn};

use super::rule::{FieldRule, RuleOutcome, RuleTier};
use crate::models::record::PLACEHOLDER;

/// A value found by one rule of a field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMatch {
    /// Trimmed captured value.
    pub value: String,
    /// Index of the rule that produced the value.
    pub rule_index: usize,
    /// Priority class of that rule.
    pub tier: RuleTier,
    /// Byte range of the capture in the searched text.
    pub position: (usize, usize),
}

impl FieldMatch {
    /// Confidence derived from which rule fired.
    pub fn confidence(&self) -> f32 {
        match (self.tier, self.rule_index) {
            (RuleTier::Fallback, _) => 0.4,
            (RuleTier::Primary, 0) => 0.95,
            (RuleTier::Primary, _) => 0.8,
        }
    }
}

/// Try each rule in declaration order and return the first usable capture.
///
/// A capture that is empty or the placeholder token moves on to the next rule. Rules that
/// fail to compile are logged and skipped.
pub fn extract_field(text: &str, rules: &[FieldRule]) -> Option<FieldMatch> {
    for (rule_index, rule) in rules.iter().enumerate() {
        match rule.apply(text) {
            RuleOutcome::Match { value, span } => {
                if value.is_empty() || value == PLACEHOLDER {
                    trace!("Rule {} captured a placeholder, trying next", rule_index);
                    continue;
                }
                return Some(FieldMatch {
                    value,
                    rule_index,
                    tier: rule.tier(),
                    position: (span.start, span.end),
                });
            }
            RuleOutcome::NoMatch => {}
            RuleOutcome::Error(e) => {
                warn!("Skipping unusable rule {:?}: {}", rule.source(), e);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_matching_rule_wins() {
        let rules = vec![
            FieldRule::anchored(r"Mobile No[.:]?\s*", r"\d+", &[]),
            FieldRule::anchored(r"Telephone No[.:]?\s*", r"\d+", &[]),
        ];
        let text = "Telephone No: 01442211\nMobile No: 9841000000";

        let found = extract_field(text, &rules).unwrap();
        assert_eq!(found.value, "9841000000");
        assert_eq!(found.rule_index, 0);
        assert_eq!(found.confidence(), 0.95);
    }

    #[test]
    fn test_placeholder_falls_through_to_next_rule() {
        let rules = vec![
            FieldRule::anchored(r"PAN[:\s]*", r"\S+", &[]),
            FieldRule::anchored(r"Permanent Account No[:\s]*", r"\S+", &[]),
        ];
        let text = "PAN: -\nPermanent Account No: 301234567";

        let found = extract_field(text, &rules).unwrap();
        assert_eq!(found.value, "301234567");
        assert_eq!(found.rule_index, 1);
    }

    #[test]
    fn test_only_placeholders_is_not_found() {
        let rules = vec![FieldRule::anchored(r"Email ID[:\s]*", r"\S+", &[])];
        assert_eq!(extract_field("Email ID: -", &rules), None);
    }

    #[test]
    fn test_malformed_rule_is_skipped() {
        let rules = vec![
            FieldRule::new(r"Ward No(\d+"),
            FieldRule::anchored(r"Ward No[.:]?\s*", r"\d+", &[]),
        ];

        let found = extract_field("Ward No: 7", &rules).unwrap();
        assert_eq!(found.value, "7");
        assert_eq!(found.rule_index, 1);
    }

    #[test]
    fn test_fallback_confidence() {
        let rules = vec![FieldRule::open(r"Beneficiary.*?", r"\d+").fallback()];
        let found = extract_field("Beneficiary holder 1301", &rules).unwrap();
        assert_eq!(found.value, "1301");
        assert_eq!(found.confidence(), 0.4);
    }
}
