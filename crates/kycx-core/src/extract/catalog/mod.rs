//! The pattern catalog: ordered rules per (category, field).
//!
//! Labels appear in Latin script and in the glyph-mangled transliteration the form's
//! Devanagari font produces in the text layer (`gfd` for "name", `lhNnf` for
//! "district", ...). Those glyph strings contain `]`, `+`, `|`, `{` and `}` as literal
//! characters, so they are always escaped inside rules.

mod address;
mod declarations;
mod family;
mod financial;
mod occupation;
mod personal;

use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::rule::FieldRule;
use super::Category;

/// A questionnaire answer, as a whole word.
pub(crate) const ANSWER: &str = r"(?:Yes|No)\b";

/// Lazy capture for a run of letters and whitespace.
pub(crate) const ALPHA: &str = r"[A-Za-z\s]+?";

/// Lazy capture for a block-letter personal name.
pub(crate) const NAME: &str = r"[A-Z][A-Z\s]+?";

/// Greedy capture for a personal name that stays on one line.
pub(crate) const NAME_LINE: &str = r"[A-Z][A-Z \t]+";

/// Ordered rules for one field.
#[derive(Debug, Clone)]
pub struct FieldEntry {
    pub name: String,
    pub rules: Vec<FieldRule>,
}

/// Immutable mapping from (category, field) to its ordered rule list.
///
/// Built once and shared behind an `Arc`; parsing never mutates it.
#[derive(Debug, Clone, Default)]
pub struct FieldCatalog {
    categories: BTreeMap<Category, Vec<FieldEntry>>,
}

impl FieldCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog for the bilingual KYC form.
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        personal::register(&mut catalog);
        address::register(&mut catalog);
        family::register(&mut catalog);
        financial::register(&mut catalog);
        occupation::register(&mut catalog);
        declarations::register(&mut catalog);

        for (category, field, rule) in catalog.malformed_rules() {
            warn!(
                "Malformed rule for {}.{}: {}",
                category,
                field,
                rule.error().unwrap_or_default()
            );
        }
        debug!(
            "Built field catalog: {} fields, {} rules",
            catalog.field_count(),
            catalog.rule_count()
        );

        catalog
    }

    /// Add or replace a field's rules.
    pub fn with_field(
        mut self,
        category: Category,
        name: impl Into<String>,
        rules: Vec<FieldRule>,
    ) -> Self {
        self.insert(category, name, rules);
        self
    }

    /// Add or replace a field's rules. A new field goes after the existing ones.
    pub fn insert(&mut self, category: Category, name: impl Into<String>, rules: Vec<FieldRule>) {
        let name = name.into();
        let entries = self.categories.entry(category).or_default();
        match entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => entry.rules = rules,
            None => entries.push(FieldEntry { name, rules }),
        }
    }

    /// Remove a field, returning its rules.
    pub fn remove(&mut self, category: Category, name: &str) -> Option<Vec<FieldRule>> {
        let entries = self.categories.get_mut(&category)?;
        let index = entries.iter().position(|e| e.name == name)?;
        Some(entries.remove(index).rules)
    }

    /// Rules for a field, in declaration order.
    pub fn rules(&self, category: Category, name: &str) -> Option<&[FieldRule]> {
        self.categories
            .get(&category)?
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.rules.as_slice())
    }

    /// Fields of a category, in declaration order.
    pub fn fields(&self, category: Category) -> &[FieldEntry] {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn field_count(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub fn rule_count(&self) -> usize {
        self.categories
            .values()
            .flatten()
            .map(|e| e.rules.len())
            .sum()
    }

    /// Rules that failed to compile, with their location.
    pub fn malformed_rules(&self) -> Vec<(Category, &str, &FieldRule)> {
        self.categories
            .iter()
            .flat_map(|(category, entries)| {
                entries.iter().flat_map(move |entry| {
                    entry
                        .rules
                        .iter()
                        .filter(|rule| rule.error().is_some())
                        .map(move |rule| (*category, entry.name.as_str(), rule))
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::rule::RuleTier;

    #[test]
    fn test_standard_catalog_covers_every_category_field() {
        let catalog = FieldCatalog::standard();
        for category in Category::ALL {
            for field in category.fields() {
                let rules = catalog.rules(category, field);
                assert!(
                    rules.is_some_and(|r| !r.is_empty()),
                    "missing rules for {category}.{field}"
                );
            }
        }
    }

    #[test]
    fn test_standard_catalog_compiles() {
        let catalog = FieldCatalog::standard();
        let broken: Vec<String> = catalog
            .malformed_rules()
            .iter()
            .map(|(c, f, r)| format!("{c}.{f}: {} ({:?})", r.source(), r.error()))
            .collect();
        assert!(broken.is_empty(), "{broken:#?}");
    }

    #[test]
    fn test_fallback_rules_come_last() {
        let catalog = FieldCatalog::standard();
        for category in Category::ALL {
            for entry in catalog.fields(category) {
                let tiers: Vec<RuleTier> = entry.rules.iter().map(FieldRule::tier).collect();
                let mut sorted = tiers.clone();
                sorted.sort();
                assert_eq!(tiers, sorted, "{category}.{}", entry.name);
            }
        }
    }

    #[test]
    fn test_insert_replaces_and_remove() {
        let mut catalog = FieldCatalog::new()
            .with_field(Category::Personal, "name", vec![FieldRule::new("a(b)")])
            .with_field(Category::Personal, "gender", vec![FieldRule::new("c(d)")]);

        catalog.insert(Category::Personal, "name", vec![FieldRule::new("x(y)"), FieldRule::new("z(w)")]);
        assert_eq!(catalog.rules(Category::Personal, "name").map(<[_]>::len), Some(2));
        assert_eq!(catalog.fields(Category::Personal)[0].name, "name");

        assert!(catalog.remove(Category::Personal, "gender").is_some());
        assert!(catalog.rules(Category::Personal, "gender").is_none());
        assert!(catalog.fields(Category::BankDetails).is_empty());
    }
}
