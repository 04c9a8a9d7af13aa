//! KYC field extraction.
//!
//! Text goes through the address segmenter, then every category's rules from the
//! [`FieldCatalog`], then per-field normalization into one [`ExtractedRecord`].
//!
//! [`ExtractedRecord`]: crate::models::record::ExtractedRecord

pub mod catalog;
pub mod field;
pub mod normalize;
pub mod parser;
pub mod rule;
pub mod sections;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;

pub use catalog::{FieldCatalog, FieldEntry};
pub use field::{extract_field, FieldMatch};
pub use parser::{ExtractionResult, ExtractionStatus, FormParser};
pub use rule::{FieldRule, Guard, RuleOutcome, RuleTier};
pub use sections::{classify_lines, without_other_blocks, AddressSections, Section};

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Trait for document parsing.
pub trait DocumentParser {
    /// Parse one document's text into a record.
    fn parse(&self, text: &str) -> ExtractionResult;
}

/// Field category. Each category owns a disjoint set of output keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Personal,
    CurrentAddress,
    PermanentAddress,
    FamilyMembers,
    BankDetails,
    Occupation,
    GuardianDetails,
    MinorContact,
    TemporaryAddress,
    FinancialDetails,
    MoneyLaundering,
}

impl Category {
    /// All categories in extraction order.
    pub const ALL: [Category; 11] = [
        Category::Personal,
        Category::CurrentAddress,
        Category::PermanentAddress,
        Category::FamilyMembers,
        Category::BankDetails,
        Category::Occupation,
        Category::GuardianDetails,
        Category::MinorContact,
        Category::TemporaryAddress,
        Category::FinancialDetails,
        Category::MoneyLaundering,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Personal => "personal",
            Category::CurrentAddress => "current_address",
            Category::PermanentAddress => "permanent_address",
            Category::FamilyMembers => "family_members",
            Category::BankDetails => "bank_details",
            Category::Occupation => "occupation",
            Category::GuardianDetails => "guardian_details",
            Category::MinorContact => "minor_contact",
            Category::TemporaryAddress => "temporary_address",
            Category::FinancialDetails => "financial_details",
            Category::MoneyLaundering => "money_laundering",
        }
    }

    /// Fields this category's extractor reads from the catalog, in extraction order.
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            Category::Personal => &[
                "name",
                "date_of_birth",
                "gender",
                "citizenship_no",
                "beneficiary_id",
                "pan_no",
                "national_id",
                "issue_district",
                "issue_date",
            ],
            Category::CurrentAddress | Category::TemporaryAddress => &[
                "country",
                "province",
                "district",
                "municipality",
                "ward_no",
                "tole",
                "telephone",
                "mobile",
                "email",
            ],
            Category::PermanentAddress => &[
                "country",
                "province",
                "district",
                "municipality",
                "ward_no",
                "tole",
                "telephone",
                "block_no",
            ],
            Category::FamilyMembers => &[
                "grandfather_name",
                "father_name",
                "mother_name",
                "spouse_name",
                "son_name",
                "daughter_name",
                "daughter_in_law_name",
                "father_in_law_name",
                "mother_in_law_name",
            ],
            Category::BankDetails => &["account_type", "account_number", "bank_name"],
            Category::Occupation => &[
                "occupation",
                "organization_name",
                "organization",
                "designation",
                "sector",
                "organization_address",
                "investment_involvement",
                "business_type",
            ],
            Category::GuardianDetails => &["guardian_name", "guardian_relationship"],
            Category::MinorContact => &["minor_telephone", "minor_mobile"],
            Category::FinancialDetails => &["income_limit", "annual_income"],
            Category::MoneyLaundering => &[
                "politician_or_high_ranking_person",
                "related_to_politician_or_high_ranking_official",
                "have_a_beneficiary",
                "convicted_of_felony",
            ],
        }
    }

    /// Record key a field of this category is stored under.
    pub fn output_key(&self, field: &str) -> String {
        match self {
            Category::CurrentAddress => format!("current_{field}"),
            Category::PermanentAddress => format!("permanent_{field}"),
            Category::TemporaryAddress => format!("temporary_{field}"),
            Category::BankDetails if !field.starts_with("bank_") => format!("bank_{field}"),
            _ => field.to_string(),
        }
    }

    /// Whether fields of this category are first searched in a segmented view.
    pub fn section(&self) -> Option<Section> {
        match self {
            Category::CurrentAddress => Some(Section::CurrentAddress),
            Category::PermanentAddress => Some(Section::PermanentAddress),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ExtractionError;

    fn from_str(s: &str) -> Result<Self> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ExtractionError::Category {
                category: s.to_string(),
                reason: "unknown category".to_string(),
            })
    }
}
