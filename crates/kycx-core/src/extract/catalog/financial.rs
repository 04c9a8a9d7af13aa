//! Bank account and income rules.

use super::FieldCatalog;
use crate::extract::rule::FieldRule;
use crate::extract::Category;

const AMOUNT: &str = r"[A-Za-z0-9,\s\-\.]+?";
const AMOUNT_LINE: &str = r"[A-Za-z0-9,\-\. \t]+";

pub(super) fn register(catalog: &mut FieldCatalog) {
    let bank = Category::BankDetails;

    catalog.insert(bank, "account_type", vec![
        FieldRule::anchored(
            r"Type of Bank Account[:\s]+",
            "Saving|Current",
            &["Bank Account", "Name", "Details"],
        ),
        FieldRule::anchored(r"a\}\+s vftfsf\] lsl;d[:\s]+", "art|rNtL", &[r"a\}\+s vftf", "gfd"]),
    ]);

    catalog.insert(bank, "account_number", vec![
        FieldRule::anchored(
            r"Bank Account Number[:\s]+",
            r"\d+",
            &["Name & Address", "Bank", "Details"],
        ),
        FieldRule::anchored(r"a\}\+s vftf gDa/[:\s]+", r"\d+", &[r"a\}\+s.*?gfd"]),
    ]);

    catalog.insert(bank, "bank_name", vec![
        FieldRule::anchored(
            r"Name & Address of Bank[:\s]+",
            r"[A-Za-z\s,]+?",
            &["Details of Occupation", "Occupation", "Agreement"],
        ),
        FieldRule::anchored(r"a\}\+s.*?gfd[:\s]+", r"[A-Za-z\s,]+?", &[r"k\]zfut", "ljj/0f"]),
    ]);

    let financial = Category::FinancialDetails;

    catalog.insert(financial, "income_limit", vec![
        FieldRule::anchored(
            r"Income Limit\s*\(Annual Details\)\s*",
            AMOUNT,
            &["Involvement", "Details", "Bank"],
        ),
        FieldRule::anchored(r"Income Limit[:\s]*", AMOUNT, &["Details", "Bank"]),
        FieldRule::anchored(r"Financial Details[:\s]*", AMOUNT, &["Bank", "Agreement"]),
        FieldRule::open(r"jflifs[:\s]*", AMOUNT_LINE),
        FieldRule::open(r"cfly[:\s]*", AMOUNT_LINE),
    ]);

    catalog.insert(financial, "annual_income", vec![
        FieldRule::anchored(r"Annual Income[:\s]*", AMOUNT, &["Details", "Bank"]),
        FieldRule::open(r"jflifs cfo[:\s]*", AMOUNT_LINE),
    ]);
}
