//! The single table of category labels and the lookups that fall back to them.
//!
//! Every place that needs a default label goes through here so the same
//! fallback is used by the net-worth breakdowns and the period ledger.

use super::budget::Budget;
use super::item::ItemKind;

/// Default bucket for assets without a category.
pub const DEFAULT_ASSET_CATEGORY: &str = "Other";

/// Default bucket for liabilities without a category.
pub const DEFAULT_LIABILITY_CATEGORY: &str = "Other Liability";

/// Bucket that lent cash is grouped under on the asset side.
pub const LENDED_CASH_CATEGORY: &str = "Lended Cash";

/// Label for spend whose budget cannot be resolved.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Categories offered when entering an asset.
pub const ASSET_CATEGORIES: [&str; 5] = ["Cash", "Real Estate", "Stocks", "Vehicle", "Other"];

/// Categories offered when entering a liability.
pub const LIABILITY_CATEGORIES: [&str; 5] = [
    "Mortgage",
    "Car Loan",
    "Credit Card",
    "Student Loan",
    "Other Liability",
];

/// Default category for an item kind.
pub fn default_category(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::Asset => DEFAULT_ASSET_CATEGORY,
        ItemKind::Liability => DEFAULT_LIABILITY_CATEGORY,
    }
}

/// Resolve a possibly absent (or blank) category to a usable label.
pub fn item_category(raw: Option<&str>, kind: ItemKind) -> String {
    match raw.map(str::trim) {
        Some(label) if !label.is_empty() => label.to_string(),
        _ => default_category(kind).to_string(),
    }
}

/// Standard pick list for an item kind.
pub fn standard_categories(kind: ItemKind) -> &'static [&'static str] {
    match kind {
        ItemKind::Asset => &ASSET_CATEGORIES,
        ItemKind::Liability => &LIABILITY_CATEGORIES,
    }
}

/// Resolve a transaction's `category_id` to its budget name.
///
/// Null ids, ids with no matching budget, and budgets with an empty name all
/// resolve to [`UNCATEGORIZED`].
pub fn budget_label<'a>(budgets: &'a [Budget], category_id: Option<&str>) -> &'a str {
    category_id
        .and_then(|id| budgets.iter().find(|b| b.id == id))
        .map(|b| b.name.as_str())
        .filter(|name| !name.is_empty())
        .unwrap_or(UNCATEGORIZED)
}
