use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::holding::Holding;
use super::ownership::Perspective;
use crate::money;

// ── Net worth ───────────────────────────────────────────────────────

/// Headline totals for one perspective, all taken from the same snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetWorthSummary {
    pub perspective: Perspective,

    /// Assets plus lent cash, weighted by the perspective
    pub total_assets: Decimal,

    /// Liabilities weighted by the perspective (positive magnitude)
    pub total_liabilities: Decimal,

    /// total_assets - total_liabilities
    pub net_worth: Decimal,
}

/// One category bucket: the holdings that fell into it and their weighted sum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBucket {
    pub category: String,
    pub items: Vec<Holding>,
    pub total: Decimal,
}

/// Holdings grouped by category, in order of first encounter.
///
/// The order is NOT sorted by name or total. Callers that want a sorted view
/// must sort explicitly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub buckets: Vec<CategoryBucket>,
}

impl CategoryBreakdown {
    pub fn get(&self, category: &str) -> Option<&CategoryBucket> {
        self.buckets.iter().find(|b| b.category == category)
    }

    pub fn categories(&self) -> Vec<&str> {
        self.buckets.iter().map(|b| b.category.as_str()).collect()
    }

    /// Sum of every bucket total.
    pub fn total(&self) -> Decimal {
        money::saturating_sum(self.buckets.iter().map(|b| b.total))
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CategoryBucket> {
        self.buckets.iter()
    }

    /// Buckets ordered by total, largest first. Ties keep encounter order.
    pub fn sorted_by_total(&self) -> Vec<&CategoryBucket> {
        let mut buckets: Vec<&CategoryBucket> = self.buckets.iter().collect();
        buckets.sort_by(|a, b| b.total.cmp(&a.total));
        buckets
    }
}

/// "Family Overview" / "Personal Overview": totals plus both breakdowns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    pub summary: NetWorthSummary,
    /// Assets and lent cash (under "Lended Cash")
    pub assets: CategoryBreakdown,
    pub liabilities: CategoryBreakdown,
}

/// Management view: items grouped at full value, lent cash left out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailBreakdown {
    pub assets: CategoryBreakdown,
    pub liabilities: CategoryBreakdown,
}

/// Signed contribution of one category to net worth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionEntry {
    pub category: String,
    /// Asset-side amount in this category
    pub assets: Decimal,
    /// Liability-side amount in this category (positive magnitude)
    pub liabilities: Decimal,
    /// assets - liabilities: positive for asset categories, negative for debt
    pub net: Decimal,
}

// ── Period ledger ───────────────────────────────────────────────────

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonthPeriod {
    pub year: i32,
    pub month: u32,
}

impl MonthPeriod {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl std::fmt::Display for MonthPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Spend in one budget category during a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpend {
    pub category: String,
    pub amount: Decimal,
}

/// Budget-vs-actual for a single budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetPerformance {
    pub budget_id: String,
    pub name: String,
    pub budgeted: Decimal,
    pub spent: Decimal,
    /// budgeted - spent, negative when over budget
    pub remaining: Decimal,
    /// spent / budgeted * 100, or 0 for a zero budget
    pub percentage: Decimal,
}

impl BudgetPerformance {
    pub fn is_over_budget(&self) -> bool {
        self.remaining < Decimal::ZERO
    }
}

/// Cash flow for one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodAnalysis {
    pub period: MonthPeriod,

    /// Sum of in-period spend
    pub monthly_expenses: Decimal,

    /// income - monthly_expenses, not clamped
    pub savings: Decimal,

    /// In-period spend per budget name, in order of first encounter
    pub expense_by_category: Vec<CategorySpend>,

    /// One entry per budget, in stored order, even without spend
    pub budget_performance: Vec<BudgetPerformance>,
}

// ── Dashboard ───────────────────────────────────────────────────────

/// Everything the dashboard shows, derived from one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub net_worth: NetWorthSummary,
    pub composition: Vec<CompositionEntry>,
    pub period: PeriodAnalysis,
}
