use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::budget::Budget;
use crate::models::category;
use crate::models::summary::{BudgetPerformance, CategorySpend, MonthPeriod, PeriodAnalysis};
use crate::models::transaction::Transaction;
use crate::money;

/// Monthly cash-flow analysis over the transaction ledger.
///
/// A transaction is in period iff its calendar month and year match the
/// reference date's. No smoothing across month boundaries.
pub struct LedgerService;

impl LedgerService {
    pub fn new() -> Self {
        Self
    }

    /// Transactions dated inside `period`, in stored order. Undated ones never match.
    pub fn in_period<'a>(
        &self,
        transactions: &'a [Transaction],
        period: MonthPeriod,
    ) -> Vec<&'a Transaction> {
        transactions
            .iter()
            .filter(|t| t.date.is_some_and(|d| period.contains(d)))
            .collect()
    }

    /// Sum of in-period spend.
    pub fn monthly_expenses(
        &self,
        transactions: &[Transaction],
        reference_date: NaiveDate,
    ) -> Decimal {
        let current = self.in_period(transactions, MonthPeriod::containing(reference_date));
        money::saturating_sum(current.iter().map(|t| t.amount))
    }

    /// Expenses, savings, spend per category, and budget performance for the
    /// month containing `reference_date`.
    pub fn analyze_period(
        &self,
        transactions: &[Transaction],
        budgets: &[Budget],
        income: Decimal,
        reference_date: NaiveDate,
    ) -> PeriodAnalysis {
        let period = MonthPeriod::containing(reference_date);
        let current = self.in_period(transactions, period);

        let monthly_expenses = money::saturating_sum(current.iter().map(|t| t.amount));

        let mut expense_by_category: Vec<CategorySpend> = Vec::new();
        for tx in &current {
            let label = category::budget_label(budgets, tx.category_id.as_deref());
            match expense_by_category.iter_mut().find(|c| c.category == label) {
                Some(entry) => entry.amount = money::add(entry.amount, tx.amount),
                None => expense_by_category.push(CategorySpend {
                    category: label.to_string(),
                    amount: tx.amount,
                }),
            }
        }

        let budget_performance = budgets
            .iter()
            .map(|budget| {
                let spent = money::saturating_sum(
                    current
                        .iter()
                        .filter(|t| t.category_id.as_deref() == Some(budget.id.as_str()))
                        .map(|t| t.amount),
                );
                BudgetPerformance {
                    budget_id: budget.id.clone(),
                    name: budget.name.clone(),
                    budgeted: budget.amount,
                    spent,
                    remaining: money::sub(budget.amount, spent),
                    percentage: money::ratio_pct(spent, budget.amount),
                }
            })
            .collect();

        tracing::debug!(
            %period,
            in_period = current.len(),
            budgets = budgets.len(),
            "period analysed"
        );

        PeriodAnalysis {
            period,
            monthly_expenses,
            savings: money::sub(income, monthly_expenses),
            expense_by_category,
            budget_performance,
        }
    }

    /// [`analyze_period`](Self::analyze_period) for the current local month.
    pub fn analyze_current_period(
        &self,
        transactions: &[Transaction],
        budgets: &[Budget],
        income: Decimal,
    ) -> PeriodAnalysis {
        let today = chrono::Local::now().date_naive();
        self.analyze_period(transactions, budgets, income, today)
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}
