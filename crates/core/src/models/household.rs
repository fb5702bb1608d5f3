use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::budget::Budget;
use super::family::FamilyMember;
use super::goal::Goal;
use super::holding::Holding;
use super::item::FinancialItem;
use super::loan::LoanReceivable;
use super::settings::Settings;
use super::transaction::Transaction;

/// One consistent snapshot of every collection plus the income scalar.
///
/// Every derived figure is computed from a single `Household`, so totals that
/// belong together are never read from different points in time. This is also
/// what gets serialized, encrypted and written to the portable file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Household {
    pub assets: Vec<FinancialItem>,
    pub liabilities: Vec<FinancialItem>,
    /// Lent cash, counted on the asset side
    pub loans: Vec<LoanReceivable>,
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
    pub family: Vec<FamilyMember>,
    pub goals: Vec<Goal>,
    /// Monthly income, stored apart from the collections
    pub income: Decimal,
    pub settings: Settings,
}

impl Household {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assets followed by lent cash, the asset side of net worth.
    pub fn asset_side(&self) -> Vec<Holding> {
        self.assets
            .iter()
            .map(Holding::from)
            .chain(self.loans.iter().map(Holding::from))
            .collect()
    }

    pub fn liability_side(&self) -> Vec<Holding> {
        self.liabilities.iter().map(Holding::from).collect()
    }

    /// Name of a family member, `"Self"` for the holder.
    pub fn member_name(&self, member_id: &str) -> Option<&str> {
        if member_id == super::ownership::SELF_MEMBER_ID {
            return Some(super::ownership::SELF_MEMBER_NAME);
        }
        self.family
            .iter()
            .find(|m| m.id == member_id)
            .map(|m| m.name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
            && self.liabilities.is_empty()
            && self.loans.is_empty()
            && self.transactions.is_empty()
            && self.budgets.is_empty()
            && self.family.is_empty()
            && self.goals.is_empty()
    }
}
