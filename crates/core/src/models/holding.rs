use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::category::LENDED_CASH_CATEGORY;
use super::item::FinancialItem;
use super::loan::LoanReceivable;

/// Anything that contributes to net worth: an asset/liability or lent cash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Holding {
    Item(FinancialItem),
    Loan(LoanReceivable),
}

impl Holding {
    pub fn id(&self) -> &str {
        match self {
            Holding::Item(item) => &item.id,
            Holding::Loan(loan) => &loan.id,
        }
    }

    /// Display label: item name or loan receiver.
    pub fn label(&self) -> &str {
        match self {
            Holding::Item(item) => &item.name,
            Holding::Loan(loan) => &loan.receiver_name,
        }
    }

    /// Full value before any ownership split.
    pub fn gross_value(&self) -> Decimal {
        match self {
            Holding::Item(item) => item.value,
            Holding::Loan(loan) => loan.amount,
        }
    }

    /// Bucket this holding is grouped under.
    pub fn category(&self) -> &str {
        match self {
            Holding::Item(item) => &item.category,
            Holding::Loan(_) => LENDED_CASH_CATEGORY,
        }
    }
}

impl From<FinancialItem> for Holding {
    fn from(item: FinancialItem) -> Self {
        Holding::Item(item)
    }
}

impl From<&FinancialItem> for Holding {
    fn from(item: &FinancialItem) -> Self {
        Holding::Item(item.clone())
    }
}

impl From<LoanReceivable> for Holding {
    fn from(loan: LoanReceivable) -> Self {
        Holding::Loan(loan)
    }
}

impl From<&LoanReceivable> for Holding {
    fn from(loan: &LoanReceivable) -> Self {
        Holding::Loan(loan.clone())
    }
}

impl From<&Holding> for Holding {
    fn from(holding: &Holding) -> Self {
        holding.clone()
    }
}
