use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money;

/// A savings target. Tracked on its own, not part of net worth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub name: String,
    pub target_amount: Decimal,
    pub target_date: Option<NaiveDate>,

    /// Amount saved towards the goal so far
    #[serde(default)]
    pub current_amount: Decimal,
}

impl Goal {
    pub fn new(name: impl Into<String>, target_amount: Decimal, target_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            target_amount,
            target_date: Some(target_date),
            current_amount: Decimal::ZERO,
        }
    }

    pub fn with_current(mut self, current_amount: Decimal) -> Self {
        self.current_amount = current_amount;
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Percentage of the target reached, capped at 100. Zero for a zero target.
    pub fn progress_pct(&self) -> Decimal {
        money::ratio_pct(self.current_amount, self.target_amount)
            .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
    }

    /// Amount still to save, never negative.
    pub fn shortfall(&self) -> Decimal {
        money::sub(self.target_amount, self.current_amount).max(Decimal::ZERO)
    }
}
