use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single spend from the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,

    pub name: String,

    /// Amount spent (nonnegative)
    pub amount: Decimal,

    /// `None` when the stored date could not be read; such a transaction is
    /// never inside any period.
    pub date: Option<NaiveDate>,

    /// Id of the budget this spend belongs to. May dangle.
    #[serde(default)]
    pub category_id: Option<String>,
}

impl Transaction {
    pub fn new(name: impl Into<String>, amount: Decimal, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            amount,
            date: Some(date),
            category_id: None,
        }
    }

    pub fn in_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}
