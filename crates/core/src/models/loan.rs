use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How `interest_rate` on a loan is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InterestType {
    /// Rate is a percentage of the amount
    #[default]
    Percentage,
    /// Rate is a flat rupee amount
    Fixed,
}

impl InterestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterestType::Percentage => "percentage",
            InterestType::Fixed => "fixed",
        }
    }
}

/// Cash the account holder lent to someone and expects back.
///
/// Always counted in full for the holder: there is no ownership split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanReceivable {
    pub id: String,

    /// Who received the money
    pub receiver_name: String,

    pub amount: Decimal,

    /// Date the money was handed over
    pub date: Option<NaiveDate>,

    #[serde(default)]
    pub expected_return_date: Option<NaiveDate>,

    /// 0 when no interest was agreed
    #[serde(default)]
    pub interest_rate: Decimal,

    #[serde(default)]
    pub interest_type: InterestType,

    #[serde(default)]
    pub notes: Option<String>,
}

impl LoanReceivable {
    pub fn new(receiver_name: impl Into<String>, amount: Decimal, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            receiver_name: receiver_name.into(),
            amount,
            date: Some(date),
            expected_return_date: None,
            interest_rate: Decimal::ZERO,
            interest_type: InterestType::default(),
            notes: None,
        }
    }

    pub fn with_expected_return(mut self, date: NaiveDate) -> Self {
        self.expected_return_date = Some(date);
        self
    }

    pub fn with_interest(mut self, rate: Decimal, interest_type: InterestType) -> Self {
        self.interest_rate = rate;
        self.interest_type = interest_type;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn has_interest(&self) -> bool {
        self.interest_rate > Decimal::ZERO
    }
}
