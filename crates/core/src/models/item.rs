use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ownership::Ownership;

/// Which side of the balance sheet an item sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Asset,
    Liability,
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemKind::Asset => write!(f, "Asset"),
            ItemKind::Liability => write!(f, "Liability"),
        }
    }
}

/// An asset or liability with a (possibly shared) ownership split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialItem {
    /// Opaque id assigned by the store on creation
    pub id: String,

    pub name: String,

    /// Full value in rupees, before any ownership split
    pub value: Decimal,

    /// Always populated; absent categories are defaulted on the way in
    pub category: String,

    pub ownership: Ownership,

    pub kind: ItemKind,

    /// Date the item was recorded, if the store carried one
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl FinancialItem {
    pub fn new(
        kind: ItemKind,
        name: impl Into<String>,
        value: Decimal,
        category: impl Into<String>,
        ownership: Ownership,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            value,
            category: category.into(),
            ownership,
            kind,
            date: None,
        }
    }

    /// A solely owned asset.
    pub fn asset(name: impl Into<String>, value: Decimal, category: impl Into<String>) -> Self {
        Self::new(ItemKind::Asset, name, value, category, Ownership::sole())
    }

    /// A solely owned liability.
    pub fn liability(name: impl Into<String>, value: Decimal, category: impl Into<String>) -> Self {
        Self::new(ItemKind::Liability, name, value, category, Ownership::sole())
    }

    pub fn with_ownership(mut self, ownership: Ownership) -> Self {
        self.ownership = ownership;
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}
