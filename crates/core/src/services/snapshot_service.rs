use std::str::FromStr;

use chrono::{DateTime, NaiveDate};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde_json::{json, Map, Value};

use crate::models::budget::Budget;
use crate::models::category;
use crate::models::document::{Document, RawSnapshot};
use crate::models::family::{FamilyMember, FamilyType};
use crate::models::goal::Goal;
use crate::models::household::Household;
use crate::models::item::{FinancialItem, ItemKind};
use crate::models::loan::{InterestType, LoanReceivable};
use crate::models::ownership::{Allocation, Ownership, OwnershipKind};
use crate::models::settings::Settings;
use crate::models::transaction::Transaction;

/// The one place loosely typed store documents become typed entities.
///
/// Normalization never fails. Missing or malformed fields fall back to the
/// defaults below, so everything downstream works on fully populated values:
///
/// | field                         | fallback                         |
/// |-------------------------------|----------------------------------|
/// | amount / value / percentage   | `0`                              |
/// | asset / liability category    | `"Other"` / `"Other Liability"`  |
/// | ownership (absent, malformed) | sole, holder at 100%             |
/// | date                          | `None`                           |
/// | interest type                 | percentage                       |
/// | family type                   | Primary                          |
pub struct SnapshotService;

impl SnapshotService {
    pub fn new() -> Self {
        Self
    }

    /// Assemble a household from one raw snapshot.
    pub fn assemble(&self, raw: &RawSnapshot, settings: Settings) -> Household {
        Household {
            assets: raw
                .assets
                .iter()
                .map(|d| self.item(d, ItemKind::Asset))
                .collect(),
            liabilities: raw
                .liabilities
                .iter()
                .map(|d| self.item(d, ItemKind::Liability))
                .collect(),
            loans: raw.lended_cash.iter().map(|d| self.loan(d)).collect(),
            transactions: raw.transactions.iter().map(|d| self.transaction(d)).collect(),
            budgets: raw.budgets.iter().map(|d| self.budget(d)).collect(),
            family: raw.family.iter().map(|d| self.member(d)).collect(),
            goals: raw.goals.iter().map(|d| self.goal(d)).collect(),
            income: raw
                .income
                .as_ref()
                .map(|fields| coerce_amount(fields.get("amount"), "income", "amount"))
                .unwrap_or(Decimal::ZERO),
            settings,
        }
    }

    // ── Documents → entities ────────────────────────────────────────

    pub fn item(&self, doc: &Document, kind: ItemKind) -> FinancialItem {
        let raw_category = text(doc.get("category"));
        FinancialItem {
            id: doc.id.clone(),
            name: text(doc.get("name")).unwrap_or_default(),
            value: coerce_amount(doc.get("value"), &doc.id, "value"),
            category: category::item_category(raw_category.as_deref(), kind),
            ownership: self.ownership(doc),
            kind,
            date: date(doc.get("date")),
        }
    }

    /// Ownership from `ownership: { type, allocations }`, or from the older
    /// flat `ownershipType` + `allocations` fields. Anything unusable means
    /// the holder owns it outright.
    pub fn ownership(&self, doc: &Document) -> Ownership {
        let (kind_field, allocations) = match doc.get("ownership") {
            Some(Value::Object(map)) => (map.get("type"), map.get("allocations")),
            Some(_) => {
                tracing::warn!(id = %doc.id, "ownership is not an object, treating as sole");
                return Ownership::sole();
            }
            None => (doc.get("ownershipType"), doc.get("allocations")),
        };

        let Some(Value::Array(entries)) = allocations else {
            tracing::debug!(id = %doc.id, "no allocations recorded, treating as sole");
            return Ownership::sole();
        };

        let kind = match kind_field.and_then(Value::as_str) {
            Some("sole") => OwnershipKind::Sole,
            _ => OwnershipKind::Partial,
        };

        let allocations = entries
            .iter()
            .filter_map(|entry| match entry {
                Value::Object(map) => Some(Allocation {
                    member_id: text(map.get("memberId")).unwrap_or_default(),
                    member_name: text(map.get("memberName")).unwrap_or_default(),
                    percentage: coerce_amount(map.get("percentage"), &doc.id, "percentage"),
                }),
                _ => {
                    tracing::warn!(id = %doc.id, "skipping malformed allocation entry");
                    None
                }
            })
            .collect();

        Ownership { kind, allocations }
    }

    pub fn loan(&self, doc: &Document) -> LoanReceivable {
        LoanReceivable {
            id: doc.id.clone(),
            receiver_name: text(doc.get("receiverName")).unwrap_or_default(),
            amount: coerce_amount(doc.get("amount"), &doc.id, "amount"),
            date: date(doc.get("date")),
            expected_return_date: date(doc.get("expectedReturnDate")),
            interest_rate: decimal(doc.get("interestRate")).unwrap_or(Decimal::ZERO),
            interest_type: match doc.get("interestType").and_then(Value::as_str) {
                Some("fixed") => InterestType::Fixed,
                _ => InterestType::Percentage,
            },
            notes: text(doc.get("notes")).filter(|n| !n.is_empty()),
        }
    }

    pub fn transaction(&self, doc: &Document) -> Transaction {
        let tx_date = date(doc.get("date"));
        if tx_date.is_none() {
            tracing::warn!(id = %doc.id, "transaction has no readable date");
        }
        Transaction {
            id: doc.id.clone(),
            name: text(doc.get("name")).unwrap_or_default(),
            amount: coerce_amount(doc.get("amount"), &doc.id, "amount"),
            date: tx_date,
            category_id: text(doc.get("categoryId")).filter(|c| !c.is_empty()),
        }
    }

    pub fn budget(&self, doc: &Document) -> Budget {
        Budget {
            id: doc.id.clone(),
            name: text(doc.get("name")).unwrap_or_default(),
            amount: coerce_amount(doc.get("amount"), &doc.id, "amount"),
        }
    }

    pub fn member(&self, doc: &Document) -> FamilyMember {
        FamilyMember {
            id: doc.id.clone(),
            name: text(doc.get("name")).unwrap_or_default(),
            relationship: text(doc.get("relationship")).unwrap_or_default(),
            family_type: match doc.get("familyType").and_then(Value::as_str) {
                Some("Extended") => FamilyType::Extended,
                _ => FamilyType::Primary,
            },
        }
    }

    pub fn goal(&self, doc: &Document) -> Goal {
        Goal {
            id: doc.id.clone(),
            name: text(doc.get("name")).unwrap_or_default(),
            target_amount: coerce_amount(doc.get("targetAmount"), &doc.id, "targetAmount"),
            target_date: date(doc.get("targetDate")),
            current_amount: decimal(doc.get("currentAmount")).unwrap_or(Decimal::ZERO),
        }
    }

    // ── Entities → document fields ──────────────────────────────────

    pub fn item_fields(&self, item: &FinancialItem) -> Map<String, Value> {
        let allocations: Vec<Value> = item
            .ownership
            .allocations
            .iter()
            .map(|a| {
                json!({
                    "memberId": a.member_id,
                    "memberName": a.member_name,
                    "percentage": number(a.percentage),
                })
            })
            .collect();
        let mut fields = object(json!({
            "name": item.name,
            "value": number(item.value),
            "category": item.category,
            "ownership": {
                "type": item.ownership.kind.as_str(),
                "allocations": allocations,
            },
        }));
        if let Some(d) = item.date {
            fields.insert("date".into(), Value::String(d.to_string()));
        }
        fields
    }

    pub fn loan_fields(&self, loan: &LoanReceivable) -> Map<String, Value> {
        object(json!({
            "receiverName": loan.receiver_name,
            "amount": number(loan.amount),
            "date": loan.date.map(|d| d.to_string()),
            "expectedReturnDate": loan.expected_return_date.map(|d| d.to_string()),
            "interestRate": number(loan.interest_rate),
            "interestType": loan.interest_type.as_str(),
            "notes": loan.notes.clone().unwrap_or_default(),
        }))
    }

    pub fn transaction_fields(&self, tx: &Transaction) -> Map<String, Value> {
        object(json!({
            "name": tx.name,
            "amount": number(tx.amount),
            "date": tx.date.map(|d| d.to_string()),
            "categoryId": tx.category_id,
        }))
    }

    pub fn budget_fields(&self, budget: &Budget) -> Map<String, Value> {
        object(json!({
            "name": budget.name,
            "amount": number(budget.amount),
        }))
    }

    pub fn member_fields(&self, member: &FamilyMember) -> Map<String, Value> {
        object(json!({
            "name": member.name,
            "relationship": member.relationship,
            "familyType": member.family_type.as_str(),
        }))
    }

    pub fn goal_fields(&self, goal: &Goal) -> Map<String, Value> {
        object(json!({
            "name": goal.name,
            "targetAmount": number(goal.target_amount),
            "targetDate": goal.target_date.map(|d| d.to_string()),
            "currentAmount": number(goal.current_amount),
        }))
    }

    pub fn income_fields(&self, income: Decimal) -> Map<String, Value> {
        object(json!({ "amount": number(income) }))
    }
}

impl Default for SnapshotService {
    fn default() -> Self {
        Self::new()
    }
}

// ── Coercion helpers ────────────────────────────────────────────────

/// Numeric coercion: JSON numbers and numeric strings. Anything else is `None`.
pub fn decimal(value: Option<&Value>) -> Option<Decimal> {
    let raw = match value? {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    Decimal::from_str(&raw)
        .or_else(|_| Decimal::from_scientific(&raw))
        .ok()
}

/// Like [`decimal`] but falls back to zero, logging the substitution.
fn coerce_amount(value: Option<&Value>, id: &str, field: &str) -> Decimal {
    match decimal(value) {
        Some(d) => d,
        None => {
            if value.is_some_and(|v| !v.is_null()) {
                tracing::warn!(id, field, "unreadable number, using 0");
            }
            Decimal::ZERO
        }
    }
}

fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Dates as `YYYY-MM-DD`, RFC 3339, or a `{ seconds }` timestamp object.
pub fn date(value: Option<&Value>) -> Option<NaiveDate> {
    match value? {
        Value::String(s) => {
            let s = s.trim();
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
        }
        Value::Object(map) => map
            .get("seconds")
            .and_then(Value::as_i64)
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .map(|dt| dt.date_naive()),
        _ => None,
    }
}

/// JSON number when the amount survives an `f64` round trip, its exact
/// string form otherwise. `decimal` reads both back.
fn number(value: Decimal) -> Value {
    match value.to_f64() {
        Some(f) if Decimal::from_f64(f) == Some(value) => json!(f),
        _ => Value::String(value.to_string()),
    }
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}
