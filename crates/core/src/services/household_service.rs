use rust_decimal::Decimal;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::budget::Budget;
use crate::models::family::{FamilyMember, FamilyType};
use crate::models::goal::Goal;
use crate::models::household::Household;
use crate::models::item::{FinancialItem, ItemKind};
use crate::models::loan::LoanReceivable;
use crate::models::ownership::{Ownership, OwnershipKind, SELF_MEMBER_ID};
use crate::models::transaction::Transaction;

/// A stored record addressable by id.
pub trait Record {
    /// Name used in `NotFound` errors.
    const KIND: &'static str;

    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
}

macro_rules! impl_record {
    ($ty:ty, $kind:literal) => {
        impl Record for $ty {
            const KIND: &'static str = $kind;

            fn id(&self) -> &str {
                &self.id
            }

            fn set_id(&mut self, id: String) {
                self.id = id;
            }
        }
    };
}

impl_record!(FinancialItem, "Item");
impl_record!(LoanReceivable, "Loan");
impl_record!(Transaction, "Transaction");
impl_record!(Budget, "Budget");
impl_record!(FamilyMember, "Family member");
impl_record!(Goal, "Goal");

/// Entry rules and create/update/delete for every household collection.
///
/// Validation happens here, at entry time only. The aggregation services
/// accept whatever is stored.
pub struct HouseholdService;

impl HouseholdService {
    pub fn new() -> Self {
        Self
    }

    // ── Entry validation ────────────────────────────────────────────

    /// Validate an asset/liability and canonicalise its ownership.
    /// Sole ownership is rewritten to the holder at 100%.
    pub fn prepare_item(&self, mut item: FinancialItem) -> Result<FinancialItem, CoreError> {
        item.name = item.name.trim().to_string();
        item.category = item.category.trim().to_string();
        require_text(&item.name, "name")?;
        require_text(&item.category, "category")?;
        require_nonnegative(item.value, "value")?;

        match item.ownership.kind {
            OwnershipKind::Sole => item.ownership = Ownership::sole(),
            OwnershipKind::Partial => {
                if item.ownership.allocations.is_empty() {
                    return Err(CoreError::ValidationError(
                        "Partial ownership needs at least one allocation".into(),
                    ));
                }
                if item
                    .ownership
                    .allocations
                    .iter()
                    .any(|a| a.percentage < Decimal::ZERO)
                {
                    return Err(CoreError::ValidationError(
                        "Ownership percentages cannot be negative".into(),
                    ));
                }
                let total = item.ownership.total_percentage();
                if total != Decimal::ONE_HUNDRED {
                    return Err(CoreError::ValidationError(format!(
                        "Ownership percentages must add up to 100% (got {total}%)"
                    )));
                }
            }
        }
        Ok(item)
    }

    pub fn prepare_loan(&self, mut loan: LoanReceivable) -> Result<LoanReceivable, CoreError> {
        loan.receiver_name = loan.receiver_name.trim().to_string();
        require_text(&loan.receiver_name, "receiver name")?;
        require_nonnegative(loan.amount, "amount")?;
        require_nonnegative(loan.interest_rate, "interest rate")?;
        if loan.date.is_none() {
            return Err(CoreError::ValidationError("Loan date is required".into()));
        }
        Ok(loan)
    }

    pub fn prepare_transaction(&self, mut tx: Transaction) -> Result<Transaction, CoreError> {
        tx.name = tx.name.trim().to_string();
        require_text(&tx.name, "name")?;
        require_nonnegative(tx.amount, "amount")?;
        if tx.date.is_none() {
            return Err(CoreError::ValidationError(
                "Transaction date is required".into(),
            ));
        }
        Ok(tx)
    }

    pub fn prepare_budget(&self, mut budget: Budget) -> Result<Budget, CoreError> {
        budget.name = budget.name.trim().to_string();
        require_text(&budget.name, "name")?;
        require_nonnegative(budget.amount, "amount")?;
        Ok(budget)
    }

    pub fn prepare_member(&self, mut member: FamilyMember) -> Result<FamilyMember, CoreError> {
        member.name = member.name.trim().to_string();
        member.relationship = member.relationship.trim().to_string();
        require_text(&member.name, "name")?;
        require_text(&member.relationship, "relationship")?;
        if member.id == SELF_MEMBER_ID {
            return Err(CoreError::ValidationError(format!(
                "'{SELF_MEMBER_ID}' is reserved for the account holder"
            )));
        }
        Ok(member)
    }

    pub fn prepare_goal(&self, mut goal: Goal) -> Result<Goal, CoreError> {
        goal.name = goal.name.trim().to_string();
        require_text(&goal.name, "name")?;
        if goal.target_amount <= Decimal::ZERO {
            return Err(CoreError::ValidationError(
                "Goal target amount must be positive".into(),
            ));
        }
        if goal.target_date.is_none() {
            return Err(CoreError::ValidationError("Goal target date is required".into()));
        }
        require_nonnegative(goal.current_amount, "current amount")?;
        Ok(goal)
    }

    // ── Mutations ───────────────────────────────────────────────────

    /// Add an asset or liability (by its `kind`). Returns the assigned id.
    pub fn add_item(
        &self,
        household: &mut Household,
        item: FinancialItem,
    ) -> Result<String, CoreError> {
        let item = self.prepare_item(item)?;
        let list = items_mut(household, item.kind);
        Ok(insert(list, item))
    }

    /// Replace an item, keeping its id. The item stays on the side given by
    /// `kind`; moving between assets and liabilities is a remove plus add.
    pub fn update_item(
        &self,
        household: &mut Household,
        kind: ItemKind,
        id: &str,
        mut item: FinancialItem,
    ) -> Result<(), CoreError> {
        item.kind = kind;
        let item = self.prepare_item(item)?;
        replace(items_mut(household, kind), id, item)
    }

    pub fn remove_item(
        &self,
        household: &mut Household,
        kind: ItemKind,
        id: &str,
    ) -> Result<FinancialItem, CoreError> {
        remove(items_mut(household, kind), id)
    }

    pub fn add_loan(
        &self,
        household: &mut Household,
        loan: LoanReceivable,
    ) -> Result<String, CoreError> {
        let loan = self.prepare_loan(loan)?;
        Ok(insert(&mut household.loans, loan))
    }

    pub fn update_loan(
        &self,
        household: &mut Household,
        id: &str,
        loan: LoanReceivable,
    ) -> Result<(), CoreError> {
        let loan = self.prepare_loan(loan)?;
        replace(&mut household.loans, id, loan)
    }

    pub fn remove_loan(
        &self,
        household: &mut Household,
        id: &str,
    ) -> Result<LoanReceivable, CoreError> {
        remove(&mut household.loans, id)
    }

    pub fn add_transaction(
        &self,
        household: &mut Household,
        tx: Transaction,
    ) -> Result<String, CoreError> {
        let tx = self.prepare_transaction(tx)?;
        Ok(insert(&mut household.transactions, tx))
    }

    pub fn update_transaction(
        &self,
        household: &mut Household,
        id: &str,
        tx: Transaction,
    ) -> Result<(), CoreError> {
        let tx = self.prepare_transaction(tx)?;
        replace(&mut household.transactions, id, tx)
    }

    pub fn remove_transaction(
        &self,
        household: &mut Household,
        id: &str,
    ) -> Result<Transaction, CoreError> {
        remove(&mut household.transactions, id)
    }

    pub fn add_budget(
        &self,
        household: &mut Household,
        budget: Budget,
    ) -> Result<String, CoreError> {
        let budget = self.prepare_budget(budget)?;
        Ok(insert(&mut household.budgets, budget))
    }

    pub fn update_budget(
        &self,
        household: &mut Household,
        id: &str,
        budget: Budget,
    ) -> Result<(), CoreError> {
        let budget = self.prepare_budget(budget)?;
        replace(&mut household.budgets, id, budget)
    }

    /// Remove a budget. Transactions pointing at it keep their id and fall
    /// back to "Uncategorized".
    pub fn remove_budget(&self, household: &mut Household, id: &str) -> Result<Budget, CoreError> {
        remove(&mut household.budgets, id)
    }

    pub fn add_member(
        &self,
        household: &mut Household,
        member: FamilyMember,
    ) -> Result<String, CoreError> {
        let member = self.prepare_member(member)?;
        Ok(insert(&mut household.family, member))
    }

    pub fn update_member(
        &self,
        household: &mut Household,
        id: &str,
        member: FamilyMember,
    ) -> Result<(), CoreError> {
        let member = self.prepare_member(member)?;
        replace(&mut household.family, id, member)
    }

    /// Remove a family member. Allocations naming them are left in place.
    pub fn remove_member(
        &self,
        household: &mut Household,
        id: &str,
    ) -> Result<FamilyMember, CoreError> {
        remove(&mut household.family, id)
    }

    pub fn add_goal(&self, household: &mut Household, goal: Goal) -> Result<String, CoreError> {
        let goal = self.prepare_goal(goal)?;
        Ok(insert(&mut household.goals, goal))
    }

    pub fn update_goal(
        &self,
        household: &mut Household,
        id: &str,
        goal: Goal,
    ) -> Result<(), CoreError> {
        let goal = self.prepare_goal(goal)?;
        replace(&mut household.goals, id, goal)
    }

    pub fn remove_goal(&self, household: &mut Household, id: &str) -> Result<Goal, CoreError> {
        remove(&mut household.goals, id)
    }

    // ── Listing orders ──────────────────────────────────────────────

    /// Newest first; undated transactions go last. Ties keep stored order.
    pub fn transactions_by_date<'a>(
        &self,
        transactions: &'a [Transaction],
    ) -> Vec<&'a Transaction> {
        let mut sorted: Vec<&Transaction> = transactions.iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted
    }

    /// Loans with an expected return date first (soonest first), then the
    /// rest by the date they were lent.
    pub fn loans_by_return_date<'a>(&self, loans: &'a [LoanReceivable]) -> Vec<&'a LoanReceivable> {
        let mut sorted: Vec<&LoanReceivable> = loans.iter().collect();
        sorted.sort_by(|a, b| match (a.expected_return_date, b.expected_return_date) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.date.cmp(&b.date),
        });
        sorted
    }

    /// Largest value first.
    pub fn items_by_value<'a>(&self, items: &'a [FinancialItem]) -> Vec<&'a FinancialItem> {
        let mut sorted: Vec<&FinancialItem> = items.iter().collect();
        sorted.sort_by(|a, b| b.value.cmp(&a.value));
        sorted
    }

    /// Members of one family type, in stored order.
    pub fn members_of<'a>(
        &self,
        family: &'a [FamilyMember],
        family_type: FamilyType,
    ) -> Vec<&'a FamilyMember> {
        family.iter().filter(|m| m.family_type == family_type).collect()
    }
}

impl Default for HouseholdService {
    fn default() -> Self {
        Self::new()
    }
}

// ── Internal ────────────────────────────────────────────────────────

fn items_mut(household: &mut Household, kind: ItemKind) -> &mut Vec<FinancialItem> {
    match kind {
        ItemKind::Asset => &mut household.assets,
        ItemKind::Liability => &mut household.liabilities,
    }
}

fn require_text(value: &str, field: &str) -> Result<(), CoreError> {
    if value.is_empty() {
        return Err(CoreError::ValidationError(format!("{field} is required")));
    }
    Ok(())
}

fn require_nonnegative(value: Decimal, field: &str) -> Result<(), CoreError> {
    if value < Decimal::ZERO {
        return Err(CoreError::ValidationError(format!(
            "{field} cannot be negative (got {value})"
        )));
    }
    Ok(())
}

/// Append a record under a fresh id.
fn insert<T: Record>(list: &mut Vec<T>, mut record: T) -> String {
    let id = Uuid::new_v4().to_string();
    record.set_id(id.clone());
    list.push(record);
    id
}

/// Replace the record with `id` in place, preserving its position and id.
fn replace<T: Record>(list: &mut [T], id: &str, mut record: T) -> Result<(), CoreError> {
    let slot = list
        .iter_mut()
        .find(|r| r.id() == id)
        .ok_or_else(|| CoreError::not_found(T::KIND, id))?;
    record.set_id(id.to_string());
    *slot = record;
    Ok(())
}

fn remove<T: Record>(list: &mut Vec<T>, id: &str) -> Result<T, CoreError> {
    let idx = list
        .iter()
        .position(|r| r.id() == id)
        .ok_or_else(|| CoreError::not_found(T::KIND, id))?;
    Ok(list.remove(idx))
}
