//! Recompute-on-snapshot host.
//!
//! `LiveLedger` keeps the latest snapshot of every collection the store
//! publishes and rebuilds derived views from scratch on demand. Several
//! updates landing together collapse into one recomputation, and a stale
//! result is simply replaced by the next one.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use tokio::sync::watch;

use crate::errors::CoreError;
use crate::models::budget::Budget;
use crate::models::document::{Collection, Document, RawSnapshot};
use crate::models::family::FamilyMember;
use crate::models::goal::Goal;
use crate::models::household::Household;
use crate::models::item::{FinancialItem, ItemKind};
use crate::models::loan::LoanReceivable;
use crate::models::ownership::Perspective;
use crate::models::settings::Settings;
use crate::models::summary::Dashboard;
use crate::models::transaction::Transaction;
use crate::services::dashboard_service::DashboardService;
use crate::services::household_service::HouseholdService;
use crate::services::snapshot_service::SnapshotService;
use crate::sources::traits::CollectionStore;

struct Feeds {
    assets: watch::Receiver<Vec<Document>>,
    liabilities: watch::Receiver<Vec<Document>>,
    lended_cash: watch::Receiver<Vec<Document>>,
    transactions: watch::Receiver<Vec<Document>>,
    budgets: watch::Receiver<Vec<Document>>,
    family: watch::Receiver<Vec<Document>>,
    goals: watch::Receiver<Vec<Document>>,
    income: watch::Receiver<Option<Map<String, Value>>>,
}

/// Subscribes to every household collection of a [`CollectionStore`] and
/// derives dashboards from whatever was delivered last.
pub struct LiveLedger<S: CollectionStore> {
    store: Arc<S>,
    feeds: Feeds,
    raw: RawSnapshot,
    settings: Settings,
    snapshots: SnapshotService,
    rules: HouseholdService,
    dashboards: DashboardService,
}

impl<S: CollectionStore> LiveLedger<S> {
    /// Subscribe to all collections and take their current contents.
    pub async fn connect(store: Arc<S>, settings: Settings) -> Result<Self, CoreError> {
        let feeds = Feeds {
            assets: store.subscribe(Collection::Assets).await?,
            liabilities: store.subscribe(Collection::Liabilities).await?,
            lended_cash: store.subscribe(Collection::LendedCash).await?,
            transactions: store.subscribe(Collection::Transactions).await?,
            budgets: store.subscribe(Collection::Budgets).await?,
            family: store.subscribe(Collection::Family).await?,
            goals: store.subscribe(Collection::Goals).await?,
            income: store.subscribe_income().await?,
        };
        tracing::debug!(store = store.name(), "live ledger connected");

        let mut ledger = Self {
            store,
            feeds,
            raw: RawSnapshot::default(),
            settings,
            snapshots: SnapshotService::new(),
            rules: HouseholdService::new(),
            dashboards: DashboardService::new(),
        };
        ledger.pull();
        Ok(ledger)
    }

    /// Wait until any collection (or income) publishes a new snapshot, then
    /// take the latest value of every feed.
    pub async fn changed(&mut self) -> Result<(), CoreError> {
        let f = &mut self.feeds;
        let result = tokio::select! {
            r = f.assets.changed() => r,
            r = f.liabilities.changed() => r,
            r = f.lended_cash.changed() => r,
            r = f.transactions.changed() => r,
            r = f.budgets.changed() => r,
            r = f.family.changed() => r,
            r = f.goals.changed() => r,
            r = f.income.changed() => r,
        };
        result.map_err(|_| {
            CoreError::StoreClosed(format!("{} stopped publishing", self.store.name()))
        })?;
        self.pull();
        Ok(())
    }

    /// Wait for the next change and return the freshly derived dashboard.
    pub async fn next_dashboard(
        &mut self,
        perspective: Perspective,
        reference_date: NaiveDate,
    ) -> Result<Dashboard, CoreError> {
        self.changed().await?;
        Ok(self.dashboard(perspective, reference_date))
    }

    /// Typed household built from the latest raw snapshot.
    pub fn household(&self) -> Household {
        self.snapshots.assemble(&self.raw, self.settings.clone())
    }

    pub fn raw_snapshot(&self) -> &RawSnapshot {
        &self.raw
    }

    /// Dashboard from the latest snapshot. Pure: calling it twice without an
    /// intervening change gives identical results.
    pub fn dashboard(&self, perspective: Perspective, reference_date: NaiveDate) -> Dashboard {
        let household = self.household();
        self.dashboards.build(&household, perspective, reference_date)
    }

    // ── Writes (validated, then sent to the store) ──────────────────

    pub async fn add_item(&self, item: FinancialItem) -> Result<String, CoreError> {
        let item = self.rules.prepare_item(item)?;
        let fields = self.snapshots.item_fields(&item);
        self.store.create(item_collection(item.kind), fields).await
    }

    pub async fn update_item(&self, id: &str, item: FinancialItem) -> Result<(), CoreError> {
        let item = self.rules.prepare_item(item)?;
        let fields = self.snapshots.item_fields(&item);
        self.store.update(item_collection(item.kind), id, fields).await
    }

    pub async fn add_loan(&self, loan: LoanReceivable) -> Result<String, CoreError> {
        let loan = self.rules.prepare_loan(loan)?;
        self.store
            .create(Collection::LendedCash, self.snapshots.loan_fields(&loan))
            .await
    }

    pub async fn update_loan(&self, id: &str, loan: LoanReceivable) -> Result<(), CoreError> {
        let loan = self.rules.prepare_loan(loan)?;
        self.store
            .update(Collection::LendedCash, id, self.snapshots.loan_fields(&loan))
            .await
    }

    pub async fn add_transaction(&self, tx: Transaction) -> Result<String, CoreError> {
        let tx = self.rules.prepare_transaction(tx)?;
        self.store
            .create(Collection::Transactions, self.snapshots.transaction_fields(&tx))
            .await
    }

    pub async fn update_transaction(&self, id: &str, tx: Transaction) -> Result<(), CoreError> {
        let tx = self.rules.prepare_transaction(tx)?;
        self.store
            .update(Collection::Transactions, id, self.snapshots.transaction_fields(&tx))
            .await
    }

    pub async fn add_budget(&self, budget: Budget) -> Result<String, CoreError> {
        let budget = self.rules.prepare_budget(budget)?;
        self.store
            .create(Collection::Budgets, self.snapshots.budget_fields(&budget))
            .await
    }

    pub async fn update_budget(&self, id: &str, budget: Budget) -> Result<(), CoreError> {
        let budget = self.rules.prepare_budget(budget)?;
        self.store
            .update(Collection::Budgets, id, self.snapshots.budget_fields(&budget))
            .await
    }

    pub async fn add_member(&self, member: FamilyMember) -> Result<String, CoreError> {
        let member = self.rules.prepare_member(member)?;
        self.store
            .create(Collection::Family, self.snapshots.member_fields(&member))
            .await
    }

    pub async fn update_member(&self, id: &str, member: FamilyMember) -> Result<(), CoreError> {
        let member = self.rules.prepare_member(member)?;
        self.store
            .update(Collection::Family, id, self.snapshots.member_fields(&member))
            .await
    }

    pub async fn add_goal(&self, goal: Goal) -> Result<String, CoreError> {
        let goal = self.rules.prepare_goal(goal)?;
        self.store
            .create(Collection::Goals, self.snapshots.goal_fields(&goal))
            .await
    }

    pub async fn update_goal(&self, id: &str, goal: Goal) -> Result<(), CoreError> {
        let goal = self.rules.prepare_goal(goal)?;
        self.store
            .update(Collection::Goals, id, self.snapshots.goal_fields(&goal))
            .await
    }

    pub async fn delete(&self, collection: Collection, id: &str) -> Result<(), CoreError> {
        self.store.delete(collection, id).await
    }

    pub async fn set_income(&self, amount: Decimal) -> Result<(), CoreError> {
        self.store.write_income(amount).await
    }

    // ── Internal ────────────────────────────────────────────────────

    fn pull(&mut self) {
        let f = &mut self.feeds;
        let raw = &mut self.raw;
        raw.replace(Collection::Assets, f.assets.borrow_and_update().clone());
        raw.replace(Collection::Liabilities, f.liabilities.borrow_and_update().clone());
        raw.replace(Collection::LendedCash, f.lended_cash.borrow_and_update().clone());
        raw.replace(Collection::Transactions, f.transactions.borrow_and_update().clone());
        raw.replace(Collection::Budgets, f.budgets.borrow_and_update().clone());
        raw.replace(Collection::Family, f.family.borrow_and_update().clone());
        raw.replace(Collection::Goals, f.goals.borrow_and_update().clone());
        raw.income = f.income.borrow_and_update().clone();
        tracing::debug!(
            assets = raw.assets.len(),
            liabilities = raw.liabilities.len(),
            transactions = raw.transactions.len(),
            "snapshot refreshed"
        );
    }
}

fn item_collection(kind: ItemKind) -> Collection {
    match kind {
        ItemKind::Asset => Collection::Assets,
        ItemKind::Liability => Collection::Liabilities,
    }
}
