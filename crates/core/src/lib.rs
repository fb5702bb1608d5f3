pub mod errors;
pub mod format;
pub mod live;
pub mod logging;
pub mod models;
pub mod money;
pub mod services;
pub mod sources;
pub mod storage;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use models::{
    budget::Budget,
    document::RawSnapshot,
    family::{FamilyMember, FamilyType},
    goal::Goal,
    holding::Holding,
    household::Household,
    item::{FinancialItem, ItemKind},
    loan::LoanReceivable,
    ownership::Perspective,
    settings::Settings,
    summary::{
        CompositionEntry, Dashboard, DetailBreakdown, NetWorthSummary, Overview, PeriodAnalysis,
    },
    transaction::Transaction,
};
use services::{
    category_service::CategoryService, dashboard_service::DashboardService,
    household_service::HouseholdService, ledger_service::LedgerService,
    ownership_service::OwnershipService, snapshot_service::SnapshotService,
};
use storage::manager::StorageManager;

use errors::CoreError;

/// Main entry point for the folio-core library.
/// Holds one household snapshot and the services that derive views from it.
#[must_use]
pub struct FolioTracker {
    household: Household,
    ownership_service: OwnershipService,
    category_service: CategoryService,
    ledger_service: LedgerService,
    household_service: HouseholdService,
    dashboard_service: DashboardService,
    /// Tracks whether any mutation has occurred since the last save/load.
    dirty: bool,
}

impl std::fmt::Debug for FolioTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FolioTracker")
            .field("assets", &self.household.assets.len())
            .field("liabilities", &self.household.liabilities.len())
            .field("loans", &self.household.loans.len())
            .field("transactions", &self.household.transactions.len())
            .field("settings", &self.household.settings)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl FolioTracker {
    /// An empty household with default settings.
    pub fn create_new() -> Self {
        Self::build(Household::default())
    }

    /// Wrap an existing household snapshot.
    pub fn from_household(household: Household) -> Self {
        Self::build(household)
    }

    /// Normalize raw store documents into a household. Never fails: malformed
    /// fields fall back to defaults.
    pub fn from_documents(raw: &RawSnapshot, settings: Settings) -> Self {
        Self::build(SnapshotService::new().assemble(raw, settings))
    }

    /// Load from encrypted bytes (password required).
    pub fn load_from_bytes(encrypted: &[u8], password: &str) -> Result<Self, CoreError> {
        let household = StorageManager::load_from_bytes(encrypted, password)?;
        Ok(Self::build(household))
    }

    /// Encrypt the household. Clears the unsaved-changes flag on success.
    pub fn save_to_bytes(&mut self, password: &str) -> Result<Vec<u8>, CoreError> {
        let bytes = StorageManager::save_to_bytes(&self.household, password)?;
        self.dirty = false;
        Ok(bytes)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: &str, password: &str) -> Result<Self, CoreError> {
        let household = StorageManager::load_from_file(path, password)?;
        Ok(Self::build(household))
    }

    /// Clears the unsaved-changes flag on success.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_file(&mut self, path: &str, password: &str) -> Result<(), CoreError> {
        StorageManager::save_to_file(&self.household, path, password)?;
        self.dirty = false;
        Ok(())
    }

    /// The current snapshot.
    #[must_use]
    pub fn household(&self) -> &Household {
        &self.household
    }

    // ── Assets & Liabilities ────────────────────────────────────────

    /// Add an asset or liability (chosen by `item.kind`). Returns its new id.
    pub fn add_item(&mut self, item: FinancialItem) -> Result<String, CoreError> {
        let id = self.household_service.add_item(&mut self.household, item)?;
        self.dirty = true;
        Ok(id)
    }

    pub fn update_item(
        &mut self,
        kind: ItemKind,
        id: &str,
        item: FinancialItem,
    ) -> Result<(), CoreError> {
        self.household_service.update_item(&mut self.household, kind, id, item)?;
        self.dirty = true;
        Ok(())
    }

    pub fn remove_item(&mut self, kind: ItemKind, id: &str) -> Result<FinancialItem, CoreError> {
        let removed = self.household_service.remove_item(&mut self.household, kind, id)?;
        self.dirty = true;
        Ok(removed)
    }

    #[must_use]
    pub fn get_item(&self, id: &str) -> Option<&FinancialItem> {
        self.household
            .assets
            .iter()
            .chain(self.household.liabilities.iter())
            .find(|i| i.id == id)
    }

    /// Assets or liabilities, largest value first.
    #[must_use]
    pub fn items_by_value(&self, kind: ItemKind) -> Vec<&FinancialItem> {
        let items = match kind {
            ItemKind::Asset => &self.household.assets,
            ItemKind::Liability => &self.household.liabilities,
        };
        self.household_service.items_by_value(items)
    }

    // ── Lent cash ───────────────────────────────────────────────────

    pub fn add_loan(&mut self, loan: LoanReceivable) -> Result<String, CoreError> {
        let id = self.household_service.add_loan(&mut self.household, loan)?;
        self.dirty = true;
        Ok(id)
    }

    pub fn update_loan(&mut self, id: &str, loan: LoanReceivable) -> Result<(), CoreError> {
        self.household_service.update_loan(&mut self.household, id, loan)?;
        self.dirty = true;
        Ok(())
    }

    pub fn remove_loan(&mut self, id: &str) -> Result<LoanReceivable, CoreError> {
        let removed = self.household_service.remove_loan(&mut self.household, id)?;
        self.dirty = true;
        Ok(removed)
    }

    /// Loans due back soonest first; undated ones after, oldest first.
    #[must_use]
    pub fn loans_by_return_date(&self) -> Vec<&LoanReceivable> {
        self.household_service.loans_by_return_date(&self.household.loans)
    }

    // ── Transactions & Budgets ──────────────────────────────────────

    pub fn add_transaction(&mut self, tx: Transaction) -> Result<String, CoreError> {
        let id = self.household_service.add_transaction(&mut self.household, tx)?;
        self.dirty = true;
        Ok(id)
    }

    pub fn update_transaction(&mut self, id: &str, tx: Transaction) -> Result<(), CoreError> {
        self.household_service.update_transaction(&mut self.household, id, tx)?;
        self.dirty = true;
        Ok(())
    }

    pub fn remove_transaction(&mut self, id: &str) -> Result<Transaction, CoreError> {
        let removed = self.household_service.remove_transaction(&mut self.household, id)?;
        self.dirty = true;
        Ok(removed)
    }

    /// Newest first.
    #[must_use]
    pub fn transactions_by_date(&self) -> Vec<&Transaction> {
        self.household_service.transactions_by_date(&self.household.transactions)
    }

    /// Budget name a transaction is filed under, "Uncategorized" if none.
    #[must_use]
    pub fn transaction_category(&self, tx: &Transaction) -> &str {
        models::category::budget_label(&self.household.budgets, tx.category_id.as_deref())
    }

    pub fn add_budget(&mut self, budget: Budget) -> Result<String, CoreError> {
        let id = self.household_service.add_budget(&mut self.household, budget)?;
        self.dirty = true;
        Ok(id)
    }

    pub fn update_budget(&mut self, id: &str, budget: Budget) -> Result<(), CoreError> {
        self.household_service.update_budget(&mut self.household, id, budget)?;
        self.dirty = true;
        Ok(())
    }

    pub fn remove_budget(&mut self, id: &str) -> Result<Budget, CoreError> {
        let removed = self.household_service.remove_budget(&mut self.household, id)?;
        self.dirty = true;
        Ok(removed)
    }

    /// Set monthly income. Any amount is accepted.
    pub fn set_income(&mut self, income: Decimal) {
        self.household.income = income;
        self.dirty = true;
    }

    #[must_use]
    pub fn income(&self) -> Decimal {
        self.household.income
    }

    // ── Family & Goals ──────────────────────────────────────────────

    pub fn add_member(&mut self, member: FamilyMember) -> Result<String, CoreError> {
        let id = self.household_service.add_member(&mut self.household, member)?;
        self.dirty = true;
        Ok(id)
    }

    pub fn update_member(&mut self, id: &str, member: FamilyMember) -> Result<(), CoreError> {
        self.household_service.update_member(&mut self.household, id, member)?;
        self.dirty = true;
        Ok(())
    }

    pub fn remove_member(&mut self, id: &str) -> Result<FamilyMember, CoreError> {
        let removed = self.household_service.remove_member(&mut self.household, id)?;
        self.dirty = true;
        Ok(removed)
    }

    #[must_use]
    pub fn members_of(&self, family_type: FamilyType) -> Vec<&FamilyMember> {
        self.household_service.members_of(&self.household.family, family_type)
    }

    pub fn add_goal(&mut self, goal: Goal) -> Result<String, CoreError> {
        let id = self.household_service.add_goal(&mut self.household, goal)?;
        self.dirty = true;
        Ok(id)
    }

    pub fn update_goal(&mut self, id: &str, goal: Goal) -> Result<(), CoreError> {
        self.household_service.update_goal(&mut self.household, id, goal)?;
        self.dirty = true;
        Ok(())
    }

    pub fn remove_goal(&mut self, id: &str) -> Result<Goal, CoreError> {
        let removed = self.household_service.remove_goal(&mut self.household, id)?;
        self.dirty = true;
        Ok(removed)
    }

    // ── Net worth ───────────────────────────────────────────────────

    /// Share of one holding counted for a perspective.
    #[must_use]
    pub fn personal_share(&self, holding: &Holding, perspective: Perspective) -> Decimal {
        self.ownership_service.personal_share(holding, perspective)
    }

    #[must_use]
    pub fn net_worth(&self, perspective: Perspective) -> NetWorthSummary {
        self.category_service.net_worth(&self.household, perspective)
    }

    /// Family or personal overview: totals plus category breakdowns.
    #[must_use]
    pub fn overview(&self, perspective: Perspective) -> Overview {
        self.category_service.overview(&self.household, perspective)
    }

    /// Full-value category lists for the management view.
    #[must_use]
    pub fn detail_breakdown(&self) -> DetailBreakdown {
        self.category_service.detail_breakdown(&self.household)
    }

    /// Signed per-category contributions to net worth.
    #[must_use]
    pub fn composition(&self, perspective: Perspective) -> Vec<CompositionEntry> {
        self.category_service.composition(&self.household, perspective)
    }

    // ── Cash flow ───────────────────────────────────────────────────

    /// Cash flow for the month containing `reference_date`.
    #[must_use]
    pub fn analyze_period(&self, reference_date: NaiveDate) -> PeriodAnalysis {
        self.ledger_service.analyze_period(
            &self.household.transactions,
            &self.household.budgets,
            self.household.income,
            reference_date,
        )
    }

    /// Cash flow for the current local month.
    #[must_use]
    pub fn analyze_current_period(&self) -> PeriodAnalysis {
        self.ledger_service.analyze_current_period(
            &self.household.transactions,
            &self.household.budgets,
            self.household.income,
        )
    }

    /// Everything the dashboard shows, from this one snapshot.
    #[must_use]
    pub fn dashboard(&self, perspective: Perspective, reference_date: NaiveDate) -> Dashboard {
        self.dashboard_service
            .build(&self.household, perspective, reference_date)
    }

    /// Dashboard for today in the configured default perspective.
    #[must_use]
    pub fn default_dashboard(&self) -> Dashboard {
        let today = chrono::Local::now().date_naive();
        self.dashboard(self.household.settings.default_perspective, today)
    }

    // ── Settings ────────────────────────────────────────────────────

    /// Set the display currency code. Must be 3 ASCII letters.
    pub fn set_display_currency(&mut self, currency: &str) -> Result<(), CoreError> {
        let trimmed = currency.trim().to_uppercase();
        if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CoreError::ValidationError(format!(
                "Invalid currency code '{currency}': must be exactly 3 ASCII letters (e.g., INR)"
            )));
        }
        self.household.settings.display_currency = trimmed;
        self.dirty = true;
        Ok(())
    }

    pub fn set_default_perspective(&mut self, perspective: Perspective) {
        self.household.settings.default_perspective = perspective;
        self.dirty = true;
    }

    #[must_use]
    pub fn get_settings(&self) -> &Settings {
        &self.household.settings
    }

    /// Returns `true` if the household changed since the last save or load.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    // ── Export / Import ─────────────────────────────────────────────

    /// The typed household as pretty JSON (unencrypted).
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.household)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize household: {e}")))
    }

    /// Replace the household with one exported by [`to_json`](Self::to_json).
    pub fn import_json(&mut self, json: &str) -> Result<(), CoreError> {
        self.household = serde_json::from_str(json)?;
        self.dirty = true;
        Ok(())
    }

    /// Replace the household with normalized raw store documents, keeping
    /// the current settings.
    pub fn import_documents(&mut self, raw: &RawSnapshot) {
        let settings = self.household.settings.clone();
        self.household = SnapshotService::new().assemble(raw, settings);
        self.dirty = true;
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(household: Household) -> Self {
        Self {
            household,
            ownership_service: OwnershipService::new(),
            category_service: CategoryService::new(),
            ledger_service: LedgerService::new(),
            household_service: HouseholdService::new(),
            dashboard_service: DashboardService::new(),
            dirty: false,
        }
    }
}
