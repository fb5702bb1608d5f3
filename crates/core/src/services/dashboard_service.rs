use chrono::NaiveDate;

use crate::models::household::Household;
use crate::models::ownership::Perspective;
use crate::models::summary::Dashboard;
use crate::services::category_service::CategoryService;
use crate::services::ledger_service::LedgerService;

/// Builds the whole dashboard from one household snapshot.
pub struct DashboardService {
    categories: CategoryService,
    ledger: LedgerService,
}

impl DashboardService {
    pub fn new() -> Self {
        Self {
            categories: CategoryService::new(),
            ledger: LedgerService::new(),
        }
    }

    pub fn build(
        &self,
        household: &Household,
        perspective: Perspective,
        reference_date: NaiveDate,
    ) -> Dashboard {
        Dashboard {
            net_worth: self.categories.net_worth(household, perspective),
            composition: self.categories.composition(household, perspective),
            period: self.ledger.analyze_period(
                &household.transactions,
                &household.budgets,
                household.income,
                reference_date,
            ),
        }
    }
}

impl Default for DashboardService {
    fn default() -> Self {
        Self::new()
    }
}
