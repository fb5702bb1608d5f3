pub mod category_service;
pub mod dashboard_service;
pub mod household_service;
pub mod ledger_service;
pub mod ownership_service;
pub mod snapshot_service;
