// ═══════════════════════════════════════════════════════════════════
// Store Tests — MemoryStore (CollectionStore) and LiveLedger
// ═══════════════════════════════════════════════════════════════════

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::json;

use folio_core::errors::CoreError;
use folio_core::live::LiveLedger;
use folio_core::models::budget::Budget;
use folio_core::models::document::{Collection, Document};
use folio_core::models::item::FinancialItem;
use folio_core::models::loan::LoanReceivable;
use folio_core::models::ownership::{Allocation, Ownership, Perspective};
use folio_core::models::settings::Settings;
use folio_core::models::transaction::Transaction;
use folio_core::sources::memory::MemoryStore;
use folio_core::sources::traits::CollectionStore;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn fields(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
    value.as_object().cloned().unwrap()
}

// ═══════════════════════════════════════════════════════════════════
// MemoryStore
// ═══════════════════════════════════════════════════════════════════

mod memory_store {
    use super::*;

    #[tokio::test]
    async fn create_assigns_id_and_publishes() {
        let store = MemoryStore::new();
        let mut rx = store.subscribe(Collection::Assets).await.unwrap();
        assert!(rx.borrow_and_update().is_empty());

        let id = store
            .create(Collection::Assets, fields(json!({ "name": "Flat" })))
            .await
            .unwrap();
        rx.changed().await.unwrap();
        let docs = rx.borrow_and_update().clone();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, id);
    }

    #[tokio::test]
    async fn update_merges_fields() {
        let store = MemoryStore::new();
        let id = store
            .create(Collection::Budgets, fields(json!({ "name": "Food", "amount": 100 })))
            .await
            .unwrap();
        store
            .update(Collection::Budgets, &id, fields(json!({ "amount": 250 })))
            .await
            .unwrap();
        let doc = &store.documents(Collection::Budgets)[0];
        assert_eq!(doc.get("name"), Some(&json!("Food")));
        assert_eq!(doc.get("amount"), Some(&json!(250)));
    }

    #[tokio::test]
    async fn update_and_delete_missing_document() {
        let store = MemoryStore::new();
        let err = store
            .update(Collection::Goals, "nope", serde_json::Map::new())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::DocumentNotFound { ref collection, .. } if collection == "goals"
        ));

        let err = store.delete(Collection::Family, "nope").await.unwrap_err();
        assert_eq!(err.to_string(), "Document nope not found in family");
    }

    #[tokio::test]
    async fn delete_removes() {
        let store = MemoryStore::new();
        let id = store
            .create(Collection::Transactions, fields(json!({ "name": "Veg" })))
            .await
            .unwrap();
        store.delete(Collection::Transactions, &id).await.unwrap();
        assert!(store.documents(Collection::Transactions).is_empty());
    }

    #[tokio::test]
    async fn income_defaults_to_zero() {
        let store = MemoryStore::new();
        assert_eq!(store.read_income().await.unwrap(), Decimal::ZERO);
        store.write_income(dec("85000")).await.unwrap();
        assert_eq!(store.read_income().await.unwrap(), dec("85000"));
    }

    #[tokio::test]
    async fn closed_store_refuses_everything() {
        let store = MemoryStore::new();
        store.close();
        assert!(matches!(
            store.subscribe(Collection::Assets).await,
            Err(CoreError::StoreClosed(_))
        ));
        assert!(matches!(
            store.write_income(Decimal::ONE).await,
            Err(CoreError::StoreClosed(_))
        ));
    }

    #[tokio::test]
    async fn writes_from_many_tasks_all_land() {
        let store = Arc::new(MemoryStore::new());
        let mut handles = Vec::new();
        for i in 0..20 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store
                    .create(Collection::Transactions, fields(json!({ "name": format!("t{i}") })))
                    .await
            }));
        }
        for h in handles {
            h.await.unwrap().unwrap();
        }
        assert_eq!(store.documents(Collection::Transactions).len(), 20);
    }
}

// ═══════════════════════════════════════════════════════════════════
// LiveLedger
// ═══════════════════════════════════════════════════════════════════

mod live_ledger {
    use super::*;

    async fn connect() -> (Arc<MemoryStore>, LiveLedger<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let ledger = LiveLedger::connect(Arc::clone(&store), Settings::default())
            .await
            .unwrap();
        (store, ledger)
    }

    #[tokio::test]
    async fn starts_from_seeded_snapshot() {
        let store = Arc::new(MemoryStore::new());
        store.seed(
            Collection::Assets,
            vec![Document::from_value(
                "a1",
                json!({
                    "name": "Cash",
                    "value": 1000000,
                    "ownership": { "type": "partial", "allocations": [{ "memberId": "self", "percentage": 40 }] }
                }),
            )],
        );
        let ledger = LiveLedger::connect(store, Settings::default()).await.unwrap();

        let h = ledger.household();
        assert_eq!(h.assets[0].category, "Other");
        let dash = ledger.dashboard(Perspective::Personal, d(2025, 3, 1));
        assert_eq!(dash.net_worth.total_assets, dec("400000"));
        assert_eq!(dash.net_worth.net_worth, dec("400000"));
    }

    #[tokio::test]
    async fn write_then_recompute() {
        let (_store, mut ledger) = connect().await;
        ledger
            .add_item(FinancialItem::asset("Flat", dec("5000000"), "Real Estate"))
            .await
            .unwrap();
        ledger.changed().await.unwrap();

        let h = ledger.household();
        assert_eq!(h.assets.len(), 1);
        assert_eq!(h.assets[0].value, dec("5000000"));
    }

    #[tokio::test]
    async fn burst_of_writes_collapses_into_one_refresh() {
        let (_store, mut ledger) = connect().await;
        ledger
            .add_loan(LoanReceivable::new("Ravi", dec("50000"), d(2025, 1, 5)))
            .await
            .unwrap();
        ledger
            .add_item(FinancialItem::liability("Card", dec("20000"), "Credit Card"))
            .await
            .unwrap();
        ledger.set_income(dec("85000")).await.unwrap();

        ledger.changed().await.unwrap();
        let h = ledger.household();
        assert_eq!(h.loans.len(), 1);
        assert_eq!(h.liabilities.len(), 1);
        assert_eq!(h.income, dec("85000"));
    }

    #[tokio::test]
    async fn invalid_entry_never_reaches_store() {
        let (store, ledger) = connect().await;
        let bad = FinancialItem::asset("Plot", dec("100"), "Real Estate").with_ownership(
            Ownership::partial(vec![Allocation::holder(dec("40"))]),
        );
        let err = ledger.add_item(bad).await.unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
        assert!(store.documents(Collection::Assets).is_empty());
    }

    #[tokio::test]
    async fn next_dashboard_reflects_new_spend() {
        let (store, mut ledger) = connect().await;
        let budget = ledger
            .add_budget(Budget::new("Food", dec("1000")))
            .await
            .unwrap();
        ledger.changed().await.unwrap();

        let writer = Arc::clone(&store);
        let budget_id = budget.clone();
        tokio::spawn(async move {
            let tx = fields(json!({
                "name": "Veg",
                "amount": 300,
                "date": "2025-03-02",
                "categoryId": budget_id,
            }));
            writer.create(Collection::Transactions, tx).await.unwrap();
        });

        let dash = ledger
            .next_dashboard(Perspective::Family, d(2025, 3, 15))
            .await
            .unwrap();
        let perf = &dash.period.budget_performance[0];
        assert_eq!(perf.budget_id, budget);
        assert_eq!(perf.spent, dec("300"));
        assert_eq!(perf.remaining, dec("700"));
        assert_eq!(perf.percentage, dec("30"));
    }

    #[tokio::test]
    async fn update_and_delete_through_ledger() {
        let (_store, mut ledger) = connect().await;
        let id = ledger
            .add_transaction(Transaction::new("Veg", dec("100"), d(2025, 3, 2)))
            .await
            .unwrap();
        ledger
            .update_transaction(&id, Transaction::new("Veg", dec("120"), d(2025, 3, 2)))
            .await
            .unwrap();
        ledger.changed().await.unwrap();
        assert_eq!(ledger.household().transactions[0].amount, dec("120"));

        ledger.delete(Collection::Transactions, &id).await.unwrap();
        ledger.changed().await.unwrap();
        assert!(ledger.household().transactions.is_empty());
    }

    #[tokio::test]
    async fn dashboard_is_pure_between_changes() {
        let (_store, mut ledger) = connect().await;
        ledger
            .add_item(FinancialItem::asset("Flat", dec("100"), "Real Estate"))
            .await
            .unwrap();
        ledger.changed().await.unwrap();
        let a = ledger.dashboard(Perspective::Personal, d(2025, 3, 1));
        let b = ledger.dashboard(Perspective::Personal, d(2025, 3, 1));
        assert_eq!(a, b);
        assert_eq!(ledger.raw_snapshot().assets.len(), 1);
    }

    #[tokio::test]
    async fn closed_store_rejects_writes() {
        let (store, ledger) = connect().await;
        store.close();
        let err = ledger
            .add_budget(Budget::new("Food", dec("1")))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::StoreClosed(_)));
    }
}
