use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use tokio::sync::watch;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::document::{Collection, Document};
use crate::services::snapshot_service;

use super::traits::CollectionStore;

/// In-process document store. Each collection is a watch channel whose value
/// is the full current list, so every subscriber sees whole snapshots.
///
/// Last write wins; there is no transactional grouping across writes.
pub struct MemoryStore {
    collections: HashMap<Collection, watch::Sender<Vec<Document>>>,
    income: watch::Sender<Option<Map<String, Value>>>,
    closed: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        let collections = Collection::ALL
            .iter()
            .map(|c| (*c, watch::Sender::new(Vec::new())))
            .collect();
        Self {
            collections,
            income: watch::Sender::new(None),
            closed: AtomicBool::new(false),
        }
    }

    /// Seed a collection with existing documents, replacing what was there.
    pub fn seed(&self, collection: Collection, documents: Vec<Document>) {
        if let Some(tx) = self.collections.get(&collection) {
            tx.send_replace(documents);
        }
    }

    /// Current documents of a collection.
    pub fn documents(&self, collection: Collection) -> Vec<Document> {
        self.collections
            .get(&collection)
            .map(|tx| tx.borrow().clone())
            .unwrap_or_default()
    }

    /// Make every later call fail with `StoreClosed`, as a dropped connection would.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    fn ensure_open(&self) -> Result<(), CoreError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(CoreError::StoreClosed(self.name().to_string()));
        }
        Ok(())
    }

    fn channel(&self, collection: Collection) -> Result<&watch::Sender<Vec<Document>>, CoreError> {
        self.ensure_open()?;
        self.collections
            .get(&collection)
            .ok_or_else(|| CoreError::UnknownCollection(collection.to_string()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl CollectionStore for MemoryStore {
    fn name(&self) -> &str {
        "MemoryStore"
    }

    async fn subscribe(
        &self,
        collection: Collection,
    ) -> Result<watch::Receiver<Vec<Document>>, CoreError> {
        Ok(self.channel(collection)?.subscribe())
    }

    async fn subscribe_income(
        &self,
    ) -> Result<watch::Receiver<Option<Map<String, Value>>>, CoreError> {
        self.ensure_open()?;
        Ok(self.income.subscribe())
    }

    async fn create(
        &self,
        collection: Collection,
        fields: Map<String, Value>,
    ) -> Result<String, CoreError> {
        let id = Uuid::new_v4().to_string();
        let doc = Document::new(id.clone(), fields);
        self.channel(collection)?.send_modify(|docs| docs.push(doc));
        tracing::debug!(%collection, %id, "document created");
        Ok(id)
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<(), CoreError> {
        let mut fields = Some(fields);
        let found = self.channel(collection)?.send_if_modified(|docs| {
            match docs.iter_mut().find(|d| d.id == id) {
                Some(doc) => {
                    if let Some(fields) = fields.take() {
                        doc.merge(fields);
                    }
                    true
                }
                None => false,
            }
        });
        if !found {
            return Err(CoreError::DocumentNotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }
        tracing::debug!(%collection, id, "document updated");
        Ok(())
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), CoreError> {
        let found = self.channel(collection)?.send_if_modified(|docs| {
            let before = docs.len();
            docs.retain(|d| d.id != id);
            docs.len() != before
        });
        if !found {
            return Err(CoreError::DocumentNotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }
        tracing::debug!(%collection, id, "document deleted");
        Ok(())
    }

    async fn read_income(&self) -> Result<Decimal, CoreError> {
        self.ensure_open()?;
        let income = self
            .income
            .borrow()
            .as_ref()
            .and_then(|fields| snapshot_service::decimal(fields.get("amount")))
            .unwrap_or(Decimal::ZERO);
        Ok(income)
    }

    async fn write_income(&self, amount: Decimal) -> Result<(), CoreError> {
        self.ensure_open()?;
        let fields = snapshot_service::SnapshotService::new().income_fields(amount);
        self.income.send_replace(Some(fields));
        tracing::debug!(%amount, "income written");
        Ok(())
    }
}
