use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use tokio::sync::watch;

use crate::errors::CoreError;
use crate::models::document::{Collection, Document};

/// The realtime document store the household lives in.
///
/// Reads are subscriptions that always deliver a full replacement snapshot of
/// a collection, never a diff. Writes are independent: each one resolves on
/// its own and a failure of one never blocks another.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait CollectionStore: Send + Sync {
    /// Human-readable name of this store (for logs/errors).
    fn name(&self) -> &str;

    /// Live view of a collection. The receiver's current value is the latest
    /// snapshot; `changed()` resolves whenever a new one is published.
    async fn subscribe(
        &self,
        collection: Collection,
    ) -> Result<watch::Receiver<Vec<Document>>, CoreError>;

    /// Live view of the income document (`None` until it is first written).
    async fn subscribe_income(
        &self,
    ) -> Result<watch::Receiver<Option<Map<String, Value>>>, CoreError>;

    /// Create a document; the store assigns and returns its id.
    async fn create(
        &self,
        collection: Collection,
        fields: Map<String, Value>,
    ) -> Result<String, CoreError>;

    /// Merge `fields` into an existing document.
    async fn update(
        &self,
        collection: Collection,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<(), CoreError>;

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), CoreError>;

    /// Current income, zero if never written.
    async fn read_income(&self) -> Result<Decimal, CoreError>;

    async fn write_income(&self, amount: Decimal) -> Result<(), CoreError>;
}
