use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A raw record as the document store delivers it: an id plus loosely typed
/// fields. Nothing about the field shapes is trusted until it has been through
/// `SnapshotService`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Build from a JSON object; anything else gives an empty field set.
    pub fn from_value(id: impl Into<String>, value: Value) -> Self {
        let fields = match value {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self::new(id, fields)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Shallow merge: every given field replaces the stored one.
    pub fn merge(&mut self, fields: Map<String, Value>) {
        for (k, v) in fields {
            self.fields.insert(k, v);
        }
    }
}

/// The collections the household is spread across in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Collection {
    Assets,
    Liabilities,
    LendedCash,
    Transactions,
    Budgets,
    Family,
    Goals,
}

impl Collection {
    pub const ALL: [Collection; 7] = [
        Collection::Assets,
        Collection::Liabilities,
        Collection::LendedCash,
        Collection::Transactions,
        Collection::Budgets,
        Collection::Family,
        Collection::Goals,
    ];

    /// Collection path segment used by the store.
    pub fn path(&self) -> &'static str {
        match self {
            Collection::Assets => "assets",
            Collection::Liabilities => "liabilities",
            Collection::LendedCash => "lendedCash",
            Collection::Transactions => "transactions",
            Collection::Budgets => "budgets",
            Collection::Family => "family",
            Collection::Goals => "goals",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.path() == path)
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// The latest delivered snapshot of every collection plus the income document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSnapshot {
    pub assets: Vec<Document>,
    pub liabilities: Vec<Document>,
    pub lended_cash: Vec<Document>,
    pub transactions: Vec<Document>,
    pub budgets: Vec<Document>,
    pub family: Vec<Document>,
    pub goals: Vec<Document>,
    /// Fields of the income document, if it exists
    #[serde(default)]
    pub income: Option<Map<String, Value>>,
}

impl RawSnapshot {
    pub fn collection(&self, collection: Collection) -> &[Document] {
        match collection {
            Collection::Assets => &self.assets,
            Collection::Liabilities => &self.liabilities,
            Collection::LendedCash => &self.lended_cash,
            Collection::Transactions => &self.transactions,
            Collection::Budgets => &self.budgets,
            Collection::Family => &self.family,
            Collection::Goals => &self.goals,
        }
    }

    /// Replace one collection wholesale (the store never sends diffs).
    pub fn replace(&mut self, collection: Collection, documents: Vec<Document>) {
        let slot = match collection {
            Collection::Assets => &mut self.assets,
            Collection::Liabilities => &mut self.liabilities,
            Collection::LendedCash => &mut self.lended_cash,
            Collection::Transactions => &mut self.transactions,
            Collection::Budgets => &mut self.budgets,
            Collection::Family => &mut self.family,
            Collection::Goals => &mut self.goals,
        };
        *slot = documents;
    }
}
