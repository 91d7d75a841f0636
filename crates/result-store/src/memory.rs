use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::debug;

use crate::errors::StoreError;
use crate::schema::{StoreRow, StoreSchema};
use crate::ResultStore;

struct Table {
    schema: StoreSchema,
    rows: Mutex<Vec<StoreRow>>,
}

/// Process-local store; tables live as long as the store.
#[derive(Default)]
pub struct InMemoryResultStore {
    tables: DashMap<String, Table>,
}

impl InMemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tables.iter().map(|t| t.key().clone()).collect();
        names.sort();
        names
    }

    pub fn row_count(&self, name: &str) -> usize {
        self.tables
            .get(name)
            .map(|table| table.rows.lock().len())
            .unwrap_or(0)
    }
}

impl ResultStore for InMemoryResultStore {
    fn install_store(&self, name: &str, schema: StoreSchema) -> Result<(), StoreError> {
        match self.tables.entry(name.to_string()) {
            Entry::Occupied(existing) => {
                if existing.get().schema == schema {
                    Ok(())
                } else {
                    Err(StoreError::SchemaConflict(name.to_string()))
                }
            }
            Entry::Vacant(slot) => {
                debug!(target: "journey.store", store = name, columns = schema.columns.len(), "store installed");
                slot.insert(Table {
                    schema,
                    rows: Mutex::new(Vec::new()),
                });
                Ok(())
            }
        }
    }

    fn add(&self, name: &str, row: StoreRow) -> Result<(), StoreError> {
        let table = self
            .tables
            .get(name)
            .ok_or_else(|| StoreError::UnknownStore(name.to_string()))?;
        table.rows.lock().push(row);
        Ok(())
    }

    fn schema(&self, name: &str) -> Option<StoreSchema> {
        self.tables.get(name).map(|table| table.schema.clone())
    }

    fn rows(&self, name: &str) -> Vec<StoreRow> {
        self.tables
            .get(name)
            .map(|table| table.rows.lock().clone())
            .unwrap_or_default()
    }
}
