//! Named result tables: a schema of labelled columns plus appended rows.

pub mod csv_export;
pub mod errors;
pub mod memory;
pub mod schema;

pub use csv_export::{write_csv, write_csv_file};
pub use errors::StoreError;
pub use memory::InMemoryResultStore;
pub use schema::{Column, StoreRow, StoreSchema};

/// Storage collaborator used by audit modules.
pub trait ResultStore: Send + Sync {
    /// Registers a table. Re-installing with an identical schema is a no-op.
    fn install_store(&self, name: &str, schema: StoreSchema) -> Result<(), StoreError>;
    /// Appends one row to a registered table.
    fn add(&self, name: &str, row: StoreRow) -> Result<(), StoreError>;
    fn schema(&self, name: &str) -> Option<StoreSchema>;
    fn rows(&self, name: &str) -> Vec<StoreRow>;
}
