use journey_core_types::AuditError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store not installed: {0}")]
    UnknownStore(String),
    #[error("store {0} already installed with a different schema")]
    SchemaConflict(String),
    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StoreError> for AuditError {
    fn from(err: StoreError) -> Self {
        AuditError::storage(err.to_string())
    }
}
