use journey_core_types::AuditError;
use tracing::{error, info};

use crate::model::ScoreRecord;
use crate::ports::LoggerPort;

/// Logger collaborator backed by `tracing`.
#[derive(Clone, Debug, Default)]
pub struct TracingLogger;

impl LoggerPort for TracingLogger {
    fn error(&self, err: &AuditError) {
        error!(target: "audit.result", kind = err.kind(), "{err}");
    }

    fn result(&self, label: &str, record: &ScoreRecord, url: &str) -> Result<(), AuditError> {
        let rendered =
            serde_json::to_string(record).map_err(|err| AuditError::logger(err.to_string()))?;
        info!(target: "audit.result", label, url, record = %rendered, "audit result");
        Ok(())
    }
}
