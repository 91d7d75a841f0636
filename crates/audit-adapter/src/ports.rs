use async_trait::async_trait;
use journey_core_types::AuditError;
use url::Url;

use crate::events::AuditEvent;
use crate::model::{AuditOutcome, AuditRequest, ScoreRecord};

/// External page-quality auditor.
#[async_trait]
pub trait AuditPort: Send + Sync {
    async fn audit(&self, request: AuditRequest<'_>) -> Result<AuditOutcome, AuditError>;
}

/// A live browser page visited during a journey.
pub trait PageHandle: Send + Sync {
    fn current_url(&self) -> Result<Url, AuditError>;

    fn remote_debugging_port(&self) -> Option<u16> {
        None
    }
}

#[async_trait]
pub trait EventsPort: Send + Sync {
    async fn emit(&self, event: AuditEvent);
}

pub trait LoggerPort: Send + Sync {
    fn error(&self, err: &AuditError);
    fn result(&self, label: &str, record: &ScoreRecord, url: &str) -> Result<(), AuditError>;
}
