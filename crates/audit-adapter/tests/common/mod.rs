#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use audit_adapter::{
    AdapterContext, AuditAdapter, AuditConfig, AuditEvent, AuditOutcome, AuditPort, AuditRequest,
    EventName, EventsPort, LoggerPort, ScoreRecord,
};
use journey_core_types::AuditError;
use journey_result_store::{InMemoryResultStore, ResultStore, StoreError, StoreRow, StoreSchema};
use parking_lot::Mutex;
use serde_json::{json, Value};

pub fn report(scores: &[(&str, f64)]) -> Value {
    let mut categories = serde_json::Map::new();
    for (category, score) in scores {
        categories.insert(category.to_string(), json!({ "score": score }));
    }
    json!({ "categories": categories })
}

pub fn outcome(scores: &[(&str, f64)]) -> AuditOutcome {
    AuditOutcome {
        lhr: Some(report(scores)),
        report: Some("<html></html>".into()),
    }
}

/// Auditor that replays queued outcomes per context name.
#[derive(Default)]
pub struct ScriptedAuditor {
    scripts: Mutex<HashMap<String, VecDeque<Result<AuditOutcome, AuditError>>>>,
    pub calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedAuditor {
    pub fn push(&self, context: &str, result: Result<AuditOutcome, AuditError>) {
        self.scripts
            .lock()
            .entry(context.to_string())
            .or_default()
            .push_back(result);
    }
}

#[async_trait]
impl AuditPort for ScriptedAuditor {
    async fn audit(&self, request: AuditRequest<'_>) -> Result<AuditOutcome, AuditError> {
        self.calls
            .lock()
            .push((request.context.to_string(), request.url.to_string()));
        self.scripts
            .lock()
            .get_mut(request.context.as_str())
            .and_then(|queue| queue.pop_front())
            .unwrap_or_else(|| Ok(AuditOutcome::default()))
    }
}

#[derive(Default)]
pub struct RecordingEvents {
    pub events: Mutex<Vec<AuditEvent>>,
}

impl RecordingEvents {
    pub fn names(&self) -> Vec<EventName> {
        self.events.lock().iter().map(|e| e.name).collect()
    }

    pub fn count(&self, name: EventName) -> usize {
        self.events.lock().iter().filter(|e| e.name == name).count()
    }

    pub fn of(&self, name: EventName) -> Vec<AuditEvent> {
        self.events
            .lock()
            .iter()
            .filter(|e| e.name == name)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl EventsPort for RecordingEvents {
    async fn emit(&self, event: AuditEvent) {
        self.events.lock().push(event);
    }
}

#[derive(Default)]
pub struct RecordingLogger {
    pub errors: Mutex<Vec<AuditError>>,
    pub results: Mutex<Vec<(String, ScoreRecord, String)>>,
    pub fail_results: bool,
}

impl RecordingLogger {
    pub fn failing() -> Self {
        Self {
            fail_results: true,
            ..Self::default()
        }
    }
}

impl LoggerPort for RecordingLogger {
    fn error(&self, err: &AuditError) {
        self.errors.lock().push(err.clone());
    }

    fn result(&self, label: &str, record: &ScoreRecord, url: &str) -> Result<(), AuditError> {
        if self.fail_results {
            return Err(AuditError::logger("sink unavailable"));
        }
        self.results
            .lock()
            .push((label.to_string(), record.clone(), url.to_string()));
        Ok(())
    }
}

/// Registers tables normally but refuses every row.
#[derive(Default)]
pub struct RejectingStore {
    inner: InMemoryResultStore,
}

impl ResultStore for RejectingStore {
    fn install_store(&self, name: &str, schema: StoreSchema) -> Result<(), StoreError> {
        self.inner.install_store(name, schema)
    }

    fn add(&self, _name: &str, _row: StoreRow) -> Result<(), StoreError> {
        Err(StoreError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            "disk full",
        )))
    }

    fn schema(&self, name: &str) -> Option<StoreSchema> {
        self.inner.schema(name)
    }

    fn rows(&self, name: &str) -> Vec<StoreRow> {
        self.inner.rows(name)
    }
}

pub struct Harness<S = InMemoryResultStore> {
    pub adapter: Arc<AuditAdapter>,
    pub auditor: Arc<ScriptedAuditor>,
    pub events: Arc<RecordingEvents>,
    pub logger: Arc<RecordingLogger>,
    pub store: Arc<S>,
}

pub async fn harness(config: AuditConfig) -> Harness {
    harness_with_logger(config, RecordingLogger::default()).await
}

pub async fn harness_with_logger(config: AuditConfig, logger: RecordingLogger) -> Harness {
    harness_with_store(config, logger, Arc::new(InMemoryResultStore::new())).await
}

pub async fn harness_with_store<S: ResultStore + 'static>(
    config: AuditConfig,
    logger: RecordingLogger,
    store: Arc<S>,
) -> Harness<S> {
    let auditor = Arc::new(ScriptedAuditor::default());
    let events = Arc::new(RecordingEvents::default());
    let logger = Arc::new(logger);
    let adapter = AuditAdapter::builder(config)
        .with_auditor(auditor.clone())
        .build()
        .unwrap();
    adapter
        .init(
            AdapterContext::new()
                .with_events(events.clone())
                .with_storage(store.clone())
                .with_logger(logger.clone()),
        )
        .await;
    Harness {
        adapter,
        auditor,
        events,
        logger,
        store,
    }
}
