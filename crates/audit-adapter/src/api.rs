use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use journey_core_types::{AuditError, ContextName, JourneyId, UrlRecord};
use journey_result_store::{ResultStore, StoreSchema};
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use tracing::{debug, instrument, warn};

use crate::config::{category_label, AuditConfig};
use crate::contexts::ContextResults;
use crate::events::{AuditEvent, EventName, ResultPayload};
use crate::journey::{JourneyDispatcher, JourneyListener, JourneyModule};
use crate::metrics;
use crate::model::{AuditRequest, AuditResult, ScoreRecord};
use crate::ports::{AuditPort, EventsPort, LoggerPort, PageHandle};
use crate::score;

pub const MODULE_ID: &str = "lighthouse";
pub const MODULE_NAME: &str = "Lighthouse";
/// Name of the table the adapter registers with the result store.
pub const STORE_NAME: &str = "lighthouse";

/// Host collaborators handed to [`AuditAdapter::init`]. All of them are optional.
#[derive(Clone, Default)]
pub struct AdapterContext {
    pub events: Option<Arc<dyn EventsPort>>,
    pub storage: Option<Arc<dyn ResultStore>>,
    pub logger: Option<Arc<dyn LoggerPort>>,
}

impl AdapterContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(mut self, port: Arc<dyn EventsPort>) -> Self {
        self.events = Some(port);
        self
    }

    pub fn with_storage(mut self, store: Arc<dyn ResultStore>) -> Self {
        self.storage = Some(store);
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn LoggerPort>) -> Self {
        self.logger = Some(logger);
        self
    }
}

pub struct AuditAdapterBuilder {
    config: AuditConfig,
    auditor: Option<Arc<dyn AuditPort>>,
}

impl AuditAdapterBuilder {
    pub fn new(config: AuditConfig) -> Self {
        Self {
            config,
            auditor: None,
        }
    }

    pub fn with_auditor(mut self, port: Arc<dyn AuditPort>) -> Self {
        self.auditor = Some(port);
        self
    }

    pub fn build(self) -> Result<Arc<AuditAdapter>, AuditError> {
        let auditor = self
            .auditor
            .ok_or_else(|| AuditError::new("auditor port is required"))?;
        Ok(Arc::new(AuditAdapter {
            config: self.config.normalized(),
            auditor,
            context: OnceCell::new(),
            contexts: RwLock::new(ContextResults::new()),
            store_ready: AtomicBool::new(false),
        }))
    }
}

/// Runs one audit per navigation context and republishes category scores.
pub struct AuditAdapter {
    config: AuditConfig,
    auditor: Arc<dyn AuditPort>,
    context: OnceCell<AdapterContext>,
    contexts: RwLock<ContextResults>,
    /// Set once the result table is registered with our schema.
    store_ready: AtomicBool,
}

impl AuditAdapter {
    pub fn builder(config: AuditConfig) -> AuditAdapterBuilder {
        AuditAdapterBuilder::new(config)
    }

    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    /// Column layout registered with the result store.
    pub fn store_schema(&self) -> StoreSchema {
        self.config.categories.iter().fold(
            StoreSchema::new().column("url", "Url").column("context", "Context"),
            |schema, category| schema.column(category.clone(), category_label(category)),
        )
    }

    /// Results collected since the last journey start, in navigation order.
    pub fn context_results(&self) -> Vec<Arc<AuditResult>> {
        self.contexts.read().snapshot()
    }

    pub fn context_result(&self, name: &ContextName) -> Option<Arc<AuditResult>> {
        self.contexts.read().get(name)
    }

    pub async fn init(&self, ctx: AdapterContext) {
        if self.context.set(ctx).is_err() {
            warn!(target: "audit.adapter", "adapter already initialised; ignoring");
            return;
        }
        if let Some(storage) = self.storage() {
            match storage.install_store(STORE_NAME, self.store_schema()) {
                Ok(()) => self.store_ready.store(true, Ordering::Release),
                Err(err) => self.report_error(&err.into()),
            }
        }
        self.emit(EventName::CreateModule, None).await;
    }

    pub fn init_events(self: Arc<Self>, journey: &JourneyDispatcher) {
        journey.register(self);
    }

    /// Analyses every collected context against `url`. Always returns `true`.
    #[instrument(skip_all, fields(url = %url))]
    pub async fn analyse(&self, url: &UrlRecord) -> bool {
        self.emit(EventName::StartsComputing, None).await;
        let entries = self.contexts.read().snapshot();
        for entry in entries {
            if entry.context.is_empty() {
                continue;
            }
            self.analyse_context(entry, url).await;
        }
        self.emit(EventName::EndsComputing, None).await;
        true
    }

    #[instrument(skip_all, fields(context = %name))]
    async fn run_audit(&self, page: &dyn PageHandle, name: &ContextName) -> Result<(), AuditError> {
        self.emit(EventName::StartsComputing, None).await;

        let url = page.current_url()?;
        let started = Instant::now();
        let outcome = self
            .auditor
            .audit(AuditRequest {
                url,
                output: self.config.output_format,
                context: name,
                page,
            })
            .await;
        let latency_ms = started.elapsed().as_secs_f64() * 1000.0;
        let outcome = match outcome {
            Ok(outcome) => {
                metrics::record_run(true, latency_ms);
                outcome
            }
            Err(err) => {
                metrics::record_run(false, latency_ms);
                warn!(target: "audit.adapter", %err, "audit failed");
                return Err(err);
            }
        };

        if outcome.lhr.is_none() || outcome.report.is_none() {
            debug!(
                target: "audit.adapter",
                has_report = outcome.lhr.is_some(),
                has_rendered = outcome.report.is_some(),
                "partial audit outcome"
            );
        }
        self.contexts.write().insert(Arc::new(AuditResult {
            context: name.clone(),
            report: outcome.lhr,
            rendered: outcome.report,
        }));

        self.emit(EventName::EndsComputing, None).await;
        Ok(())
    }

    async fn analyse_context(&self, result: Arc<AuditResult>, url: &UrlRecord) {
        let url_string = url.to_string();
        let extraction = score::extract_scores(result.report.as_ref(), &self.config.categories);
        for err in &extraction.errors {
            metrics::record_score_failure(err.category());
            self.report_error(&AuditError::Score(format!("context {}: {err}", result.context)));
        }

        let record = ScoreRecord {
            context: result.context.clone(),
            url: url_string.clone(),
            scores: extraction.scores,
        };
        let payload = ResultPayload {
            url: url.clone(),
            result: record.clone(),
            report: result,
        };
        self.emit(EventName::OnResult, Some(payload.clone())).await;
        self.emit(EventName::OnAnalyseResult, Some(payload.clone()))
            .await;

        if let Some(logger) = self.logger() {
            if let Err(err) = logger.result(MODULE_NAME, &record, &url_string) {
                logger.error(&err);
            }
        }

        if let Some(storage) = self.storage() {
            if !self.store_ready.load(Ordering::Acquire) {
                debug!(target: "audit.adapter", store = STORE_NAME, "store not registered; row skipped");
            } else {
                match storage.add(STORE_NAME, record.to_row()) {
                    Ok(()) => metrics::record_stored(),
                    Err(err) => self.report_error(&err.into()),
                }
            }
        }

        self.emit(EventName::AfterAnalyse, Some(payload.clone())).await;
        self.emit(EventName::ModuleAfterAnalyse, Some(payload)).await;
    }

    async fn emit(&self, name: EventName, payload: Option<ResultPayload>) {
        if let Some(events) = self.context.get().and_then(|ctx| ctx.events.as_ref()) {
            events
                .emit(AuditEvent {
                    name,
                    adapter: MODULE_ID,
                    payload,
                })
                .await;
        }
    }

    fn report_error(&self, err: &AuditError) {
        warn!(target: "audit.adapter", kind = err.kind(), %err, "reported error");
        if let Some(logger) = self.logger() {
            logger.error(err);
        }
    }

    fn storage(&self) -> Option<&Arc<dyn ResultStore>> {
        self.context.get().and_then(|ctx| ctx.storage.as_ref())
    }

    fn logger(&self) -> Option<&Arc<dyn LoggerPort>> {
        self.context.get().and_then(|ctx| ctx.logger.as_ref())
    }
}

#[async_trait]
impl JourneyListener for AuditAdapter {
    async fn on_journey_start(&self, journey: &JourneyId) {
        self.contexts.write().clear();
        debug!(target: "audit.adapter", %journey, "context results reset");
    }

    async fn on_new_context(
        &self,
        page: &dyn PageHandle,
        name: &ContextName,
    ) -> Result<(), AuditError> {
        self.run_audit(page, name).await
    }
}

#[async_trait]
impl JourneyModule for AuditAdapter {
    fn id(&self) -> &'static str {
        MODULE_ID
    }

    fn name(&self) -> &'static str {
        MODULE_NAME
    }

    async fn init(&self, ctx: AdapterContext) {
        AuditAdapter::init(self, ctx).await
    }

    fn init_events(self: Arc<Self>, journey: &JourneyDispatcher) {
        AuditAdapter::init_events(self, journey)
    }

    async fn analyse(&self, url: &UrlRecord) -> bool {
        AuditAdapter::analyse(self, url).await
    }
}
