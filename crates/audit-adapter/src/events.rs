use std::sync::Arc;

use async_trait::async_trait;
use journey_core_types::UrlRecord;
use journey_event_bus::EventBus;
use tracing::{trace, warn};

use crate::model::{AuditResult, ScoreRecord};
use crate::ports::EventsPort;

/// Signals emitted by the adapter. Module-specific names are prefixed with
/// `lighthouse_module__`, generic module lifecycle names with `module__`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum EventName {
    CreateModule,
    /// Declared for listeners; the adapter never emits it.
    BeforeAnalyse,
    OnResult,
    /// Declared for listeners; the adapter never emits it.
    OnResultDetail,
    AfterAnalyse,
    StartsComputing,
    EndsComputing,
    OnAnalyseResult,
    ModuleAfterAnalyse,
}

impl EventName {
    pub const fn as_str(self) -> &'static str {
        match self {
            EventName::CreateModule => "lighthouse_module__createLighthouseModule",
            EventName::BeforeAnalyse => "lighthouse_module__beforeAnalyse",
            EventName::OnResult => "lighthouse_module__onResult",
            EventName::OnResultDetail => "lighthouse_module__onResultDetail",
            EventName::AfterAnalyse => "lighthouse_module__afterAnalyse",
            EventName::StartsComputing => "module__startsComputing",
            EventName::EndsComputing => "module__endsComputing",
            EventName::OnAnalyseResult => "module__onAnalyseResult",
            EventName::ModuleAfterAnalyse => "module__afterAnalyse",
        }
    }
}

/// Payload shared by the result and after-analyse events.
#[derive(Clone, Debug)]
pub struct ResultPayload {
    pub url: UrlRecord,
    pub result: ScoreRecord,
    pub report: Arc<AuditResult>,
}

#[derive(Clone, Debug)]
pub struct AuditEvent {
    pub name: EventName,
    /// Id of the emitting module.
    pub adapter: &'static str,
    pub payload: Option<ResultPayload>,
}

/// Forwards adapter events onto an [`EventBus`].
pub struct BusEvents {
    bus: Arc<dyn EventBus<AuditEvent>>,
}

impl BusEvents {
    pub fn new(bus: Arc<dyn EventBus<AuditEvent>>) -> Self {
        Self { bus }
    }
}

#[async_trait]
impl EventsPort for BusEvents {
    async fn emit(&self, event: AuditEvent) {
        let name = event.name.as_str();
        match self.bus.publish(event).await {
            Ok(receivers) => trace!(target: "audit.events", event = name, receivers, "emitted"),
            Err(err) => warn!(target: "audit.events", event = name, %err, "event publish failed"),
        }
    }
}
