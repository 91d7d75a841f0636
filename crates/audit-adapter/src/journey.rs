//! Journey lifecycle: the host side that sequences navigation contexts, and
//! the traits modules implement to take part in it.

use std::sync::Arc;

use async_trait::async_trait;
use journey_core_types::{AuditError, ContextName, JourneyId, UrlRecord};
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::api::AdapterContext;
use crate::ports::PageHandle;

/// Receives journey lifecycle signals.
#[async_trait]
pub trait JourneyListener: Send + Sync {
    async fn on_journey_start(&self, journey: &JourneyId);

    async fn on_new_context(
        &self,
        page: &dyn PageHandle,
        name: &ContextName,
    ) -> Result<(), AuditError>;
}

/// A module the host initialises once, wires into its journeys, and later
/// asks to analyse each tracked page.
#[async_trait]
pub trait JourneyModule: Send + Sync {
    fn id(&self) -> &'static str;
    fn name(&self) -> &'static str;
    async fn init(&self, ctx: AdapterContext);
    fn init_events(self: Arc<Self>, journey: &JourneyDispatcher);
    async fn analyse(&self, url: &UrlRecord) -> bool;
}

/// Dispatches journey signals to listeners one at a time, awaiting each.
#[derive(Default)]
pub struct JourneyDispatcher {
    listeners: RwLock<Vec<Arc<dyn JourneyListener>>>,
    current: RwLock<Option<JourneyId>>,
}

impl JourneyDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, listener: Arc<dyn JourneyListener>) {
        self.listeners.write().push(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }

    pub fn current(&self) -> Option<JourneyId> {
        self.current.read().clone()
    }

    /// Opens a new journey and resets every listener.
    pub async fn start(&self) -> JourneyId {
        let journey = JourneyId::new();
        *self.current.write() = Some(journey.clone());
        info!(target: "journey", %journey, "journey started");
        for listener in self.listeners() {
            listener.on_journey_start(&journey).await;
        }
        journey
    }

    /// Signals a new navigation context. Every listener runs; the first
    /// error is returned afterwards.
    pub async fn new_context(
        &self,
        page: &dyn PageHandle,
        name: &ContextName,
    ) -> Result<(), AuditError> {
        debug!(target: "journey", context = %name, "new context");
        let mut first_err = None;
        for listener in self.listeners() {
            if let Err(err) = listener.on_new_context(page, name).await {
                warn!(target: "journey", context = %name, %err, "context listener failed");
                first_err.get_or_insert(err);
            }
        }
        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn listeners(&self) -> Vec<Arc<dyn JourneyListener>> {
        self.listeners.read().clone()
    }
}
