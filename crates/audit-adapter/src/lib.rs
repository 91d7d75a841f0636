//! Per-navigation audit collection for scripted browser journeys.
//!
//! The adapter runs one Lighthouse audit per navigation context signalled by
//! the host, keeps the raw result in memory, and on `analyse` turns every
//! collected result into a [`ScoreRecord`] that is emitted as an event,
//! logged, and appended to the result store.

pub mod api;
pub mod config;
pub mod errors;
pub mod events;
pub mod journey;
pub mod lighthouse;
pub mod logger;
pub mod metrics;
pub mod model;
pub mod ports;

mod contexts;
mod score;

pub use api::{AdapterContext, AuditAdapter, AuditAdapterBuilder, MODULE_ID, STORE_NAME};
pub use config::{category_label, AuditConfig, OutputFormat};
pub use errors::ScoreError;
pub use events::{AuditEvent, BusEvents, EventName, ResultPayload};
pub use journey::{JourneyDispatcher, JourneyListener, JourneyModule};
pub use lighthouse::{LighthouseCli, LighthouseCliConfig};
pub use logger::TracingLogger;
pub use model::{AuditOutcome, AuditRequest, AuditResult, CategoryScore, RemotePage, ScoreRecord};
pub use ports::{AuditPort, EventsPort, LoggerPort, PageHandle};
pub use score::{extract_scores, Extraction};
