use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use audit_adapter::{
    metrics, AdapterContext, AuditAdapter, AuditConfig, AuditEvent, AuditPort, AuditResult,
    BusEvents, JourneyDispatcher, LighthouseCli, OutputFormat, RemotePage, TracingLogger,
    STORE_NAME,
};
use clap::Args;
use journey_core_types::{ContextName, UrlRecord};
use journey_event_bus::{to_mpsc, InMemoryBus};
use journey_result_store::{write_csv, write_csv_file, InMemoryResultStore};
use tracing::{debug, info, warn};

use crate::config::AppConfig;

#[derive(Args, Clone, Debug)]
pub struct RunArgs {
    /// Page to audit (repeatable)
    #[arg(short, long = "url", value_name = "URL", required = true)]
    pub urls: Vec<String>,

    /// Navigation context to visit for each page (repeatable, overrides config)
    #[arg(long = "context", value_name = "NAME")]
    pub contexts: Vec<String>,

    /// Remote debugging port of a running Chrome
    #[arg(long)]
    pub port: Option<u16>,

    /// Write scores as CSV to this file instead of stdout
    #[arg(long, value_name = "FILE")]
    pub csv: Option<PathBuf>,

    /// Directory for the rendered per-context reports
    #[arg(long, value_name = "DIR")]
    pub report_dir: Option<PathBuf>,

    /// Write Prometheus metrics in text format to this file when done
    #[arg(long, value_name = "FILE")]
    pub metrics: Option<PathBuf>,
}

/// Everything one invocation visits.
#[derive(Clone, Debug)]
pub struct JourneyPlan {
    pub urls: Vec<UrlRecord>,
    pub contexts: Vec<ContextName>,
    pub port: Option<u16>,
    pub report_dir: Option<PathBuf>,
    pub audit: AuditConfig,
}

impl JourneyPlan {
    pub fn from_args(args: &RunArgs, config: &AppConfig) -> Result<Self> {
        let urls = args
            .urls
            .iter()
            .map(|raw| UrlRecord::parse(raw))
            .collect::<Result<Vec<_>, _>>()?;
        let names = if args.contexts.is_empty() {
            &config.contexts
        } else {
            &args.contexts
        };
        let contexts: Vec<ContextName> = names
            .iter()
            .map(|n| n.trim())
            .filter(|n| !n.is_empty())
            .map(ContextName::from)
            .collect();
        if contexts.is_empty() {
            bail!("at least one navigation context is required");
        }
        Ok(Self {
            urls,
            contexts,
            port: args.port.or(config.chrome.remote_debugging_port),
            report_dir: args
                .report_dir
                .clone()
                .or_else(|| config.output.report_dir.clone()),
            audit: config.audit.clone(),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JourneySummary {
    pub pages: usize,
    pub contexts_ok: usize,
    pub contexts_failed: usize,
    pub reports_written: Vec<PathBuf>,
}

/// Plays the host: one journey per page, every context in order, then analyse.
pub async fn run_journeys(
    plan: &JourneyPlan,
    auditor: Arc<dyn AuditPort>,
    store: Arc<InMemoryResultStore>,
) -> Result<JourneySummary> {
    let bus = InMemoryBus::<AuditEvent>::new(256);
    spawn_event_logger(bus.clone());

    let adapter = AuditAdapter::builder(plan.audit.clone())
        .with_auditor(auditor)
        .build()?;
    adapter
        .init(
            AdapterContext::new()
                .with_events(Arc::new(BusEvents::new(bus)))
                .with_storage(store)
                .with_logger(Arc::new(TracingLogger)),
        )
        .await;

    let journey = JourneyDispatcher::new();
    adapter.clone().init_events(&journey);

    let mut summary = JourneySummary::default();
    for (index, url) in plan.urls.iter().enumerate() {
        let journey_id = journey.start().await;
        info!(%journey_id, %url, "auditing page");
        let page = RemotePage::new(url.url.clone(), plan.port);
        for context in &plan.contexts {
            match journey.new_context(&page, context).await {
                Ok(()) => summary.contexts_ok += 1,
                Err(err) => {
                    summary.contexts_failed += 1;
                    warn!(%url, context = %context, %err, "context audit failed");
                }
            }
        }
        adapter.analyse(url).await;
        if let Some(dir) = &plan.report_dir {
            let written = write_reports(
                dir,
                index,
                url,
                plan.audit.output_format,
                &adapter.context_results(),
            )
            .await?;
            summary.reports_written.extend(written);
        }
        summary.pages += 1;
    }
    Ok(summary)
}

pub async fn cmd_run(args: RunArgs, config: &AppConfig) -> Result<()> {
    let plan = JourneyPlan::from_args(&args, config)?;
    let auditor = Arc::new(LighthouseCli::new(config.lighthouse.clone()));
    let store = Arc::new(InMemoryResultStore::new());

    let summary = run_journeys(&plan, auditor, store.clone()).await?;

    match args.csv.as_ref().or(config.output.csv.as_ref()) {
        Some(path) => {
            let rows = write_csv_file(store.as_ref(), STORE_NAME, path)
                .with_context(|| format!("Failed to write CSV to {}", path.display()))?;
            info!(rows, path = %path.display(), "scores written");
        }
        None => {
            let stdout = std::io::stdout();
            write_csv(store.as_ref(), STORE_NAME, stdout.lock())
                .context("Failed to write CSV to stdout")?;
        }
    }

    if let Some(path) = &args.metrics {
        tokio::fs::write(path, metrics::render_metrics())
            .await
            .with_context(|| format!("Failed to write metrics to {}", path.display()))?;
    }

    eprintln!(
        "Audited {} page(s): {} context(s) ok, {} failed",
        summary.pages, summary.contexts_ok, summary.contexts_failed
    );
    Ok(())
}

fn spawn_event_logger(bus: Arc<InMemoryBus<AuditEvent>>) {
    let mut rx = to_mpsc(bus, 256);
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            debug!(
                target: "journey.events",
                event = event.name.as_str(),
                adapter = event.adapter,
                context = event.payload.as_ref().map(|p| p.result.context.as_str()),
                "event"
            );
        }
    });
}

async fn write_reports(
    dir: &Path,
    index: usize,
    url: &UrlRecord,
    format: OutputFormat,
    results: &[Arc<AuditResult>],
) -> Result<Vec<PathBuf>> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create report dir {}", dir.display()))?;
    let host = url.url.host_str().unwrap_or("page");
    let mut written = Vec::new();
    for result in results {
        let Some(rendered) = &result.rendered else {
            continue;
        };
        let name = format!(
            "{}-{}-{}.{}",
            index + 1,
            sanitize(host),
            sanitize(result.context.as_str()),
            format.extension()
        );
        let path = dir.join(name);
        tokio::fs::write(&path, rendered)
            .await
            .with_context(|| format!("Failed to write report {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}

fn sanitize(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
