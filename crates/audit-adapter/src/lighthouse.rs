//! [`AuditPort`] backed by the `lighthouse` command-line tool.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use journey_core_types::AuditError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::config::OutputFormat;
use crate::model::{AuditOutcome, AuditRequest};
use crate::ports::AuditPort;

const STDERR_TAIL: usize = 2048;

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LighthouseCliConfig {
    pub binary: PathBuf,
    /// Passed through `--chrome-flags` when the page has no debugging port.
    pub chrome_flags: Vec<String>,
    pub extra_args: Vec<String>,
    /// Additional arguments per navigation context, e.g. `mobile: ["--form-factor=mobile"]`.
    pub context_args: BTreeMap<String, Vec<String>>,
    pub timeout_secs: u64,
}

impl Default for LighthouseCliConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("lighthouse"),
            chrome_flags: vec!["--headless".into()],
            extra_args: Vec::new(),
            context_args: BTreeMap::new(),
            timeout_secs: 120,
        }
    }
}

impl LighthouseCliConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

pub struct LighthouseCli {
    config: LighthouseCliConfig,
}

impl LighthouseCli {
    pub fn new(config: LighthouseCliConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LighthouseCliConfig {
        &self.config
    }

    pub fn build_args(&self, request: &AuditRequest<'_>, output_base: &Path) -> Vec<String> {
        let mut args = vec![request.url.to_string(), "--output=json".to_string()];
        if request.output != OutputFormat::Json {
            args.push(format!("--output={}", request.output));
        }
        args.push(format!("--output-path={}", output_base.display()));
        args.push("--quiet".into());
        match request.page.remote_debugging_port() {
            Some(port) => args.push(format!("--port={port}")),
            None if !self.config.chrome_flags.is_empty() => {
                args.push(format!("--chrome-flags={}", self.config.chrome_flags.join(" ")))
            }
            None => {}
        }
        args.extend(self.config.extra_args.iter().cloned());
        if let Some(extra) = self.config.context_args.get(request.context.as_str()) {
            args.extend(extra.iter().cloned());
        }
        args
    }
}

/// Files lighthouse writes for `output_base`: a single output lands on the
/// path itself, several outputs get a `.report.<ext>` suffix each.
pub fn output_paths(output_base: &Path, format: OutputFormat) -> (PathBuf, PathBuf) {
    if format == OutputFormat::Json {
        return (output_base.to_path_buf(), output_base.to_path_buf());
    }
    let with_suffix = |ext: &str| {
        let mut raw = output_base.as_os_str().to_owned();
        raw.push(format!(".report.{ext}"));
        PathBuf::from(raw)
    };
    (with_suffix("json"), with_suffix(format.extension()))
}

#[async_trait]
impl AuditPort for LighthouseCli {
    async fn audit(&self, request: AuditRequest<'_>) -> Result<AuditOutcome, AuditError> {
        let workdir = tempfile::tempdir()
            .map_err(|err| AuditError::audit(format!("cannot create report dir: {err}")))?;
        let output_base = workdir.path().join("report");
        let args = self.build_args(&request, &output_base);
        debug!(target: "audit.lighthouse", binary = %self.config.binary.display(), ?args, "spawning lighthouse");

        let child = Command::new(&self.config.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|err| {
                AuditError::audit(format!(
                    "cannot spawn {}: {err}",
                    self.config.binary.display()
                ))
            })?;

        let output = timeout(self.config.timeout(), child.wait_with_output())
            .await
            .map_err(|_| {
                AuditError::audit(format!(
                    "lighthouse timed out after {}s for {}",
                    self.config.timeout().as_secs(),
                    request.url
                ))
            })?
            .map_err(|err| AuditError::audit(format!("lighthouse did not finish: {err}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AuditError::audit(format!(
                "lighthouse exited with {} for {}: {}",
                output.status,
                request.url,
                tail(&stderr, STDERR_TAIL)
            )));
        }

        let (json_path, rendered_path) = output_paths(&output_base, request.output);
        let lhr = read_optional(&json_path)
            .await
            .and_then(|raw| match serde_json::from_str::<Value>(&raw) {
                Ok(value) => Some(value),
                Err(err) => {
                    warn!(target: "audit.lighthouse", %err, "unparseable lighthouse json");
                    None
                }
            });
        let report = read_optional(&rendered_path).await;
        Ok(AuditOutcome { lhr, report })
    }
}

async fn read_optional(path: &Path) -> Option<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(raw) => Some(raw),
        Err(err) => {
            warn!(target: "audit.lighthouse", path = %path.display(), %err, "lighthouse output missing");
            None
        }
    }
}

fn tail(text: &str, max: usize) -> &str {
    let text = text.trim();
    if text.len() <= max {
        return text;
    }
    let mut start = text.len() - max;
    while !text.is_char_boundary(start) {
        start += 1;
    }
    &text[start..]
}
