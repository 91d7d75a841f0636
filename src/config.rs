//! Application configuration
//!
//! Loaded from YAML; every section falls back to its defaults.

use std::path::PathBuf;

use audit_adapter::{AuditConfig, LighthouseCliConfig};
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

pub const ENV_LIGHTHOUSE_BIN: &str = "JOURNEY_AUDIT_LIGHTHOUSE_BIN";
pub const ENV_CHROME_PORT: &str = "JOURNEY_AUDIT_CHROME_PORT";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChromeConfig {
    /// Port of an already running Chrome (`--remote-debugging-port`).
    /// Lighthouse launches its own browser when unset.
    pub remote_debugging_port: Option<u16>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub csv: Option<PathBuf>,
    pub report_dir: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub audit: AuditConfig,
    pub lighthouse: LighthouseCliConfig,
    pub chrome: ChromeConfig,
    /// Navigation contexts visited for every page, in order.
    pub contexts: Vec<String>,
    pub output: OutputConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            audit: AuditConfig::default(),
            lighthouse: LighthouseCliConfig::default(),
            chrome: ChromeConfig::default(),
            contexts: vec!["desktop".into()],
            output: OutputConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_yaml(raw: &str) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw).map_err(ConfigError::Parse)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(ConfigError::Parse)
    }

    /// Applies environment overrides through `lookup` (normally `std::env::var`).
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bin) = lookup(ENV_LIGHTHOUSE_BIN).filter(|v| !v.trim().is_empty()) {
            self.lighthouse.binary = PathBuf::from(bin);
        }
        if let Some(raw) = lookup(ENV_CHROME_PORT).filter(|v| !v.trim().is_empty()) {
            let port = raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidEnv {
                    key: ENV_CHROME_PORT,
                    value: raw.clone(),
                })?;
            self.chrome.remote_debugging_port = Some(port);
        }
        Ok(())
    }
}
