use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;
use uuid::Uuid;

/// Shared error type for the journey audit crates.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AuditError {
    #[error("audit failed: {0}")]
    Audit(String),
    #[error("page unavailable: {0}")]
    Page(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("logger error: {0}")]
    Logger(String),
    #[error("score extraction failed: {0}")]
    Score(String),
    #[error("{0}")]
    Message(String),
}

impl AuditError {
    pub fn new(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    pub fn audit(message: impl Into<String>) -> Self {
        Self::Audit(message.into())
    }

    pub fn page(message: impl Into<String>) -> Self {
        Self::Page(message.into())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    pub fn logger(message: impl Into<String>) -> Self {
        Self::Logger(message.into())
    }

    /// Short label used for metrics and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            AuditError::Audit(_) => "audit",
            AuditError::Page(_) => "page",
            AuditError::Storage(_) => "storage",
            AuditError::Logger(_) => "logger",
            AuditError::Score(_) => "score",
            AuditError::Message(_) => "message",
        }
    }
}

/// Name of a navigation context (tab, viewport, browser state) inside a journey.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContextName(pub String);

impl ContextName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ContextName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContextName {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ContextName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct JourneyId(pub String);

impl JourneyId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for JourneyId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JourneyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One target page tracked by the host.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct UrlRecord {
    pub url: Url,
}

impl UrlRecord {
    pub fn new(url: Url) -> Self {
        Self { url }
    }

    pub fn parse(raw: &str) -> Result<Self, AuditError> {
        Url::parse(raw)
            .map(Self::new)
            .map_err(|err| AuditError::page(format!("invalid url {raw}: {err}")))
    }
}

impl fmt::Display for UrlRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}
