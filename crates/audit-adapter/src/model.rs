use journey_core_types::{AuditError, ContextName};
use journey_result_store::StoreRow;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use url::Url;

use crate::config::OutputFormat;
use crate::ports::PageHandle;

/// Raw audit outcome kept in memory for one navigation context.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditResult {
    pub context: ContextName,
    /// Structured report (the Lighthouse result object).
    pub report: Option<Value>,
    /// Rendered output in the configured format.
    pub rendered: Option<String>,
}

/// What an auditor hands back. Either half may be missing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuditOutcome {
    pub lhr: Option<Value>,
    pub report: Option<String>,
}

pub struct AuditRequest<'a> {
    pub url: Url,
    pub output: OutputFormat,
    pub context: &'a ContextName,
    pub page: &'a dyn PageHandle,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryScore {
    pub category: String,
    /// `None` when the report carries the category with a null score.
    pub score: Option<f64>,
}

/// Normalized row produced per context per analysed page.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreRecord {
    pub context: ContextName,
    pub url: String,
    pub scores: Vec<CategoryScore>,
}

impl ScoreRecord {
    pub fn get(&self, category: &str) -> Option<&CategoryScore> {
        self.scores.iter().find(|s| s.category == category)
    }

    /// Score for a category; `None` if the category was omitted or scored null.
    pub fn score(&self, category: &str) -> Option<f64> {
        self.get(category).and_then(|s| s.score)
    }

    pub fn to_row(&self) -> StoreRow {
        let mut row = StoreRow::new();
        row.insert("url".into(), Value::String(self.url.clone()));
        row.insert("context".into(), Value::String(self.context.0.clone()));
        for entry in &self.scores {
            row.insert(entry.category.clone(), score_value(entry.score));
        }
        row
    }
}

// Flat shape: {"context": .., "url": .., "<category>": score, ..}
impl Serialize for ScoreRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2 + self.scores.len()))?;
        map.serialize_entry("context", &self.context)?;
        map.serialize_entry("url", &self.url)?;
        for entry in &self.scores {
            map.serialize_entry(&entry.category, &entry.score)?;
        }
        map.end()
    }
}

fn score_value(score: Option<f64>) -> Value {
    score
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// Page handle for a page already open in a browser reachable over the
/// Chrome remote-debugging protocol.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemotePage {
    pub url: Url,
    pub port: Option<u16>,
}

impl RemotePage {
    pub fn new(url: Url, port: Option<u16>) -> Self {
        Self { url, port }
    }
}

impl PageHandle for RemotePage {
    fn current_url(&self) -> Result<Url, AuditError> {
        Ok(self.url.clone())
    }

    fn remote_debugging_port(&self) -> Option<u16> {
        self.port
    }
}
