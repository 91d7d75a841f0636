use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Rendered output requested from the auditor alongside the JSON report.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    #[default]
    Html,
    Csv,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Html => "html",
            OutputFormat::Csv => "csv",
        }
    }

    pub fn extension(self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "html" => Ok(OutputFormat::Html),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(format!("unsupported output format: {other}")),
        }
    }
}

pub const DEFAULT_CATEGORIES: [&str; 4] = ["performance", "seo", "best-practices", "accessibility"];

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    pub output_format: OutputFormat,
    /// Categories extracted from each report, in column order.
    pub categories: Vec<String>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::default(),
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl AuditConfig {
    /// Drops blank and repeated categories while keeping first-seen order.
    pub fn normalized(mut self) -> Self {
        let mut seen = Vec::with_capacity(self.categories.len());
        for category in self.categories.drain(..) {
            let category = category.trim().to_string();
            if !category.is_empty() && !seen.contains(&category) {
                seen.push(category);
            }
        }
        self.categories = seen;
        self
    }
}

/// Column label for a category id.
pub fn category_label(category: &str) -> String {
    match category {
        "performance" => "Performance".into(),
        "seo" => "SEO".into(),
        "best-practices" => "Best Practices".into(),
        "accessibility" => "Accessibility".into(),
        "pwa" => "PWA".into(),
        other => other.to_string(),
    }
}
