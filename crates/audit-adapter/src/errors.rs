use journey_core_types::AuditError;
use thiserror::Error;

/// Why a category score could not be read from a report.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScoreError {
    #[error("no report available for category {0}")]
    MissingReport(String),
    #[error("report has no categories section (wanted {0})")]
    MissingCategories(String),
    #[error("report has no category {0}")]
    MissingCategory(String),
    #[error("category {category} has a non-numeric score: {value}")]
    Malformed { category: String, value: String },
}

impl ScoreError {
    pub fn category(&self) -> &str {
        match self {
            ScoreError::MissingReport(c)
            | ScoreError::MissingCategories(c)
            | ScoreError::MissingCategory(c) => c,
            ScoreError::Malformed { category, .. } => category,
        }
    }
}

impl From<ScoreError> for AuditError {
    fn from(err: ScoreError) -> Self {
        AuditError::Score(err.to_string())
    }
}
