use serde_json::Value;

use crate::errors::ScoreError;
use crate::model::CategoryScore;

/// Scores that could be read plus one error per category that could not.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Extraction {
    pub scores: Vec<CategoryScore>,
    pub errors: Vec<ScoreError>,
}

pub fn extract_scores(report: Option<&Value>, categories: &[String]) -> Extraction {
    categories
        .iter()
        .fold(Extraction::default(), |mut acc, category| {
            match category_score(report, category) {
                Ok(score) => acc.scores.push(CategoryScore {
                    category: category.clone(),
                    score,
                }),
                Err(err) => acc.errors.push(err),
            }
            acc
        })
}

/// `report.categories[category].score`. A missing or null score reads as `None`.
fn category_score(report: Option<&Value>, category: &str) -> Result<Option<f64>, ScoreError> {
    let report = report.ok_or_else(|| ScoreError::MissingReport(category.to_string()))?;
    let categories = report
        .get("categories")
        .filter(|c| !c.is_null())
        .ok_or_else(|| ScoreError::MissingCategories(category.to_string()))?;
    let entry = categories
        .get(category)
        .filter(|e| !e.is_null())
        .ok_or_else(|| ScoreError::MissingCategory(category.to_string()))?;
    match entry.get("score") {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value.as_f64().map(Some).ok_or_else(|| ScoreError::Malformed {
            category: category.to_string(),
            value: value.to_string(),
        }),
    }
}
