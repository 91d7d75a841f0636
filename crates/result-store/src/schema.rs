use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A row keyed by column key. Unknown keys are kept but not exported.
pub type StoreRow = Map<String, Value>;

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub key: String,
    pub label: String,
}

impl Column {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// Ordered list of columns for one table.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct StoreSchema {
    pub columns: Vec<Column>,
}

impl StoreSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn column(mut self, key: impl Into<String>, label: impl Into<String>) -> Self {
        self.columns.push(Column::new(key, label));
        self
    }

    pub fn labels(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.label.as_str()).collect()
    }

    pub fn keys(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.key.as_str()).collect()
    }

    /// Renders a row in column order; absent and null cells become empty strings.
    pub fn project(&self, row: &StoreRow) -> Vec<String> {
        self.columns
            .iter()
            .map(|column| match row.get(&column.key) {
                None | Some(Value::Null) => String::new(),
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
            })
            .collect()
    }
}
