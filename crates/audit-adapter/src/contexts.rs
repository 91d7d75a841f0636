use std::sync::Arc;

use journey_core_types::ContextName;

use crate::model::AuditResult;

/// Context name -> latest audit result, in first-navigation order.
/// Replacing an entry keeps its original position.
#[derive(Debug, Default)]
pub struct ContextResults {
    entries: Vec<Arc<AuditResult>>,
}

impl ContextResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, result: Arc<AuditResult>) {
        match self
            .entries
            .iter_mut()
            .find(|entry| entry.context == result.context)
        {
            Some(slot) => *slot = result,
            None => self.entries.push(result),
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, name: &ContextName) -> Option<Arc<AuditResult>> {
        self.entries.iter().find(|e| &e.context == name).cloned()
    }

    pub fn snapshot(&self) -> Vec<Arc<AuditResult>> {
        self.entries.clone()
    }
}
