use std::sync::Mutex;

use super::traits::Persistence;
use crate::errors::CoreError;

/// In-process slot, the equivalent of a browser's local-storage entry.
/// Used by tests and by callers that manage durability themselves.
#[derive(Debug, Default)]
pub struct MemoryPersistence {
    slot: Mutex<Option<String>>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a document already in the slot.
    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(document.into())),
        }
    }
}

impl Persistence for MemoryPersistence {
    fn read(&self) -> Result<Option<String>, CoreError> {
        let slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        Ok(slot.clone())
    }

    fn write(&self, document: &str) -> Result<(), CoreError> {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        *slot = Some(document.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), CoreError> {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        *slot = None;
        Ok(())
    }
}
