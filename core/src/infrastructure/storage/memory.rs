use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::common::entities::CoreError;
use crate::domain::storage::ports::KeyValueStore;

/// Session-scoped store: lives exactly as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, serde_json::Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<serde_json::Value>, CoreError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| CoreError::Storage("store lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &str, value: serde_json::Value) -> Result<(), CoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| CoreError::Storage("store lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| CoreError::Storage("store lock poisoned".to_string()))?;
        entries.remove(key);
        Ok(())
    }
}
