use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

use tracing::warn;

use crate::domain::common::entities::CoreError;
use crate::domain::storage::ports::KeyValueStore;

/// Persistent store backed by a single JSON document on disk. The whole
/// map is rewritten on every mutation; entries are small (theme, routine
/// list), so this stays cheap.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, serde_json::Value>>,
}

impl JsonFileStore {
    /// Opens the store, creating parent directories as needed. A corrupt
    /// file is treated as empty rather than refusing to start.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| CoreError::Storage(e.to_string()))?;
        }

        let entries = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("discarding corrupt store file {}: {e}", path.display());
                HashMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(CoreError::Storage(e.to_string())),
        };

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    fn flush(&self, entries: &HashMap<String, serde_json::Value>) -> Result<(), CoreError> {
        let raw =
            serde_json::to_string_pretty(entries).map_err(|e| CoreError::Storage(e.to_string()))?;
        fs::write(&self.path, raw).map_err(|e| CoreError::Storage(e.to_string()))
    }
}

impl KeyValueStore for JsonFileStore {
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
        self.flush(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| CoreError::Storage("store lock poisoned".to_string()))?;
        entries.remove(key);
        self.flush(&entries)
    }
}
