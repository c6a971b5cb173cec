use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::common::entities::CoreError;
use crate::domain::storage::entities::Envelope;

/// Port over a browser-storage-style key-value store.
///
/// Two instances back the app: a persistent "local" store (theme, routine
/// products) and a session-scoped one (ingredient explanation cache). Both
/// are synchronous; the payloads are small JSON documents.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<serde_json::Value>, CoreError>;

    fn put(&self, key: &str, value: serde_json::Value) -> Result<(), CoreError>;

    fn remove(&self, key: &str) -> Result<(), CoreError>;
}

/// Typed, versioned read on top of the raw port. Undecodable or stale
/// entries read as a miss, never as an error.
pub fn get_versioned<S, T>(store: &S, key: &str, version: u32) -> Result<Option<T>, CoreError>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    let Ok(envelope) = serde_json::from_value::<Envelope>(raw) else {
        return Ok(None);
    };
    let Some(value) = envelope.unwrap_if_fresh(version) else {
        return Ok(None);
    };
    Ok(serde_json::from_value(value).ok())
}

pub fn put_versioned<S, T>(
    store: &S,
    key: &str,
    version: u32,
    ttl_secs: Option<u64>,
    value: &T,
) -> Result<(), CoreError>
where
    S: KeyValueStore + ?Sized,
    T: Serialize,
{
    let raw = serde_json::to_value(value).map_err(|e| CoreError::Storage(e.to_string()))?;
    store.put(key, serde_json::to_value(Envelope::wrap(raw, version, ttl_secs))
        .map_err(|e| CoreError::Storage(e.to_string()))?)
}
