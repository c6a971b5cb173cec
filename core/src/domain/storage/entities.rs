use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Versioned wrapper written around every stored value.
///
/// The version travels with the value so a bump discards stale entries
/// without renaming keys. `ttl_secs = None` means the entry only dies
/// with its store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub version: u32,
    pub stored_at: DateTime<Utc>,
    pub ttl_secs: Option<u64>,
    pub value: serde_json::Value,
}

impl Envelope {
    pub fn wrap(value: serde_json::Value, version: u32, ttl_secs: Option<u64>) -> Self {
        Self {
            version,
            stored_at: Utc::now(),
            ttl_secs,
            value,
        }
    }

    /// Returns the payload if the envelope matches `version` and has not
    /// expired, `None` otherwise.
    pub fn unwrap_if_fresh(self, version: u32) -> Option<serde_json::Value> {
        if self.version != version {
            return None;
        }
        if let Some(ttl) = self.ttl_secs {
            let age = Utc::now().signed_duration_since(self.stored_at);
            if age.num_seconds() < 0 || age.num_seconds() as u64 >= ttl {
                return None;
            }
        }
        Some(self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn version_mismatch_discards_value() {
        let env = Envelope::wrap(serde_json::json!({"a": 1}), 1, None);
        assert!(env.clone().unwrap_if_fresh(2).is_none());
        assert!(env.unwrap_if_fresh(1).is_some());
    }

    #[test]
    fn expired_entry_discards_value() {
        let mut env = Envelope::wrap(serde_json::json!("x"), 1, Some(60));
        env.stored_at = Utc::now() - Duration::seconds(61);
        assert!(env.unwrap_if_fresh(1).is_none());
    }

    #[test]
    fn unexpired_entry_survives() {
        let env = Envelope::wrap(serde_json::json!("x"), 1, Some(60));
        assert_eq!(env.unwrap_if_fresh(1), Some(serde_json::json!("x")));
    }
}
