use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use uuid::{NoContext, Timestamp, Uuid};

pub mod entities;

/// Top-level configuration for a ScanWise client instance.
#[derive(Clone, Debug)]
pub struct ScanwiseConfig {
    pub backend: BackendConfig,
    pub storage: StorageConfig,
    pub behavior: BehaviorConfig,
}

#[derive(Clone, Debug)]
pub struct BackendConfig {
    /// Base URL of the analysis backend, without a trailing slash.
    pub base_url: String,
    /// Timeout for lightweight lookups (search, history).
    pub lookup_timeout: Duration,
    /// Timeout for AI-backed calls (analysis, vision, recommendations),
    /// which can take most of a minute server-side.
    pub analysis_timeout: Duration,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            lookup_timeout: Duration::from_secs(10),
            analysis_timeout: Duration::from_secs(90),
        }
    }
}

#[derive(Clone, Debug)]
pub struct StorageConfig {
    /// Directory backing the local (persistent) key-value store.
    pub data_dir: PathBuf,
}

/// Tunable behavior that would otherwise be hard-coded; profile fill
/// semantics in particular are a policy choice, not a constant.
#[derive(Clone, Debug)]
pub struct BehaviorConfig {
    pub profile_fill_policy: ProfileFillPolicy,
    /// Toxicity score above which an alternatives lookup is triggered.
    pub alternatives_threshold: f64,
    pub autocomplete_debounce: Duration,
    pub autocomplete_min_length: usize,
    /// Repeated decodes of the same barcode within this window are ignored.
    pub barcode_cooldown: Duration,
    /// Images larger than this on their longest side are downscaled before upload.
    pub max_image_dimension: u32,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            profile_fill_policy: ProfileFillPolicy::FillEmptyOnly,
            alternatives_threshold: 0.3,
            autocomplete_debounce: Duration::from_millis(300),
            autocomplete_min_length: 3,
            barcode_cooldown: Duration::from_millis(2500),
            max_image_dimension: 1024,
        }
    }
}

/// How cached profile data is merged into the analysis form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProfileFillPolicy {
    /// Profile defaults populate only fields the user has not edited
    /// in the current session.
    FillEmptyOnly,
    /// Every profile refresh overwrites the form's profile fields.
    Overwrite,
}

pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let timestamp = Timestamp::from_unix(NoContext, seconds, 0);

    (now, timestamp)
}

pub fn generate_uuid_v7() -> Uuid {
    let (_, timestamp) = generate_timestamp();
    Uuid::new_v7(timestamp)
}
