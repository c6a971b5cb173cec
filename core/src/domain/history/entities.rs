use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::generate_uuid_v7;

/// One analysis appended to the remote scan history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanHistoryItem {
    #[serde(default)]
    pub id: Option<String>,
    pub user_id: String,
    pub product_name: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    pub toxicity_score: f64,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl ScanHistoryItem {
    /// The id is assigned client-side (uuid v7) so entries sort by creation
    /// time before the backend has echoed them back.
    pub fn new(
        user_id: impl Into<String>,
        product_name: impl Into<String>,
        ingredients: Vec<String>,
        toxicity_score: f64,
    ) -> Self {
        Self {
            id: Some(generate_uuid_v7().to_string()),
            user_id: user_id.into(),
            product_name: product_name.into(),
            ingredients,
            toxicity_score,
            timestamp: Some(Utc::now()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FavoriteStatus {
    /// The product was already favorited.
    Exists,
    Added,
}
