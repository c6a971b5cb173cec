use serde::{Deserialize, Serialize};

use crate::domain::skin::entities::SkinReport;

/// Authenticated user identity as handed over by the external identity
/// provider. The token is opaque to the client and is only ever forwarded
/// as `Authorization: Bearer <token>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub uid: String,
    token: String,
}

impl Identity {
    pub fn new(uid: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            token: token.into(),
        }
    }

    pub fn bearer_token(&self) -> &str {
        &self.token
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Light
    }
}

/// Profile data owned by the backend; the client holds a read-through
/// cached copy refreshed on login and after mutating actions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub skin_type: Option<String>,
    #[serde(default)]
    pub skin_tone: Option<String>,
    #[serde(default)]
    pub age_group: Option<String>,
    #[serde(default)]
    pub skin_concerns: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub theme_preference: Option<String>,
    #[serde(default)]
    pub latest_skin_report: Option<SkinReport>,
}
