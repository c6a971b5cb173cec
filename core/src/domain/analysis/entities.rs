use serde::{Deserialize, Serialize};

/// Which input surface is feeding the form. Drives the request payload
/// shape: see [`crate::domain::analysis::value_objects::AnalysisForm::to_request`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    /// Product picked from autocomplete; ingredients resolve server-side.
    Search,
    /// Barcode image or OCR photos; transitions to `Manual` for review.
    Scan,
    /// Free-text name and ingredient list.
    Manual,
    /// Candidates injected from a skin-analysis recommendation.
    Browse,
}

impl InputMode {
    pub fn as_str(&self) -> &str {
        match self {
            InputMode::Search => "search",
            InputMode::Scan => "scan",
            InputMode::Manual => "manual",
            InputMode::Browse => "browse",
        }
    }
}

/// Payload for `POST /scan-product`. Exactly one of `ingredients_list` /
/// `barcode` is authoritative per mode; in scan mode both are sent and the
/// backend prefers the barcode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub product_name: String,
    pub skin_type: String,
    pub skin_tone: String,
    pub usage_frequency: String,
    pub amount_applied: String,
    pub ingredients_list: Option<String>,
    pub barcode: Option<String>,
    pub category: String,
    pub age_group: Option<String>,
    pub skin_concerns: Vec<String>,
    pub allergies: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProductStatus {
    Safe,
    Moderate,
    Toxic,
}

/// Per-ingredient risk classification row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToxicityEntry {
    pub ingredient: String,
    pub label: RiskLabel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLabel {
    #[serde(rename = "SAFE")]
    Safe,
    #[serde(rename = "LOW RISK")]
    LowRisk,
    #[serde(rename = "MODERATE RISK")]
    ModerateRisk,
    #[serde(rename = "HIGH RISK")]
    HighRisk,
    #[serde(other)]
    Unknown,
}

impl RiskLabel {
    pub fn as_str(&self) -> &str {
        match self {
            RiskLabel::Safe => "SAFE",
            RiskLabel::LowRisk => "LOW RISK",
            RiskLabel::ModerateRisk => "MODERATE RISK",
            RiskLabel::HighRisk => "HIGH RISK",
            RiskLabel::Unknown => "UNKNOWN",
        }
    }
}

/// Alignment between the product and the user's skin profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WellnessMatch {
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub match_level: String,
    #[serde(default)]
    pub positive_matches: Vec<String>,
    #[serde(default)]
    pub negative_matches: Vec<String>,
    #[serde(default)]
    pub allergy_matches: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    #[serde(default)]
    pub base_score: f64,
    #[serde(default)]
    pub usage_factor: f64,
}

/// Suggested alternative with comparable function and lower risk or cost.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DupeProduct {
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub toxicity_score: Option<f64>,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlternativeProduct {
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub toxicity_score: f64,
}

/// The full analysis response. Held in controller state until the next
/// submission or navigation; never persisted locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub category: Option<String>,
    pub product_toxicity_score: f64,
    pub product_status: ProductStatus,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub toxicity_report: Vec<ToxicityEntry>,
    #[serde(default)]
    pub not_suitable_for_skin_type: Vec<String>,
    #[serde(default)]
    pub not_suitable_for_skin_tone: Vec<String>,
    #[serde(default)]
    pub wellness_match: Option<WellnessMatch>,
    #[serde(default)]
    pub detailed_score_breakdown: Option<ScoreBreakdown>,
    #[serde(default)]
    pub efficacy_report: Option<serde_json::Value>,
    #[serde(default)]
    pub dupes: Vec<DupeProduct>,
    #[serde(default)]
    pub routine_report: Option<serde_json::Value>,
}
