use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Structured assessment of a facial image, produced by `POST /analyze-face`.
/// Also embedded in the user profile as `latest_skin_report`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkinReport {
    #[serde(default)]
    pub skin_type: String,
    /// Concern name to severity percentage (0..=100).
    #[serde(default)]
    pub severity_scores: BTreeMap<String, f64>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// One routine-guide entry from `POST /recommend-categories`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryRecommendation {
    pub category: String,
    #[serde(default)]
    pub reason: String,
    /// Broader query term for the product-suggestion lookup, when the
    /// category label itself is too narrow.
    #[serde(default)]
    pub search_term: Option<String>,
}

impl CategoryRecommendation {
    /// The term to feed into `suggest-products`.
    pub fn query_term(&self) -> &str {
        self.search_term.as_deref().unwrap_or(&self.category)
    }
}

/// A candidate product from `POST /suggest-products`. Selecting one feeds
/// the analysis workflow's browse mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuggestedProduct {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    /// 0..=100 scale, unlike `AnalysisResult.product_toxicity_score`.
    #[serde(default)]
    pub toxicity_score: f64,
}

impl SuggestedProduct {
    /// Safety percentage shown next to each suggestion.
    pub fn safety_percent(&self) -> u8 {
        let safety = (1.0 - self.toxicity_score / 100.0) * 100.0;
        safety.round().clamp(0.0, 100.0) as u8
    }
}

/// A recommendation paired with the products fetched for it. `products`
/// stays empty when the per-category lookup failed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryGuide {
    pub recommendation: CategoryRecommendation,
    pub products: Vec<SuggestedProduct>,
}
