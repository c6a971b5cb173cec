use std::time::Duration;

use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::domain::analysis::entities::{AlternativeProduct, AnalysisRequest, AnalysisResult};
use crate::domain::analysis::ports::AnalysisGateway;
use crate::domain::capture::entities::{BarcodeScanOutcome, ExtractedProduct, ImagePayload};
use crate::domain::capture::ports::VisionGateway;
use crate::domain::common::BackendConfig;
use crate::domain::common::entities::CoreError;
use crate::domain::history::entities::{FavoriteStatus, ScanHistoryItem};
use crate::domain::ingredient::entities::IngredientExplanation;
use crate::domain::ingredient::ports::IngredientInfoGateway;
use crate::domain::routine::entities::{RoutineAnalysis, RoutineProduct};
use crate::domain::routine::ports::RoutineConflictGateway;
use crate::domain::search::entities::{BarcodeProduct, ProductSuggestion};
use crate::domain::search::ports::ProductIndexGateway;
use crate::domain::session::entities::{Identity, UserProfile};
use crate::domain::session::ports::AccountGateway;
use crate::domain::skin::entities::{CategoryRecommendation, SkinReport, SuggestedProduct};
use crate::domain::skin::ports::SkinGateway;

use super::dto::{
    FavoriteRequest, IngredientRequest, RecommendCategoriesRequest, RecommendationRequest,
    RoutineRequest, SuggestProductsRequest,
};

/// Single adapter over every backend endpoint, implementing all the domain
/// gateway ports. Lightweight lookups use the short timeout; AI-backed
/// calls (analysis, vision, recommendations) use the long one.
#[derive(Debug, Clone)]
pub struct HttpBackendClient {
    client: Client,
    base_url: String,
    lookup_timeout: Duration,
    analysis_timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct FavoriteResponse {
    status: FavoriteStatus,
}

impl HttpBackendClient {
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            lookup_timeout: config.lookup_timeout,
            analysis_timeout: config.analysis_timeout,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Decodes a response, honoring the backend's convention of returning
    /// business errors as `{"error": "..."}` inside a 200.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, CoreError> {
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CoreError::NotFound);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("backend returned {status}: {body}");
            return Err(CoreError::Backend(format!("server returned {status}")));
        }

        let value: serde_json::Value = response
            .json()
            .await
            .map_err(|e| CoreError::Connectivity(e.to_string()))?;
        if let Some(message) = value.get("error").and_then(|v| v.as_str()) {
            return Err(CoreError::Backend(message.to_string()));
        }
        serde_json::from_value(value).map_err(|e| {
            tracing::error!("failed to decode backend response: {e}");
            CoreError::Internal
        })
    }

    fn transport(e: reqwest::Error) -> CoreError {
        tracing::error!("backend request failed: {e}");
        CoreError::Connectivity(e.to_string())
    }

    fn image_part(image: ImagePayload) -> Result<Part, CoreError> {
        let mime = image.mime_type.clone();
        Part::bytes(image.bytes)
            .file_name(image.file_name)
            .mime_str(&mime)
            .map_err(|e| CoreError::Validation(format!("bad image mime type: {e}")))
    }
}

impl ProductIndexGateway for HttpBackendClient {
    async fn search_products(&self, query: &str) -> Result<Vec<ProductSuggestion>, CoreError> {
        let response = self
            .client
            .get(self.url("/search-products"))
            .query(&[("q", query)])
            .timeout(self.lookup_timeout)
            .send()
            .await
            .map_err(Self::transport)?;
        Self::decode(response).await
    }

    async fn lookup_barcode(&self, barcode: &str) -> Result<BarcodeProduct, CoreError> {
        let response = self
            .client
            .get(self.url("/scan-barcode"))
            .query(&[("barcode", barcode)])
            .timeout(self.lookup_timeout)
            .send()
            .await
            .map_err(Self::transport)?;
        match Self::decode(response).await {
            // The backend reports an unknown code as a business error.
            Err(CoreError::Backend(msg)) if msg.to_lowercase().contains("not found") => {
                Err(CoreError::NotFound)
            }
            other => other,
        }
    }
}

impl AnalysisGateway for HttpBackendClient {
    async fn scan_product(&self, request: &AnalysisRequest) -> Result<AnalysisResult, CoreError> {
        let response = self
            .client
            .post(self.url("/scan-product"))
            .json(request)
            .timeout(self.analysis_timeout)
            .send()
            .await
            .map_err(Self::transport)?;
        Self::decode(response).await
    }

    async fn recommend_alternatives(
        &self,
        category: &str,
        current_score: f64,
    ) -> Result<Vec<AlternativeProduct>, CoreError> {
        let response = self
            .client
            .post(self.url("/recommend-alternatives"))
            .json(&RecommendationRequest {
                category,
                current_score,
            })
            .timeout(self.analysis_timeout)
            .send()
            .await
            .map_err(Self::transport)?;
        Self::decode(response).await
    }
}

impl VisionGateway for HttpBackendClient {
    async fn extract_product(
        &self,
        images: Vec<ImagePayload>,
    ) -> Result<ExtractedProduct, CoreError> {
        let mut form = Form::new();
        for image in images {
            form = form.part("files", Self::image_part(image)?);
        }

        let response = self
            .client
            .post(self.url("/analyze-image"))
            .multipart(form)
            .timeout(self.analysis_timeout)
            .send()
            .await
            .map_err(Self::transport)?;
        Self::decode(response).await
    }

    async fn scan_barcode_image(
        &self,
        image: ImagePayload,
    ) -> Result<BarcodeScanOutcome, CoreError> {
        let form = Form::new().part("file", Self::image_part(image)?);

        let response = self
            .client
            .post(self.url("/scan-barcode-image"))
            .multipart(form)
            .timeout(self.analysis_timeout)
            .send()
            .await
            .map_err(Self::transport)?;
        Self::decode(response).await
    }
}

impl AccountGateway for HttpBackendClient {
    async fn get_profile(&self, identity: &Identity) -> Result<UserProfile, CoreError> {
        let response = self
            .client
            .get(self.url("/users/profile"))
            .bearer_auth(identity.bearer_token())
            .timeout(self.lookup_timeout)
            .send()
            .await
            .map_err(Self::transport)?;
        Self::decode(response).await
    }

    async fn save_profile(
        &self,
        identity: &Identity,
        profile: &UserProfile,
    ) -> Result<(), CoreError> {
        let response = self
            .client
            .post(self.url("/users/profile"))
            .bearer_auth(identity.bearer_token())
            .json(profile)
            .timeout(self.lookup_timeout)
            .send()
            .await
            .map_err(Self::transport)?;
        Self::decode::<serde_json::Value>(response).await.map(|_| ())
    }

    async fn save_history(
        &self,
        identity: &Identity,
        item: &ScanHistoryItem,
    ) -> Result<(), CoreError> {
        let response = self
            .client
            .post(self.url("/history"))
            .bearer_auth(identity.bearer_token())
            .json(item)
            .timeout(self.lookup_timeout)
            .send()
            .await
            .map_err(Self::transport)?;
        Self::decode::<serde_json::Value>(response).await.map(|_| ())
    }

    async fn list_history(&self, identity: &Identity) -> Result<Vec<ScanHistoryItem>, CoreError> {
        let response = self
            .client
            .get(self.url("/history"))
            .bearer_auth(identity.bearer_token())
            .timeout(self.lookup_timeout)
            .send()
            .await
            .map_err(Self::transport)?;
        Self::decode(response).await
    }

    async fn clear_history(&self, identity: &Identity) -> Result<(), CoreError> {
        let response = self
            .client
            .delete(self.url("/history"))
            .bearer_auth(identity.bearer_token())
            .timeout(self.lookup_timeout)
            .send()
            .await
            .map_err(Self::transport)?;
        Self::decode::<serde_json::Value>(response).await.map(|_| ())
    }

    async fn add_favorite(
        &self,
        identity: &Identity,
        product_name: &str,
    ) -> Result<FavoriteStatus, CoreError> {
        let response = self
            .client
            .post(self.url("/favorites"))
            .bearer_auth(identity.bearer_token())
            .json(&FavoriteRequest {
                user_id: &identity.uid,
                product_name,
            })
            .timeout(self.lookup_timeout)
            .send()
            .await
            .map_err(Self::transport)?;
        let parsed: FavoriteResponse = Self::decode(response).await?;
        Ok(parsed.status)
    }
}

impl IngredientInfoGateway for HttpBackendClient {
    async fn explain(&self, name: &str) -> Result<IngredientExplanation, CoreError> {
        let response = self
            .client
            .post(self.url("/explain-ingredient"))
            .json(&IngredientRequest {
                ingredient_name: name,
            })
            .timeout(self.analysis_timeout)
            .send()
            .await
            .map_err(Self::transport)?;
        Self::decode(response).await
    }
}

impl RoutineConflictGateway for HttpBackendClient {
    async fn analyze_routine(
        &self,
        products: &[RoutineProduct],
    ) -> Result<RoutineAnalysis, CoreError> {
        let response = self
            .client
            .post(self.url("/analyze-routine"))
            .json(&RoutineRequest { products })
            .timeout(self.analysis_timeout)
            .send()
            .await
            .map_err(Self::transport)?;
        Self::decode(response).await
    }
}

impl SkinGateway for HttpBackendClient {
    async fn analyze_face(
        &self,
        image: ImagePayload,
        identity: Option<&Identity>,
    ) -> Result<SkinReport, CoreError> {
        let form = Form::new().part("file", Self::image_part(image)?);

        let mut request = self
            .client
            .post(self.url("/analyze-face"))
            .multipart(form)
            .timeout(self.analysis_timeout);
        if let Some(identity) = identity {
            request = request.bearer_auth(identity.bearer_token());
        }

        let response = request.send().await.map_err(Self::transport)?;
        Self::decode(response).await
    }

    async fn recommend_categories(
        &self,
        report: &SkinReport,
    ) -> Result<Vec<CategoryRecommendation>, CoreError> {
        let response = self
            .client
            .post(self.url("/recommend-categories"))
            .json(&RecommendCategoriesRequest {
                skin_report: report,
            })
            .timeout(self.analysis_timeout)
            .send()
            .await
            .map_err(Self::transport)?;
        Self::decode(response).await
    }

    async fn suggest_products(
        &self,
        category: &str,
        report: &SkinReport,
    ) -> Result<Vec<SuggestedProduct>, CoreError> {
        let response = self
            .client
            .post(self.url("/suggest-products"))
            .json(&SuggestProductsRequest {
                category,
                skin_report: report,
            })
            .timeout(self.analysis_timeout)
            .send()
            .await
            .map_err(Self::transport)?;
        Self::decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_loses_its_trailing_slash() {
        let client = HttpBackendClient::new(&BackendConfig {
            base_url: "http://localhost:8000/".to_string(),
            ..BackendConfig::default()
        });
        assert_eq!(client.url("/scan-product"), "http://localhost:8000/scan-product");
    }
}
