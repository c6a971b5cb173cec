use std::future::Future;

use crate::domain::capture::entities::ImagePayload;
use crate::domain::common::entities::CoreError;
use crate::domain::session::entities::Identity;
use crate::domain::skin::entities::{CategoryRecommendation, SkinReport, SuggestedProduct};

/// Gateway to the AI-backed skin endpoints. Both calls ride the long
/// analysis timeout since the backend runs model inference.
#[cfg_attr(test, mockall::automock)]
pub trait SkinGateway: Send + Sync {
    /// `POST /analyze-face`: multipart selfie upload. The bearer token is
    /// optional; anonymous scans are allowed but not persisted server-side.
    fn analyze_face<'a>(
        &self,
        image: ImagePayload,
        identity: Option<&'a Identity>,
    ) -> impl Future<Output = Result<SkinReport, CoreError>> + Send;

    /// `POST /recommend-categories`: routine-guide categories for a report.
    fn recommend_categories(
        &self,
        report: &SkinReport,
    ) -> impl Future<Output = Result<Vec<CategoryRecommendation>, CoreError>> + Send;

    /// `POST /suggest-products`: safe candidates for one category.
    fn suggest_products(
        &self,
        category: &str,
        report: &SkinReport,
    ) -> impl Future<Output = Result<Vec<SuggestedProduct>, CoreError>> + Send;
}
