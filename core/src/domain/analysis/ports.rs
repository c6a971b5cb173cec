use std::future::Future;

use crate::domain::analysis::entities::{AlternativeProduct, AnalysisRequest, AnalysisResult};
use crate::domain::common::entities::CoreError;

/// Gateway to the scoring backend.
#[cfg_attr(test, mockall::automock)]
pub trait AnalysisGateway: Send + Sync {
    /// `POST /scan-product`. A business failure (`{"error": ...}`) comes
    /// back as `CoreError::Backend` with the server's message verbatim.
    fn scan_product(
        &self,
        request: &AnalysisRequest,
    ) -> impl Future<Output = Result<AnalysisResult, CoreError>> + Send;

    /// `POST /recommend-alternatives`: lower-risk products in the same
    /// category.
    fn recommend_alternatives(
        &self,
        category: &str,
        current_score: f64,
    ) -> impl Future<Output = Result<Vec<AlternativeProduct>, CoreError>> + Send;
}
