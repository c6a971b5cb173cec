use std::future::Future;

use crate::domain::common::entities::CoreError;
use crate::domain::routine::entities::{RoutineAnalysis, RoutineProduct};

/// Gateway to the routine conflict-analysis endpoint.
#[cfg_attr(test, mockall::automock)]
pub trait RoutineConflictGateway: Send + Sync {
    /// `POST /analyze-routine`: submits the full product list; the backend
    /// computes pairwise conflicts.
    fn analyze_routine(
        &self,
        products: &[RoutineProduct],
    ) -> impl Future<Output = Result<RoutineAnalysis, CoreError>> + Send;
}
