use std::future::Future;

use crate::domain::common::entities::CoreError;
use crate::domain::ingredient::entities::IngredientExplanation;

/// Gateway to the ingredient-explanation endpoint.
#[cfg_attr(test, mockall::automock)]
pub trait IngredientInfoGateway: Send + Sync {
    /// `POST /explain-ingredient`: the name is sent exactly as it appears
    /// in the ingredient list, no normalization.
    fn explain(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<IngredientExplanation, CoreError>> + Send;
}
