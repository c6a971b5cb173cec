use serde::Serialize;

use crate::domain::routine::entities::RoutineProduct;
use crate::domain::skin::entities::SkinReport;

#[derive(Debug, Serialize)]
pub(super) struct IngredientRequest<'a> {
    pub ingredient_name: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct RecommendationRequest<'a> {
    pub category: &'a str,
    pub current_score: f64,
}

#[derive(Debug, Serialize)]
pub(super) struct RoutineRequest<'a> {
    pub products: &'a [RoutineProduct],
}

#[derive(Debug, Serialize)]
pub(super) struct FavoriteRequest<'a> {
    pub user_id: &'a str,
    pub product_name: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct RecommendCategoriesRequest<'a> {
    pub skin_report: &'a SkinReport,
}

#[derive(Debug, Serialize)]
pub(super) struct SuggestProductsRequest<'a> {
    pub category: &'a str,
    pub skin_report: &'a SkinReport,
}
