use std::sync::Arc;

use tracing::{instrument, warn};

use crate::domain::analysis::entities::AnalysisRequest;
use crate::domain::analysis::ports::AnalysisGateway;
use crate::domain::common::entities::CoreError;
use crate::domain::routine::entities::{RoutineAnalysis, RoutineProduct};
use crate::domain::routine::ports::RoutineConflictGateway;
use crate::domain::search::entities::ProductSuggestion;
use crate::domain::storage::ports::{self, KeyValueStore};

const ROUTINE_KEY: &str = "scanwise_routine_products";
const ROUTINE_VERSION: u32 = 1;

/// Ordered routine list with conflict analysis.
///
/// The list lives in the persistent local store and is written back on
/// every mutation; construction rehydrates whatever was saved last.
pub struct RoutineBuilder<A, R, S> {
    analysis: Arc<A>,
    conflicts: Arc<R>,
    local: Arc<S>,
    products: Vec<RoutineProduct>,
}

impl<A, R, S> RoutineBuilder<A, R, S>
where
    A: AnalysisGateway,
    R: RoutineConflictGateway,
    S: KeyValueStore,
{
    pub fn new(analysis: Arc<A>, conflicts: Arc<R>, local: Arc<S>) -> Self {
        let products = match ports::get_versioned(&*local, ROUTINE_KEY, ROUTINE_VERSION) {
            Ok(saved) => saved.unwrap_or_default(),
            Err(err) => {
                warn!("failed to rehydrate routine: {err}");
                Vec::new()
            }
        };
        Self {
            analysis,
            conflicts,
            local,
            products,
        }
    }

    pub fn products(&self) -> &[RoutineProduct] {
        &self.products
    }

    /// Adds a search suggestion to the routine, resolving its ingredient
    /// list through the analysis endpoint first (suggestions carry none).
    /// Resolution failure adds the product anyway with empty ingredients
    /// rather than blocking the add. Duplicates (by id or name) are
    /// silently skipped.
    #[instrument(skip(self), fields(product = %suggestion.product_name))]
    pub async fn add(&mut self, suggestion: &ProductSuggestion) -> Result<bool, CoreError> {
        let id = if suggestion.id.is_empty() {
            suggestion.product_name.clone()
        } else {
            suggestion.id.clone()
        };
        if self
            .products
            .iter()
            .any(|p| p.id == id || p.name == suggestion.product_name)
        {
            return Ok(false);
        }

        let product = match self.analysis.scan_product(&resolve_request(suggestion)).await {
            Ok(full) => {
                if full.ingredients.is_empty() {
                    warn!("no ingredients found for {}", suggestion.product_name);
                }
                RoutineProduct {
                    id,
                    name: if full.product_name.is_empty() {
                        suggestion.product_name.clone()
                    } else {
                        full.product_name
                    },
                    ingredients: full.ingredients,
                }
            }
            Err(err) => {
                warn!("failed to resolve ingredients: {err}");
                RoutineProduct {
                    id,
                    name: suggestion.product_name.clone(),
                    ingredients: Vec::new(),
                }
            }
        };

        self.products.push(product);
        self.persist();
        Ok(true)
    }

    pub fn remove(&mut self, index: usize) {
        if index < self.products.len() {
            self.products.remove(index);
            self.persist();
        }
    }

    pub fn clear(&mut self) {
        self.products.clear();
        self.persist();
    }

    /// Conflict analysis over the current list; needs at least two
    /// products to be meaningful.
    #[instrument(skip(self))]
    pub async fn analyze(&self) -> Result<RoutineAnalysis, CoreError> {
        if self.products.len() < 2 {
            return Err(CoreError::Validation(
                "add at least two products to analyze a routine".to_string(),
            ));
        }
        self.conflicts.analyze_routine(&self.products).await
    }

    fn persist(&self) {
        if let Err(err) = ports::put_versioned(
            &*self.local,
            ROUTINE_KEY,
            ROUTINE_VERSION,
            None,
            &self.products,
        ) {
            warn!("failed to persist routine: {err}");
        }
    }
}

/// Minimal scan-product request used only to resolve an ingredient list.
fn resolve_request(suggestion: &ProductSuggestion) -> AnalysisRequest {
    AnalysisRequest {
        product_name: suggestion.product_name.clone(),
        skin_type: String::new(),
        skin_tone: String::new(),
        usage_frequency: String::new(),
        amount_applied: String::new(),
        ingredients_list: None,
        barcode: (!suggestion.id.is_empty()).then(|| suggestion.id.clone()),
        category: String::new(),
        age_group: None,
        skin_concerns: Vec::new(),
        allergies: Vec::new(),
    }
}
