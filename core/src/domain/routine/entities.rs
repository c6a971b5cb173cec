use serde::{Deserialize, Serialize};

/// One routine entry. `id` falls back to the product name when the source
/// suggestion carried no identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineProduct {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
}

/// Pairwise conflict between two routine products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineConflict {
    pub product1: String,
    pub product2: String,
    #[serde(default)]
    pub reason: String,
}

/// Result of `POST /analyze-routine`: a free-text summary plus the
/// conflict list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineAnalysis {
    #[serde(default)]
    pub analysis: String,
    #[serde(default)]
    pub conflicts: Vec<RoutineConflict>,
}
