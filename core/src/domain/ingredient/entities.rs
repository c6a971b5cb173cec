use serde::{Deserialize, Serialize};

/// Explanation payload for a single ingredient. The backend has shipped two
/// shapes over time; both decode into this struct, with the unused side
/// left empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngredientExplanation {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub functions: Vec<String>,
    #[serde(default)]
    pub quick_facts: Vec<String>,
    // Legacy shape.
    #[serde(default)]
    pub risk_level: Option<String>,
    #[serde(default)]
    pub common_uses: Option<String>,
    #[serde(default)]
    pub side_effects: Option<String>,
}

impl IngredientExplanation {
    /// True for the pre-`functions` response shape.
    pub fn is_legacy(&self) -> bool {
        self.functions.is_empty()
            && self.quick_facts.is_empty()
            && (self.risk_level.is_some()
                || self.common_uses.is_some()
                || self.side_effects.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_both_response_shapes() {
        let modern: IngredientExplanation = serde_json::from_str(
            r#"{"description":"Humectant.","functions":["Hydration"],"quick_facts":["Safe for all skin types"]}"#,
        )
        .unwrap();
        assert!(!modern.is_legacy());
        assert_eq!(modern.functions, vec!["Hydration"]);

        let legacy: IngredientExplanation = serde_json::from_str(
            r#"{"description":"Humectant.","risk_level":"Low","common_uses":"Moisturizers","side_effects":"None known"}"#,
        )
        .unwrap();
        assert!(legacy.is_legacy());
        assert_eq!(legacy.risk_level.as_deref(), Some("Low"));
    }
}
