use serde::{Deserialize, Serialize};

/// One row of the autocomplete dropdown, as returned by the product index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSuggestion {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub brands: String,
    #[serde(default)]
    pub image_url: String,
}

/// Product record resolved from a barcode, used to pre-fill the manual
/// review form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BarcodeProduct {
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub ingredients_text: String,
    #[serde(default)]
    pub brands: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}
