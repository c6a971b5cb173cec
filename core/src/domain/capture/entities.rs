use serde::{Deserialize, Serialize};

use crate::domain::search::entities::BarcodeProduct;

/// An encoded image ready for upload, plus the mime type it was encoded
/// with. Frames from a camera arrive as JPEG; uploaded files keep whatever
/// format they decoded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub file_name: String,
}

impl ImagePayload {
    pub fn jpeg(bytes: Vec<u8>, file_name: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: "image/jpeg".to_string(),
            file_name: file_name.into(),
        }
    }
}

/// Product fields the vision backend extracted from package photos.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedProduct {
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
}

impl ExtractedProduct {
    pub fn ingredients_text(&self) -> String {
        self.ingredients.join(", ")
    }
}

/// Result of server-side barcode recognition on a captured frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BarcodeScanOutcome {
    #[serde(default)]
    pub found: bool,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub product: Option<BarcodeProduct>,
}
