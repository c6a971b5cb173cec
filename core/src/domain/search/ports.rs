use std::future::Future;

use crate::domain::common::entities::CoreError;
use crate::domain::search::entities::{BarcodeProduct, ProductSuggestion};

/// Gateway to the remote product index.
#[cfg_attr(test, mockall::automock)]
pub trait ProductIndexGateway: Send + Sync {
    fn search_products(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<ProductSuggestion>, CoreError>> + Send;

    /// `GET /scan-barcode`: resolves a decoded barcode string to a product
    /// record. `NotFound` means the code is valid but unknown.
    fn lookup_barcode(
        &self,
        barcode: &str,
    ) -> impl Future<Output = Result<BarcodeProduct, CoreError>> + Send;
}
