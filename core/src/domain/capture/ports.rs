use std::future::Future;

use crate::domain::capture::entities::{BarcodeScanOutcome, ExtractedProduct, ImagePayload};
use crate::domain::common::entities::CoreError;

/// Gateway to the server-side vision endpoints.
#[cfg_attr(test, mockall::automock)]
pub trait VisionGateway: Send + Sync {
    /// `POST /analyze-image`: OCR + product extraction from up to two
    /// package photos.
    fn extract_product(
        &self,
        images: Vec<ImagePayload>,
    ) -> impl Future<Output = Result<ExtractedProduct, CoreError>> + Send;

    /// `POST /scan-barcode-image`: server-side barcode recognition on a
    /// single still frame.
    fn scan_barcode_image(
        &self,
        image: ImagePayload,
    ) -> impl Future<Output = Result<BarcodeScanOutcome, CoreError>> + Send;
}

/// The camera, abstracted. The device is the one exclusive resource in the
/// client: acquire on demand, release deterministically on every path.
/// Acquisition failure maps to `CoreError::Permission` and must degrade to
/// manual input, never crash the flow.
#[cfg_attr(test, mockall::automock)]
pub trait FrameSource: Send + Sync {
    fn acquire(&self) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// Captures a single still frame. Only valid between `acquire` and
    /// `release`.
    fn capture(&self) -> impl Future<Output = Result<ImagePayload, CoreError>> + Send;

    fn release(&self);
}
