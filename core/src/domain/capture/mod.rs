pub mod entities;
pub mod helpers;
pub mod ports;
pub mod services;

pub use entities::{BarcodeScanOutcome, ExtractedProduct, ImagePayload};
pub use ports::{FrameSource, VisionGateway};
pub use services::{BarcodeCapture, BarcodeDebouncer, OcrUploader};
