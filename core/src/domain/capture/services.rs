use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;

use tokio::time::Instant;
use tracing::{instrument, warn};

use crate::domain::capture::entities::{BarcodeScanOutcome, ExtractedProduct, ImagePayload};
use crate::domain::capture::helpers::downscale;
use crate::domain::capture::ports::{FrameSource, VisionGateway};
use crate::domain::common::entities::CoreError;

/// Suppresses repeat recognitions of the same barcode within a cooldown
/// window, so retried captures of one package do not re-trigger downstream
/// lookups.
pub struct BarcodeDebouncer {
    cooldown: Duration,
    last: Option<(String, Instant)>,
}

impl BarcodeDebouncer {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last: None,
        }
    }

    /// Returns `false` when `code` matched the previous code inside the
    /// cooldown window. A different code always passes and resets the
    /// window.
    pub fn accept(&mut self, code: &str) -> bool {
        let now = Instant::now();
        if let Some((last_code, at)) = &self.last
            && last_code == code
            && now.duration_since(*at) < self.cooldown
        {
            return false;
        }
        self.last = Some((code.to_string(), now));
        true
    }
}

/// Manual-capture barcode flow: freeze one frame from the camera and hand
/// it to the server for combined barcode + product recognition.
pub struct BarcodeCapture<F, V> {
    source: Arc<F>,
    vision: Arc<V>,
    debouncer: BarcodeDebouncer,
}

impl<F, V> BarcodeCapture<F, V>
where
    F: FrameSource,
    V: VisionGateway,
{
    pub fn new(source: Arc<F>, vision: Arc<V>, cooldown: Duration) -> Self {
        Self {
            source,
            vision,
            debouncer: BarcodeDebouncer::new(cooldown),
        }
    }

    /// Acquires the camera, captures one frame, releases the camera, and
    /// sends the frame for recognition. The device is released on every
    /// path before any network I/O starts.
    ///
    /// `Ok(None)` means the backend recognized a barcode the debouncer had
    /// already seen within the cooldown window.
    #[instrument(skip(self))]
    pub async fn capture_and_scan(&mut self) -> Result<Option<BarcodeScanOutcome>, CoreError> {
        self.source.acquire().await?;
        let frame = self.source.capture().await;
        self.source.release();
        let frame = frame?;

        let outcome = self.vision.scan_barcode_image(frame).await?;

        if let Some(code) = &outcome.barcode
            && outcome.found
            && !self.debouncer.accept(code)
        {
            return Ok(None);
        }
        Ok(Some(outcome))
    }
}

/// Synthetic upload progress, 0–100. True upload progress is not observed,
/// so a ticker walks it toward a cap until the response resolves.
#[derive(Clone, Default)]
pub struct UploadProgress(Arc<AtomicU8>);

const PROGRESS_CAP: u8 = 90;
const PROGRESS_STEP: u8 = 10;
const PROGRESS_TICK: Duration = Duration::from_millis(200);

impl UploadProgress {
    pub fn percent(&self) -> u8 {
        self.0.load(Ordering::SeqCst)
    }

    fn reset(&self) {
        self.0.store(0, Ordering::SeqCst);
    }

    fn bump(&self) {
        let _ = self
            .0
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |p| {
                Some((p + PROGRESS_STEP).min(PROGRESS_CAP))
            });
    }

    fn complete(&self) {
        self.0.store(100, Ordering::SeqCst);
    }
}

/// OCR uploader: holds up to two package photos (front for the name, back
/// for the ingredient list), downscales them client-side, and submits them
/// for extraction. A failed upload keeps the captured images so the user
/// can simply retry.
pub struct OcrUploader<V> {
    vision: Arc<V>,
    max_dimension: u32,
    front: Option<ImagePayload>,
    back: Option<ImagePayload>,
    progress: UploadProgress,
}

impl<V: VisionGateway> OcrUploader<V> {
    pub fn new(vision: Arc<V>, max_dimension: u32) -> Self {
        Self {
            vision,
            max_dimension,
            front: None,
            back: None,
            progress: UploadProgress::default(),
        }
    }

    pub fn progress(&self) -> UploadProgress {
        self.progress.clone()
    }

    pub fn has_images(&self) -> bool {
        self.front.is_some() || self.back.is_some()
    }

    /// Attaches the front-of-package photo, downscaling it if its longest
    /// side exceeds the configured bound.
    pub fn attach_front(&mut self, image: ImagePayload) -> Result<(), CoreError> {
        self.front = Some(self.scaled(image)?);
        Ok(())
    }

    pub fn attach_back(&mut self, image: ImagePayload) -> Result<(), CoreError> {
        self.back = Some(self.scaled(image)?);
        Ok(())
    }

    fn scaled(&self, image: ImagePayload) -> Result<ImagePayload, CoreError> {
        let bytes = downscale(&image.bytes, self.max_dimension)?;
        Ok(if bytes == image.bytes {
            image
        } else {
            ImagePayload::jpeg(bytes, image.file_name)
        })
    }

    /// Submits the attached images as one multipart request. Progress ticks
    /// synthetically toward 90 and jumps to 100 when the response resolves.
    #[instrument(skip(self))]
    pub async fn upload(&mut self) -> Result<ExtractedProduct, CoreError> {
        let images: Vec<ImagePayload> =
            self.front.iter().chain(self.back.iter()).cloned().collect();
        if images.is_empty() {
            return Err(CoreError::Validation(
                "Please upload at least one image.".to_string(),
            ));
        }

        self.progress.reset();
        let ticker_progress = self.progress.clone();
        let ticker = tokio::spawn(async move {
            loop {
                tokio::time::sleep(PROGRESS_TICK).await;
                ticker_progress.bump();
            }
        });

        let outcome = self.vision.extract_product(images).await;
        ticker.abort();

        match outcome {
            Ok(extracted) => {
                self.progress.complete();
                // Captured images are cleared only on success; a retry
                // after failure reuses them.
                self.front = None;
                self.back = None;
                Ok(extracted)
            }
            Err(err) => {
                warn!("image extraction failed: {err}");
                self.progress.complete();
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::search::entities::BarcodeProduct;
    use std::io::Cursor;
    use std::sync::Mutex;
    use std::sync::atomic::AtomicUsize;

    fn png(width: u32, height: u32) -> ImagePayload {
        let img = image::DynamicImage::new_rgb8(width, height);
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        ImagePayload {
            bytes: out.into_inner(),
            mime_type: "image/png".to_string(),
            file_name: "shot.png".to_string(),
        }
    }

    struct FakeVision {
        extract_calls: AtomicUsize,
        fail_extract: bool,
        scanned: Mutex<Vec<usize>>,
        barcode: &'static str,
    }

    impl FakeVision {
        fn new() -> Self {
            Self {
                extract_calls: AtomicUsize::new(0),
                fail_extract: false,
                scanned: Mutex::new(Vec::new()),
                barcode: "012345",
            }
        }

        fn failing() -> Self {
            Self {
                fail_extract: true,
                ..Self::new()
            }
        }
    }

    impl VisionGateway for FakeVision {
        async fn extract_product(
            &self,
            images: Vec<ImagePayload>,
        ) -> Result<ExtractedProduct, CoreError> {
            self.extract_calls.fetch_add(1, Ordering::SeqCst);
            self.scanned.lock().unwrap().push(images.len());
            if self.fail_extract {
                return Err(CoreError::Connectivity("offline".into()));
            }
            Ok(ExtractedProduct {
                product_name: "Example Cream".into(),
                brand: "Acme".into(),
                category: "Moisturizer".into(),
                ingredients: vec!["Water".into(), "Glycerin".into()],
            })
        }

        async fn scan_barcode_image(
            &self,
            _image: ImagePayload,
        ) -> Result<BarcodeScanOutcome, CoreError> {
            Ok(BarcodeScanOutcome {
                found: true,
                barcode: Some(self.barcode.to_string()),
                product: Some(BarcodeProduct {
                    product_name: "Example Cream".into(),
                    ingredients_text: "Water, Glycerin".into(),
                    ..BarcodeProduct::default()
                }),
            })
        }
    }

    struct FakeCamera {
        denied: bool,
        released: AtomicUsize,
    }

    impl FrameSource for FakeCamera {
        async fn acquire(&self) -> Result<(), CoreError> {
            if self.denied {
                return Err(CoreError::Permission(
                    "Could not access camera. Please allow camera permissions.".into(),
                ));
            }
            Ok(())
        }

        async fn capture(&self) -> Result<ImagePayload, CoreError> {
            Ok(png(640, 480))
        }

        fn release(&self) {
            self.released.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn uploader_rejects_submission_without_images() {
        let mut uploader = OcrUploader::new(Arc::new(FakeVision::new()), 1024);
        let err = uploader.upload().await.unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[tokio::test]
    async fn uploader_downscales_and_sends_both_images() {
        let vision = Arc::new(FakeVision::new());
        let mut uploader = OcrUploader::new(vision.clone(), 1024);

        uploader.attach_front(png(2000, 1000)).unwrap();
        uploader.attach_back(png(640, 480)).unwrap();

        let front = image::load_from_memory(&uploader.front.as_ref().unwrap().bytes).unwrap();
        assert_eq!(image::GenericImageView::dimensions(&front), (1024, 512));

        let extracted = uploader.upload().await.unwrap();
        assert_eq!(extracted.ingredients_text(), "Water, Glycerin");
        assert_eq!(*vision.scanned.lock().unwrap(), vec![2]);
        assert_eq!(uploader.progress().percent(), 100);
        assert!(!uploader.has_images());
    }

    #[tokio::test]
    async fn failed_upload_keeps_captured_images_for_retry() {
        let vision = Arc::new(FakeVision::failing());
        let mut uploader = OcrUploader::new(vision.clone(), 1024);
        uploader.attach_front(png(640, 480)).unwrap();

        assert!(uploader.upload().await.is_err());
        assert!(uploader.has_images());

        // Retry reuses the same image without re-attaching.
        assert!(uploader.upload().await.is_err());
        assert_eq!(vision.extract_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn camera_is_released_even_when_denied_later_steps_never_run() {
        let camera = Arc::new(FakeCamera {
            denied: true,
            released: AtomicUsize::new(0),
        });
        let vision = Arc::new(FakeVision::new());
        let mut capture =
            BarcodeCapture::new(camera.clone(), vision, Duration::from_millis(2500));

        let err = capture.capture_and_scan().await.unwrap_err();
        assert!(matches!(err, CoreError::Permission(_)));
        // acquire failed, so there was nothing to release
        assert_eq!(camera.released.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn successful_capture_releases_the_camera_once() {
        let camera = Arc::new(FakeCamera {
            denied: false,
            released: AtomicUsize::new(0),
        });
        let vision = Arc::new(FakeVision::new());
        let mut capture =
            BarcodeCapture::new(camera.clone(), vision, Duration::from_millis(2500));

        let outcome = capture.capture_and_scan().await.unwrap().unwrap();
        assert_eq!(outcome.barcode.as_deref(), Some("012345"));
        assert_eq!(camera.released.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn repeat_scans_of_the_same_code_are_debounced() {
        let camera = Arc::new(FakeCamera {
            denied: false,
            released: AtomicUsize::new(0),
        });
        let vision = Arc::new(FakeVision::new());
        let mut capture =
            BarcodeCapture::new(camera, vision, Duration::from_millis(2500));

        assert!(capture.capture_and_scan().await.unwrap().is_some());
        assert!(capture.capture_and_scan().await.unwrap().is_none());

        tokio::time::advance(Duration::from_millis(2600)).await;
        assert!(capture.capture_and_scan().await.unwrap().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn debouncer_passes_a_different_code_immediately() {
        let mut debouncer = BarcodeDebouncer::new(Duration::from_millis(2500));
        assert!(debouncer.accept("111"));
        assert!(!debouncer.accept("111"));
        assert!(debouncer.accept("222"));
        assert!(debouncer.accept("111"));
    }
}
