use std::sync::Arc;

use crate::domain::analysis::services::AnalysisWorkflow;
use crate::domain::capture::ports::FrameSource;
use crate::domain::capture::services::{BarcodeCapture, OcrUploader};
use crate::domain::common::ScanwiseConfig;
use crate::domain::common::entities::CoreError;
use crate::domain::history::services::HistoryService;
use crate::domain::ingredient::services::ExplanationService;
use crate::domain::routine::services::RoutineBuilder;
use crate::domain::search::services::Autocomplete;
use crate::domain::session::services::SessionService;
use crate::domain::skin::services::SkinAnalysisService;
use crate::infrastructure::http::HttpBackendClient;
use crate::infrastructure::storage::{JsonFileStore, MemoryStore};

const LOCAL_STORE_FILE: &str = "scanwise.json";

/// Wires the HTTP backend adapter and the two stores into the domain
/// services. One instance per app lifetime; the controllers it hands out
/// are per-screen and cheap to recreate.
pub struct ScanwiseService {
    config: ScanwiseConfig,
    backend: Arc<HttpBackendClient>,
    local: Arc<JsonFileStore>,
    session_cache: Arc<MemoryStore>,
    pub session: SessionService<HttpBackendClient, JsonFileStore>,
}

impl ScanwiseService {
    pub fn new(config: ScanwiseConfig) -> Result<Self, CoreError> {
        let backend = Arc::new(HttpBackendClient::new(&config.backend));
        let local = Arc::new(JsonFileStore::open(
            config.storage.data_dir.join(LOCAL_STORE_FILE),
        )?);
        let session = SessionService::new(backend.clone(), local.clone());

        Ok(Self {
            config,
            backend,
            local,
            session_cache: Arc::new(MemoryStore::new()),
            session,
        })
    }

    pub fn config(&self) -> &ScanwiseConfig {
        &self.config
    }

    pub fn autocomplete(&self) -> Autocomplete<HttpBackendClient> {
        Autocomplete::new(
            self.backend.clone(),
            self.config.behavior.autocomplete_debounce,
            self.config.behavior.autocomplete_min_length,
        )
    }

    pub fn workflow(&self) -> AnalysisWorkflow<HttpBackendClient, HttpBackendClient> {
        AnalysisWorkflow::new(
            self.backend.clone(),
            self.backend.clone(),
            self.config.behavior.alternatives_threshold,
            self.config.behavior.profile_fill_policy,
        )
    }

    pub fn uploader(&self) -> OcrUploader<HttpBackendClient> {
        OcrUploader::new(
            self.backend.clone(),
            self.config.behavior.max_image_dimension,
        )
    }

    pub fn barcode_capture<F: FrameSource>(
        &self,
        camera: Arc<F>,
    ) -> BarcodeCapture<F, HttpBackendClient> {
        BarcodeCapture::new(
            camera,
            self.backend.clone(),
            self.config.behavior.barcode_cooldown,
        )
    }

    pub fn routine(&self) -> RoutineBuilder<HttpBackendClient, HttpBackendClient, JsonFileStore> {
        RoutineBuilder::new(self.backend.clone(), self.backend.clone(), self.local.clone())
    }

    pub fn explainer(&self) -> ExplanationService<HttpBackendClient, MemoryStore> {
        ExplanationService::new(self.backend.clone(), self.session_cache.clone())
    }

    pub fn skin(&self) -> SkinAnalysisService<HttpBackendClient> {
        SkinAnalysisService::new(self.backend.clone())
    }

    pub fn history(&self) -> HistoryService<HttpBackendClient> {
        HistoryService::new(self.backend.clone())
    }
}
