#![doc = include_str!("../README.md")]

pub mod application;
pub mod domain;
pub mod infrastructure;

// --- Main type re-exports ---
// Core types of each module, usable straight from the crate root.

// Errors
pub use domain::common::entities::CoreError;

// Configuration
pub use domain::common::{BackendConfig, BehaviorConfig, ScanwiseConfig, StorageConfig};

// Workflow controller
pub use domain::analysis::{
    entities::{AnalysisRequest, AnalysisResult, InputMode, ProductStatus},
    services::AnalysisWorkflow,
};

// Session
pub use domain::session::{entities::Identity, services::SessionService};

// Service aggregate
pub use application::ScanwiseService;
