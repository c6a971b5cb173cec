pub mod entities;
pub mod ports;
pub mod services;

pub use entities::{CategoryGuide, CategoryRecommendation, SkinReport, SuggestedProduct};
pub use services::SkinAnalysisService;
