pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::{AnalysisRequest, AnalysisResult, InputMode, ProductStatus};
pub use ports::AnalysisGateway;
pub use services::AnalysisWorkflow;
pub use value_objects::AnalysisForm;
