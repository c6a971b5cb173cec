pub mod entities;
pub mod ports;
pub mod services;

pub use entities::IngredientExplanation;
pub use services::ExplanationService;
