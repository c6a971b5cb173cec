pub mod entities;
pub mod ports;
pub mod services;

pub use entities::ProductSuggestion;
pub use ports::ProductIndexGateway;
pub use services::Autocomplete;
