pub mod entities;
pub mod services;

pub use entities::{FavoriteStatus, ScanHistoryItem};
pub use services::HistoryService;
