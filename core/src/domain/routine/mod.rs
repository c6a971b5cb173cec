pub mod entities;
pub mod ports;
pub mod services;

pub use entities::{RoutineAnalysis, RoutineConflict, RoutineProduct};
pub use services::RoutineBuilder;
