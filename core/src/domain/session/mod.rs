pub mod entities;
pub mod ports;
pub mod services;

pub use entities::{Identity, Theme, UserProfile};
pub use ports::AccountGateway;
pub use services::SessionService;
