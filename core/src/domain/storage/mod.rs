pub mod entities;
pub mod ports;

pub use entities::Envelope;
pub use ports::KeyValueStore;
