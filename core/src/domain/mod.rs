pub mod analysis;
pub mod capture;
pub mod common;
pub mod history;
pub mod ingredient;
pub mod routine;
pub mod search;
pub mod session;
pub mod skin;
pub mod storage;
