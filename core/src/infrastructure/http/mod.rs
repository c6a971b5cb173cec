mod client;
mod dto;

pub use client::HttpBackendClient;
