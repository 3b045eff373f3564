pub mod asset;
pub mod client;
pub mod config;
