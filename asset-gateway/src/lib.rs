pub mod cli;
pub mod core;
pub mod error;
pub mod service;
pub mod setup;
pub mod types;
pub mod utils;

#[cfg(test)]
pub mod tests;

// Re-export commonly used item
pub use error::{GatewayError, GatewayResult};
