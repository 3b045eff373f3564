use crate::core::asset::AssetError;
use thiserror::Error;

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Error types for the gateway binary
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Asset error: {0}")]
    AssetError(#[from] AssetError),

    /// Command line arguments could not be turned into a configuration
    #[error("Setup Command Error: {0}")]
    SetupCommandError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
