use thiserror::Error;

pub type AssetResult<T> = Result<T, AssetError>;

/// Failures reported across the asset boundary. Store-specific error types
/// never leak past [`crate::core::asset::AssetStore`].
#[derive(Error, Debug)]
pub enum AssetError {
    /// The bucket could not be checked or created. Fatal at startup.
    #[error("Object store unavailable for bucket {bucket}: {reason}")]
    StoreUnavailable { bucket: String, reason: String },

    /// The object at `key` is in an undefined state; retrying with the same bytes is safe.
    #[error("Failed to write object {key}: {reason}")]
    WriteFailed { key: String, reason: String },

    #[error("Failed to read object {key}: {reason}")]
    ReadFailed { key: String, reason: String },

    #[error("No asset found for {0}")]
    NotFound(String),

    #[error("Unsupported image extension: {0}")]
    UnsupportedExtension(String),

    #[error("Invalid asset store configuration: {0}")]
    InvalidConfig(String),
}

impl AssetError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
