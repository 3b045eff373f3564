use thiserror::Error;

#[derive(Error, Debug)]
pub enum ObjectStoreError {
    #[error("Object not found: {bucket}/{key}")]
    NotFound { bucket: String, key: String },

    /// Network, authentication or server-side failure reported by the store
    #[error("Object store request failed: {0}")]
    Transport(String),

    #[error("Failed to stream object body: {0}")]
    Stream(String),

    #[error("Declared size {declared} does not match streamed length {actual}")]
    SizeMismatch { declared: u64, actual: u64 },
}

impl ObjectStoreError {
    pub fn not_found(bucket: &str, key: &str) -> Self {
        Self::NotFound { bucket: bucket.to_string(), key: key.to_string() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
