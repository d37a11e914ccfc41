//! Store error types

use thiserror::Error;

/// Store-related errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Upload rejected or not completed
    #[error("Upload of {key} failed: {message}")]
    UploadFailed { key: String, message: String },

    /// Signed URL could not be generated
    #[error("Failed to presign {key}: {message}")]
    PresignFailed { key: String, message: String },

    /// Path or key derivation error
    #[error(transparent)]
    Core(#[from] docshot_core::DocshotError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;
