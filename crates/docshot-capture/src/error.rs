//! Error types for preview capture

use std::path::PathBuf;

use thiserror::Error;

/// Result type for capture operations
pub type Result<T> = std::result::Result<T, CaptureError>;

/// Preview capture errors
#[derive(Debug, Error)]
pub enum CaptureError {
    /// Browser could not be configured or started
    #[error("Failed to launch browser: {0}")]
    Launch(String),

    /// DevTools protocol failure
    #[error("Browser error: {0}")]
    Browser(#[from] chromiumoxide::error::CdpError),

    /// Document could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Document {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Navigation to the preview tool failed
    #[error("Failed to load {url}: {message}")]
    Navigation { url: String, message: String },

    /// Element required by the workflow is missing
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Screenshot could not be captured or written
    #[error("Failed to save screenshot to {}: {message}", path.display())]
    Screenshot { path: PathBuf, message: String },

    /// Naming or configuration error from the core crate
    #[error(transparent)]
    Core(#[from] docshot_core::DocshotError),

    /// JSON encoding of script arguments or results
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
