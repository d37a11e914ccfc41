//! Error types for docshot

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using DocshotError
pub type Result<T> = std::result::Result<T, DocshotError>;

/// Main error type for docshot operations
#[derive(Debug, Error)]
pub enum DocshotError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A document path that cannot be turned into a screenshot name
    #[error("Cannot derive a screenshot name from {0}")]
    InvalidDocumentPath(PathBuf),

    /// A discovered file that does not live under the scanned root
    #[error("{path} is not inside {root}")]
    OutsideRoot { path: PathBuf, root: PathBuf },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory traversal errors
    #[error("Failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing required setting, named by its environment variable
    #[error("{0} environment variable is required")]
    MissingField(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// Screenshots directory does not exist
    #[error("Screenshots directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// Screenshots path exists but is not a directory
    #[error("Screenshots path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

impl ConfigError {
    /// Create an invalid value error
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}
