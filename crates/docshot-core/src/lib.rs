//! Docshot Core - shared building blocks for documentation screenshots
//!
//! This crate provides the error types, configuration values, naming rules
//! and directory discovery used by both the preview capture and the
//! screenshot publisher.

pub mod config;
pub mod discovery;
pub mod error;
pub mod types;

pub use config::{CaptureConfig, PublishConfig, PublishSettings};
pub use discovery::{find_images, relative_key_path};
pub use error::{ConfigError, DocshotError, Result};
pub use types::{AccessUrl, ScreenshotName, StorageKey, UploadTarget, UrlMode};
