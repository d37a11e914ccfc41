//! Preview capture configuration

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::{ConfigError, Result};
use crate::types::ScreenshotName;

use super::defaults::{DEFAULT_BROWSER_TIMEOUT_SECS, DEFAULT_PREVIEW_URL, DEFAULT_SCREENSHOTS_DIR};

/// Configuration for one capture run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureConfig {
    /// Markdown document to preview
    pub document: PathBuf,

    /// Directory the screenshot is written to
    pub output_dir: PathBuf,

    /// Preview tool page
    pub preview_url: Url,

    /// Soft timeout for each browser operation
    pub timeout: Duration,
}

impl CaptureConfig {
    /// Create a config for `document` with default settings
    pub fn new(document: impl Into<PathBuf>) -> Result<Self> {
        let preview_url = Url::parse(DEFAULT_PREVIEW_URL)
            .map_err(|e| ConfigError::invalid("preview_url", e.to_string()))?;

        Ok(Self {
            document: document.into(),
            output_dir: PathBuf::from(DEFAULT_SCREENSHOTS_DIR),
            preview_url,
            timeout: Duration::from_secs(DEFAULT_BROWSER_TIMEOUT_SECS),
        })
    }

    /// Set output directory
    pub fn with_output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = path.into();
        self
    }

    /// Set the preview tool URL; must be an absolute http(s) URL
    pub fn with_preview_url(mut self, raw: &str) -> Result<Self> {
        let url = Url::parse(raw).map_err(|e| ConfigError::invalid("preview_url", e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::invalid(
                "preview_url",
                format!("unsupported scheme '{}'", url.scheme()),
            )
            .into());
        }

        self.preview_url = url;
        Ok(self)
    }

    /// Set the browser operation timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Where the screenshot for this document is written
    pub fn screenshot_path(&self) -> Result<PathBuf> {
        let name = ScreenshotName::from_document(&self.document)?;
        Ok(self.output_dir.join(name.as_str()))
    }
}
