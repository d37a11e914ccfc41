//! Browser page abstraction

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;
use crate::locator::Locator;

/// A single browser page the capture workflow drives.
///
/// Implementations own their browser session; [`PreviewPage::close`] must
/// release it and be safe to call more than once.
#[async_trait]
pub trait PreviewPage: Send {
    /// Navigate to `url` and wait for the load to finish
    async fn goto(&mut self, url: &str) -> Result<()>;

    /// Wait until the element is visible.
    ///
    /// Returns `Ok(false)` when the timeout elapses first.
    async fn wait_for(&mut self, locator: &Locator, timeout: Duration) -> Result<bool>;

    /// Click the element
    async fn click(&mut self, locator: &Locator) -> Result<()>;

    /// Replace the value of a text input in one operation
    async fn fill(&mut self, locator: &Locator, text: &str) -> Result<()>;

    /// Write a full-page PNG screenshot to `path`
    async fn screenshot(&mut self, path: &Path) -> Result<()>;

    /// Release the browser session
    async fn close(&mut self) -> Result<()>;
}
