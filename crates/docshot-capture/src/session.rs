//! Preview capture workflow

use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use docshot_core::CaptureConfig;

use crate::error::{CaptureError, Result};
use crate::locator::Locator;
use crate::traits::PreviewPage;

/// Text input the document is pasted into
const TEXT_INPUT: &str = "textarea";

/// Containers that appear once the preview has rendered
const RENDERED_CONTENT: &str = ".g-type-display-1, h1, .markdown-body";

/// Icon button closing the privacy overlay
const CLOSE_BUTTON: &str = r#"button[aria-label="Close"]"#;

/// Labels of the overlay's "accept all" button
const ACCEPT_ALL_LABELS: [&str; 2] = ["Accept All", "すべて承認"];

/// Bounded waits used while driving the preview page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureTimings {
    /// How long each overlay button is waited for
    pub overlay_timeout: Duration,

    /// Pause after the overlay step
    pub overlay_settle: Duration,

    /// How long the rendered content is waited for
    pub render_timeout: Duration,

    /// Pause after the rendered content appeared
    pub render_settle: Duration,

    /// Fixed wait used when the rendered content never showed up
    pub render_fallback: Duration,
}

impl Default for CaptureTimings {
    fn default() -> Self {
        Self {
            overlay_timeout: Duration::from_millis(3000),
            overlay_settle: Duration::from_millis(500),
            render_timeout: Duration::from_millis(5000),
            render_settle: Duration::from_millis(1000),
            render_fallback: Duration::from_millis(3000),
        }
    }
}

/// Result of one capture run
#[derive(Debug, Clone)]
pub struct CaptureOutcome {
    /// Document that was previewed
    pub document: PathBuf,

    /// Written screenshot, if the run succeeded
    pub screenshot: Option<PathBuf>,

    /// Error message if the run failed
    pub error: Option<String>,
}

impl CaptureOutcome {
    /// Create a successful outcome
    pub fn success(document: PathBuf, screenshot: PathBuf) -> Self {
        Self {
            document,
            screenshot: Some(screenshot),
            error: None,
        }
    }

    /// Create a failed outcome
    pub fn failure(document: PathBuf, error: impl Into<String>) -> Self {
        Self {
            document,
            screenshot: None,
            error: Some(error.into()),
        }
    }

    /// Whether the screenshot was written
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Drives one preview page through the capture steps
pub struct CaptureSession<P: PreviewPage> {
    page: P,
    timings: CaptureTimings,
}

impl<P: PreviewPage> CaptureSession<P> {
    /// Create a session over an already launched page
    pub fn new(page: P) -> Self {
        Self {
            page,
            timings: CaptureTimings::default(),
        }
    }

    /// Override the wait timings
    pub fn with_timings(mut self, timings: CaptureTimings) -> Self {
        self.timings = timings;
        self
    }

    /// Capture the document described by `config`.
    ///
    /// Never returns an error: failures are reported in the outcome. The page
    /// is closed on every path.
    pub async fn run(mut self, config: &CaptureConfig) -> CaptureOutcome {
        info!(document = %config.document.display(), "capturing preview");

        let result = self.capture(config).await;

        if let Err(e) = self.page.close().await {
            warn!(error = %e, "failed to close browser session");
        }

        match result {
            Ok(path) => {
                info!(screenshot = %path.display(), "preview captured");
                CaptureOutcome::success(config.document.clone(), path)
            }
            Err(e) => {
                error!(document = %config.document.display(), error = %e, "capture failed");
                CaptureOutcome::failure(config.document.clone(), e.to_string())
            }
        }
    }

    async fn capture(&mut self, config: &CaptureConfig) -> Result<PathBuf> {
        let markdown = tokio::fs::read_to_string(&config.document)
            .await
            .map_err(|source| CaptureError::Document {
                path: config.document.clone(),
                source,
            })?;
        debug!(bytes = markdown.len(), "document loaded");

        self.page.goto(config.preview_url.as_str()).await?;

        self.dismiss_overlay().await;

        self.page.fill(&Locator::css(TEXT_INPUT), &markdown).await?;

        self.wait_for_render().await;

        let output = config.screenshot_path()?;
        tokio::fs::create_dir_all(&config.output_dir).await?;
        self.page.screenshot(&output).await?;

        Ok(output)
    }

    /// Close the privacy overlay if one shows up.
    ///
    /// The close icon is tried first, then the accept button; each gets its
    /// own bounded wait. Nothing here fails the capture.
    async fn dismiss_overlay(&mut self) {
        let candidates = [
            Locator::css(CLOSE_BUTTON),
            Locator::button_text(ACCEPT_ALL_LABELS),
        ];

        let mut dismissed = false;
        for locator in &candidates {
            match self.page.wait_for(locator, self.timings.overlay_timeout).await {
                Ok(true) => {
                    match self.page.click(locator).await {
                        Ok(()) => debug!(%locator, "dismissed privacy overlay"),
                        Err(e) => warn!(%locator, error = %e, "failed to dismiss privacy overlay"),
                    }
                    dismissed = true;
                    break;
                }
                Ok(false) => {}
                Err(e) => debug!(%locator, error = %e, "overlay lookup failed"),
            }
        }

        if !dismissed {
            info!("privacy overlay not found or already closed");
        }

        tokio::time::sleep(self.timings.overlay_settle).await;
    }

    async fn wait_for_render(&mut self) {
        let content = Locator::css(RENDERED_CONTENT);

        match self.page.wait_for(&content, self.timings.render_timeout).await {
            Ok(true) => tokio::time::sleep(self.timings.render_settle).await,
            Ok(false) | Err(_) => {
                info!("using fallback wait time");
                tokio::time::sleep(self.timings.render_fallback).await;
            }
        }
    }
}
