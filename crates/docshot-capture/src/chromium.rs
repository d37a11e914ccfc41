//! Headless Chromium preview page
//!
//! Implements [`PreviewPage`] over the Chrome DevTools protocol. Element
//! lookups run as small scripts in the page so that CSS and text based
//! locators share one code path.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::emulation::SetLocaleOverrideParams;
use chromiumoxide::cdp::browser_protocol::network::{Headers, SetExtraHttpHeadersParams};
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::handler::viewport::Viewport;
use chromiumoxide::page::{Page, ScreenshotParams};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::error::{CaptureError, Result};
use crate::locator::Locator;
use crate::traits::PreviewPage;

/// Executables probed on `PATH` when none is configured
const CHROME_CANDIDATES: [&str; 4] = [
    "chromium",
    "chromium-browser",
    "google-chrome",
    "google-chrome-stable",
];

/// Interval between element visibility probes
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Browser session settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserSettings {
    /// Viewport width in CSS pixels
    pub width: u32,

    /// Viewport height in CSS pixels
    pub height: u32,

    /// Locale reported to pages
    pub locale: String,

    /// `Accept-Language` header sent with every request
    pub accept_language: String,

    /// Soft timeout for each protocol request
    pub request_timeout: Duration,

    /// Browser binary; detected when unset
    pub executable: Option<PathBuf>,

    /// Keep the Chromium sandbox enabled
    pub sandbox: bool,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            locale: "en-US".to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
            request_timeout: Duration::from_secs(60),
            executable: None,
            sandbox: true,
        }
    }
}

impl BrowserSettings {
    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the browser executable
    pub fn with_executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.executable = Some(path.into());
        self
    }

    /// Enable or disable the sandbox
    pub fn with_sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }

    /// The configured executable, or the first known browser on `PATH`
    pub fn resolve_executable(&self) -> Option<PathBuf> {
        self.executable.clone().or_else(|| {
            CHROME_CANDIDATES
                .iter()
                .find_map(|name| which::which(name).ok())
        })
    }

    fn browser_config(&self) -> Result<BrowserConfig> {
        let mut builder = BrowserConfig::builder()
            .window_size(self.width, self.height)
            .viewport(Viewport {
                width: self.width,
                height: self.height,
                device_scale_factor: None,
                emulating_mobile: false,
                is_landscape: false,
                has_touch: false,
            })
            .request_timeout(self.request_timeout)
            .arg(format!("--lang={}", self.locale));

        if let Some(executable) = self.resolve_executable() {
            debug!(executable = %executable.display(), "using browser executable");
            builder = builder.chrome_executable(executable);
        }

        if !self.sandbox {
            builder = builder.no_sandbox();
        }

        builder.build().map_err(CaptureError::Launch)
    }
}

/// A page in a dedicated headless Chromium process
pub struct ChromiumPage {
    browser: Browser,
    page: Page,
    handler: Option<JoinHandle<()>>,
}

impl ChromiumPage {
    /// Launch the browser and open a blank page with the locale and headers
    /// applied.
    pub async fn launch(settings: &BrowserSettings) -> Result<Self> {
        let config = settings.browser_config()?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| CaptureError::Launch(e.to_string()))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!(error = %e, "devtools handler error");
                }
            }
        });

        let page = browser.new_page("about:blank").await?;

        page.execute(
            SetLocaleOverrideParams::builder()
                .locale(settings.locale.clone())
                .build(),
        )
        .await?;

        page.execute(SetExtraHttpHeadersParams::new(Headers::new(
            serde_json::json!({ "Accept-Language": settings.accept_language }),
        )))
        .await?;

        info!(
            width = settings.width,
            height = settings.height,
            locale = %settings.locale,
            "browser launched"
        );

        Ok(Self {
            browser,
            page,
            handler: Some(handler),
        })
    }

    async fn eval_bool(&self, script: String) -> Result<bool> {
        Ok(self.page.evaluate(script).await?.into_value::<bool>()?)
    }
}

#[async_trait]
impl PreviewPage for ChromiumPage {
    async fn goto(&mut self, url: &str) -> Result<()> {
        debug!(url, "navigating");
        self.page
            .goto(url)
            .await
            .map_err(|e| CaptureError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    async fn wait_for(&mut self, locator: &Locator, timeout: Duration) -> Result<bool> {
        let script = visibility_script(locator)?;
        let page = &*self;
        let visible = poll_until(timeout, move || page.eval_bool(script.clone())).await;

        if !visible {
            debug!(%locator, ?timeout, "element not visible before deadline");
        }
        Ok(visible)
    }

    async fn click(&mut self, locator: &Locator) -> Result<()> {
        if self.eval_bool(click_script(locator)?).await? {
            Ok(())
        } else {
            Err(CaptureError::ElementNotFound(locator.to_string()))
        }
    }

    async fn fill(&mut self, locator: &Locator, text: &str) -> Result<()> {
        if self.eval_bool(fill_script(locator, text)?).await? {
            Ok(())
        } else {
            Err(CaptureError::ElementNotFound(locator.to_string()))
        }
    }

    async fn screenshot(&mut self, path: &Path) -> Result<()> {
        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .full_page(true)
            .build();

        self.page
            .save_screenshot(params, path)
            .await
            .map_err(|e| CaptureError::Screenshot {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        debug!(path = %path.display(), "screenshot written");
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        let Some(handler) = self.handler.take() else {
            return Ok(());
        };

        let closed = async {
            self.browser.close().await?;
            self.browser.wait().await?;
            Ok::<_, CaptureError>(())
        }
        .await;

        join_handler(handler, closed.is_ok()).await;
        closed?;

        debug!("browser closed");
        Ok(())
    }
}

/// Run `probe` until it reports `true` or `timeout` elapses.
///
/// Each probe is cut off at the deadline, so a stalled protocol request
/// cannot stretch the wait. Probe errors count as "not yet".
async fn poll_until<F, Fut>(timeout: Duration, mut probe: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    let deadline = Instant::now() + timeout;

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match tokio::time::timeout(remaining, probe()).await {
            Ok(Ok(true)) => return true,
            Ok(Ok(false)) => {}
            // The document may be mid-navigation; keep polling.
            Ok(Err(e)) => debug!(error = %e, "visibility probe failed"),
            Err(_) => return false,
        }

        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return false;
        }
        tokio::time::sleep(POLL_INTERVAL.min(remaining)).await;
    }
}

/// Wait for the devtools handler task to finish.
///
/// The stream only ends once the connection drops, so the task is aborted
/// when the browser did not shut down cleanly.
async fn join_handler(handler: JoinHandle<()>, browser_closed: bool) {
    if !browser_closed {
        handler.abort();
    }

    match handler.await {
        Err(e) if !e.is_cancelled() => {
            debug!(error = %e, "devtools handler task ended abnormally");
        }
        _ => {}
    }
}

/// Script expression resolving the locator to an element or `null`
fn element_expression(locator: &Locator) -> Result<String> {
    Ok(match locator {
        Locator::Css(selector) => {
            format!("document.querySelector({})", serde_json::to_string(selector)?)
        }
        Locator::ButtonText(labels) => {
            let labels: Vec<String> = labels.iter().map(|l| l.to_lowercase()).collect();
            format!(
                "Array.from(document.querySelectorAll('button')).find((b) => {{ \
                 const text = (b.innerText || b.textContent || '').toLowerCase(); \
                 return {}.some((label) => text.includes(label)); }}) || null",
                serde_json::to_string(&labels)?
            )
        }
    })
}

fn visibility_script(locator: &Locator) -> Result<String> {
    Ok(format!(
        "(() => {{ \
         const el = {}; \
         if (!el) return false; \
         const rect = el.getBoundingClientRect(); \
         const style = window.getComputedStyle(el); \
         return rect.width > 0 && rect.height > 0 && style.visibility !== 'hidden' && style.display !== 'none'; \
         }})()",
        element_expression(locator)?
    ))
}

fn click_script(locator: &Locator) -> Result<String> {
    Ok(format!(
        "(() => {{ \
         const el = {}; \
         if (!el) return false; \
         el.scrollIntoView({{ block: 'center' }}); \
         el.click(); \
         return true; \
         }})()",
        element_expression(locator)?
    ))
}

/// Sets the value through the native setter so framework-controlled inputs
/// observe the change, then fires `input` and `change`.
fn fill_script(locator: &Locator, text: &str) -> Result<String> {
    Ok(format!(
        "(() => {{ \
         const el = {}; \
         if (!el) return false; \
         el.focus(); \
         const proto = el instanceof HTMLTextAreaElement ? HTMLTextAreaElement.prototype : HTMLInputElement.prototype; \
         const setter = Object.getOwnPropertyDescriptor(proto, 'value').set; \
         setter.call(el, {}); \
         el.dispatchEvent(new Event('input', {{ bubbles: true }})); \
         el.dispatchEvent(new Event('change', {{ bubbles: true }})); \
         return true; \
         }})()",
        element_expression(locator)?,
        serde_json::to_string(text)?
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = BrowserSettings::default();
        assert_eq!((settings.width, settings.height), (1280, 720));
        assert_eq!(settings.locale, "en-US");
        assert_eq!(settings.accept_language, "en-US,en;q=0.9");
        assert_eq!(settings.request_timeout, Duration::from_secs(60));
        assert!(settings.sandbox);
    }

    #[test]
    fn test_explicit_executable_wins() {
        let settings = BrowserSettings::default().with_executable("/opt/chrome/chrome");
        assert_eq!(
            settings.resolve_executable(),
            Some(PathBuf::from("/opt/chrome/chrome"))
        );
    }

    #[test]
    fn test_css_selector_is_quoted() {
        let expr = element_expression(&Locator::css(r#"button[aria-label="Close"]"#)).unwrap();
        assert_eq!(
            expr,
            r#"document.querySelector("button[aria-label=\"Close\"]")"#
        );
    }

    #[test]
    fn test_button_labels_are_lowercased() {
        let locator = Locator::button_text(["Accept All", "すべて承認"]);
        let expr = element_expression(&locator).unwrap();
        assert!(expr.contains(r#"["accept all","すべて承認"]"#));
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_until_cuts_off_stalled_probe() {
        let start = Instant::now();

        let visible = poll_until(Duration::from_secs(3), || async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(true)
        })
        .await;

        assert!(!visible);
        assert!(start.elapsed() >= Duration::from_secs(3));
        assert!(start.elapsed() < Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_until_retries_until_visible() {
        let mut calls = 0;

        let visible = poll_until(Duration::from_secs(5), || {
            calls += 1;
            let attempt = calls;
            async move {
                if attempt == 1 {
                    Err(CaptureError::ElementNotFound("textarea".to_string()))
                } else {
                    Ok(attempt >= 3)
                }
            }
        })
        .await;

        assert!(visible);
        assert_eq!(calls, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_until_gives_up_at_deadline() {
        let start = Instant::now();

        let visible = poll_until(Duration::from_millis(250), || async { Ok(false) }).await;

        assert!(!visible);
        assert!(start.elapsed() >= Duration::from_millis(250));
        assert!(start.elapsed() < Duration::from_millis(400));
    }

    #[tokio::test]
    async fn test_handler_aborted_when_browser_close_fails() {
        let handler = tokio::spawn(std::future::pending::<()>());

        let joined =
            tokio::time::timeout(Duration::from_secs(5), join_handler(handler, false)).await;

        assert!(joined.is_ok());
    }

    #[test]
    fn test_fill_script_escapes_document() {
        let markdown = "# Title\n\n`code` with \"quotes\" and </script>";
        let script = fill_script(&Locator::css("textarea"), markdown).unwrap();
        assert!(script.contains(&serde_json::to_string(markdown).unwrap()));
        assert!(!script.contains('\n'));
    }
}
