//! Docshot Capture - render a markdown document in a hosted preview tool
//! and save a full-page screenshot of the result.
//!
//! The capture workflow in [`CaptureSession`] talks to the browser only
//! through the [`PreviewPage`] trait. [`ChromiumPage`] implements it on top
//! of a headless Chromium driven over the DevTools protocol.
//!
//! ```ignore
//! use docshot_capture::{BrowserSettings, CaptureSession, ChromiumPage};
//! use docshot_core::CaptureConfig;
//!
//! let config = CaptureConfig::new("docs/index.md")?;
//! let page = ChromiumPage::launch(&BrowserSettings::default()).await?;
//! let outcome = CaptureSession::new(page).run(&config).await;
//! ```

pub mod chromium;
pub mod error;
pub mod locator;
pub mod session;
pub mod traits;

pub use chromium::{BrowserSettings, ChromiumPage};
pub use error::{CaptureError, Result};
pub use locator::Locator;
pub use session::{CaptureOutcome, CaptureSession, CaptureTimings};
pub use traits::PreviewPage;
