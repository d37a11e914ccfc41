//! Upload screenshots and collect their access URLs

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use docshot_core::{relative_key_path, AccessUrl, PublishConfig, UrlMode};

use crate::error::Result;
use crate::traits::ObjectStore;

/// Content type stored with every screenshot
pub const PNG_CONTENT_TYPE: &str = "image/png";

/// Per-file progress reported while publishing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishEvent {
    /// Object stored under its relative path
    Uploaded { relative_path: String },

    /// Upload or URL generation failed; publishing continues
    Failed { path: PathBuf, error: String },
}

/// A file that could not be published
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishFailure {
    /// Local path of the screenshot
    pub path: PathBuf,

    /// Error message
    pub error: String,
}

/// Result of a publish run
#[derive(Debug, Clone)]
pub struct PublishReport {
    /// How the URLs were produced
    pub mode: UrlMode,

    /// URLs of successfully published files, in processing order
    pub urls: Vec<AccessUrl>,

    /// Files that failed
    pub failures: Vec<PublishFailure>,
}

impl PublishReport {
    fn new(mode: UrlMode) -> Self {
        Self {
            mode,
            urls: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// True when every file was published
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Bare URL strings
    pub fn url_strings(&self) -> Vec<&str> {
        self.urls.iter().map(|u| u.url.as_str()).collect()
    }

    /// The URLs as a single-line JSON array of strings
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.url_strings())?)
    }
}

/// Uploads screenshots to a store
pub struct Publisher<S: ObjectStore> {
    store: S,
    config: PublishConfig,
}

impl<S: ObjectStore> Publisher<S> {
    /// Create a publisher
    pub fn new(store: S, config: PublishConfig) -> Self {
        Self { store, config }
    }

    /// Upload `files` one at a time, in order.
    ///
    /// A failing file is reported through `on_event` and recorded in the
    /// report; the remaining files are still processed.
    pub async fn publish(
        &self,
        files: &[PathBuf],
        mut on_event: impl FnMut(&PublishEvent),
    ) -> PublishReport {
        let mut report = PublishReport::new(self.config.url_mode);

        info!(
            store = self.store.name(),
            bucket = self.store.bucket(),
            count = files.len(),
            mode = self.config.url_mode.label(),
            "publishing screenshots"
        );

        for file in files {
            match self.publish_one(file, &mut on_event).await {
                Ok(url) => report.urls.push(url),
                Err(e) => {
                    let error = e.to_string();
                    warn!(path = %file.display(), error = %error, "publish failed");
                    on_event(&PublishEvent::Failed {
                        path: file.clone(),
                        error: error.clone(),
                    });
                    report.failures.push(PublishFailure {
                        path: file.clone(),
                        error,
                    });
                }
            }
        }

        report
    }

    async fn publish_one(
        &self,
        file: &Path,
        on_event: &mut impl FnMut(&PublishEvent),
    ) -> Result<AccessUrl> {
        let relative_path = relative_key_path(&self.config.screenshots_dir, file)?;
        let key = self.config.target.key_for(&relative_path);

        let body = tokio::fs::read(file).await?;
        self.store.put_object(&key, body, PNG_CONTENT_TYPE).await?;
        on_event(&PublishEvent::Uploaded { relative_path });

        match self.config.url_mode {
            UrlMode::Public => {
                let url = key.public_url(self.store.bucket(), &self.config.region);
                Ok(AccessUrl::public(key, url))
            }
            UrlMode::Signed { expires_in } => {
                let url = self.store.presign_get(&key, expires_in).await?;
                let access = AccessUrl::signed(key, url, expires_in);
                if let Some(expires_at) = access.expires_at {
                    debug!(key = %access.key, %expires_at, "signed url generated");
                }
                Ok(access)
            }
        }
    }
}
