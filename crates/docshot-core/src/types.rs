//! Core types for docshot

use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::error::{DocshotError, Result};

/// Extension given to every captured screenshot
pub const SCREENSHOT_EXTENSION: &str = "png";

/// File name of a screenshot, derived from the document it previews
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScreenshotName(String);

impl ScreenshotName {
    /// Derive the screenshot name from a document path.
    ///
    /// The document's extension is stripped and `.png` appended, so
    /// `docs/resources/widget.md` becomes `widget.png`.
    pub fn from_document(document: &Path) -> Result<Self> {
        let stem = document
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| DocshotError::InvalidDocumentPath(document.to_path_buf()))?;

        Ok(Self(format!("{}.{}", stem, SCREENSHOT_EXTENSION)))
    }

    /// The file name, including the extension
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ScreenshotName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where uploaded screenshots land
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTarget {
    /// Storage bucket name
    pub bucket: String,

    /// Key prefix inside the bucket
    pub prefix: String,

    /// Repository identifier (e.g. `owner/repo`)
    pub repository: String,

    /// CI run identifier
    pub run_id: String,
}

impl UploadTarget {
    /// Build the storage key for a path relative to the screenshots root.
    ///
    /// The relative path must already use `/` separators.
    pub fn key_for(&self, relative_path: &str) -> StorageKey {
        StorageKey(format!(
            "{}/{}/{}/{}",
            self.prefix, self.repository, self.run_id, relative_path
        ))
    }
}

/// Full object key inside the bucket
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey(String);

impl StorageKey {
    /// The key as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Public virtual-hosted style URL of this key.
    ///
    /// Only resolves when the bucket grants public read access.
    pub fn public_url(&self, bucket: &str, region: &str) -> String {
        format!("https://{}.s3.{}.amazonaws.com/{}", bucket, region, self.0)
    }
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// How access URLs are produced for uploaded objects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlMode {
    /// Time-limited signed GET URL
    Signed {
        /// Validity window
        expires_in: Duration,
    },
    /// Fixed public URL
    Public,
}

impl UrlMode {
    /// Adjective used in the summary line
    pub fn label(&self) -> &'static str {
        match self {
            Self::Signed { .. } => "presigned",
            Self::Public => "public",
        }
    }
}

/// URL handed out for one uploaded screenshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessUrl {
    /// Object key the URL points at
    pub key: StorageKey,

    /// The URL itself
    pub url: String,

    /// When the URL stops working, for signed URLs
    pub expires_at: Option<DateTime<Utc>>,
}

impl AccessUrl {
    /// A public URL that never expires
    pub fn public(key: StorageKey, url: impl Into<String>) -> Self {
        Self {
            key,
            url: url.into(),
            expires_at: None,
        }
    }

    /// A signed URL valid for `expires_in` from now
    pub fn signed(key: StorageKey, url: impl Into<String>, expires_in: Duration) -> Self {
        let expires_at = chrono::Duration::from_std(expires_in)
            .ok()
            .map(|d| Utc::now() + d);

        Self {
            key,
            url: url.into(),
            expires_at,
        }
    }
}
