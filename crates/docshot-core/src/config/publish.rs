//! Publisher configuration

use std::path::PathBuf;
use std::time::Duration;

use tracing::debug;

use crate::error::ConfigError;
use crate::types::{UploadTarget, UrlMode};

use super::defaults::{
    env, DEFAULT_EXPIRES_IN_SECS, DEFAULT_REGION, DEFAULT_SCREENSHOTS_DIR, MAX_EXPIRES_IN_SECS,
};

/// Raw publisher settings as read from flags and the environment
#[derive(Debug, Clone, Default)]
pub struct PublishSettings {
    /// `BUCKET`
    pub bucket: Option<String>,

    /// `PREFIX`
    pub prefix: Option<String>,

    /// `GITHUB_REPOSITORY`
    pub repository: Option<String>,

    /// `GITHUB_RUN_ID`
    pub run_id: Option<String>,

    /// `EXPIRES_IN`, in seconds
    pub expires_in: Option<String>,

    /// `SCREENSHOTS_DIR`
    pub screenshots_dir: Option<PathBuf>,

    /// `USE_PUBLIC_URL`; only the exact string `true` enables public mode
    pub use_public_url: Option<String>,

    /// `AWS_REGION`
    pub region: Option<String>,

    /// `AWS_DEFAULT_REGION`
    pub default_region: Option<String>,
}

/// Validated, immutable publisher configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishConfig {
    /// Bucket and key namespace
    pub target: UploadTarget,

    /// Signed or public URLs
    pub url_mode: UrlMode,

    /// Directory scanned for screenshots
    pub screenshots_dir: PathBuf,

    /// Storage region
    pub region: String,
}

impl PublishConfig {
    /// Fail unless the screenshots directory exists and is a directory
    pub fn ensure_screenshots_dir(&self) -> Result<(), ConfigError> {
        if self.screenshots_dir.is_dir() {
            Ok(())
        } else if self.screenshots_dir.exists() {
            Err(ConfigError::NotADirectory(self.screenshots_dir.clone()))
        } else {
            Err(ConfigError::DirectoryNotFound(self.screenshots_dir.clone()))
        }
    }
}

impl TryFrom<PublishSettings> for PublishConfig {
    type Error = ConfigError;

    /// Required values are checked first, in a fixed order, and the first
    /// missing one is reported.
    fn try_from(settings: PublishSettings) -> Result<Self, Self::Error> {
        debug!("validating publish configuration");

        let bucket = require(settings.bucket, env::BUCKET)?;
        let prefix = require(settings.prefix, env::PREFIX)?;
        let repository = require(settings.repository, env::REPOSITORY)?;
        let run_id = require(settings.run_id, env::RUN_ID)?;

        let url_mode = if settings.use_public_url.as_deref() == Some("true") {
            UrlMode::Public
        } else {
            UrlMode::Signed {
                expires_in: parse_expires_in(settings.expires_in.as_deref())?,
            }
        };

        let screenshots_dir = settings
            .screenshots_dir
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SCREENSHOTS_DIR));

        let region = non_empty(settings.region)
            .or_else(|| non_empty(settings.default_region))
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        Ok(Self {
            target: UploadTarget {
                bucket,
                prefix,
                repository,
                run_id,
            },
            url_mode,
            screenshots_dir,
            region,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn require(value: Option<String>, name: &str) -> Result<String, ConfigError> {
    non_empty(value).ok_or_else(|| ConfigError::MissingField(name.to_string()))
}

fn parse_expires_in(raw: Option<&str>) -> Result<Duration, ConfigError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(Duration::from_secs(DEFAULT_EXPIRES_IN_SECS));
    };

    let secs: u64 = raw.parse().map_err(|_| {
        ConfigError::invalid(env::EXPIRES_IN, format!("'{}' is not a number of seconds", raw))
    })?;

    if secs == 0 || secs > MAX_EXPIRES_IN_SECS {
        return Err(ConfigError::invalid(
            env::EXPIRES_IN,
            format!("must be between 1 and {} seconds", MAX_EXPIRES_IN_SECS),
        ));
    }

    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> PublishSettings {
        PublishSettings {
            bucket: Some("previews".to_string()),
            prefix: Some("docs".to_string()),
            repository: Some("acme/widgets".to_string()),
            run_id: Some("77".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = PublishConfig::try_from(complete()).unwrap();

        assert_eq!(config.target.bucket, "previews");
        assert_eq!(config.screenshots_dir, PathBuf::from("screenshots"));
        assert_eq!(config.region, "us-east-1");
        assert_eq!(
            config.url_mode,
            UrlMode::Signed {
                expires_in: Duration::from_secs(3600)
            }
        );
    }

    #[test]
    fn test_missing_fields_reported_in_order() {
        let err = PublishConfig::try_from(PublishSettings::default()).unwrap_err();
        assert_eq!(err.to_string(), "BUCKET environment variable is required");

        let mut settings = complete();
        settings.prefix = None;
        settings.run_id = None;
        let err = PublishConfig::try_from(settings).unwrap_err();
        assert_eq!(err.to_string(), "PREFIX environment variable is required");

        let mut settings = complete();
        settings.repository = Some(String::new());
        let err = PublishConfig::try_from(settings).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(ref f) if f == "GITHUB_REPOSITORY"));

        let mut settings = complete();
        settings.run_id = None;
        let err = PublishConfig::try_from(settings).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(ref f) if f == "GITHUB_RUN_ID"));
    }

    #[test]
    fn test_public_mode_requires_exact_true() {
        let mut settings = complete();
        settings.use_public_url = Some("true".to_string());
        assert_eq!(PublishConfig::try_from(settings).unwrap().url_mode, UrlMode::Public);

        let mut settings = complete();
        settings.use_public_url = Some("TRUE".to_string());
        assert!(matches!(
            PublishConfig::try_from(settings).unwrap().url_mode,
            UrlMode::Signed { .. }
        ));
    }

    #[test]
    fn test_expires_in() {
        let mut settings = complete();
        settings.expires_in = Some("900".to_string());
        assert_eq!(
            PublishConfig::try_from(settings).unwrap().url_mode,
            UrlMode::Signed {
                expires_in: Duration::from_secs(900)
            }
        );

        let mut settings = complete();
        settings.expires_in = Some("soon".to_string());
        assert!(matches!(
            PublishConfig::try_from(settings).unwrap_err(),
            ConfigError::InvalidValue { .. }
        ));

        let mut settings = complete();
        settings.expires_in = Some("604801".to_string());
        assert!(PublishConfig::try_from(settings).is_err());
    }

    #[test]
    fn test_expires_in_ignored_for_public_urls() {
        let mut settings = complete();
        settings.use_public_url = Some("true".to_string());
        settings.expires_in = Some("soon".to_string());
        assert!(PublishConfig::try_from(settings).is_ok());
    }

    #[test]
    fn test_region_fallback_chain() {
        let mut settings = complete();
        settings.default_region = Some("ap-northeast-1".to_string());
        assert_eq!(
            PublishConfig::try_from(settings.clone()).unwrap().region,
            "ap-northeast-1"
        );

        settings.region = Some("eu-central-1".to_string());
        assert_eq!(
            PublishConfig::try_from(settings).unwrap().region,
            "eu-central-1"
        );
    }

    #[test]
    fn test_ensure_screenshots_dir() {
        let temp = tempfile::TempDir::new().unwrap();

        let mut settings = complete();
        settings.screenshots_dir = Some(temp.path().to_path_buf());
        assert!(PublishConfig::try_from(settings).unwrap().ensure_screenshots_dir().is_ok());

        let mut settings = complete();
        settings.screenshots_dir = Some(temp.path().join("missing"));
        let err = PublishConfig::try_from(settings)
            .unwrap()
            .ensure_screenshots_dir()
            .unwrap_err();
        assert!(err.to_string().starts_with("Screenshots directory not found: "));
    }

    #[test]
    fn test_screenshots_dir_must_be_a_directory() {
        let temp = tempfile::TempDir::new().unwrap();
        let file = temp.path().join("shot.png");
        std::fs::write(&file, b"\x89PNG").unwrap();

        let mut settings = complete();
        settings.screenshots_dir = Some(file.clone());
        let err = PublishConfig::try_from(settings)
            .unwrap()
            .ensure_screenshots_dir()
            .unwrap_err();

        assert!(matches!(err, ConfigError::NotADirectory(ref p) if *p == file));
        assert!(err.to_string().starts_with("Screenshots path is not a directory: "));
    }
}
