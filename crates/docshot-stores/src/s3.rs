//! Amazon S3 store

use std::time::Duration;

use aws_sdk_s3::config::{BehaviorVersion, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use tracing::{debug, info};

use docshot_core::{PublishConfig, StorageKey};

use crate::error::{Result, StoreError};
use crate::traits::ObjectStore;

/// S3 bucket client
pub struct S3Store {
    client: Client,
    bucket: String,
}

impl S3Store {
    /// Create a store from an existing client
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Create a store for the configured bucket and region.
    ///
    /// Credentials come from the standard AWS provider chain (environment,
    /// profile, web identity, instance metadata).
    pub async fn from_config(config: &PublishConfig) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .load()
            .await;

        info!(bucket = %config.target.bucket, region = %config.region, "s3 client ready");
        Self::new(Client::new(&sdk_config), config.target.bucket.clone())
    }
}

#[async_trait::async_trait]
impl ObjectStore for S3Store {
    fn name(&self) -> &str {
        "Amazon S3"
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn put_object(&self, key: &StorageKey, body: Vec<u8>, content_type: &str) -> Result<()> {
        debug!(key = %key, size = body.len(), "putting object");

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key.as_str())
            .body(ByteStream::from(body))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| StoreError::UploadFailed {
                key: key.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        Ok(())
    }

    async fn presign_get(&self, key: &StorageKey, expires_in: Duration) -> Result<String> {
        let presigning = PresigningConfig::expires_in(expires_in).map_err(|e| {
            StoreError::PresignFailed {
                key: key.to_string(),
                message: e.to_string(),
            }
        })?;

        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key.as_str())
            .presigned(presigning)
            .await
            .map_err(|e| StoreError::PresignFailed {
                key: key.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        Ok(request.uri().to_string())
    }
}
