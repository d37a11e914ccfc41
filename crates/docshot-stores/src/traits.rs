//! Store adapter traits

use std::time::Duration;

use docshot_core::StorageKey;

use crate::error::Result;

/// An object store bound to a single bucket
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// Get the store name
    fn name(&self) -> &str;

    /// Bucket objects are written to
    fn bucket(&self) -> &str;

    /// Write `body` under `key`
    async fn put_object(&self, key: &StorageKey, body: Vec<u8>, content_type: &str) -> Result<()>;

    /// Generate a URL granting read access to `key` for `expires_in`
    async fn presign_get(&self, key: &StorageKey, expires_in: Duration) -> Result<String>;
}
