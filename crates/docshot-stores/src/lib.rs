//! Object storage adapters for docshot
//!
//! Uploads captured screenshots and hands out links to them.
//!
//! ## Supported Stores
//!
//! - **S3**: Amazon S3 and S3-compatible endpoints, with presigned or
//!   public URLs
//!
//! ## Usage
//!
//! ```ignore
//! use docshot_core::{find_images, PublishConfig};
//! use docshot_stores::{Publisher, S3Store};
//!
//! let store = S3Store::from_config(&config).await;
//! let files = find_images(&config.screenshots_dir)?;
//! let report = Publisher::new(store, config).publish(&files, |_| {}).await;
//! println!("{}", report.to_json()?);
//! ```

pub mod error;
pub mod publish;
pub mod s3;
pub mod traits;

pub use error::StoreError;
pub use publish::{PublishEvent, PublishFailure, PublishReport, Publisher, PNG_CONTENT_TYPE};
pub use s3::S3Store;
pub use traits::ObjectStore;
