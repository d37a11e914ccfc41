//! Default configuration values

/// Hosted documentation preview tool
pub const DEFAULT_PREVIEW_URL: &str = "https://registry.terraform.io/tools/doc-preview";

/// Directory screenshots are written to and published from
pub const DEFAULT_SCREENSHOTS_DIR: &str = "screenshots";

/// Signed URL validity, in seconds
pub const DEFAULT_EXPIRES_IN_SECS: u64 = 3600;

/// Longest validity a SigV4 presigned URL accepts (7 days)
pub const MAX_EXPIRES_IN_SECS: u64 = 604_800;

/// Region used when neither `AWS_REGION` nor `AWS_DEFAULT_REGION` is set
pub const DEFAULT_REGION: &str = "us-east-1";

/// Soft timeout applied to every browser operation, in seconds
pub const DEFAULT_BROWSER_TIMEOUT_SECS: u64 = 60;

/// Environment variable names read by the publisher
pub mod env {
    pub const BUCKET: &str = "BUCKET";
    pub const PREFIX: &str = "PREFIX";
    pub const REPOSITORY: &str = "GITHUB_REPOSITORY";
    pub const RUN_ID: &str = "GITHUB_RUN_ID";
    pub const EXPIRES_IN: &str = "EXPIRES_IN";
    pub const SCREENSHOTS_DIR: &str = "SCREENSHOTS_DIR";
    pub const USE_PUBLIC_URL: &str = "USE_PUBLIC_URL";
    pub const REGION: &str = "AWS_REGION";
    pub const DEFAULT_REGION: &str = "AWS_DEFAULT_REGION";
}
