//! Image object storage configuration.

use serde::{Deserialize, Serialize};

/// Top-level storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Which provider stores product images: `"local"` or `"s3"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Maximum accepted image upload size in bytes (default 5 MB).
    #[serde(default = "default_max_image_size")]
    pub max_image_size_bytes: u64,
    /// Image formats accepted on upload (lowercase extensions).
    #[serde(default = "default_allowed_formats")]
    pub allowed_image_formats: Vec<String>,
    /// Local filesystem storage configuration.
    #[serde(default)]
    pub local: LocalStorageConfig,
    /// S3-compatible storage configuration.
    #[serde(default)]
    pub s3: S3StorageConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            max_image_size_bytes: default_max_image_size(),
            allowed_image_formats: default_allowed_formats(),
            local: LocalStorageConfig::default(),
            s3: S3StorageConfig::default(),
        }
    }
}

/// Local filesystem storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalStorageConfig {
    /// Root path for stored images.
    #[serde(default = "default_local_root")]
    pub root_path: String,
    /// URL prefix under which the root path is served.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

impl Default for LocalStorageConfig {
    fn default() -> Self {
        Self {
            root_path: default_local_root(),
            public_base_url: default_public_base_url(),
        }
    }
}

/// S3-compatible object storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3StorageConfig {
    /// S3 endpoint URL (for non-AWS services like MinIO). Empty uses AWS.
    #[serde(default)]
    pub endpoint: String,
    /// AWS region.
    #[serde(default = "default_region")]
    pub region: String,
    /// S3 bucket name.
    #[serde(default)]
    pub bucket: String,
    /// Access key ID.
    #[serde(default)]
    pub access_key: String,
    /// Secret access key.
    #[serde(default)]
    pub secret_key: String,
    /// Public URL prefix for objects; defaults to `{endpoint}/{bucket}`.
    #[serde(default)]
    pub public_base_url: String,
}

impl Default for S3StorageConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            region: default_region(),
            bucket: String::new(),
            access_key: String::new(),
            secret_key: String::new(),
            public_base_url: String::new(),
        }
    }
}

fn default_provider() -> String {
    "local".to_string()
}

fn default_max_image_size() -> u64 {
    5_242_880 // 5 MB
}

fn default_allowed_formats() -> Vec<String> {
    ["jpeg", "png", "webp", "gif"]
        .iter()
        .map(|f| f.to_string())
        .collect()
}

fn default_local_root() -> String {
    "./data/images".to_string()
}

fn default_public_base_url() -> String {
    "/images".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}
