//! Catalog browsing limits.

use serde::{Deserialize, Serialize};

/// Limits applied to public catalog listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Page size used when the request does not specify one.
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
    /// Upper bound for a requested page size.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
    /// Number of products shown in the featured strip.
    #[serde(default = "default_featured_limit")]
    pub featured_limit: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            featured_limit: default_featured_limit(),
        }
    }
}

fn default_page_size() -> u64 {
    24
}

fn default_max_page_size() -> u64 {
    100
}

fn default_featured_limit() -> u64 {
    8
}
