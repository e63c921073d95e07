//! Query parameters shared by product listing endpoints.

use serde::{Deserialize, Serialize};

use storefront_core::config::CatalogConfig;
use storefront_core::error::AppError;
use storefront_core::types::{PageRequest, PriceRange};

/// Query parameters for product listings and search.
///
/// Numeric values arrive as strings so malformed input surfaces as a
/// validation error with the offending parameter named.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingParams {
    /// Search term (search endpoint only).
    pub q: Option<String>,
    /// Lowest price in minor units, inclusive.
    pub min_price: Option<String>,
    /// Highest price in minor units, inclusive.
    pub max_price: Option<String>,
    /// Page number (1-based, default: 1).
    pub page: Option<String>,
    /// Items per page.
    pub per_page: Option<String>,
}

impl ListingParams {
    /// Validated price bounds.
    pub fn price_range(&self) -> Result<PriceRange, AppError> {
        PriceRange::parse(self.min_price.as_deref(), self.max_price.as_deref())
    }

    /// Page request clamped to the catalog limits.
    pub fn page_request(&self, catalog: &CatalogConfig) -> Result<PageRequest, AppError> {
        let page = parse_positive("page", self.page.as_deref())?.unwrap_or(1);
        let per_page = parse_positive("per_page", self.per_page.as_deref())?
            .unwrap_or(catalog.default_page_size)
            .min(catalog.max_page_size);

        let request = PageRequest::new(page, per_page);
        if request.checked_offset().is_none() {
            return Err(AppError::validation(format!(
                "page {page} is out of range for per_page {}",
                request.page_size
            )));
        }
        Ok(request)
    }

    /// The search term, if any.
    pub fn search_term(&self) -> Option<&str> {
        self.q.as_deref()
    }
}

fn parse_positive(name: &str, raw: Option<&str>) -> Result<Option<u64>, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => match value.parse::<u64>() {
            Ok(n) if n >= 1 => Ok(Some(n)),
            _ => Err(AppError::validation(format!(
                "{name} must be a positive integer, got '{value}'"
            ))),
        },
    }
}
