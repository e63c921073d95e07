//! Product listing query.

use serde::{Deserialize, Serialize};

use storefront_core::types::{CategoryId, PriceRange};

/// Filter for product listings.
///
/// Results are ordered newest first. `category_ids: Some(vec![])` matches
/// nothing; `None` matches every category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductQuery {
    /// Restrict to products whose category is in this set.
    pub category_ids: Option<Vec<CategoryId>>,
    /// Inclusive price bounds.
    pub price: PriceRange,
    /// Case-insensitive substring matched against name and description.
    pub search: Option<String>,
    /// Only featured products.
    pub featured_only: bool,
    /// Maximum number of rows to return.
    pub limit: Option<u64>,
    /// Number of rows to skip.
    pub offset: u64,
}

impl ProductQuery {
    /// Query scoped to a set of categories.
    pub fn for_categories(ids: Vec<CategoryId>, price: PriceRange) -> Self {
        Self {
            category_ids: Some(ids),
            price,
            ..Self::default()
        }
    }

    /// Apply limit/offset.
    pub fn paged(mut self, limit: u64, offset: u64) -> Self {
        self.limit = Some(limit);
        self.offset = offset;
        self
    }

    /// Whether the query can match nothing regardless of stored data.
    pub fn is_trivially_empty(&self) -> bool {
        matches!(&self.category_ids, Some(ids) if ids.is_empty()) || self.limit == Some(0)
    }

    /// The trimmed search term, if any.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
