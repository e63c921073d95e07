//! Cache key builders for catalog queries.
//!
//! Every product key starts with [`products_prefix`] so admin mutations can
//! drop all product listings at once.

use storefront_entity::product::ProductQuery;

/// Prefix applied to all storefront cache keys.
const PREFIX: &str = "storefront";

// ── Category keys ──────────────────────────────────────────

/// Cache key for the flat list of every category.
pub fn categories_all() -> String {
    format!("{PREFIX}:categories:all")
}

// ── Product keys ───────────────────────────────────────────

/// Prefix shared by every product cache key.
pub fn products_prefix() -> String {
    format!("{PREFIX}:products:")
}

/// Cache key for a product listing query.
///
/// Category ids are sorted so equivalent scopes share an entry.
pub fn product_listing(query: &ProductQuery) -> String {
    let categories = match &query.category_ids {
        None => "*".to_string(),
        Some(ids) => {
            let mut ids: Vec<i64> = ids.iter().map(|id| id.get()).collect();
            ids.sort_unstable();
            ids.dedup();
            ids.iter()
                .map(i64::to_string)
                .collect::<Vec<_>>()
                .join(",")
        }
    };
    let bound = |b: Option<i64>| b.map_or_else(|| "-".to_string(), |v| v.to_string());

    format!(
        "{PREFIX}:products:list:c={categories}:min={}:max={}:q={}:f={}:l={}:o={}",
        bound(query.price.min),
        bound(query.price.max),
        query.search_term().unwrap_or_default().to_lowercase(),
        u8::from(query.featured_only),
        query.limit.map_or_else(|| "-".to_string(), |l| l.to_string()),
        query.offset,
    )
}

/// Cache key for the featured product strip.
pub fn featured_products(limit: u64) -> String {
    format!("{PREFIX}:products:featured:{limit}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::types::{CategoryId, PriceRange};

    #[test]
    fn test_listing_key_ignores_id_order() {
        let price = PriceRange::new(Some(1000), None).unwrap();
        let a = ProductQuery::for_categories(vec![CategoryId::new(2), CategoryId::new(1)], price);
        let b = ProductQuery::for_categories(vec![CategoryId::new(1), CategoryId::new(2)], price);
        assert_eq!(product_listing(&a), product_listing(&b));
        assert!(product_listing(&a).starts_with(&products_prefix()));
    }

    #[test]
    fn test_listing_key_distinguishes_pages() {
        let first = ProductQuery::default().paged(24, 0);
        let second = ProductQuery::default().paged(24, 24);
        assert_ne!(product_listing(&first), product_listing(&second));
    }

    #[test]
    fn test_featured_key_is_product_scoped() {
        assert!(featured_products(8).starts_with(&products_prefix()));
        assert_eq!(categories_all(), "storefront:categories:all");
    }
}
