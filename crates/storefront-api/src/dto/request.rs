//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use storefront_core::types::CategoryId;
use storefront_service::{CategoryInput, ProductInput};

/// Create or replace a category.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CategoryRequest {
    /// Display name.
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,
    /// URL slug; derived from the name when omitted on create.
    #[validate(length(min = 1, max = 200, message = "Slug must be 1-200 characters"))]
    pub slug: Option<String>,
    /// Parent category, or null for a root.
    pub parent_id: Option<CategoryId>,
}

impl From<CategoryRequest> for CategoryInput {
    fn from(req: CategoryRequest) -> Self {
        Self {
            name: req.name,
            slug: req.slug,
            parent_id: req.parent_id,
        }
    }
}

/// Create or replace a product.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProductRequest {
    /// Display name.
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,
    /// URL slug; derived from the name when omitted on create.
    #[validate(length(min = 1, max = 200, message = "Slug must be 1-200 characters"))]
    pub slug: Option<String>,
    /// Long-form description.
    #[serde(default)]
    #[validate(length(max = 10000, message = "Description is too long"))]
    pub description: String,
    /// Price in minor units.
    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub price: i64,
    /// Units in stock.
    #[serde(default)]
    #[validate(range(min = 0, message = "Inventory cannot be negative"))]
    pub inventory: i32,
    /// Featured flag.
    #[serde(default)]
    pub featured: bool,
    /// Owning category.
    pub category_id: CategoryId,
}

impl From<ProductRequest> for ProductInput {
    fn from(req: ProductRequest) -> Self {
        Self {
            name: req.name,
            slug: req.slug,
            description: req.description,
            price: req.price,
            inventory: req.inventory,
            featured: req.featured,
            category_id: req.category_id,
        }
    }
}
