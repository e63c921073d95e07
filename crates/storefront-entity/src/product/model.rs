//! Product entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use storefront_core::types::{CategoryId, ProductId};

use super::image::ProductImage;

/// A product listed in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unique URL-safe key.
    pub slug: String,
    /// Long-form description.
    pub description: String,
    /// Price in minor currency units. Never negative.
    pub price: i64,
    /// Units in stock. Never negative.
    pub inventory: i32,
    /// Whether the product appears in the featured strip.
    pub featured: bool,
    /// The single category this product belongs to.
    pub category_id: CategoryId,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Whether at least one unit is available.
    pub fn in_stock(&self) -> bool {
        self.inventory > 0
    }
}

/// A product together with its ordered image collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductWithImages {
    /// The product row.
    #[serde(flatten)]
    pub product: Product,
    /// Images ordered by position.
    pub images: Vec<ProductImage>,
}

/// Data required to create a new product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProduct {
    /// Display name.
    pub name: String,
    /// URL slug.
    pub slug: String,
    /// Description.
    pub description: String,
    /// Price in minor units.
    pub price: i64,
    /// Units in stock.
    pub inventory: i32,
    /// Featured flag.
    pub featured: bool,
    /// Owning category.
    pub category_id: CategoryId,
}

/// Full replacement of a product's editable fields.
pub type UpdateProduct = CreateProduct;
