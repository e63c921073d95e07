//! Product image entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use storefront_core::types::{ProductId, ProductImageId};

/// An image owned by a product. Deleted together with its product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ProductImage {
    /// Unique image identifier.
    pub id: ProductImageId,
    /// Owning product.
    pub product_id: ProductId,
    /// Public URL of the stored object.
    pub url: String,
    /// Object key within the image store.
    pub storage_key: String,
    /// Display order (0-based).
    pub position: i32,
    /// When the image was attached.
    pub created_at: DateTime<Utc>,
}

/// Data required to attach an image to a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProductImage {
    /// Owning product.
    pub product_id: ProductId,
    /// Public URL.
    pub url: String,
    /// Object key.
    pub storage_key: String,
    /// Display order.
    pub position: i32,
}
