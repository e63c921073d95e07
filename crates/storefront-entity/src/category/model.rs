//! Category entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use storefront_core::types::CategoryId;

/// A catalog category. Categories form a forest through `parent_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Category {
    /// Unique category identifier.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Unique URL-safe key.
    pub slug: String,
    /// Parent category (null for root categories).
    pub parent_id: Option<CategoryId>,
    /// When the category was created.
    pub created_at: DateTime<Utc>,
    /// When the category was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Check if this is a root category (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Data required to create a new category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCategory {
    /// Display name.
    pub name: String,
    /// URL slug.
    pub slug: String,
    /// Parent category (None for root).
    pub parent_id: Option<CategoryId>,
}

/// Full replacement of a category's editable fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCategory {
    /// Display name.
    pub name: String,
    /// URL slug.
    pub slug: String,
    /// Parent category (None for root).
    pub parent_id: Option<CategoryId>,
}
