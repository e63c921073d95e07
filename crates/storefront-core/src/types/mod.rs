//! Core type definitions used across the storefront workspace.

pub mod id;
pub mod pagination;
pub mod price;
pub mod slug;

pub use id::*;
pub use pagination::{PageRequest, PageResponse};
pub use price::PriceRange;
pub use slug::{is_reserved_slug, is_valid_slug, slugify};
