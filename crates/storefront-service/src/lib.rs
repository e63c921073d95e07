//! # storefront-service
//!
//! Catalog business logic. Services orchestrate the category and product
//! stores, the query cache, and image storage.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod category;
pub mod product;

pub use category::{CategoryIndex, CategoryInput, CategoryService, CategoryView};
pub use product::{
    ImageService, ImageUpload, ProductDetail, ProductInput, ProductQueryService, ProductService,
    SearchService,
};
