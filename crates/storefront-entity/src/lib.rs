//! # storefront-entity
//!
//! Catalog entity models. Every struct in this crate represents a database
//! table row or a domain value object. Database entities additionally derive
//! `sqlx::FromRow`.

pub mod category;
pub mod product;

pub use category::{Category, CategoryNode, CategoryTree, CreateCategory, UpdateCategory};
pub use product::{
    CreateProduct, NewProductImage, Product, ProductImage, ProductQuery, ProductWithImages,
    UpdateProduct,
};
