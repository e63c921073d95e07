//! Product domain entities.

pub mod image;
pub mod model;
pub mod query;

pub use image::{NewProductImage, ProductImage};
pub use model::{CreateProduct, Product, ProductWithImages, UpdateProduct};
pub use query::ProductQuery;
