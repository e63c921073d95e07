//! Product listing, search, administration, and image handling.

pub mod image;
pub mod query;
pub mod search;
pub mod service;

pub use image::{ImageService, ImageUpload};
pub use query::ProductQueryService;
pub use search::SearchService;
pub use service::{ProductDetail, ProductInput, ProductService};
