//! Category hierarchy logic and category administration.

pub mod service;
pub mod tree;

pub use service::{CategoryInput, CategoryService, CategoryView};
pub use tree::CategoryIndex;
