//! # storefront-core
//!
//! Core crate for the storefront. Contains configuration schemas, typed
//! identifiers, pagination and price-filter types, the object storage trait,
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other storefront crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
