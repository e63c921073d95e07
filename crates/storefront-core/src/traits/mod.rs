//! Core traits defined in `storefront-core` and implemented by other crates.

pub mod storage;

pub use storage::{ImageStore, StoredObject};
