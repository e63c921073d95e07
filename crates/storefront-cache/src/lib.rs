//! # storefront-cache
//!
//! In-process query cache for catalog reads, built on
//! [moka](https://crates.io/crates/moka).
//!
//! Entries live for a fixed time-to-live. Concurrent callers asking for the
//! same key while a fetch is in flight share that fetch's result. Admin
//! mutations drop affected entries through explicit invalidation calls.

pub mod keys;
pub mod manager;
pub mod query;

pub use manager::CatalogCache;
pub use query::QueryCache;
