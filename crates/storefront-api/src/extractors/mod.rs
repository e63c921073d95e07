//! Custom Axum extractors.

pub mod listing;

pub use listing::ListingParams;
