//! # storefront-api
//!
//! HTTP API layer for the storefront catalog built on Axum.
//!
//! Provides the public browsing endpoints, the token-guarded admin
//! endpoints, middleware (CORS, compression, tracing, request logging),
//! extractors, DTOs, and error mapping.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
