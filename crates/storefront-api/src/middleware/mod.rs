//! Axum middleware stack.

pub mod admin;
pub mod compression;
pub mod cors;
pub mod logging;
