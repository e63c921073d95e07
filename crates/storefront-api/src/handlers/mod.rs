//! HTTP request handlers, grouped by domain.

pub mod admin;
pub mod category;
pub mod health;
pub mod product;
