//! Admin-only handlers. Routed behind the admin token guard.

pub mod categories;
pub mod images;
pub mod products;
