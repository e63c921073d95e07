//! # storefront-database
//!
//! PostgreSQL connection management, migrations, and the catalog store
//! contracts ([`CategoryStore`], [`ProductStore`]) with PostgreSQL and
//! in-memory implementations.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::{
    CategoryRepository, CategoryStore, MemoryCategoryStore, MemoryProductStore, ProductRepository,
    ProductStore,
};
