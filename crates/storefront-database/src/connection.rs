//! Catalog database pool.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{info, warn};

use storefront_core::config::DatabaseConfig;
use storefront_core::error::{AppError, ErrorKind};
use storefront_core::result::AppResult;

use crate::migration::run_migrations;

/// Shared PostgreSQL pool backing the catalog stores.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Connect without touching the schema.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let endpoint = endpoint_of(&config.url);
        info!(
            endpoint = %endpoint,
            max_connections = config.max_connections,
            "Connecting to catalog database"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect(&config.url)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Upstream,
                    format!("Catalog database at {endpoint} is unreachable"),
                    e,
                )
            })?;

        Ok(Self { pool })
    }

    /// Connect for serving, applying migrations when `migrate_on_startup` is set.
    pub async fn open(config: &DatabaseConfig) -> AppResult<Self> {
        let db = Self::connect(config).await?;
        if config.migrate_on_startup {
            if let Err(e) = run_migrations(&db.pool).await {
                db.close().await;
                return Err(e);
            }
        } else {
            warn!("Schema migrations skipped; run `storefront-cli migrate run` before serving");
        }
        Ok(db)
    }

    /// The underlying sqlx pool, for the repositories.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Whether the database answers and the catalog schema is in place.
    pub async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT to_regclass('public.categories') IS NOT NULL")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Upstream, "Catalog database check failed", e)
            })
    }

    /// Drain and close every connection.
    pub async fn close(&self) {
        let open = self.pool.size();
        self.pool.close().await;
        info!(connections = open, "Catalog database pool closed");
    }
}

/// `host[:port]/database` of a connection URL, without credentials or query.
fn endpoint_of(url: &str) -> &str {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    let rest = rest.rsplit_once('@').map_or(rest, |(_, host)| host);
    rest.split_once('?').map_or(rest, |(path, _)| path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_hides_credentials() {
        assert_eq!(
            endpoint_of("postgres://shop:s3cr@t@db.internal:5432/storefront"),
            "db.internal:5432/storefront"
        );
        assert_eq!(
            endpoint_of("postgres://localhost/storefront?sslmode=disable"),
            "localhost/storefront"
        );
    }

    #[test]
    fn test_migrations_enabled_by_default() {
        assert!(DatabaseConfig::default().migrate_on_startup);
    }
}
