//! Storefront Server: product catalog with category-tree browsing.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use storefront_core::config::AppConfig;
use storefront_core::error::AppError;
use storefront_core::traits::storage::ImageStore;
use storefront_database::repositories::{CategoryStore, ProductStore};
use storefront_database::{CategoryRepository, DatabasePool, ProductRepository};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let base =
        std::env::var("STOREFRONT_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());
    let env = std::env::var("STOREFRONT_ENV").unwrap_or_else(|_| "development".to_string());

    AppConfig::load_from(&base, &env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting storefront v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db_pool = DatabasePool::open(&config.database).await?;

    // ── Step 2: Image storage ────────────────────────────────────
    tracing::info!(provider = %config.storage.provider, "Initializing image storage...");
    let image_store = storefront_storage::ImageStorage::from_config(&config.storage)
        .await?
        .store();
    if !image_store.health_check().await.unwrap_or(false) {
        tracing::warn!(
            provider = %image_store.provider_type(),
            "Image storage is not reachable; uploads will fail until it is"
        );
    }

    // ── Step 3: Repositories ─────────────────────────────────────
    let categories: Arc<dyn CategoryStore> =
        Arc::new(CategoryRepository::new(db_pool.pool().clone()));
    let products: Arc<dyn ProductStore> =
        Arc::new(ProductRepository::new(db_pool.pool().clone()));

    // ── Step 4: Services + state ─────────────────────────────────
    if config.admin.api_token.is_none() {
        tracing::warn!("admin.api_token is not set; admin endpoints are unauthenticated");
    }
    tracing::info!(
        cache_enabled = config.cache.enabled,
        ttl_seconds = config.cache.default_ttl_seconds,
        "Initializing services..."
    );
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app_state = storefront_api::AppState::new(
        config,
        Some(db_pool.clone()),
        categories,
        products,
        image_store,
    );

    let app = storefront_api::build_router(app_state);

    // ── Step 5: Serve ────────────────────────────────────────────
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Storefront server listening on {}", addr);

    // ── Step 6: Graceful shutdown ────────────────────────────────
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    db_pool.close().await;
    tracing::info!("Storefront server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
