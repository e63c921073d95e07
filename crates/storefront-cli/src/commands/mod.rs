//! CLI command definitions and dispatch.

pub mod category;
pub mod migrate;
pub mod product;

use clap::{Parser, Subcommand};

use storefront_core::config::AppConfig;
use storefront_core::error::AppError;
use storefront_database::DatabasePool;

use crate::output::OutputFormat;

/// Storefront catalog administration
#[derive(Debug, Parser)]
#[command(name = "storefront", version, about, long_about = None)]
pub struct Cli {
    /// Path to the base configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Environment overlay to merge over the base file
    #[arg(short, long, env = "STOREFRONT_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Category inspection
    Category(category::CategoryArgs),
    /// Product inspection
    Product(product::ProductArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = AppConfig::load_from(&self.config, &self.env)?;
        tracing::debug!(config = %self.config, env = %self.env, "Configuration loaded");
        let pool = DatabasePool::connect(&config.database).await?;

        let result = match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &pool).await,
            Commands::Category(args) => category::execute(args, &pool, self.format).await,
            Commands::Product(args) => product::execute(args, &config, &pool, self.format).await,
        };

        pool.close().await;
        result
    }
}
