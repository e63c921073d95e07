//! Product inspection commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use storefront_cache::CatalogCache;
use storefront_core::config::AppConfig;
use storefront_core::error::AppError;
use storefront_core::types::{PageRequest, PriceRange};
use storefront_database::repositories::ProductStore;
use storefront_database::{CategoryRepository, DatabasePool, ProductRepository};
use storefront_entity::product::ProductWithImages;
use storefront_service::{CategoryService, ProductQueryService, SearchService};

use crate::output::{self, OutputFormat};

/// Arguments for product commands
#[derive(Debug, Args)]
pub struct ProductArgs {
    /// Product subcommand
    #[command(subcommand)]
    pub command: ProductCommand,
}

/// Product subcommands
#[derive(Debug, Subcommand)]
pub enum ProductCommand {
    /// List products, optionally scoped to a category subtree
    List {
        /// Category slug; includes every descendant category
        #[arg(short, long)]
        category: Option<String>,
        /// Case-insensitive name/description filter (ignored with --category)
        #[arg(short, long)]
        search: Option<String>,
        /// Lowest price in minor units
        #[arg(long)]
        min_price: Option<i64>,
        /// Highest price in minor units
        #[arg(long)]
        max_price: Option<i64>,
        /// Page number
        #[arg(long, default_value = "1")]
        page: u64,
        /// Items per page
        #[arg(long)]
        per_page: Option<u64>,
    },
}

/// Product display row
#[derive(Debug, Serialize, Tabled)]
struct ProductRow {
    /// Product ID
    id: i64,
    /// Slug
    slug: String,
    /// Name
    name: String,
    /// Price
    price: String,
    /// Units in stock
    inventory: i32,
    /// Featured flag
    featured: bool,
    /// Owning category ID
    category: i64,
    /// Image count
    images: usize,
}

impl From<&ProductWithImages> for ProductRow {
    fn from(p: &ProductWithImages) -> Self {
        Self {
            id: p.product.id.get(),
            slug: p.product.slug.clone(),
            name: p.product.name.clone(),
            price: format_price(p.product.price),
            inventory: p.product.inventory,
            featured: p.product.featured,
            category: p.product.category_id.get(),
            images: p.images.len(),
        }
    }
}

/// Execute product commands
pub async fn execute(
    args: &ProductArgs,
    config: &AppConfig,
    pool: &DatabasePool,
    format: OutputFormat,
) -> Result<(), AppError> {
    let cache = CatalogCache::disabled();
    let products: Arc<dyn ProductStore> = Arc::new(ProductRepository::new(pool.pool().clone()));
    let categories = Arc::new(CategoryService::new(
        Arc::new(CategoryRepository::new(pool.pool().clone())),
        Arc::clone(&products),
        cache.clone(),
    ));
    let listings = Arc::new(ProductQueryService::new(
        categories,
        Arc::clone(&products),
        cache.clone(),
    ));

    match &args.command {
        ProductCommand::List {
            category,
            search,
            min_price,
            max_price,
            page,
            per_page,
        } => {
            let price = PriceRange::new(*min_price, *max_price)?;
            let page = PageRequest::new(
                *page,
                per_page
                    .unwrap_or(config.catalog.default_page_size)
                    .min(config.catalog.max_page_size),
            );

            let results = match category {
                Some(slug) => listings.list_products_for_category(slug, price, page).await?,
                None => {
                    let search_service = SearchService::new(
                        listings,
                        products,
                        cache,
                        config.catalog.featured_limit,
                    );
                    search_service.search(search.as_deref(), price, page).await?
                }
            };

            let rows: Vec<ProductRow> = results.items.iter().map(ProductRow::from).collect();
            output::print_list(&rows, format);
            if format == OutputFormat::Table {
                output::print_kv(
                    "Page",
                    &format!("{} of {}", results.page, results.total_pages.max(1)),
                );
                output::print_kv("Total products", &results.total_items.to_string());
            }
        }
    }

    Ok(())
}

/// Render minor units as a two-decimal amount.
fn format_price(minor: i64) -> String {
    format!("{}.{:02}", minor / 100, (minor % 100).abs())
}
