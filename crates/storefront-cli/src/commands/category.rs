//! Category inspection commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use storefront_cache::CatalogCache;
use storefront_core::error::AppError;
use storefront_database::{CategoryRepository, DatabasePool, ProductRepository};
use storefront_entity::category::{Category, CategoryTree};
use storefront_service::CategoryService;

use crate::output::{self, OutputFormat};

/// Arguments for category commands
#[derive(Debug, Args)]
pub struct CategoryArgs {
    /// Category subcommand
    #[command(subcommand)]
    pub command: CategoryCommand,
}

/// Category subcommands
#[derive(Debug, Subcommand)]
pub enum CategoryCommand {
    /// List every category
    List,
    /// Show the category forest
    Tree,
}

/// Category display row
#[derive(Debug, Serialize, Tabled)]
struct CategoryRow {
    /// Category ID
    id: i64,
    /// Name
    name: String,
    /// Slug
    slug: String,
    /// Parent category ID
    parent: String,
}

impl From<&Category> for CategoryRow {
    fn from(c: &Category) -> Self {
        Self {
            id: c.id.get(),
            name: c.name.clone(),
            slug: c.slug.clone(),
            parent: c
                .parent_id
                .map(|p| p.to_string())
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Execute category commands
pub async fn execute(
    args: &CategoryArgs,
    pool: &DatabasePool,
    format: OutputFormat,
) -> Result<(), AppError> {
    let service = CategoryService::new(
        Arc::new(CategoryRepository::new(pool.pool().clone())),
        Arc::new(ProductRepository::new(pool.pool().clone())),
        CatalogCache::disabled(),
    );

    match &args.command {
        CategoryCommand::List => {
            let categories = service.list().await?;
            let rows: Vec<CategoryRow> = categories.iter().map(CategoryRow::from).collect();
            output::print_list(&rows, format);
        }
        CategoryCommand::Tree => {
            let tree = service.tree().await?;
            match format {
                OutputFormat::Json => output::print_json(&tree),
                OutputFormat::Table => {
                    for line in render_tree(&tree) {
                        println!("{line}");
                    }
                    output::print_kv("Total categories", &tree.total_categories.to_string());
                }
            }
        }
    }

    Ok(())
}

/// One indented line per node, depth-first, children in stored order.
fn render_tree(tree: &CategoryTree) -> Vec<String> {
    let mut lines = Vec::new();
    let mut stack: Vec<(usize, &_)> = tree.roots.iter().rev().map(|n| (0, n)).collect();

    while let Some((depth, node)) = stack.pop() {
        lines.push(format!("{}{} ({})", "  ".repeat(depth), node.name, node.slug));
        stack.extend(node.children.iter().rev().map(|c| (depth + 1, c)));
    }
    lines
}
