//! Category tree structures for hierarchical display.

use serde::{Deserialize, Serialize};

use storefront_core::types::CategoryId;

/// A node in the category forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryNode {
    /// Category ID.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// URL slug.
    pub slug: String,
    /// Declared parent, as stored. May point at a missing category.
    pub parent_id: Option<CategoryId>,
    /// Child category nodes.
    pub children: Vec<CategoryNode>,
}

impl CategoryNode {
    /// Number of nodes in this subtree, including this node.
    pub fn subtree_size(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(CategoryNode::subtree_size)
            .sum::<usize>()
    }
}

/// The complete category forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTree {
    /// Root nodes, in input order.
    pub roots: Vec<CategoryNode>,
    /// Total number of categories placed in the forest.
    pub total_categories: u64,
}

impl CategoryTree {
    /// Create an empty forest.
    pub fn empty() -> Self {
        Self {
            roots: Vec::new(),
            total_categories: 0,
        }
    }
}
