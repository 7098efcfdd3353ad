//! Category tree structures for hierarchical display.

use inkpress_core::types::id::CategoryId;
use serde::{Deserialize, Serialize};

/// A node in the category tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryNode {
    /// Category ID.
    pub id: CategoryId,
    /// Display title.
    pub name: String,
    /// Path token.
    pub directory_name: String,
    /// Full path.
    pub path: String,
    /// Number of articles directly in this category.
    pub article_count: u64,
    /// Child categories, ordered by name.
    pub children: Vec<CategoryNode>,
}

impl CategoryNode {
    /// Total number of categories in this subtree, including this node.
    pub fn total_categories(&self) -> u64 {
        1 + self
            .children
            .iter()
            .map(CategoryNode::total_categories)
            .sum::<u64>()
    }
}
