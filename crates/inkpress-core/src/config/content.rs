//! Namespace and listing configuration.

use serde::{Deserialize, Serialize};

/// What happens to a category's contents when it is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CategoryDeletePolicy {
    /// Delete the whole subtree and every article in it.
    #[default]
    Cascade,
    /// Refuse to delete a category that still has subcategories or articles.
    RejectNonEmpty,
}

/// Content namespace settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Policy applied when deleting a category.
    #[serde(default)]
    pub category_delete_policy: CategoryDeletePolicy,
    /// How many times a unit of work is retried after a write conflict.
    #[serde(default = "default_max_write_retries")]
    pub max_write_retries: u32,
    /// Number of articles returned by a listing when no limit is given.
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
    /// Upper bound for a listing limit.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            category_delete_policy: CategoryDeletePolicy::default(),
            max_write_retries: default_max_write_retries(),
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

fn default_max_write_retries() -> u32 {
    3
}

fn default_page_size() -> u64 {
    25
}

fn default_max_page_size() -> u64 {
    100
}
