//! Core type definitions used across the Inkpress workspace.

pub mod id;
pub mod pagination;
pub mod path;
pub mod sorting;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use id::*;
pub use pagination::{PageRequest, PageResponse};
pub use path::{ContentPath, ROOT_PATH, ensure_valid_token, join_path, validate_token};
pub use sorting::SortDirection;

/// The two kinds of entity sharing the content namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// A category (directory-like node).
    Category,
    /// An article (file-like leaf).
    Article,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Category => write!(f, "category"),
            Self::Article => write!(f, "article"),
        }
    }
}
