//! Category entity model.

use chrono::{DateTime, Utc};
use inkpress_core::types::id::CategoryId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// How a category page lays out its article previews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "category_view_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CategoryViewType {
    /// One preview per row.
    #[default]
    Vertical,
    /// Previews in a grid.
    Grid,
}

/// How the articles of a category are ordered when listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "sorting_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SortingType {
    /// By publish time, then creation time.
    #[default]
    Chronological,
    /// By `category_sorting_index`.
    Manual,
}

/// A category: a directory-like node of the content namespace.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    /// Unique category identifier.
    pub id: CategoryId,
    /// Parent category (null only for the root).
    pub parent_id: Option<CategoryId>,
    /// Display title.
    pub name: String,
    /// Path token; the empty string is reserved for the root.
    pub directory_name: String,
    /// Free-form description.
    pub description: String,
    /// Page layout.
    pub view_type: CategoryViewType,
    /// Article ordering policy.
    pub sorting_type: SortingType,
    /// Denormalized absolute path, `None` until computed.
    pub cached_url: Option<String>,
    /// When the category was created.
    pub created_at: DateTime<Utc>,
    /// When the category was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Check if this is the root category.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Data required to insert a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCategory {
    /// Parent category (None only when creating the root).
    pub parent_id: Option<CategoryId>,
    /// Display title.
    pub name: String,
    /// Path token.
    pub directory_name: String,
    /// Description.
    pub description: String,
    /// Page layout.
    pub view_type: CategoryViewType,
    /// Article ordering policy.
    pub sorting_type: SortingType,
    /// Precomputed absolute path.
    pub cached_url: Option<String>,
}

impl NewCategory {
    /// The root category, created once at bootstrap.
    pub fn root() -> Self {
        Self {
            parent_id: None,
            name: "Home".to_string(),
            directory_name: String::new(),
            description: String::new(),
            view_type: CategoryViewType::default(),
            sorting_type: SortingType::default(),
            cached_url: Some(inkpress_core::types::ROOT_PATH.to_string()),
        }
    }
}

/// Metadata changes applied to a category that do not affect its position
/// in the namespace.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryPatch {
    /// New display title.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New layout.
    pub view_type: Option<CategoryViewType>,
    /// New ordering policy.
    pub sorting_type: Option<SortingType>,
}

impl CategoryPatch {
    /// Whether the patch changes anything.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.view_type.is_none()
            && self.sorting_type.is_none()
    }

    /// Applies the patch to a category in place.
    pub fn apply_to(&self, category: &mut Category) {
        if let Some(name) = &self.name {
            category.name.clone_from(name);
        }
        if let Some(description) = &self.description {
            category.description.clone_from(description);
        }
        if let Some(view_type) = self.view_type {
            category.view_type = view_type;
        }
        if let Some(sorting_type) = self.sorting_type {
            category.sorting_type = sorting_type;
        }
    }
}
