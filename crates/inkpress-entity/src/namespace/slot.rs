//! Occupants of namespace slots.

use inkpress_core::types::EntityKind;
use inkpress_core::types::id::{ArticleId, CategoryId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// What occupies a `(parent, token)` slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum Slot {
    /// A child category.
    Category(CategoryId),
    /// An article.
    Article(ArticleId),
}

impl Slot {
    /// The kind of the occupant.
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Category(_) => EntityKind::Category,
            Self::Article(_) => EntityKind::Article,
        }
    }
}

/// A `namespace_entries` row. Exactly one of the two ids is set.
#[derive(Debug, Clone, FromRow)]
pub struct NamespaceEntry {
    /// Owning category.
    pub parent_id: CategoryId,
    /// Path token.
    pub token: String,
    /// Set when a category occupies the slot.
    pub category_id: Option<CategoryId>,
    /// Set when an article occupies the slot.
    pub article_id: Option<ArticleId>,
}

impl NamespaceEntry {
    /// Converts the row into a [`Slot`], `None` if neither id is set.
    pub fn slot(&self) -> Option<Slot> {
        match (self.category_id, self.article_id) {
            (Some(id), None) => Some(Slot::Category(id)),
            (None, Some(id)) => Some(Slot::Article(id)),
            _ => None,
        }
    }
}
