//! Article entity model.

use chrono::{DateTime, Utc};
use inkpress_core::types::id::{ArticleId, CategoryId, FileId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// How an article page is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "article_view_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ArticleViewType {
    /// The whole article on one page.
    #[default]
    SinglePage,
    /// Split into navigable sections.
    BySections,
}

/// An article: a file-like leaf of the content namespace.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Article {
    /// Unique article identifier.
    pub id: ArticleId,
    /// Owning category.
    pub category_id: CategoryId,
    /// Path token, unique within the owning category's namespace.
    pub filename: String,
    /// Title.
    pub title: String,
    /// Short summary shown in previews.
    pub summary: String,
    /// Published content.
    pub content: String,
    /// Unpublished working copy; mirrors the latest edit.
    pub draft_content: String,
    /// When the article was created.
    pub creation_time: DateTime<Utc>,
    /// When the content was last changed.
    pub last_edit_time: DateTime<Utc>,
    /// Publication time, `None` while unpublished.
    pub publish_time: Option<DateTime<Utc>>,
    /// Whether readers see the publish time.
    pub show_publish_time: bool,
    /// Whether the article is visible to readers.
    pub is_visible: bool,
    /// Page rendering.
    pub view_type: ArticleViewType,
    /// Whether readers may comment.
    pub can_comment: bool,
    /// Whether the author list is displayed.
    pub show_authors: bool,
    /// Position under manual ordering.
    pub category_sorting_index: i32,
    /// Featured image owned by the file collaborator.
    pub featured_image_id: Option<FileId>,
    /// Monotonic insertion sequence, the stable tiebreak for equal sort keys.
    pub seq: i64,
}

impl Article {
    /// Whether the article has a publish time.
    pub fn is_published(&self) -> bool {
        self.publish_time.is_some()
    }
}

/// Data required to insert an article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewArticle {
    /// Owning category.
    pub category_id: CategoryId,
    /// Path token.
    pub filename: String,
    /// Title.
    pub title: String,
    /// Summary.
    pub summary: String,
    /// Initial content, stored as both published and draft content.
    pub content: String,
    /// Publication time.
    pub publish_time: Option<DateTime<Utc>>,
    /// Visibility.
    pub is_visible: bool,
    /// Rendering.
    pub view_type: ArticleViewType,
    /// Whether readers may comment.
    pub can_comment: bool,
    /// Whether the author list is displayed.
    pub show_authors: bool,
    /// Position under manual ordering.
    pub category_sorting_index: i32,
    /// Featured image.
    pub featured_image_id: Option<FileId>,
}
