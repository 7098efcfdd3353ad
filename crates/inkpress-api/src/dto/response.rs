//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use inkpress_core::types::id::{ArticleId, CategoryId, FileId};
use inkpress_core::types::{PageResponse, join_path};
use inkpress_entity::article::{Article, ArticleViewType};
use inkpress_entity::category::{Category, CategoryViewType, SortingType};
use inkpress_service::{ArticleView, CategoryView};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Content store backend.
    pub store: String,
}

/// A category without its contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: CategoryId,
    pub parent_id: Option<CategoryId>,
    pub name: String,
    pub directory_name: String,
    pub description: String,
    pub view_type: CategoryViewType,
    pub sorting_type: SortingType,
    /// Absolute path.
    pub path: String,
}

impl CategoryResponse {
    /// Builds the response with a known live path.
    pub fn with_path(category: Category, path: String) -> Self {
        Self {
            id: category.id,
            parent_id: category.parent_id,
            name: category.name,
            directory_name: category.directory_name,
            description: category.description,
            view_type: category.view_type,
            sorting_type: category.sorting_type,
            path,
        }
    }
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        let path = category.cached_url.clone().unwrap_or_default();
        Self::with_path(category, path)
    }
}

/// Short article form used in listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticlePreview {
    pub id: ArticleId,
    pub filename: String,
    pub path: String,
    pub title: String,
    pub summary: String,
    pub creation_time: DateTime<Utc>,
    pub last_edit_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_time: Option<DateTime<Utc>>,
    pub is_visible: bool,
    pub view_type: ArticleViewType,
    pub category_sorting_index: i32,
    pub featured_image_id: Option<FileId>,
}

impl ArticlePreview {
    /// Builds a preview for an article in the category at `category_path`.
    pub fn new(article: Article, category_path: &str) -> Self {
        let publish_time = article.publish_time.filter(|_| article.show_publish_time);
        Self {
            path: join_path(category_path, &article.filename),
            id: article.id,
            filename: article.filename,
            title: article.title,
            summary: article.summary,
            creation_time: article.creation_time,
            last_edit_time: article.last_edit_time,
            publish_time,
            is_visible: article.is_visible,
            view_type: article.view_type,
            category_sorting_index: article.category_sorting_index,
            featured_image_id: article.featured_image_id,
        }
    }
}

/// A category with subcategories and a page of articles.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryViewResponse {
    pub category: CategoryResponse,
    pub subcategories: Vec<CategoryResponse>,
    pub articles: PageResponse<ArticlePreview>,
}

impl From<CategoryView> for CategoryViewResponse {
    fn from(view: CategoryView) -> Self {
        let path = view.path;
        let subcategories = view
            .subcategories
            .into_iter()
            .map(|child| {
                let child_path = join_path(&path, &child.directory_name);
                CategoryResponse::with_path(child, child_path)
            })
            .collect();
        let articles = view.articles.map(|a| ArticlePreview::new(a, &path));
        Self {
            category: CategoryResponse::with_path(view.category, path),
            subcategories,
            articles,
        }
    }
}

/// Author credited on an article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorResponse {
    pub username: String,
    pub display_name: String,
}

/// Full article output.
#[derive(Debug, Clone, Serialize)]
pub struct ArticleResponse {
    #[serde(flatten)]
    pub preview: ArticlePreview,
    pub content: String,
    /// Unpublished working copy, only shown to editors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft_content: Option<String>,
    pub can_comment: bool,
    pub show_authors: bool,
    pub authors: Vec<AuthorResponse>,
    pub tags: Vec<String>,
    pub category: CategoryResponse,
}

impl ArticleResponse {
    /// Builds the response; `privileged` callers also get the draft.
    pub fn from_view(view: ArticleView, privileged: bool) -> Self {
        let article = view.article;
        let content = article.content.clone();
        let draft_content = privileged.then(|| article.draft_content.clone());
        let (can_comment, show_authors) = (article.can_comment, article.show_authors);
        let authors = if show_authors || privileged {
            view.authors
                .into_iter()
                .map(|a| AuthorResponse {
                    username: a.username,
                    display_name: a.display_name,
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            preview: ArticlePreview::new(article, &view.category_path),
            content,
            draft_content,
            can_comment,
            show_authors,
            authors,
            tags: view.tags.into_iter().map(|t| t.name).collect(),
            category: CategoryResponse::with_path(view.category, view.category_path),
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
