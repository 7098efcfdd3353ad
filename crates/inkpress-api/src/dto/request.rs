//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use inkpress_entity::article::ArticleViewType;
use inkpress_entity::category::{CategoryViewType, SortingType};
use inkpress_service::{CreateArticle, CreateCategory, UpdateCategory};

fn root() -> String {
    inkpress_core::types::ROOT_PATH.to_string()
}

/// Create category request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    /// Path of the parent category.
    #[serde(default = "root")]
    pub parent_path: String,
    /// Path token, checked by the namespace.
    pub directory_name: String,
    /// Display title.
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Layout.
    pub view_type: Option<CategoryViewType>,
    /// Ordering policy.
    pub sorting_type: Option<SortingType>,
}

impl CreateCategoryRequest {
    /// Splits into the parent path and the service request.
    pub fn into_parts(self) -> (String, CreateCategory) {
        (
            self.parent_path,
            CreateCategory {
                directory_name: self.directory_name,
                name: self.name,
                description: self.description,
                view_type: self.view_type,
                sorting_type: self.sorting_type,
            },
        )
    }
}

/// Update category request. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub view_type: Option<CategoryViewType>,
    pub sorting_type: Option<SortingType>,
    /// Rename.
    pub directory_name: Option<String>,
    /// Move under another category.
    pub parent_path: Option<String>,
}

impl From<UpdateCategoryRequest> for UpdateCategory {
    fn from(req: UpdateCategoryRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            view_type: req.view_type,
            sorting_type: req.sorting_type,
            directory_name: req.directory_name,
            parent_path: req.parent_path,
        }
    }
}

/// Move category request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MoveCategoryRequest {
    /// Category to move.
    #[validate(length(min = 1))]
    pub path: String,
    /// Path of the new parent.
    #[validate(length(min = 1))]
    pub new_parent_path: String,
}

/// Create article request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateArticleRequest {
    /// Path of the owning category.
    #[serde(default = "root")]
    pub category_path: String,
    pub filename: String,
    #[validate(length(min = 1, max = 500, message = "title must be 1-500 characters"))]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub content: String,
    pub publish_time: Option<String>,
    pub is_visible: Option<bool>,
    pub view_type: Option<ArticleViewType>,
    pub can_comment: Option<bool>,
    pub show_authors: Option<bool>,
    pub category_sorting_index: Option<i32>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub featured_image_path: Option<String>,
}

impl CreateArticleRequest {
    /// Splits into the category path and the service request.
    pub fn into_parts(self) -> (String, CreateArticle) {
        (
            self.category_path,
            CreateArticle {
                filename: self.filename,
                title: self.title,
                summary: self.summary,
                content: self.content,
                publish_time: self.publish_time,
                is_visible: self.is_visible,
                view_type: self.view_type,
                can_comment: self.can_comment,
                show_authors: self.show_authors,
                category_sorting_index: self.category_sorting_index,
                tags: self.tags,
                featured_image_path: self.featured_image_path,
            },
        )
    }
}
