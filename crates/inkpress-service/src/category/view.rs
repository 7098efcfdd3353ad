//! Read models returned by the category service.

use serde::Serialize;

use inkpress_core::types::PageResponse;
use inkpress_entity::article::Article;
use inkpress_entity::category::Category;

/// A category page: the category, its live path, its subcategories and a
/// window of its ordered articles.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryView {
    /// The category.
    pub category: Category,
    /// Live absolute path.
    pub path: String,
    /// Direct subcategories ordered by name.
    pub subcategories: Vec<Category>,
    /// Ordered, windowed articles visible to the caller.
    pub articles: PageResponse<Article>,
}
