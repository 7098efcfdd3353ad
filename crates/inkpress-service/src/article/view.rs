//! Read model returned for a single article.

use serde::Serialize;

use inkpress_core::traits::SearchDocument;
use inkpress_entity::article::{Article, Tag};
use inkpress_entity::category::Category;
use inkpress_entity::user::Author;

/// An article with its owning category, resolved paths, authors and tags.
#[derive(Debug, Clone, Serialize)]
pub struct ArticleView {
    pub article: Article,
    pub category: Category,
    /// Live path of the owning category.
    pub category_path: String,
    /// Live path of the article.
    pub path: String,
    pub authors: Vec<Author>,
    pub tags: Vec<Tag>,
}

impl ArticleView {
    /// The document handed to the search collaborator.
    pub fn search_document(&self, text: Option<String>) -> SearchDocument {
        SearchDocument {
            article_id: self.article.id,
            path: self.path.clone(),
            title: self.article.title.clone(),
            summary: self.article.summary.clone(),
            content: self.article.content.clone(),
            authors: self.authors.iter().map(|a| a.username.clone()).collect(),
            tags: self.tags.iter().map(|t| t.name.clone()).collect(),
            text,
        }
    }
}
