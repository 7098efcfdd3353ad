//! # inkpress-service
//!
//! Business logic for Inkpress. The [`namespace`] module is the content
//! addressing engine: path resolution, the cached-path maintenance, slot
//! conflict checks, article ordering and category reparenting. The
//! category and article services wrap those operations in store
//! transactions, enforce the role policy and notify collaborators.
//!
//! Services follow constructor injection: every dependency is provided at
//! construction time via `Arc` references.

pub mod article;
pub mod category;
pub mod indexing;
pub mod namespace;
pub mod retry;

pub use article::{ArticleService, ArticleView, CreateArticle, UpdateArticle};
pub use category::{
    CategoryService, CategoryView, CreateCategory, DeleteSummary, UpdateCategory,
};
pub use indexing::{DisabledIndexer, ElasticsearchIndexer, IndexDispatcher};
pub use namespace::ordering::ArticleListing;
