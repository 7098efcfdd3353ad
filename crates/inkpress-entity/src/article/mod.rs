//! Article domain entities.

pub mod model;
pub mod tag;

pub use model::{Article, ArticleViewType, NewArticle};
pub use tag::Tag;
