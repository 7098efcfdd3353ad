//! Article services.

pub mod service;
pub mod view;

pub use service::{ArticleService, CreateArticle, UpdateArticle, parse_publish_time};
pub use view::ArticleView;
