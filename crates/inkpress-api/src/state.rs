//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use inkpress_core::config::AppConfig;
use inkpress_database::ContentStore;
use inkpress_service::{ArticleService, CategoryService};

use crate::auth::TokenDecoder;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Content store backend
    pub store: Arc<dyn ContentStore>,
    /// Bearer token decoder
    pub tokens: Arc<TokenDecoder>,
    /// Category tree service
    pub category_service: Arc<CategoryService>,
    /// Article service
    pub article_service: Arc<ArticleService>,
}
