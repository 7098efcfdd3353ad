//! Route definitions for the Inkpress HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.

use axum::Router;
use axum::routing::{get, post};

use crate::handlers;
use crate::state::AppState;

/// Build the API router.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(category_routes())
        .merge(article_routes())
        .merge(tag_routes())
        .route("/health", get(handlers::health::health));

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Category CRUD, move, listing, tree and cache maintenance
fn category_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/categories",
            get(handlers::category::get_category)
                .post(handlers::category::create_category)
                .patch(handlers::category::update_category)
                .delete(handlers::category::delete_category),
        )
        .route("/categories/move", post(handlers::category::move_category))
        .route("/categories/articles", get(handlers::category::list_articles))
        .route("/categories/tree", get(handlers::category::tree))
        .route("/categories/all", get(handlers::category::list_all))
        .route(
            "/categories/cache/rebuild",
            post(handlers::category::rebuild_cache),
        )
}

/// Article CRUD
fn article_routes() -> Router<AppState> {
    Router::new().route(
        "/articles",
        get(handlers::article::get_article)
            .post(handlers::article::create_article)
            .patch(handlers::article::update_article)
            .delete(handlers::article::delete_article),
    )
}

/// Tags
fn tag_routes() -> Router<AppState> {
    Router::new().route("/tags", get(handlers::tag::list_tags))
}
