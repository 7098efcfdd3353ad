//! Application builder: wires the content store, services, router and
//! middleware into an Axum app.

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware as axum_middleware;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use inkpress_core::config::{AppConfig, StoreProvider};
use inkpress_core::error::AppError;
use inkpress_core::result::AppResult;
use inkpress_core::traits::{CommentCascade, FileResolver};
use inkpress_database::migration::run_migrations;
use inkpress_database::{
    ContentStore, DatabasePool, MemoryCommentCascade, MemoryContentStore, MemoryFileResolver,
    PgCommentCascade, PgContentStore, PgFileResolver,
};
use inkpress_service::indexing::build_indexer;
use inkpress_service::{ArticleService, CategoryService, IndexDispatcher};

use crate::auth::TokenDecoder;
use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let max_body = state.config.server.max_body_bytes;
    let cors = build_cors_layer(&state.config.server.cors);

    build_router(state)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(request_logging))
}

/// Connects the configured store and collaborators, builds the services
/// and makes sure the root category exists.
///
/// Fails if the root cannot be created; the server must not start with a
/// rootless tree.
pub async fn build_state(config: AppConfig) -> AppResult<AppState> {
    let (store, files, comments): (
        Arc<dyn ContentStore>,
        Arc<dyn FileResolver>,
        Arc<dyn CommentCascade>,
    ) = match config.store.provider {
        StoreProvider::Postgres => {
            let db = DatabasePool::connect(&config.database).await?;
            run_migrations(db.pool()).await?;
            (
                Arc::new(PgContentStore::new(db.clone())),
                Arc::new(PgFileResolver::new(db.clone())),
                Arc::new(PgCommentCascade::new(db)),
            )
        }
        StoreProvider::Memory => (
            Arc::new(MemoryContentStore::new()),
            Arc::new(MemoryFileResolver::new()),
            Arc::new(MemoryCommentCascade::new()),
        ),
    };
    info!(backend = store.backend(), "Content store ready");

    let indexer = IndexDispatcher::new(build_indexer(&config.search)?);
    info!(backend = indexer.backend(), "Search indexer ready");

    let category_service = Arc::new(CategoryService::new(
        Arc::clone(&store),
        Arc::clone(&comments),
        config.content.clone(),
    ));
    let article_service = Arc::new(ArticleService::new(
        Arc::clone(&store),
        indexer,
        files,
        comments,
        config.content.clone(),
    ));

    let root = category_service.bootstrap_root().await.map_err(|e| {
        AppError::internal(format!("Failed to bootstrap the root category: {e}"))
    })?;
    info!(category_id = %root.id, "Root category ready");

    Ok(AppState {
        tokens: Arc::new(TokenDecoder::new(&config.auth)),
        config: Arc::new(config),
        store,
        category_service,
        article_service,
    })
}

/// Runs the Inkpress server with the given configuration.
pub async fn run_server(config: AppConfig) -> AppResult<()> {
    info!("Starting Inkpress server...");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = build_state(config).await?;
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
    info!(addr = %addr, "Inkpress server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    info!("Inkpress server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
