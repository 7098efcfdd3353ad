//! Article handlers. Articles are addressed with `?path=`.

use axum::Json;
use axum::extract::{Query, State};
use validator::Validate;

use inkpress_entity::user::principal::is_privileged;
use inkpress_service::UpdateArticle;

use crate::dto::request::CreateArticleRequest;
use crate::dto::response::{ApiResponse, ArticleResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, OptionalAuthUser, PathQuery};
use crate::state::AppState;

/// GET /api/articles?path=/blog/hello
pub async fn get_article(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Query(query): Query<PathQuery>,
) -> Result<Json<ApiResponse<ArticleResponse>>, ApiError> {
    let view = state
        .article_service
        .get_article(auth.principal(), &query.path)
        .await?;
    let privileged = is_privileged(auth.principal());
    Ok(Json(ApiResponse::ok(ArticleResponse::from_view(view, privileged))))
}

/// POST /api/articles
pub async fn create_article(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateArticleRequest>,
) -> Result<Json<ApiResponse<ArticleResponse>>, ApiError> {
    req.validate()?;
    let (category_path, create) = req.into_parts();
    let view = state
        .article_service
        .create_article(&auth, &category_path, create)
        .await?;
    Ok(Json(ApiResponse::ok(ArticleResponse::from_view(view, true))))
}

/// PATCH /api/articles?path=/blog/hello
pub async fn update_article(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<PathQuery>,
    Json(req): Json<UpdateArticle>,
) -> Result<Json<ApiResponse<ArticleResponse>>, ApiError> {
    let view = state
        .article_service
        .update_article(&auth, &query.path, req)
        .await?;
    Ok(Json(ApiResponse::ok(ArticleResponse::from_view(view, true))))
}

/// DELETE /api/articles?path=/blog/hello
pub async fn delete_article(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<PathQuery>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .article_service
        .delete_article(&auth, &query.path)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: format!("Article '{}' deleted", query.path),
    })))
}
