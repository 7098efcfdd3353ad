//! Category handlers. Categories are addressed with `?path=`.

use axum::Json;
use axum::extract::{Query, State};
use validator::Validate;

use inkpress_core::types::PageResponse;
use inkpress_entity::category::CategoryNode;
use inkpress_service::DeleteSummary;
use inkpress_service::namespace::CacheAudit;

use crate::dto::request::{CreateCategoryRequest, MoveCategoryRequest, UpdateCategoryRequest};
use crate::dto::response::{ApiResponse, ArticlePreview, CategoryResponse, CategoryViewResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ListingParams, OptionalAuthUser, PathQuery};
use crate::state::AppState;

/// GET /api/categories?path=/blog
pub async fn get_category(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Query(query): Query<PathQuery>,
    Query(listing): Query<ListingParams>,
) -> Result<Json<ApiResponse<CategoryViewResponse>>, ApiError> {
    let view = state
        .category_service
        .get_category(auth.principal(), &query.path, listing.into_listing())
        .await?;
    Ok(Json(ApiResponse::ok(view.into())))
}

/// GET /api/categories/articles?path=/blog&direction=desc&limit=10
pub async fn list_articles(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Query(query): Query<PathQuery>,
    Query(listing): Query<ListingParams>,
) -> Result<Json<ApiResponse<PageResponse<ArticlePreview>>>, ApiError> {
    let (_, path, articles) = state
        .category_service
        .list_articles(auth.principal(), &query.path, listing.into_listing())
        .await?;
    Ok(Json(ApiResponse::ok(
        articles.map(|a| ArticlePreview::new(a, &path)),
    )))
}

/// POST /api/categories
pub async fn create_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateCategoryRequest>,
) -> Result<Json<ApiResponse<CategoryResponse>>, ApiError> {
    req.validate()?;
    let (parent_path, create) = req.into_parts();
    let category = state
        .category_service
        .create_category(&auth, &parent_path, create)
        .await?;
    Ok(Json(ApiResponse::ok(category.into())))
}

/// PATCH /api/categories?path=/blog
pub async fn update_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<PathQuery>,
    Json(req): Json<UpdateCategoryRequest>,
) -> Result<Json<ApiResponse<CategoryResponse>>, ApiError> {
    req.validate()?;
    let category = state
        .category_service
        .update_category(&auth, &query.path, req.into())
        .await?;
    Ok(Json(ApiResponse::ok(category.into())))
}

/// POST /api/categories/move
pub async fn move_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<MoveCategoryRequest>,
) -> Result<Json<ApiResponse<CategoryResponse>>, ApiError> {
    req.validate()?;
    let category = state
        .category_service
        .reparent_category(&auth, &req.path, &req.new_parent_path)
        .await?;
    Ok(Json(ApiResponse::ok(category.into())))
}

/// DELETE /api/categories?path=/blog
pub async fn delete_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<PathQuery>,
) -> Result<Json<ApiResponse<DeleteSummary>>, ApiError> {
    let summary = state
        .category_service
        .delete_category(&auth, &query.path)
        .await?;
    Ok(Json(ApiResponse::ok(summary)))
}

/// GET /api/categories/tree
pub async fn tree(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<CategoryNode>>, ApiError> {
    let tree = state.category_service.tree().await?;
    Ok(Json(ApiResponse::ok(tree)))
}

/// GET /api/categories/all
pub async fn list_all(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<CategoryResponse>>>, ApiError> {
    let categories = state.category_service.list_all().await?;
    Ok(Json(ApiResponse::ok(
        categories.into_iter().map(CategoryResponse::from).collect(),
    )))
}

/// POST /api/categories/cache/rebuild
pub async fn rebuild_cache(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<CacheAudit>>, ApiError> {
    let report = state.category_service.rebuild_path_cache(&auth).await?;
    Ok(Json(ApiResponse::ok(report)))
}
