//! Tag handlers.

use axum::Json;
use axum::extract::State;

use inkpress_entity::article::Tag;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/tags
pub async fn list_tags(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Tag>>>, ApiError> {
    let tags = state.article_service.list_tags().await?;
    Ok(Json(ApiResponse::ok(tags)))
}
