//! `files` table, read-only lookups for featured images.

use sqlx::PgConnection;

use inkpress_core::result::AppResult;
use inkpress_core::types::id::FileId;

use crate::error::db_err;

/// Find a stored file by path.
pub async fn find_id_by_path(conn: &mut PgConnection, path: &str) -> AppResult<Option<FileId>> {
    sqlx::query_scalar::<_, FileId>("SELECT id FROM files WHERE path = $1")
        .bind(path)
        .fetch_optional(conn)
        .await
        .map_err(db_err("Failed to look up file"))
}
