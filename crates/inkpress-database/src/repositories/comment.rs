//! `comments` table, owned by the comment collaborator.

use sqlx::PgConnection;

use inkpress_core::result::AppResult;
use inkpress_core::types::id::ArticleId;

use crate::error::db_err;

/// Delete every comment on an article, returning how many were removed.
pub async fn delete_for_article(conn: &mut PgConnection, article: ArticleId) -> AppResult<u64> {
    sqlx::query("DELETE FROM comments WHERE article_id = $1")
        .bind(article)
        .execute(conn)
        .await
        .map(|r| r.rows_affected())
        .map_err(db_err("Failed to delete comments"))
}
