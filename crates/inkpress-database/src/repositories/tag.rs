//! `tags` and `article_tags` tables.

use sqlx::PgConnection;

use inkpress_core::result::AppResult;
use inkpress_core::types::id::{ArticleId, TagId};
use inkpress_entity::article::Tag;

use crate::error::db_err;

/// Find a tag by exact name.
pub async fn find_by_name(conn: &mut PgConnection, name: &str) -> AppResult<Option<Tag>> {
    sqlx::query_as::<_, Tag>("SELECT * FROM tags WHERE name = $1")
        .bind(name)
        .fetch_optional(conn)
        .await
        .map_err(db_err("Failed to find tag"))
}

/// Create a tag.
pub async fn insert(conn: &mut PgConnection, name: &str) -> AppResult<Tag> {
    sqlx::query_as::<_, Tag>("INSERT INTO tags (id, name) VALUES ($1, $2) RETURNING *")
        .bind(TagId::new())
        .bind(name)
        .fetch_one(conn)
        .await
        .map_err(db_err("Failed to create tag"))
}

/// Tags on an article.
pub async fn find_for_article(conn: &mut PgConnection, article: ArticleId) -> AppResult<Vec<Tag>> {
    sqlx::query_as::<_, Tag>(
        "SELECT t.* FROM tags t INNER JOIN article_tags at ON at.tag_id = t.id \
         WHERE at.article_id = $1 ORDER BY t.name ASC",
    )
    .bind(article)
    .fetch_all(conn)
    .await
    .map_err(db_err("Failed to load article tags"))
}

/// Replace the tags on an article.
pub async fn replace_for_article(conn: &mut PgConnection, article: ArticleId, tags: &[TagId]) -> AppResult<()> {
    sqlx::query("DELETE FROM article_tags WHERE article_id = $1")
        .bind(article)
        .execute(&mut *conn)
        .await
        .map_err(db_err("Failed to clear article tags"))?;

    sqlx::query(
        "INSERT INTO article_tags (article_id, tag_id) \
         SELECT $1, UNNEST($2::uuid[]) ON CONFLICT DO NOTHING",
    )
    .bind(article)
    .bind(tags)
    .execute(conn)
    .await
    .map_err(db_err("Failed to tag article"))?;
    Ok(())
}

/// Every tag.
pub async fn find_all(conn: &mut PgConnection) -> AppResult<Vec<Tag>> {
    sqlx::query_as::<_, Tag>("SELECT * FROM tags ORDER BY name ASC")
        .fetch_all(conn)
        .await
        .map_err(db_err("Failed to list tags"))
}
