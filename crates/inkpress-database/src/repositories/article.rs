//! `articles` table.

use sqlx::PgConnection;

use inkpress_core::result::AppResult;
use inkpress_core::types::id::{ArticleId, CategoryId};
use inkpress_entity::article::{Article, NewArticle};

use crate::error::db_err;

/// Find an article by id.
pub async fn find_by_id(conn: &mut PgConnection, id: ArticleId) -> AppResult<Option<Article>> {
    sqlx::query_as::<_, Article>("SELECT * FROM articles WHERE id = $1")
        .bind(id)
        .fetch_optional(conn)
        .await
        .map_err(db_err("Failed to find article"))
}

/// Articles directly in a category, oldest insert first.
pub async fn find_in_category(conn: &mut PgConnection, category: CategoryId) -> AppResult<Vec<Article>> {
    sqlx::query_as::<_, Article>("SELECT * FROM articles WHERE category_id = $1 ORDER BY seq ASC")
        .bind(category)
        .fetch_all(conn)
        .await
        .map_err(db_err("Failed to list articles"))
}

/// Count articles directly in a category.
pub async fn count_in_category(conn: &mut PgConnection, category: CategoryId) -> AppResult<u64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM articles WHERE category_id = $1")
        .bind(category)
        .fetch_one(conn)
        .await
        .map_err(db_err("Failed to count articles"))?;
    Ok(count.max(0) as u64)
}

/// Insert an article; content doubles as the initial draft.
pub async fn insert(conn: &mut PgConnection, id: ArticleId, data: &NewArticle) -> AppResult<Article> {
    sqlx::query_as::<_, Article>(
        "INSERT INTO articles \
         (id, category_id, filename, title, summary, content, draft_content, publish_time, \
          is_visible, view_type, can_comment, show_authors, category_sorting_index, featured_image_id) \
         VALUES ($1, $2, $3, $4, $5, $6, $6, $7, $8, $9, $10, $11, $12, $13) RETURNING *",
    )
    .bind(id)
    .bind(data.category_id)
    .bind(&data.filename)
    .bind(&data.title)
    .bind(&data.summary)
    .bind(&data.content)
    .bind(data.publish_time)
    .bind(data.is_visible)
    .bind(data.view_type)
    .bind(data.can_comment)
    .bind(data.show_authors)
    .bind(data.category_sorting_index)
    .bind(data.featured_image_id)
    .fetch_one(conn)
    .await
    .map_err(db_err("Failed to insert article"))
}

/// Persist every non-namespace field.
pub async fn update(conn: &mut PgConnection, article: &Article) -> AppResult<()> {
    sqlx::query(
        "UPDATE articles SET title = $2, summary = $3, content = $4, draft_content = $5, \
         last_edit_time = $6, publish_time = $7, show_publish_time = $8, is_visible = $9, \
         view_type = $10, can_comment = $11, show_authors = $12, category_sorting_index = $13, \
         featured_image_id = $14 WHERE id = $1",
    )
    .bind(article.id)
    .bind(&article.title)
    .bind(&article.summary)
    .bind(&article.content)
    .bind(&article.draft_content)
    .bind(article.last_edit_time)
    .bind(article.publish_time)
    .bind(article.show_publish_time)
    .bind(article.is_visible)
    .bind(article.view_type)
    .bind(article.can_comment)
    .bind(article.show_authors)
    .bind(article.category_sorting_index)
    .bind(article.featured_image_id)
    .execute(conn)
    .await
    .map_err(db_err("Failed to update article"))?;
    Ok(())
}

/// Change owner category and filename.
pub async fn set_position(
    conn: &mut PgConnection,
    id: ArticleId,
    category: CategoryId,
    filename: &str,
) -> AppResult<()> {
    sqlx::query("UPDATE articles SET category_id = $2, filename = $3 WHERE id = $1")
        .bind(id)
        .bind(category)
        .bind(filename)
        .execute(conn)
        .await
        .map_err(db_err("Failed to move article"))?;
    Ok(())
}

/// Delete an article; author and tag links cascade.
pub async fn delete(conn: &mut PgConnection, id: ArticleId) -> AppResult<()> {
    sqlx::query("DELETE FROM articles WHERE id = $1")
        .bind(id)
        .execute(conn)
        .await
        .map_err(db_err("Failed to delete article"))?;
    Ok(())
}
