//! `authors` and `article_authors` tables.

use sqlx::PgConnection;

use inkpress_core::result::AppResult;
use inkpress_core::types::id::{ArticleId, UserId};
use inkpress_entity::user::Author;

use crate::error::db_err;

/// Insert or refresh an author.
pub async fn upsert(conn: &mut PgConnection, author: &Author) -> AppResult<()> {
    sqlx::query(
        "INSERT INTO authors (id, username, display_name) VALUES ($1, $2, $3) \
         ON CONFLICT (id) DO UPDATE SET username = EXCLUDED.username, \
         display_name = EXCLUDED.display_name",
    )
    .bind(author.id)
    .bind(&author.username)
    .bind(&author.display_name)
    .execute(conn)
    .await
    .map_err(db_err("Failed to save author"))?;
    Ok(())
}

/// Authors whose username is in `usernames`.
pub async fn find_by_usernames(conn: &mut PgConnection, usernames: &[String]) -> AppResult<Vec<Author>> {
    sqlx::query_as::<_, Author>("SELECT * FROM authors WHERE username = ANY($1)")
        .bind(usernames)
        .fetch_all(conn)
        .await
        .map_err(db_err("Failed to find authors"))
}

/// Authors credited on an article.
pub async fn find_for_article(conn: &mut PgConnection, article: ArticleId) -> AppResult<Vec<Author>> {
    sqlx::query_as::<_, Author>(
        "SELECT a.* FROM authors a \
         INNER JOIN article_authors aa ON aa.author_id = a.id \
         WHERE aa.article_id = $1 ORDER BY aa.position ASC",
    )
    .bind(article)
    .fetch_all(conn)
    .await
    .map_err(db_err("Failed to load article authors"))
}

/// Replace the credited authors, keeping the given order.
pub async fn replace_for_article(
    conn: &mut PgConnection,
    article: ArticleId,
    authors: &[UserId],
) -> AppResult<()> {
    sqlx::query("DELETE FROM article_authors WHERE article_id = $1")
        .bind(article)
        .execute(&mut *conn)
        .await
        .map_err(db_err("Failed to clear article authors"))?;

    for (position, author) in authors.iter().enumerate() {
        sqlx::query("INSERT INTO article_authors (article_id, author_id, position) VALUES ($1, $2, $3)")
            .bind(article)
            .bind(author)
            .bind(position as i32)
            .execute(&mut *conn)
            .await
            .map_err(db_err("Failed to credit author"))?;
    }
    Ok(())
}
