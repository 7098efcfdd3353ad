//! `categories` table.

use sqlx::PgConnection;

use inkpress_core::result::AppResult;
use inkpress_core::types::id::CategoryId;
use inkpress_entity::category::{Category, NewCategory};

use crate::error::db_err;

/// Find the root category.
pub async fn find_root(conn: &mut PgConnection) -> AppResult<Option<Category>> {
    sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE parent_id IS NULL")
        .fetch_optional(conn)
        .await
        .map_err(db_err("Failed to find root category"))
}

/// Find a category by id.
pub async fn find_by_id(conn: &mut PgConnection, id: CategoryId) -> AppResult<Option<Category>> {
    sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
        .bind(id)
        .fetch_optional(conn)
        .await
        .map_err(db_err("Failed to find category"))
}

/// Find a category by cached path.
pub async fn find_by_cached_url(conn: &mut PgConnection, url: &str) -> AppResult<Option<Category>> {
    sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE cached_url = $1 LIMIT 1")
        .bind(url)
        .fetch_optional(conn)
        .await
        .map_err(db_err("Failed to find category by path"))
}

/// Direct children ordered by name.
pub async fn find_children(conn: &mut PgConnection, parent: CategoryId) -> AppResult<Vec<Category>> {
    sqlx::query_as::<_, Category>(
        "SELECT * FROM categories WHERE parent_id = $1 ORDER BY name ASC, id ASC",
    )
    .bind(parent)
    .fetch_all(conn)
    .await
    .map_err(db_err("Failed to list child categories"))
}

/// Every category.
pub async fn find_all(conn: &mut PgConnection) -> AppResult<Vec<Category>> {
    sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY name ASC, id ASC")
        .fetch_all(conn)
        .await
        .map_err(db_err("Failed to list categories"))
}

/// Insert a category row with a fresh id.
pub async fn insert(conn: &mut PgConnection, id: CategoryId, data: &NewCategory) -> AppResult<Category> {
    sqlx::query_as::<_, Category>(
        "INSERT INTO categories \
         (id, parent_id, name, directory_name, description, view_type, sorting_type, cached_url) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
    )
    .bind(id)
    .bind(data.parent_id)
    .bind(&data.name)
    .bind(&data.directory_name)
    .bind(&data.description)
    .bind(data.view_type)
    .bind(data.sorting_type)
    .bind(&data.cached_url)
    .fetch_one(conn)
    .await
    .map_err(db_err("Failed to insert category"))
}

/// Persist metadata fields.
pub async fn update_metadata(conn: &mut PgConnection, category: &Category) -> AppResult<()> {
    sqlx::query(
        "UPDATE categories SET name = $2, description = $3, view_type = $4, sorting_type = $5, \
         updated_at = NOW() WHERE id = $1",
    )
    .bind(category.id)
    .bind(&category.name)
    .bind(&category.description)
    .bind(category.view_type)
    .bind(category.sorting_type)
    .execute(conn)
    .await
    .map_err(db_err("Failed to update category"))?;
    Ok(())
}

/// Change parent and directory name.
pub async fn set_position(
    conn: &mut PgConnection,
    id: CategoryId,
    parent: CategoryId,
    directory_name: &str,
) -> AppResult<()> {
    sqlx::query(
        "UPDATE categories SET parent_id = $2, directory_name = $3, updated_at = NOW() \
         WHERE id = $1",
    )
    .bind(id)
    .bind(parent)
    .bind(directory_name)
    .execute(conn)
    .await
    .map_err(db_err("Failed to move category"))?;
    Ok(())
}

/// Overwrite the cached path.
pub async fn set_cached_url(conn: &mut PgConnection, id: CategoryId, url: &str) -> AppResult<()> {
    sqlx::query("UPDATE categories SET cached_url = $2 WHERE id = $1")
        .bind(id)
        .bind(url)
        .execute(conn)
        .await
        .map_err(db_err("Failed to update cached path"))?;
    Ok(())
}

/// Whether a category still owns children or articles.
pub async fn has_contents(conn: &mut PgConnection, id: CategoryId) -> AppResult<bool> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM namespace_entries WHERE parent_id = $1)")
        .bind(id)
        .fetch_one(conn)
        .await
        .map_err(db_err("Failed to inspect category contents"))
}

/// Delete a category row.
pub async fn delete(conn: &mut PgConnection, id: CategoryId) -> AppResult<()> {
    sqlx::query("DELETE FROM categories WHERE id = $1")
        .bind(id)
        .execute(conn)
        .await
        .map_err(db_err("Failed to delete category"))?;
    Ok(())
}
