//! `namespace_entries`: the shared (parent, token) slots.

use sqlx::PgConnection;

use inkpress_core::error::AppError;
use inkpress_core::result::AppResult;
use inkpress_core::types::id::{ArticleId, CategoryId};
use inkpress_core::types::join_path;
use inkpress_entity::namespace::{NamespaceEntry, Slot};

use crate::error::db_err;

/// Find the occupant of a slot.
pub async fn find(conn: &mut PgConnection, parent: CategoryId, token: &str) -> AppResult<Option<Slot>> {
    let entry = sqlx::query_as::<_, NamespaceEntry>(
        "SELECT * FROM namespace_entries WHERE parent_id = $1 AND token = $2",
    )
    .bind(parent)
    .bind(token)
    .fetch_optional(conn)
    .await
    .map_err(db_err("Failed to look up namespace slot"))?;

    Ok(entry.as_ref().and_then(NamespaceEntry::slot))
}

/// Claim a free slot for `occupant`, or fail with `NameConflict`.
pub async fn claim(
    conn: &mut PgConnection,
    parent: CategoryId,
    token: &str,
    occupant: Slot,
) -> AppResult<()> {
    let (category_id, article_id) = split(occupant);
    let inserted = sqlx::query(
        "INSERT INTO namespace_entries (parent_id, token, category_id, article_id) \
         VALUES ($1, $2, $3, $4) ON CONFLICT (parent_id, token) DO NOTHING",
    )
    .bind(parent)
    .bind(token)
    .bind(category_id)
    .bind(article_id)
    .execute(&mut *conn)
    .await
    .map_err(db_err("Failed to claim namespace slot"))?
    .rows_affected();

    if inserted == 0 {
        return Err(occupied(conn, parent, token).await);
    }
    Ok(())
}

/// Move the slot held by `occupant` to `(parent, token)`.
pub async fn relocate(
    conn: &mut PgConnection,
    occupant: Slot,
    parent: CategoryId,
    token: &str,
) -> AppResult<()> {
    if let Some(existing) = find(&mut *conn, parent, token).await? {
        if existing != occupant {
            return Err(occupied(conn, parent, token).await);
        }
        return Ok(());
    }

    let query = match occupant {
        Slot::Category(id) => sqlx::query(
            "UPDATE namespace_entries SET parent_id = $1, token = $2 WHERE category_id = $3",
        )
        .bind(parent)
        .bind(token)
        .bind(id),
        Slot::Article(id) => sqlx::query(
            "UPDATE namespace_entries SET parent_id = $1, token = $2 WHERE article_id = $3",
        )
        .bind(parent)
        .bind(token)
        .bind(id),
    };

    let updated = query
        .execute(&mut *conn)
        .await
        .map_err(db_err("Failed to move namespace slot"))?
        .rows_affected();

    if updated == 0 {
        return Err(AppError::internal(format!(
            "No namespace slot is held by {occupant:?}"
        )));
    }
    Ok(())
}

/// Release whatever slot `occupant` holds.
pub async fn release(conn: &mut PgConnection, occupant: Slot) -> AppResult<()> {
    let query = match occupant {
        Slot::Category(id) => {
            sqlx::query("DELETE FROM namespace_entries WHERE category_id = $1").bind(id)
        }
        Slot::Article(id) => {
            sqlx::query("DELETE FROM namespace_entries WHERE article_id = $1").bind(id)
        }
    };
    query
        .execute(conn)
        .await
        .map_err(db_err("Failed to release namespace slot"))?;
    Ok(())
}

fn split(slot: Slot) -> (Option<CategoryId>, Option<ArticleId>) {
    match slot {
        Slot::Category(id) => (Some(id), None),
        Slot::Article(id) => (None, Some(id)),
    }
}

/// Build the `NameConflict` for an occupied slot.
async fn occupied(conn: &mut PgConnection, parent: CategoryId, token: &str) -> AppError {
    let occupant = match find(&mut *conn, parent, token).await {
        Ok(Some(slot)) => slot.kind(),
        Ok(None) => {
            return AppError::write_conflict(format!(
                "Slot '{token}' changed concurrently, retry the operation"
            ));
        }
        Err(e) => return e,
    };

    let parent_url = sqlx::query_scalar::<_, Option<String>>(
        "SELECT cached_url FROM categories WHERE id = $1",
    )
    .bind(parent)
    .fetch_optional(conn)
    .await
    .ok()
    .flatten()
    .flatten();
    let path = match parent_url {
        Some(url) => join_path(&url, token),
        None => token.to_string(),
    };
    AppError::name_conflict(occupant, &path)
}
