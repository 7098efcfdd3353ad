//! Moving and renaming categories.

use std::collections::HashSet;

use tracing::info;

use inkpress_core::AppError;
use inkpress_core::result::AppResult;
use inkpress_core::types::{ContentPath, ensure_valid_token, join_path};
use inkpress_database::ContentTx;
use inkpress_entity::category::Category;
use inkpress_entity::namespace::Slot;

use super::cache::recompute_subtree;
use super::conflict::assert_no_conflict;
use super::resolver::{full_path, resolve_category};

/// Move `category` under the category at `new_parent_path`, keeping its
/// directory name. Moving a category to its current parent is a no-op.
pub async fn reparent(
    tx: &mut dyn ContentTx,
    category: &Category,
    new_parent_path: &ContentPath,
) -> AppResult<Category> {
    let target = resolve_category(tx, new_parent_path).await?;
    relocate(tx, category, &target, &category.directory_name).await
}

/// Place `category` at `(target, token)` and recompute the cached path of
/// the category and all of its descendants.
///
/// Rejects moves of the root, moves into the category itself or one of its
/// descendants (`Cycle`), and occupied destination slots (`NameConflict`).
/// Callers must drop the transaction on error so that nothing is half
/// applied.
pub async fn relocate(
    tx: &mut dyn ContentTx,
    category: &Category,
    target: &Category,
    token: &str,
) -> AppResult<Category> {
    if category.is_root() {
        return Err(AppError::validation(
            "The root category cannot be moved or renamed",
        ));
    }
    ensure_valid_token(token, "directory name")?;
    ensure_not_within(tx, category, target).await?;

    if category.parent_id == Some(target.id) && category.directory_name == token {
        return Ok(category.clone());
    }

    let target_path = full_path(tx, target).await?;
    assert_no_conflict(
        tx,
        target,
        &target_path,
        token,
        Some(Slot::Category(category.id)),
    )
    .await?;

    tx.relocate_category(category.id, target.id, token).await?;
    let new_path = join_path(&target_path, token);
    let updated = recompute_subtree(tx, category.id, &new_path).await?;

    info!(
        category_id = %category.id,
        from = category.cached_url.as_deref().unwrap_or_default(),
        to = %new_path,
        updated,
        "Category relocated"
    );

    tx.category_by_id(category.id)
        .await?
        .ok_or_else(|| AppError::internal(format!("Category {} vanished during move", category.id)))
}

/// Walk the ancestor chain of `target` (inclusive) and fail with `Cycle` if
/// `moving` is on it.
async fn ensure_not_within(
    tx: &mut dyn ContentTx,
    moving: &Category,
    target: &Category,
) -> AppResult<()> {
    let mut seen = HashSet::new();
    let mut current = Some(target.clone());

    while let Some(node) = current {
        if node.id == moving.id {
            return Err(AppError::cycle(format!(
                "Cannot move '{}' into itself or one of its descendants",
                moving.cached_url.as_deref().unwrap_or(&moving.directory_name)
            )));
        }
        if !seen.insert(node.id) {
            return Err(AppError::internal(format!(
                "Category {} has a cyclic parent chain",
                node.id
            )));
        }
        current = match node.parent_id {
            Some(parent) => tx.category_by_id(parent).await?,
            None => None,
        };
    }
    Ok(())
}
