//! Slot conflict checks run before creates, renames and moves.

use inkpress_core::AppError;
use inkpress_core::result::AppResult;
use inkpress_core::types::join_path;
use inkpress_database::ContentTx;
use inkpress_entity::category::Category;
use inkpress_entity::namespace::Slot;

/// Fail with `NameConflict` if `token` is already taken under `parent` by
/// anything other than `current`.
///
/// `parent_path` is only used for the error message. The store re-checks
/// the slot on write, so this must run in the same transaction as the write
/// it guards.
pub async fn assert_no_conflict(
    tx: &mut dyn ContentTx,
    parent: &Category,
    parent_path: &str,
    token: &str,
    current: Option<Slot>,
) -> AppResult<()> {
    match tx.slot(parent.id, token).await? {
        Some(occupant) if Some(occupant) != current => Err(AppError::name_conflict(
            occupant.kind(),
            &join_path(parent_path, token),
        )),
        _ => Ok(()),
    }
}
