//! Maintenance of the denormalized `cached_url` column.
//!
//! Structural writes recompute the cache for the whole affected subtree in
//! the same transaction. The traversal uses an explicit worklist of ids, so
//! depth is bounded by memory rather than by the call stack.

use serde::Serialize;
use tracing::{debug, info};

use inkpress_core::result::AppResult;
use inkpress_core::types::id::CategoryId;
use inkpress_core::types::{ROOT_PATH, join_path};
use inkpress_database::ContentTx;
use inkpress_entity::category::Category;

use super::resolver::{full_path, root};

/// Recompute `cached_url` for `top` and every descendant, given the live
/// path of `top`. Returns how many categories were written.
pub async fn recompute_subtree(
    tx: &mut dyn ContentTx,
    top: CategoryId,
    top_path: &str,
) -> AppResult<u64> {
    let mut worklist = vec![(top, top_path.to_string())];
    let mut updated = 0;

    while let Some((id, path)) = worklist.pop() {
        tx.set_cached_url(id, &path).await?;
        updated += 1;
        for child in tx.child_categories(id).await? {
            let child_path = join_path(&path, &child.directory_name);
            worklist.push((child.id, child_path));
        }
    }

    debug!(category_id = %top, path = %top_path, updated, "Recomputed cached paths");
    Ok(updated)
}

/// Recompute the subtree rooted at `category` from its live parent chain.
pub async fn refresh_subtree(tx: &mut dyn ContentTx, category: &Category) -> AppResult<String> {
    let path = full_path(tx, category).await?;
    recompute_subtree(tx, category.id, &path).await?;
    Ok(path)
}

/// A category whose cached path disagreed with its live path.
#[derive(Debug, Clone, Serialize)]
pub struct StaleEntry {
    /// The category.
    pub category_id: CategoryId,
    /// What the cache held.
    pub cached: Option<String>,
    /// The live path.
    pub live: String,
}

/// Result of comparing every cached path against the live tree.
#[derive(Debug, Clone, Serialize)]
pub struct CacheAudit {
    /// Categories visited.
    pub checked: u64,
    /// Entries that were stale.
    pub stale: Vec<StaleEntry>,
    /// Whether stale entries were rewritten.
    pub repaired: bool,
}

/// Walk the whole tree from the root, comparing each cached path with the
/// live one, and rewrite stale entries when `repair` is set.
pub async fn audit(tx: &mut dyn ContentTx, repair: bool) -> AppResult<CacheAudit> {
    let root = root(tx).await?;
    let mut worklist = vec![(root.clone(), ROOT_PATH.to_string())];
    let mut report = CacheAudit {
        checked: 0,
        stale: Vec::new(),
        repaired: repair,
    };

    while let Some((category, live)) = worklist.pop() {
        report.checked += 1;
        if category.cached_url.as_deref() != Some(live.as_str()) {
            if repair {
                tx.set_cached_url(category.id, &live).await?;
            }
            report.stale.push(StaleEntry {
                category_id: category.id,
                cached: category.cached_url.clone(),
                live: live.clone(),
            });
        }
        for child in tx.child_categories(category.id).await? {
            let child_path = join_path(&live, &child.directory_name);
            worklist.push((child, child_path));
        }
    }

    if !report.stale.is_empty() {
        info!(
            checked = report.checked,
            stale = report.stale.len(),
            repaired = repair,
            "Path cache audit found stale entries"
        );
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use inkpress_database::{ContentStore, TxMode};

    use super::*;
    use crate::namespace::testing::Fixture;

    #[tokio::test]
    async fn test_audit_repairs_stale_entries() {
        let fx = Fixture::new().await;
        let created = fx.categories(&["/a", "/a/b", "/a/b/c"]).await;

        let mut tx = fx.store.begin(TxMode::ReadWrite).await.expect("begin");
        tx.set_cached_url(created[1].id, "/wrong").await.expect("set");
        tx.set_cached_url(created[2].id, "/wrong/c").await.expect("set");

        let report = audit(tx.as_mut(), false).await.expect("audit");
        assert_eq!(report.checked, 4);
        assert_eq!(report.stale.len(), 2);

        let report = audit(tx.as_mut(), true).await.expect("repair");
        assert_eq!(report.stale.len(), 2);
        let clean = audit(tx.as_mut(), false).await.expect("audit");
        assert!(clean.stale.is_empty());

        let c = tx.category_by_id(created[2].id).await.expect("load").expect("exists");
        assert_eq!(c.cached_url.as_deref(), Some("/a/b/c"));
    }

    #[tokio::test]
    async fn test_recompute_subtree_rewrites_descendants() {
        let fx = Fixture::new().await;
        let created = fx.categories(&["/a", "/a/b", "/a/b/c", "/a/d"]).await;

        let mut tx = fx.store.begin(TxMode::ReadWrite).await.expect("begin");
        let updated = recompute_subtree(tx.as_mut(), created[0].id, "/moved")
            .await
            .expect("recompute");
        assert_eq!(updated, 4);

        let c = tx.category_by_id(created[2].id).await.expect("load").expect("exists");
        assert_eq!(c.cached_url.as_deref(), Some("/moved/b/c"));
        let found = tx
            .category_by_cached_url("/moved/d")
            .await
            .expect("lookup")
            .expect("indexed");
        assert_eq!(found.id, created[3].id);
    }
}
