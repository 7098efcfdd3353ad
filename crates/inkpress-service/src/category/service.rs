//! Category creation, lookup, editing, moving and deletion.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use inkpress_core::AppError;
use inkpress_core::config::{CategoryDeletePolicy, ContentConfig};
use inkpress_core::result::AppResult;
use inkpress_core::traits::CommentCascade;
use inkpress_core::types::id::{ArticleId, CategoryId};
use inkpress_core::types::{ContentPath, PageResponse, ROOT_PATH, ensure_valid_token, join_path};
use inkpress_database::{ContentStore, ContentTx, TxMode};
use inkpress_entity::article::Article;
use inkpress_entity::category::{
    Category, CategoryNode, CategoryPatch, CategoryViewType, NewCategory, SortingType,
};
use inkpress_entity::user::principal::is_privileged;
use inkpress_entity::user::{Principal, UserRole};

use super::view::CategoryView;
use crate::namespace::cache::{self, CacheAudit};
use crate::namespace::ordering::{self, ArticleListing};
use crate::namespace::{assert_no_conflict, full_path, relocate, reparent, resolve_category};
use crate::retry::with_write_retries;

/// Request to create a category under an existing parent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateCategory {
    /// Path token of the new category.
    pub directory_name: String,
    /// Display title.
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Layout, defaults to vertical.
    #[serde(default)]
    pub view_type: Option<CategoryViewType>,
    /// Ordering policy, defaults to chronological.
    #[serde(default)]
    pub sorting_type: Option<SortingType>,
}

/// Partial update of a category. Renames and moves are conflict-checked
/// and recompute the cached paths of the whole subtree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCategory {
    /// New display title.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New layout.
    pub view_type: Option<CategoryViewType>,
    /// New ordering policy.
    pub sorting_type: Option<SortingType>,
    /// New path token (rename).
    pub directory_name: Option<String>,
    /// Path of the new parent (move).
    pub parent_path: Option<String>,
}

impl UpdateCategory {
    fn patch(&self) -> CategoryPatch {
        CategoryPatch {
            name: self.name.clone(),
            description: self.description.clone(),
            view_type: self.view_type,
            sorting_type: self.sorting_type,
        }
    }

    fn moves(&self) -> bool {
        self.directory_name.is_some() || self.parent_path.is_some()
    }
}

/// What a category deletion removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeleteSummary {
    /// Categories removed, including the target.
    pub categories: u64,
    /// Articles removed.
    pub articles: u64,
}

/// Manages the category tree.
#[derive(Debug, Clone)]
pub struct CategoryService {
    store: Arc<dyn ContentStore>,
    comments: Arc<dyn CommentCascade>,
    config: ContentConfig,
}

impl CategoryService {
    /// Creates a new category service.
    pub fn new(
        store: Arc<dyn ContentStore>,
        comments: Arc<dyn CommentCascade>,
        config: ContentConfig,
    ) -> Self {
        Self {
            store,
            comments,
            config,
        }
    }

    /// Create the root category if it does not exist and make sure its
    /// cached path is `/`. Startup must abort if this fails.
    pub async fn bootstrap_root(&self) -> AppResult<Category> {
        with_write_retries(self.config.max_write_retries, "bootstrap_root", move || {
            self.bootstrap_root_once()
        })
        .await
    }

    async fn bootstrap_root_once(&self) -> AppResult<Category> {
        let mut tx = self.store.begin(TxMode::ReadWrite).await?;
        let root = match tx.root_category().await? {
            Some(root) => {
                if root.cached_url.as_deref() != Some(ROOT_PATH) {
                    tx.set_cached_url(root.id, ROOT_PATH).await?;
                }
                root
            }
            None => {
                let root = tx.insert_category(&NewCategory::root()).await?;
                info!(category_id = %root.id, "Root category created");
                root
            }
        };
        tx.commit().await?;
        Ok(root)
    }

    /// Resolve a category path.
    pub async fn resolve(&self, path: &str) -> AppResult<Category> {
        let path = ContentPath::parse(path)?;
        let mut tx = self.store.begin(TxMode::ReadOnly).await?;
        resolve_category(tx.as_mut(), &path).await
    }

    /// The category at `path` with its subcategories and ordered articles.
    pub async fn get_category(
        &self,
        principal: Option<&Principal>,
        path: &str,
        listing: ArticleListing,
    ) -> AppResult<CategoryView> {
        let path = ContentPath::parse(path)?;
        let listing = self.clamp(listing);
        let mut tx = self.store.begin(TxMode::ReadOnly).await?;

        let category = resolve_category(tx.as_mut(), &path).await?;
        let live_path = full_path(tx.as_mut(), &category).await?;
        let subcategories = ordering::list_subcategories(tx.as_mut(), &category).await?;
        let articles =
            ordering::list_articles(tx.as_mut(), &category, &listing, is_privileged(principal))
                .await?;

        Ok(CategoryView {
            category,
            path: live_path,
            subcategories,
            articles,
        })
    }

    /// The ordered, windowed articles of the category at `path`, together
    /// with the category and its live path.
    pub async fn list_articles(
        &self,
        principal: Option<&Principal>,
        path: &str,
        listing: ArticleListing,
    ) -> AppResult<(Category, String, PageResponse<Article>)> {
        let path = ContentPath::parse(path)?;
        let listing = self.clamp(listing);
        let mut tx = self.store.begin(TxMode::ReadOnly).await?;

        let category = resolve_category(tx.as_mut(), &path).await?;
        let live_path = full_path(tx.as_mut(), &category).await?;
        let articles =
            ordering::list_articles(tx.as_mut(), &category, &listing, is_privileged(principal))
                .await?;
        Ok((category, live_path, articles))
    }

    /// Create a category under the category at `parent_path`.
    pub async fn create_category(
        &self,
        principal: &Principal,
        parent_path: &str,
        req: CreateCategory,
    ) -> AppResult<Category> {
        principal.require(UserRole::Editor, "create categories")?;
        ensure_valid_token(&req.directory_name, "directory name")?;
        if req.name.trim().is_empty() {
            return Err(AppError::validation("Category name cannot be empty"));
        }
        let parent_path = ContentPath::parse(parent_path)?;

        let (parent_path, req) = (&parent_path, &req);
        let category = with_write_retries(self.config.max_write_retries, "create_category", move || {
            self.create_category_once(parent_path, req)
        })
        .await?;

        info!(
            user_id = %principal.user_id,
            category_id = %category.id,
            path = category.cached_url.as_deref().unwrap_or_default(),
            "Category created"
        );
        Ok(category)
    }

    async fn create_category_once(
        &self,
        parent_path: &ContentPath,
        req: &CreateCategory,
    ) -> AppResult<Category> {
        let mut tx = self.store.begin(TxMode::ReadWrite).await?;
        let parent = resolve_category(tx.as_mut(), parent_path).await?;
        let parent_live = full_path(tx.as_mut(), &parent).await?;
        assert_no_conflict(tx.as_mut(), &parent, &parent_live, &req.directory_name, None).await?;

        let category = tx
            .insert_category(&NewCategory {
                parent_id: Some(parent.id),
                name: req.name.clone(),
                directory_name: req.directory_name.clone(),
                description: req.description.clone(),
                view_type: req.view_type.unwrap_or_default(),
                sorting_type: req.sorting_type.unwrap_or_default(),
                cached_url: Some(join_path(&parent_live, &req.directory_name)),
            })
            .await?;
        tx.commit().await?;
        Ok(category)
    }

    /// Update metadata, rename and/or move the category at `path` in a
    /// single transaction.
    pub async fn update_category(
        &self,
        principal: &Principal,
        path: &str,
        req: UpdateCategory,
    ) -> AppResult<Category> {
        principal.require(UserRole::Editor, "edit categories")?;
        if let Some(token) = &req.directory_name {
            ensure_valid_token(token, "directory name")?;
        }
        if req.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(AppError::validation("Category name cannot be empty"));
        }
        let path = ContentPath::parse(path)?;
        let parent_path = req
            .parent_path
            .as_deref()
            .map(ContentPath::parse)
            .transpose()?;

        let (path_ref, parent_ref, req_ref) = (&path, parent_path.as_ref(), &req);
        let category = with_write_retries(self.config.max_write_retries, "update_category", move || {
            self.update_category_once(path_ref, parent_ref, req_ref)
        })
        .await?;

        info!(
            user_id = %principal.user_id,
            category_id = %category.id,
            path = category.cached_url.as_deref().unwrap_or_default(),
            "Category updated"
        );
        Ok(category)
    }

    async fn update_category_once(
        &self,
        path: &ContentPath,
        parent_path: Option<&ContentPath>,
        req: &UpdateCategory,
    ) -> AppResult<Category> {
        let mut tx = self.store.begin(TxMode::ReadWrite).await?;
        let mut category = resolve_category(tx.as_mut(), path).await?;

        let patch = req.patch();
        if !patch.is_empty() {
            patch.apply_to(&mut category);
            tx.update_category(&category).await?;
        }

        if req.moves() {
            let target = match parent_path {
                Some(parent_path) => resolve_category(tx.as_mut(), parent_path).await?,
                None => parent_of(tx.as_mut(), &category).await?,
            };
            let token = req
                .directory_name
                .clone()
                .unwrap_or_else(|| category.directory_name.clone());
            category = relocate(tx.as_mut(), &category, &target, &token).await?;
        }

        tx.commit().await?;
        Ok(category)
    }

    /// Move the category at `path` under the category at `new_parent_path`.
    pub async fn reparent_category(
        &self,
        principal: &Principal,
        path: &str,
        new_parent_path: &str,
    ) -> AppResult<Category> {
        principal.require(UserRole::Editor, "move categories")?;
        let path = ContentPath::parse(path)?;
        let new_parent_path = ContentPath::parse(new_parent_path)?;

        let (path_ref, target) = (&path, &new_parent_path);
        let moved = with_write_retries(self.config.max_write_retries, "reparent_category", move || {
            self.reparent_once(path_ref, target)
        })
        .await?;

        info!(
            user_id = %principal.user_id,
            category_id = %moved.id,
            from = %path,
            to = moved.cached_url.as_deref().unwrap_or_default(),
            "Category moved"
        );
        Ok(moved)
    }

    async fn reparent_once(
        &self,
        path: &ContentPath,
        new_parent_path: &ContentPath,
    ) -> AppResult<Category> {
        let mut tx = self.store.begin(TxMode::ReadWrite).await?;
        let category = resolve_category(tx.as_mut(), path).await?;
        let moved = reparent(tx.as_mut(), &category, new_parent_path).await?;
        tx.commit().await?;
        Ok(moved)
    }

    /// Delete the category at `path` according to the configured policy.
    ///
    /// Under `cascade` every descendant category and every article in the
    /// subtree goes too, and the comment collaborator is told about each
    /// deleted article once the transaction has committed.
    pub async fn delete_category(&self, principal: &Principal, path: &str) -> AppResult<DeleteSummary> {
        principal.require(UserRole::Admin, "delete categories")?;
        let path = ContentPath::parse(path)?;

        let (summary, deleted_articles) =
            with_write_retries(self.config.max_write_retries, "delete_category", {
                let path = &path;
                move || self.delete_category_once(path)
            })
            .await?;

        for article_id in deleted_articles {
            if let Err(e) = self.comments.article_deleted(article_id).await {
                warn!(article_id = %article_id, error = %e, "Failed to cascade comment deletion");
            }
        }

        info!(
            user_id = %principal.user_id,
            path = %path,
            categories = summary.categories,
            articles = summary.articles,
            "Category deleted"
        );
        Ok(summary)
    }

    async fn delete_category_once(
        &self,
        path: &ContentPath,
    ) -> AppResult<(DeleteSummary, Vec<ArticleId>)> {
        let mut tx = self.store.begin(TxMode::ReadWrite).await?;
        let category = resolve_category(tx.as_mut(), path).await?;
        if category.is_root() {
            return Err(AppError::validation("The root category cannot be deleted"));
        }

        // Parents precede their children in `subtree`.
        let mut subtree = vec![category.id];
        let mut cursor = 0;
        while cursor < subtree.len() {
            let children = tx.child_categories(subtree[cursor]).await?;
            subtree.extend(children.into_iter().map(|c| c.id));
            cursor += 1;
        }

        let mut articles = Vec::new();
        for id in &subtree {
            articles.extend(tx.articles_in(*id).await?.into_iter().map(|a| a.id));
        }

        if self.config.category_delete_policy == CategoryDeletePolicy::RejectNonEmpty
            && (subtree.len() > 1 || !articles.is_empty())
        {
            return Err(AppError::conflict(format!(
                "Category '{path}' is not empty: it has {} subcategories and {} articles",
                subtree.len() - 1,
                articles.len()
            )));
        }

        for article_id in &articles {
            tx.delete_article(*article_id).await?;
        }
        for id in subtree.iter().rev() {
            tx.delete_category(*id).await?;
        }
        tx.commit().await?;

        let summary = DeleteSummary {
            categories: subtree.len() as u64,
            articles: articles.len() as u64,
        };
        Ok((summary, articles))
    }

    /// The whole namespace as a tree rooted at `/`.
    pub async fn tree(&self) -> AppResult<CategoryNode> {
        let mut tx = self.store.begin(TxMode::ReadOnly).await?;
        let categories = tx.all_categories().await?;

        let mut counts = HashMap::with_capacity(categories.len());
        for category in &categories {
            counts.insert(category.id, tx.count_articles_in(category.id).await?);
        }

        let mut by_parent: HashMap<Option<CategoryId>, Vec<Category>> = HashMap::new();
        for category in categories {
            by_parent.entry(category.parent_id).or_default().push(category);
        }
        for siblings in by_parent.values_mut() {
            siblings.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        }

        let root = by_parent
            .get_mut(&None)
            .and_then(Vec::pop)
            .ok_or_else(|| AppError::internal("The root category does not exist"))?;
        Ok(build_node(root, ROOT_PATH.to_string(), &mut by_parent, &counts))
    }

    /// Every category, ordered by name.
    pub async fn list_all(&self) -> AppResult<Vec<Category>> {
        let mut tx = self.store.begin(TxMode::ReadOnly).await?;
        tx.all_categories().await
    }

    /// Recompute every cached path from the live tree.
    pub async fn rebuild_path_cache(&self, principal: &Principal) -> AppResult<CacheAudit> {
        principal.require(UserRole::Admin, "rebuild the path cache")?;

        let report = with_write_retries(self.config.max_write_retries, "rebuild_path_cache", move || {
            self.rebuild_once()
        })
        .await?;

        info!(
            user_id = %principal.user_id,
            checked = report.checked,
            stale = report.stale.len(),
            "Path cache rebuilt"
        );
        Ok(report)
    }

    async fn rebuild_once(&self) -> AppResult<CacheAudit> {
        let mut tx = self.store.begin(TxMode::ReadWrite).await?;
        let report = cache::audit(tx.as_mut(), true).await?;
        tx.commit().await?;
        Ok(report)
    }

    fn clamp(&self, listing: ArticleListing) -> ArticleListing {
        ArticleListing {
            page: listing
                .page
                .clamped(self.config.default_page_size, self.config.max_page_size),
            ..listing
        }
    }
}

async fn parent_of(tx: &mut dyn ContentTx, category: &Category) -> AppResult<Category> {
    let Some(parent_id) = category.parent_id else {
        return Err(AppError::validation(
            "The root category cannot be moved or renamed",
        ));
    };
    tx.category_by_id(parent_id)
        .await?
        .ok_or_else(|| AppError::internal(format!("Parent category {parent_id} is missing")))
}

fn build_node(
    category: Category,
    path: String,
    by_parent: &mut HashMap<Option<CategoryId>, Vec<Category>>,
    counts: &HashMap<CategoryId, u64>,
) -> CategoryNode {
    let children = by_parent.remove(&Some(category.id)).unwrap_or_default();
    let children = children
        .into_iter()
        .map(|child| {
            let child_path = join_path(&path, &child.directory_name);
            build_node(child, child_path, by_parent, counts)
        })
        .collect();

    CategoryNode {
        id: category.id,
        article_count: counts.get(&category.id).copied().unwrap_or(0),
        name: category.name,
        directory_name: category.directory_name,
        path,
        children,
    }
}

#[cfg(test)]
mod tests {
    use inkpress_core::error::ErrorKind;
    use inkpress_core::types::id::UserId;
    use inkpress_core::types::{EntityKind, PageRequest};
    use inkpress_database::{MemoryCommentCascade, MemoryContentStore};

    use super::*;

    struct Harness {
        service: CategoryService,
        store: Arc<MemoryContentStore>,
        comments: Arc<MemoryCommentCascade>,
    }

    async fn harness(policy: CategoryDeletePolicy) -> Harness {
        let store = Arc::new(MemoryContentStore::new());
        let comments = Arc::new(MemoryCommentCascade::new());
        let config = ContentConfig {
            category_delete_policy: policy,
            ..ContentConfig::default()
        };
        let service = CategoryService::new(store.clone(), comments.clone(), config);
        service.bootstrap_root().await.expect("bootstrap");
        Harness {
            service,
            store,
            comments,
        }
    }

    fn admin() -> Principal {
        Principal::new(UserId::new(), "root", UserRole::Admin)
    }

    fn reader() -> Principal {
        Principal::new(UserId::new(), "guest", UserRole::Reader)
    }

    fn new_category(token: &str) -> CreateCategory {
        CreateCategory {
            directory_name: token.to_string(),
            name: token.to_string(),
            ..CreateCategory::default()
        }
    }

    #[tokio::test]
    async fn test_bootstrap_is_idempotent() {
        let h = harness(CategoryDeletePolicy::Cascade).await;
        let again = h.service.bootstrap_root().await.expect("second bootstrap");
        assert_eq!(again.cached_url.as_deref(), Some("/"));
        assert_eq!(h.service.list_all().await.expect("list").len(), 1);
    }

    #[tokio::test]
    async fn test_create_and_resolve_nested() {
        let h = harness(CategoryDeletePolicy::Cascade).await;
        h.service
            .create_category(&admin(), "/", new_category("blog"))
            .await
            .expect("create /blog");
        let child = h
            .service
            .create_category(&admin(), "/blog", new_category("rust"))
            .await
            .expect("create /blog/rust");
        assert_eq!(child.cached_url.as_deref(), Some("/blog/rust"));

        let found = h.service.resolve("/blog/rust").await.expect("resolve");
        assert_eq!(found.id, child.id);
    }

    #[tokio::test]
    async fn test_create_validates_input_and_role() {
        let h = harness(CategoryDeletePolicy::Cascade).await;

        let err = h
            .service
            .create_category(&admin(), "/", new_category("no spaces"))
            .await
            .expect_err("bad token");
        assert_eq!(err.kind, ErrorKind::InvalidName);

        let err = h
            .service
            .create_category(&reader(), "/", new_category("blog"))
            .await
            .expect_err("reader");
        assert_eq!(err.kind, ErrorKind::Authorization);

        let err = h
            .service
            .create_category(&admin(), "/missing", new_category("blog"))
            .await
            .expect_err("no parent");
        assert_eq!(err.kind, ErrorKind::PathNotFound);
    }

    #[tokio::test]
    async fn test_duplicate_sibling_is_a_conflict() {
        let h = harness(CategoryDeletePolicy::Cascade).await;
        h.service
            .create_category(&admin(), "/", new_category("blog"))
            .await
            .expect("first");
        let err = h
            .service
            .create_category(&admin(), "/", new_category("blog"))
            .await
            .expect_err("second");
        assert_eq!(err.conflict_occupant(), Some(EntityKind::Category));
        assert!(err.message.contains("category already exists"));
    }

    #[tokio::test]
    async fn test_concurrent_creates_of_same_path_admit_one() {
        let h = harness(CategoryDeletePolicy::Cascade).await;
        let service = Arc::new(h.service.clone());

        let mut handles = Vec::new();
        for _ in 0..8 {
            let service = Arc::clone(&service);
            handles.push(tokio::spawn(async move {
                service
                    .create_category(&admin(), "/", new_category("race"))
                    .await
            }));
        }

        let mut created = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.expect("task") {
                Ok(_) => created += 1,
                Err(e) if e.conflict_occupant().is_some() => conflicts += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
        assert_eq!(created, 1);
        assert_eq!(conflicts, 7);
    }

    #[tokio::test]
    async fn test_update_renames_and_moves_in_one_call() {
        let h = harness(CategoryDeletePolicy::Cascade).await;
        for (parent, token) in [("/", "a"), ("/a", "b"), ("/a/b", "c"), ("/", "x")] {
            h.service
                .create_category(&admin(), parent, new_category(token))
                .await
                .expect("create");
        }

        let updated = h
            .service
            .update_category(
                &admin(),
                "/a/b",
                UpdateCategory {
                    name: Some("Bee".into()),
                    directory_name: Some("bee".into()),
                    parent_path: Some("/x".into()),
                    ..UpdateCategory::default()
                },
            )
            .await
            .expect("update");
        assert_eq!(updated.name, "Bee");
        assert_eq!(updated.cached_url.as_deref(), Some("/x/bee"));

        let c = h.service.resolve("/x/bee/c").await.expect("descendant moved");
        assert_eq!(c.cached_url.as_deref(), Some("/x/bee/c"));
        let err = h.service.resolve("/a/b/c").await.expect_err("old path");
        assert_eq!(err.kind, ErrorKind::PathNotFound);
    }

    #[tokio::test]
    async fn test_root_cannot_be_renamed_or_deleted() {
        let h = harness(CategoryDeletePolicy::Cascade).await;
        let err = h
            .service
            .update_category(
                &admin(),
                "/",
                UpdateCategory {
                    directory_name: Some("home".into()),
                    ..UpdateCategory::default()
                },
            )
            .await
            .expect_err("rename root");
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = h.service.delete_category(&admin(), "/").await.expect_err("delete root");
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_reparent_cycle_scenario() {
        let h = harness(CategoryDeletePolicy::Cascade).await;
        h.service
            .create_category(&admin(), "/", new_category("a"))
            .await
            .expect("create /a");
        h.service
            .create_category(&admin(), "/a", new_category("b"))
            .await
            .expect("create /a/b");

        let err = h
            .service
            .reparent_category(&admin(), "/a/b", "/a/b")
            .await
            .expect_err("cycle");
        assert_eq!(err.kind, ErrorKind::Cycle);
    }

    #[tokio::test]
    async fn test_cascade_delete_removes_subtree_and_notifies_comments() {
        let h = harness(CategoryDeletePolicy::Cascade).await;
        h.service
            .create_category(&admin(), "/", new_category("a"))
            .await
            .expect("create");
        let b = h
            .service
            .create_category(&admin(), "/a", new_category("b"))
            .await
            .expect("create");

        let mut tx = h.store.begin(TxMode::ReadWrite).await.expect("begin");
        let article = tx
            .insert_article(&inkpress_entity::article::NewArticle {
                category_id: b.id,
                filename: "post".into(),
                title: "Post".into(),
                summary: String::new(),
                content: String::new(),
                publish_time: None,
                is_visible: true,
                view_type: Default::default(),
                can_comment: true,
                show_authors: true,
                category_sorting_index: 0,
                featured_image_id: None,
            })
            .await
            .expect("article");
        tx.commit().await.expect("commit");

        let summary = h.service.delete_category(&admin(), "/a").await.expect("delete");
        assert_eq!(summary, DeleteSummary { categories: 2, articles: 1 });
        assert_eq!(h.comments.deleted().await, vec![article.id]);

        let err = h.service.resolve("/a/b").await.expect_err("gone");
        assert_eq!(err.kind, ErrorKind::PathNotFound);
        assert_eq!(h.service.list_all().await.expect("list").len(), 1);
    }

    #[tokio::test]
    async fn test_reject_non_empty_policy() {
        let h = harness(CategoryDeletePolicy::RejectNonEmpty).await;
        h.service
            .create_category(&admin(), "/", new_category("a"))
            .await
            .expect("create");
        h.service
            .create_category(&admin(), "/a", new_category("b"))
            .await
            .expect("create");

        let err = h.service.delete_category(&admin(), "/a").await.expect_err("non-empty");
        assert_eq!(err.kind, ErrorKind::Conflict);

        let summary = h.service.delete_category(&admin(), "/a/b").await.expect("leaf");
        assert_eq!(summary.categories, 1);

        let err = h
            .service
            .delete_category(&Principal::new(UserId::new(), "ed", UserRole::Editor), "/a")
            .await
            .expect_err("editors cannot delete");
        assert_eq!(err.kind, ErrorKind::Authorization);
    }

    #[tokio::test]
    async fn test_listing_without_limit_uses_default_window() {
        let store = Arc::new(MemoryContentStore::new());
        let config = ContentConfig {
            default_page_size: 2,
            max_page_size: 3,
            ..ContentConfig::default()
        };
        let service =
            CategoryService::new(store.clone(), Arc::new(MemoryCommentCascade::new()), config);
        service.bootstrap_root().await.expect("bootstrap");
        let docs = service
            .create_category(
                &admin(),
                "/",
                CreateCategory {
                    sorting_type: Some(SortingType::Manual),
                    ..new_category("docs")
                },
            )
            .await
            .expect("create");

        let mut tx = store.begin(TxMode::ReadWrite).await.expect("begin");
        for index in 0..5 {
            tx.insert_article(&inkpress_entity::article::NewArticle {
                category_id: docs.id,
                filename: format!("page{index}"),
                title: format!("Page {index}"),
                summary: String::new(),
                content: String::new(),
                publish_time: None,
                is_visible: true,
                view_type: Default::default(),
                can_comment: false,
                show_authors: true,
                category_sorting_index: index,
                featured_image_id: None,
            })
            .await
            .expect("article");
        }
        tx.commit().await.expect("commit");

        let (_, _, page) = service
            .list_articles(None, "/docs", ArticleListing::default())
            .await
            .expect("default window");
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total_items, 5);
        assert_eq!(page.limit, Some(2));

        let listing = ArticleListing {
            page: PageRequest::new(Some(50), 0),
            ..ArticleListing::default()
        };
        let (_, _, page) = service
            .list_articles(None, "/docs", listing)
            .await
            .expect("capped window");
        assert_eq!(page.items.len(), 3);

        let listing = ArticleListing {
            page: PageRequest::new(None, 4),
            ..ArticleListing::default()
        };
        let (_, _, page) = service
            .list_articles(None, "/docs", listing)
            .await
            .expect("last page");
        let names: Vec<&str> = page.items.iter().map(|a| a.filename.as_str()).collect();
        assert_eq!(names, ["page4"]);
    }

    #[tokio::test]
    async fn test_tree_is_name_ordered_with_paths() {
        let h = harness(CategoryDeletePolicy::Cascade).await;
        for (parent, token, name) in [
            ("/", "zeta", "Zeta"),
            ("/", "alpha", "Alpha"),
            ("/alpha", "inner", "Inner"),
        ] {
            h.service
                .create_category(
                    &admin(),
                    parent,
                    CreateCategory {
                        directory_name: token.into(),
                        name: name.into(),
                        ..CreateCategory::default()
                    },
                )
                .await
                .expect("create");
        }

        let tree = h.service.tree().await.expect("tree");
        assert_eq!(tree.path, "/");
        let names: Vec<&str> = tree.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Alpha", "Zeta"]);
        assert_eq!(tree.children[0].children[0].path, "/alpha/inner");
        assert_eq!(tree.total_categories(), 4);
    }

    #[tokio::test]
    async fn test_rebuild_repairs_cache() {
        let h = harness(CategoryDeletePolicy::Cascade).await;
        let a = h
            .service
            .create_category(&admin(), "/", new_category("a"))
            .await
            .expect("create");

        let mut tx = h.store.begin(TxMode::ReadWrite).await.expect("begin");
        tx.set_cached_url(a.id, "/stale").await.expect("corrupt");
        tx.commit().await.expect("commit");

        let report = h.service.rebuild_path_cache(&admin()).await.expect("rebuild");
        assert_eq!(report.stale.len(), 1);
        let a = h.service.resolve("/a").await.expect("resolve");
        assert_eq!(a.cached_url.as_deref(), Some("/a"));
    }
}
