//! The transactional store abstraction the content engine runs on.

use async_trait::async_trait;

use inkpress_core::result::AppResult;
use inkpress_core::types::id::{ArticleId, CategoryId, TagId, UserId};
use inkpress_entity::article::{Article, NewArticle, Tag};
use inkpress_entity::category::{Category, NewCategory};
use inkpress_entity::namespace::Slot;
use inkpress_entity::user::Author;

/// Whether a transaction may write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxMode {
    /// Reads only. Never blocks on writers.
    ReadOnly,
    /// Reads and writes, serialized against other writers.
    ReadWrite,
}

/// A backend that can open units of work over the content namespace.
#[async_trait]
pub trait ContentStore: Send + Sync + std::fmt::Debug + 'static {
    /// Backend name for logs (e.g. "postgres").
    fn backend(&self) -> &str;

    /// Open a transaction.
    async fn begin(&self, mode: TxMode) -> AppResult<Box<dyn ContentTx>>;

    /// Check whether the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}

/// One unit of work. Dropping it without calling [`ContentTx::commit`]
/// rolls every change back.
///
/// Write methods fail with `NameConflict` when the target `(parent, token)`
/// slot is held by another entity, and with `WriteConflict` when the backend
/// aborts because of a concurrent writer.
#[async_trait]
pub trait ContentTx: Send {
    /// Make all changes durable and visible.
    async fn commit(self: Box<Self>) -> AppResult<()>;

    // ── categories ──────────────────────────────────────────────────

    /// The category with no parent.
    async fn root_category(&mut self) -> AppResult<Option<Category>>;

    /// Find a category by id.
    async fn category_by_id(&mut self, id: CategoryId) -> AppResult<Option<Category>>;

    /// Find a category by its cached absolute path.
    async fn category_by_cached_url(&mut self, url: &str) -> AppResult<Option<Category>>;

    /// Direct child categories ordered by `name`, ties by id.
    async fn child_categories(&mut self, parent: CategoryId) -> AppResult<Vec<Category>>;

    /// Every category.
    async fn all_categories(&mut self) -> AppResult<Vec<Category>>;

    /// Insert a category and claim its slot under the parent.
    async fn insert_category(&mut self, new: &NewCategory) -> AppResult<Category>;

    /// Persist metadata fields (name, description, view and sorting type).
    async fn update_category(&mut self, category: &Category) -> AppResult<()>;

    /// Move a category to `(parent, directory_name)`, releasing its old slot.
    async fn relocate_category(
        &mut self,
        id: CategoryId,
        parent: CategoryId,
        directory_name: &str,
    ) -> AppResult<()>;

    /// Overwrite the cached absolute path.
    async fn set_cached_url(&mut self, id: CategoryId, url: &str) -> AppResult<()>;

    /// Delete an empty category and release its slot.
    async fn delete_category(&mut self, id: CategoryId) -> AppResult<()>;

    // ── namespace ───────────────────────────────────────────────────

    /// The occupant of `(parent, token)`, if any.
    async fn slot(&mut self, parent: CategoryId, token: &str) -> AppResult<Option<Slot>>;

    // ── articles ────────────────────────────────────────────────────

    /// Find an article by id.
    async fn article_by_id(&mut self, id: ArticleId) -> AppResult<Option<Article>>;

    /// Articles directly in a category, in insertion order.
    async fn articles_in(&mut self, category: CategoryId) -> AppResult<Vec<Article>>;

    /// Number of articles directly in a category.
    async fn count_articles_in(&mut self, category: CategoryId) -> AppResult<u64>;

    /// Insert an article and claim its slot in the owning category.
    async fn insert_article(&mut self, new: &NewArticle) -> AppResult<Article>;

    /// Persist every non-namespace field of the article.
    async fn update_article(&mut self, article: &Article) -> AppResult<()>;

    /// Move or rename an article, releasing its old slot.
    async fn relocate_article(
        &mut self,
        id: ArticleId,
        category: CategoryId,
        filename: &str,
    ) -> AppResult<()>;

    /// Delete an article with its slot, author and tag links.
    async fn delete_article(&mut self, id: ArticleId) -> AppResult<()>;

    // ── authors ─────────────────────────────────────────────────────

    /// Insert or refresh an author record.
    async fn upsert_author(&mut self, author: &Author) -> AppResult<()>;

    /// Find authors by username; unknown names are skipped.
    async fn authors_by_usernames(&mut self, usernames: &[String]) -> AppResult<Vec<Author>>;

    /// Authors credited on an article, in credit order.
    async fn article_authors(&mut self, article: ArticleId) -> AppResult<Vec<Author>>;

    /// Replace the credited authors.
    async fn set_article_authors(&mut self, article: ArticleId, authors: &[UserId])
    -> AppResult<()>;

    // ── tags ────────────────────────────────────────────────────────

    /// Find a tag by exact name.
    async fn tag_by_name(&mut self, name: &str) -> AppResult<Option<Tag>>;

    /// Create a tag.
    async fn insert_tag(&mut self, name: &str) -> AppResult<Tag>;

    /// Tags of an article ordered by name.
    async fn article_tags(&mut self, article: ArticleId) -> AppResult<Vec<Tag>>;

    /// Replace the tags of an article.
    async fn set_article_tags(&mut self, article: ArticleId, tags: &[TagId]) -> AppResult<()>;

    /// Every tag ordered by name.
    async fn all_tags(&mut self) -> AppResult<Vec<Tag>>;
}
