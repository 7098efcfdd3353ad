//! [`ContentTx`] over a private copy of the in-memory state.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OwnedMutexGuard;

use inkpress_core::error::AppError;
use inkpress_core::result::AppResult;
use inkpress_core::types::id::{ArticleId, CategoryId, TagId, UserId};
use inkpress_entity::article::{Article, NewArticle, Tag};
use inkpress_entity::category::{Category, NewCategory};
use inkpress_entity::namespace::Slot;
use inkpress_entity::user::Author;

use super::Shared;
use super::state::MemoryState;
use crate::store::{ContentTx, TxMode};

/// A unit of work on the in-memory store. The first write copies the
/// snapshot; commit publishes the copy.
pub struct MemoryContentTx {
    state: Arc<MemoryState>,
    mode: TxMode,
    shared: Arc<Shared>,
    _writer: Option<OwnedMutexGuard<()>>,
}

impl MemoryContentTx {
    pub(super) fn new(
        state: Arc<MemoryState>,
        mode: TxMode,
        shared: Arc<Shared>,
        writer: Option<OwnedMutexGuard<()>>,
    ) -> Self {
        Self {
            state,
            mode,
            shared,
            _writer: writer,
        }
    }

    fn write(&mut self) -> AppResult<&mut MemoryState> {
        match self.mode {
            TxMode::ReadWrite => Ok(Arc::make_mut(&mut self.state)),
            TxMode::ReadOnly => Err(AppError::internal(
                "Write attempted in a read-only transaction",
            )),
        }
    }
}

#[async_trait]
impl ContentTx for MemoryContentTx {
    async fn commit(self: Box<Self>) -> AppResult<()> {
        if self.mode == TxMode::ReadWrite {
            *self.shared.committed.write().await = Arc::clone(&self.state);
        }
        Ok(())
    }

    async fn root_category(&mut self) -> AppResult<Option<Category>> {
        Ok(self.state.root())
    }

    async fn category_by_id(&mut self, id: CategoryId) -> AppResult<Option<Category>> {
        Ok(self.state.category(id))
    }

    async fn category_by_cached_url(&mut self, url: &str) -> AppResult<Option<Category>> {
        Ok(self.state.category_by_url(url))
    }

    async fn child_categories(&mut self, parent: CategoryId) -> AppResult<Vec<Category>> {
        Ok(self.state.children(parent))
    }

    async fn all_categories(&mut self) -> AppResult<Vec<Category>> {
        Ok(self.state.all_categories())
    }

    async fn insert_category(&mut self, new: &NewCategory) -> AppResult<Category> {
        self.write()?.insert_category(new)
    }

    async fn update_category(&mut self, category: &Category) -> AppResult<()> {
        self.write()?.update_category(category)
    }

    async fn relocate_category(
        &mut self,
        id: CategoryId,
        parent: CategoryId,
        directory_name: &str,
    ) -> AppResult<()> {
        self.write()?.relocate_category(id, parent, directory_name)
    }

    async fn set_cached_url(&mut self, id: CategoryId, url: &str) -> AppResult<()> {
        self.write()?.set_cached_url(id, url)
    }

    async fn delete_category(&mut self, id: CategoryId) -> AppResult<()> {
        self.write()?.delete_category(id)
    }

    async fn slot(&mut self, parent: CategoryId, token: &str) -> AppResult<Option<Slot>> {
        Ok(self.state.slot(parent, token))
    }

    async fn article_by_id(&mut self, id: ArticleId) -> AppResult<Option<Article>> {
        Ok(self.state.article(id))
    }

    async fn articles_in(&mut self, category: CategoryId) -> AppResult<Vec<Article>> {
        Ok(self.state.articles_in(category))
    }

    async fn count_articles_in(&mut self, category: CategoryId) -> AppResult<u64> {
        Ok(self.state.count_articles_in(category))
    }

    async fn insert_article(&mut self, new: &NewArticle) -> AppResult<Article> {
        self.write()?.insert_article(new)
    }

    async fn update_article(&mut self, article: &Article) -> AppResult<()> {
        self.write()?.update_article(article)
    }

    async fn relocate_article(
        &mut self,
        id: ArticleId,
        category: CategoryId,
        filename: &str,
    ) -> AppResult<()> {
        self.write()?.relocate_article(id, category, filename)
    }

    async fn delete_article(&mut self, id: ArticleId) -> AppResult<()> {
        self.write()?.delete_article(id)
    }

    async fn upsert_author(&mut self, author: &Author) -> AppResult<()> {
        self.write()?.upsert_author(author);
        Ok(())
    }

    async fn authors_by_usernames(&mut self, usernames: &[String]) -> AppResult<Vec<Author>> {
        Ok(self.state.authors_by_usernames(usernames))
    }

    async fn article_authors(&mut self, article: ArticleId) -> AppResult<Vec<Author>> {
        Ok(self.state.article_authors(article))
    }

    async fn set_article_authors(
        &mut self,
        article: ArticleId,
        authors: &[UserId],
    ) -> AppResult<()> {
        self.write()?.set_article_authors(article, authors)
    }

    async fn tag_by_name(&mut self, name: &str) -> AppResult<Option<Tag>> {
        Ok(self.state.tag_by_name(name))
    }

    async fn insert_tag(&mut self, name: &str) -> AppResult<Tag> {
        self.write()?.insert_tag(name)
    }

    async fn article_tags(&mut self, article: ArticleId) -> AppResult<Vec<Tag>> {
        Ok(self.state.article_tags(article))
    }

    async fn set_article_tags(&mut self, article: ArticleId, tags: &[TagId]) -> AppResult<()> {
        self.write()?.set_article_tags(article, tags)
    }

    async fn all_tags(&mut self) -> AppResult<Vec<Tag>> {
        Ok(self.state.all_tags())
    }
}

#[cfg(test)]
mod tests {
    use inkpress_core::error::ErrorKind;
    use inkpress_core::types::EntityKind;
    use inkpress_entity::article::ArticleViewType;
    use inkpress_entity::category::{CategoryViewType, SortingType};

    use crate::memory::MemoryContentStore;
    use crate::store::{ContentStore, TxMode};

    use super::*;

    fn child(parent: CategoryId, token: &str) -> NewCategory {
        NewCategory {
            parent_id: Some(parent),
            name: token.to_uppercase(),
            directory_name: token.to_string(),
            description: String::new(),
            view_type: CategoryViewType::Vertical,
            sorting_type: SortingType::Chronological,
            cached_url: Some(format!("/{token}")),
        }
    }

    fn article(category: CategoryId, filename: &str) -> NewArticle {
        NewArticle {
            category_id: category,
            filename: filename.to_string(),
            title: filename.to_string(),
            summary: String::new(),
            content: "body".into(),
            publish_time: None,
            is_visible: true,
            view_type: ArticleViewType::SinglePage,
            can_comment: false,
            show_authors: true,
            category_sorting_index: 0,
            featured_image_id: None,
        }
    }

    async fn store_with_root() -> (MemoryContentStore, Category) {
        let store = MemoryContentStore::new();
        let mut tx = store.begin(TxMode::ReadWrite).await.expect("begin");
        let root = tx.insert_category(&NewCategory::root()).await.expect("root");
        tx.commit().await.expect("commit");
        (store, root)
    }

    #[tokio::test]
    async fn test_commit_publishes_and_drop_rolls_back() {
        let (store, root) = store_with_root().await;

        {
            let mut tx = store.begin(TxMode::ReadWrite).await.expect("begin");
            tx.insert_category(&child(root.id, "drafts")).await.expect("insert");
            // dropped without commit
        }

        let mut tx = store.begin(TxMode::ReadOnly).await.expect("begin");
        assert!(tx.slot(root.id, "drafts").await.expect("slot").is_none());
        drop(tx);

        let mut tx = store.begin(TxMode::ReadWrite).await.expect("begin");
        tx.insert_category(&child(root.id, "blog")).await.expect("insert");
        tx.commit().await.expect("commit");

        let mut tx = store.begin(TxMode::ReadOnly).await.expect("begin");
        assert!(matches!(
            tx.slot(root.id, "blog").await.expect("slot"),
            Some(Slot::Category(_))
        ));
    }

    #[tokio::test]
    async fn test_store_rejects_occupied_slot_across_kinds() {
        let (store, root) = store_with_root().await;
        let mut tx = store.begin(TxMode::ReadWrite).await.expect("begin");
        tx.insert_category(&child(root.id, "blog")).await.expect("insert");

        let err = tx
            .insert_article(&article(root.id, "blog"))
            .await
            .expect_err("slot is taken");
        assert_eq!(err.conflict_occupant(), Some(EntityKind::Category));
        assert_eq!(err.message, "A category already exists at '/blog'");
    }

    #[tokio::test]
    async fn test_reader_sees_snapshot_while_writer_is_open() {
        let (store, root) = store_with_root().await;

        let mut writer = store.begin(TxMode::ReadWrite).await.expect("begin");
        writer.insert_category(&child(root.id, "news")).await.expect("insert");

        let mut reader = store.begin(TxMode::ReadOnly).await.expect("reader does not wait");
        assert!(reader.slot(root.id, "news").await.expect("slot").is_none());

        writer.commit().await.expect("commit");
        assert!(reader.slot(root.id, "news").await.expect("slot").is_none());

        let mut fresh = store.begin(TxMode::ReadOnly).await.expect("begin");
        assert!(fresh.slot(root.id, "news").await.expect("slot").is_some());
    }

    #[tokio::test]
    async fn test_read_only_transaction_refuses_writes() {
        let (store, root) = store_with_root().await;
        let mut tx = store.begin(TxMode::ReadOnly).await.expect("begin");
        let err = tx
            .insert_category(&child(root.id, "x"))
            .await
            .expect_err("read only");
        assert_eq!(err.kind, ErrorKind::Internal);
    }

    #[tokio::test]
    async fn test_single_root_and_non_empty_delete() {
        let (store, root) = store_with_root().await;
        let mut tx = store.begin(TxMode::ReadWrite).await.expect("begin");

        let err = tx
            .insert_category(&NewCategory::root())
            .await
            .expect_err("second root");
        assert_eq!(err.kind, ErrorKind::Conflict);

        let docs = tx.insert_category(&child(root.id, "docs")).await.expect("insert");
        tx.insert_article(&article(docs.id, "intro")).await.expect("insert");
        let err = tx.delete_category(docs.id).await.expect_err("not empty");
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_articles_keep_insertion_order() {
        let (store, root) = store_with_root().await;
        let mut tx = store.begin(TxMode::ReadWrite).await.expect("begin");
        for name in ["c", "a", "b"] {
            tx.insert_article(&article(root.id, name)).await.expect("insert");
        }
        let names: Vec<String> = tx
            .articles_in(root.id)
            .await
            .expect("list")
            .into_iter()
            .map(|a| a.filename)
            .collect();
        assert_eq!(names, ["c", "a", "b"]);
    }
}
