//! [`ContentTx`] over a sqlx transaction.

use async_trait::async_trait;
use sqlx::{Postgres, Transaction};

use inkpress_core::error::AppError;
use inkpress_core::result::AppResult;
use inkpress_core::types::id::{ArticleId, CategoryId, TagId, UserId};
use inkpress_entity::article::{Article, NewArticle, Tag};
use inkpress_entity::category::{Category, NewCategory};
use inkpress_entity::namespace::Slot;
use inkpress_entity::user::Author;

use crate::error::db_err;
use crate::repositories::{article, author, category, namespace, tag};
use crate::store::{ContentTx, TxMode};

/// A PostgreSQL transaction; dropping it rolls back.
pub struct PgContentTx {
    tx: Transaction<'static, Postgres>,
    mode: TxMode,
}

impl PgContentTx {
    pub(crate) fn new(tx: Transaction<'static, Postgres>, mode: TxMode) -> Self {
        Self { tx, mode }
    }

    fn writable(&self) -> AppResult<()> {
        match self.mode {
            TxMode::ReadWrite => Ok(()),
            TxMode::ReadOnly => Err(AppError::internal("Write attempted in a read-only transaction")),
        }
    }
}

#[async_trait]
impl ContentTx for PgContentTx {
    async fn commit(self: Box<Self>) -> AppResult<()> {
        self.tx.commit().await.map_err(db_err("Failed to commit transaction"))
    }

    async fn root_category(&mut self) -> AppResult<Option<Category>> {
        category::find_root(&mut self.tx).await
    }

    async fn category_by_id(&mut self, id: CategoryId) -> AppResult<Option<Category>> {
        category::find_by_id(&mut self.tx, id).await
    }

    async fn category_by_cached_url(&mut self, url: &str) -> AppResult<Option<Category>> {
        category::find_by_cached_url(&mut self.tx, url).await
    }

    async fn child_categories(&mut self, parent: CategoryId) -> AppResult<Vec<Category>> {
        category::find_children(&mut self.tx, parent).await
    }

    async fn all_categories(&mut self) -> AppResult<Vec<Category>> {
        category::find_all(&mut self.tx).await
    }

    async fn insert_category(&mut self, new: &NewCategory) -> AppResult<Category> {
        self.writable()?;
        let id = CategoryId::new();
        if let Some(parent) = new.parent_id {
            namespace::claim(&mut self.tx, parent, &new.directory_name, Slot::Category(id)).await?;
        }
        category::insert(&mut self.tx, id, new).await
    }

    async fn update_category(&mut self, record: &Category) -> AppResult<()> {
        self.writable()?;
        category::update_metadata(&mut self.tx, record).await
    }

    async fn relocate_category(
        &mut self,
        id: CategoryId,
        parent: CategoryId,
        directory_name: &str,
    ) -> AppResult<()> {
        self.writable()?;
        namespace::relocate(&mut self.tx, Slot::Category(id), parent, directory_name).await?;
        category::set_position(&mut self.tx, id, parent, directory_name).await
    }

    async fn set_cached_url(&mut self, id: CategoryId, url: &str) -> AppResult<()> {
        self.writable()?;
        category::set_cached_url(&mut self.tx, id, url).await
    }

    async fn delete_category(&mut self, id: CategoryId) -> AppResult<()> {
        self.writable()?;
        if category::has_contents(&mut self.tx, id).await? {
            return Err(AppError::conflict("Category still has children or articles"));
        }
        namespace::release(&mut self.tx, Slot::Category(id)).await?;
        category::delete(&mut self.tx, id).await
    }

    async fn slot(&mut self, parent: CategoryId, token: &str) -> AppResult<Option<Slot>> {
        namespace::find(&mut self.tx, parent, token).await
    }

    async fn article_by_id(&mut self, id: ArticleId) -> AppResult<Option<Article>> {
        article::find_by_id(&mut self.tx, id).await
    }

    async fn articles_in(&mut self, category: CategoryId) -> AppResult<Vec<Article>> {
        article::find_in_category(&mut self.tx, category).await
    }

    async fn count_articles_in(&mut self, category: CategoryId) -> AppResult<u64> {
        article::count_in_category(&mut self.tx, category).await
    }

    async fn insert_article(&mut self, new: &NewArticle) -> AppResult<Article> {
        self.writable()?;
        let id = ArticleId::new();
        namespace::claim(&mut self.tx, new.category_id, &new.filename, Slot::Article(id)).await?;
        article::insert(&mut self.tx, id, new).await
    }

    async fn update_article(&mut self, record: &Article) -> AppResult<()> {
        self.writable()?;
        article::update(&mut self.tx, record).await
    }

    async fn relocate_article(
        &mut self,
        id: ArticleId,
        category: CategoryId,
        filename: &str,
    ) -> AppResult<()> {
        self.writable()?;
        namespace::relocate(&mut self.tx, Slot::Article(id), category, filename).await?;
        article::set_position(&mut self.tx, id, category, filename).await
    }

    async fn delete_article(&mut self, id: ArticleId) -> AppResult<()> {
        self.writable()?;
        namespace::release(&mut self.tx, Slot::Article(id)).await?;
        article::delete(&mut self.tx, id).await
    }

    async fn upsert_author(&mut self, record: &Author) -> AppResult<()> {
        self.writable()?;
        author::upsert(&mut self.tx, record).await
    }

    async fn authors_by_usernames(&mut self, usernames: &[String]) -> AppResult<Vec<Author>> {
        author::find_by_usernames(&mut self.tx, usernames).await
    }

    async fn article_authors(&mut self, article: ArticleId) -> AppResult<Vec<Author>> {
        author::find_for_article(&mut self.tx, article).await
    }

    async fn set_article_authors(
        &mut self,
        article: ArticleId,
        authors: &[UserId],
    ) -> AppResult<()> {
        self.writable()?;
        author::replace_for_article(&mut self.tx, article, authors).await
    }

    async fn tag_by_name(&mut self, name: &str) -> AppResult<Option<Tag>> {
        tag::find_by_name(&mut self.tx, name).await
    }

    async fn insert_tag(&mut self, name: &str) -> AppResult<Tag> {
        self.writable()?;
        tag::insert(&mut self.tx, name).await
    }

    async fn article_tags(&mut self, article: ArticleId) -> AppResult<Vec<Tag>> {
        tag::find_for_article(&mut self.tx, article).await
    }

    async fn set_article_tags(&mut self, article: ArticleId, tags: &[TagId]) -> AppResult<()> {
        self.writable()?;
        tag::replace_for_article(&mut self.tx, article, tags).await
    }

    async fn all_tags(&mut self) -> AppResult<Vec<Tag>> {
        tag::find_all(&mut self.tx).await
    }
}
