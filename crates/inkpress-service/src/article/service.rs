//! Article creation, lookup, editing, moving and deletion.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use inkpress_core::AppError;
use inkpress_core::config::ContentConfig;
use inkpress_core::result::AppResult;
use inkpress_core::traits::{CommentCascade, FileResolver};
use inkpress_core::types::id::{ArticleId, FileId, TagId, UserId};
use inkpress_core::types::{ContentPath, ensure_valid_token};
use inkpress_database::{ContentStore, ContentTx, TxMode};
use inkpress_entity::article::{Article, ArticleViewType, NewArticle, Tag};
use inkpress_entity::category::Category;
use inkpress_entity::namespace::Slot;
use inkpress_entity::user::principal::is_privileged;
use inkpress_entity::user::{Author, Principal, UserRole};

use super::view::ArticleView;
use crate::indexing::IndexDispatcher;
use crate::namespace::{article_path, assert_no_conflict, full_path, resolve_article, resolve_category};
use crate::retry::with_write_retries;

/// Request to create an article inside an existing category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateArticle {
    /// Path token of the article.
    pub filename: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    /// Initial content, written to both the published and the draft copy.
    #[serde(default)]
    pub content: String,
    /// ISO-8601 publish time; absent or empty leaves the article unpublished.
    #[serde(default)]
    pub publish_time: Option<String>,
    #[serde(default)]
    pub is_visible: Option<bool>,
    #[serde(default)]
    pub view_type: Option<ArticleViewType>,
    #[serde(default)]
    pub can_comment: Option<bool>,
    #[serde(default)]
    pub show_authors: Option<bool>,
    #[serde(default)]
    pub category_sorting_index: Option<i32>,
    /// Tag names, created on first use.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Path of the featured image in the file store.
    #[serde(default)]
    pub featured_image_path: Option<String>,
}

/// Partial update of an article. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateArticle {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
    /// Write `content` to the draft copy only.
    #[serde(default)]
    pub is_draft: bool,
    /// ISO-8601 publish time; an empty string unpublishes.
    pub publish_time: Option<String>,
    pub is_visible: Option<bool>,
    pub show_publish_time: Option<bool>,
    pub view_type: Option<ArticleViewType>,
    pub can_comment: Option<bool>,
    pub show_authors: Option<bool>,
    pub category_sorting_index: Option<i32>,
    /// Usernames of the credited authors, in credit order.
    pub authors: Option<Vec<String>>,
    /// Replacement tag names.
    pub tags: Option<Vec<String>>,
    /// New path token (rename).
    pub filename: Option<String>,
    /// Path of the new owning category (move).
    pub category_path: Option<String>,
    /// Featured image path; an empty string removes the image.
    pub featured_image_path: Option<String>,
    /// Raw transcript forwarded to the search collaborator only.
    pub text: Option<String>,
}

/// Update inputs that were parsed and resolved before the transaction.
struct PreparedUpdate {
    publish_time: Option<Option<DateTime<Utc>>>,
    featured_image: Option<Option<FileId>>,
    category_path: Option<ContentPath>,
    authors: Option<Vec<String>>,
}

/// Manages articles.
#[derive(Debug, Clone)]
pub struct ArticleService {
    store: Arc<dyn ContentStore>,
    indexer: IndexDispatcher,
    files: Arc<dyn FileResolver>,
    comments: Arc<dyn CommentCascade>,
    config: ContentConfig,
}

impl ArticleService {
    /// Creates a new article service.
    pub fn new(
        store: Arc<dyn ContentStore>,
        indexer: IndexDispatcher,
        files: Arc<dyn FileResolver>,
        comments: Arc<dyn CommentCascade>,
        config: ContentConfig,
    ) -> Self {
        Self {
            store,
            indexer,
            files,
            comments,
            config,
        }
    }

    /// The article at `path`. Hidden articles only resolve for editors.
    pub async fn get_article(&self, principal: Option<&Principal>, path: &str) -> AppResult<ArticleView> {
        let path = ContentPath::parse(path)?;
        let mut tx = self.store.begin(TxMode::ReadOnly).await?;
        let (category, article) = resolve_article(tx.as_mut(), &path).await?;
        if !article.is_visible && !is_privileged(principal) {
            return Err(AppError::path_not_found(format!(
                "No article exists at '{path}'"
            )));
        }
        load_view(tx.as_mut(), category, article).await
    }

    /// Create an article in the category at `category_path`, credited to
    /// `principal`.
    pub async fn create_article(
        &self,
        principal: &Principal,
        category_path: &str,
        req: CreateArticle,
    ) -> AppResult<ArticleView> {
        principal.require(UserRole::Editor, "create articles")?;
        ensure_valid_token(&req.filename, "filename")?;
        ensure_title(&req.title)?;
        let category_path = ContentPath::parse(category_path)?;
        let publish_time = match req.publish_time.as_deref() {
            Some(raw) => parse_publish_time(raw)?,
            None => None,
        };
        let featured_image_id = match req.featured_image_path.as_deref() {
            Some(raw) => self.resolve_image(raw).await?,
            None => None,
        };

        let (category_path, req) = (&category_path, &req);
        let view = with_write_retries(self.config.max_write_retries, "create_article", move || {
            self.create_article_once(principal, category_path, req, publish_time, featured_image_id)
        })
        .await?;

        info!(
            user_id = %principal.user_id,
            article_id = %view.article.id,
            path = %view.path,
            "Article created"
        );
        self.indexer.dispatch(view.search_document(None));
        Ok(view)
    }

    async fn create_article_once(
        &self,
        principal: &Principal,
        category_path: &ContentPath,
        req: &CreateArticle,
        publish_time: Option<DateTime<Utc>>,
        featured_image_id: Option<FileId>,
    ) -> AppResult<ArticleView> {
        let mut tx = self.store.begin(TxMode::ReadWrite).await?;
        let category = resolve_category(tx.as_mut(), category_path).await?;
        let parent_path = full_path(tx.as_mut(), &category).await?;
        assert_no_conflict(tx.as_mut(), &category, &parent_path, &req.filename, None).await?;

        let article = tx
            .insert_article(&NewArticle {
                category_id: category.id,
                filename: req.filename.clone(),
                title: req.title.clone(),
                summary: req.summary.clone(),
                content: req.content.clone(),
                publish_time,
                is_visible: req.is_visible.unwrap_or(true),
                view_type: req.view_type.unwrap_or_default(),
                can_comment: req.can_comment.unwrap_or(false),
                show_authors: req.show_authors.unwrap_or(true),
                category_sorting_index: req.category_sorting_index.unwrap_or(0),
                featured_image_id,
            })
            .await?;

        tx.upsert_author(&Author {
            id: principal.user_id,
            username: principal.username.clone(),
            display_name: principal.username.clone(),
        })
        .await?;
        tx.set_article_authors(article.id, &[principal.user_id]).await?;

        let tag_ids = ensure_tags(tx.as_mut(), &req.tags).await?;
        tx.set_article_tags(article.id, &tag_ids).await?;

        let view = load_view(tx.as_mut(), category, article).await?;
        tx.commit().await?;
        Ok(view)
    }

    /// Update, rename and/or move the article at `path` in one transaction.
    pub async fn update_article(
        &self,
        principal: &Principal,
        path: &str,
        req: UpdateArticle,
    ) -> AppResult<ArticleView> {
        principal.require(UserRole::Editor, "edit articles")?;
        if let Some(filename) = &req.filename {
            ensure_valid_token(filename, "filename")?;
        }
        if let Some(title) = &req.title {
            ensure_title(title)?;
        }
        let path = ContentPath::parse(path)?;

        let prepared = PreparedUpdate {
            publish_time: req.publish_time.as_deref().map(parse_publish_time).transpose()?,
            featured_image: match req.featured_image_path.as_deref() {
                Some(raw) => Some(self.resolve_image(raw).await?),
                None => None,
            },
            category_path: req.category_path.as_deref().map(ContentPath::parse).transpose()?,
            authors: req.authors.as_deref().map(dedup_names).transpose()?,
        };
        if prepared.authors.as_ref().is_some_and(Vec::is_empty) {
            return Err(AppError::validation("An article must have at least one author"));
        }

        let (path_ref, req_ref, prepared_ref) = (&path, &req, &prepared);
        let view = with_write_retries(self.config.max_write_retries, "update_article", move || {
            self.update_article_once(principal, path_ref, req_ref, prepared_ref)
        })
        .await?;

        info!(
            user_id = %principal.user_id,
            article_id = %view.article.id,
            path = %view.path,
            "Article updated"
        );
        self.indexer.dispatch(view.search_document(req.text.clone()));
        Ok(view)
    }

    async fn update_article_once(
        &self,
        principal: &Principal,
        path: &ContentPath,
        req: &UpdateArticle,
        prepared: &PreparedUpdate,
    ) -> AppResult<ArticleView> {
        let mut tx = self.store.begin(TxMode::ReadWrite).await?;
        let (category, mut article) = resolve_article(tx.as_mut(), path).await?;

        apply_update(&mut article, req, prepared);
        tx.update_article(&article).await?;

        if let Some(usernames) = &prepared.authors {
            let known = tx.authors_by_usernames(usernames).await?;
            let mut ids: Vec<UserId> = Vec::with_capacity(usernames.len());
            for username in usernames {
                let author = known
                    .iter()
                    .find(|a| &a.username == username)
                    .ok_or_else(|| AppError::validation(format!("Unknown author '{username}'")))?;
                ids.push(author.id);
            }
            tx.set_article_authors(article.id, &ids).await?;
        } else if tx.article_authors(article.id).await?.is_empty() {
            tx.upsert_author(&Author {
                id: principal.user_id,
                username: principal.username.clone(),
                display_name: principal.username.clone(),
            })
            .await?;
            tx.set_article_authors(article.id, &[principal.user_id]).await?;
        }

        if let Some(tags) = &req.tags {
            let tag_ids = ensure_tags(tx.as_mut(), tags).await?;
            tx.set_article_tags(article.id, &tag_ids).await?;
        }

        let category = if req.filename.is_some() || prepared.category_path.is_some() {
            let target = match &prepared.category_path {
                Some(target_path) => resolve_category(tx.as_mut(), target_path).await?,
                None => category,
            };
            let filename = req.filename.as_deref().unwrap_or(&article.filename);
            if target.id != article.category_id || filename != article.filename {
                let target_path = full_path(tx.as_mut(), &target).await?;
                assert_no_conflict(
                    tx.as_mut(),
                    &target,
                    &target_path,
                    filename,
                    Some(Slot::Article(article.id)),
                )
                .await?;
                tx.relocate_article(article.id, target.id, filename).await?;
            }
            target
        } else {
            category
        };

        let article = tx
            .article_by_id(article.id)
            .await?
            .ok_or_else(|| AppError::internal("Updated article disappeared"))?;
        let view = load_view(tx.as_mut(), category, article).await?;
        tx.commit().await?;
        Ok(view)
    }

    /// Delete the article at `path`. Its comments are dropped by the comment
    /// collaborator after the transaction commits.
    pub async fn delete_article(&self, principal: &Principal, path: &str) -> AppResult<ArticleId> {
        principal.require(UserRole::Editor, "delete articles")?;
        let path = ContentPath::parse(path)?;

        let article_id = with_write_retries(self.config.max_write_retries, "delete_article", {
            let path = &path;
            move || self.delete_article_once(path)
        })
        .await?;

        if let Err(e) = self.comments.article_deleted(article_id).await {
            warn!(article_id = %article_id, error = %e, "Failed to cascade comment deletion");
        }
        info!(
            user_id = %principal.user_id,
            article_id = %article_id,
            path = %path,
            "Article deleted"
        );
        Ok(article_id)
    }

    async fn delete_article_once(&self, path: &ContentPath) -> AppResult<ArticleId> {
        let mut tx = self.store.begin(TxMode::ReadWrite).await?;
        let (_, article) = resolve_article(tx.as_mut(), path).await?;
        tx.delete_article(article.id).await?;
        tx.commit().await?;
        Ok(article.id)
    }

    /// Every tag, ordered by name.
    pub async fn list_tags(&self) -> AppResult<Vec<Tag>> {
        let mut tx = self.store.begin(TxMode::ReadOnly).await?;
        tx.all_tags().await
    }

    async fn resolve_image(&self, raw: &str) -> AppResult<Option<FileId>> {
        if raw.is_empty() {
            return Ok(None);
        }
        self.files.resolve(raw).await.map(Some)
    }
}

/// Parse an ISO-8601 publish time. An empty string means "unpublished";
/// times without an offset are taken as UTC.
pub fn parse_publish_time(raw: &str) -> AppResult<Option<DateTime<Utc>>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    if let Ok(time) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(time.with_timezone(&Utc)));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(time) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(Some(time.and_utc()));
        }
    }
    if let Some(midnight) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(Some(midnight.and_utc()));
    }
    Err(AppError::validation(format!(
        "Invalid publish time '{raw}', expected ISO-8601"
    )))
}

fn ensure_title(title: &str) -> AppResult<()> {
    if title.trim().is_empty() {
        return Err(AppError::validation("Article title cannot be empty"));
    }
    Ok(())
}

/// Drop repeated names, keeping first occurrences. Names must be non-empty.
fn dedup_names(names: &[String]) -> AppResult<Vec<String>> {
    let mut unique: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        if name.is_empty() {
            return Err(AppError::validation("Names cannot be empty"));
        }
        if !unique.contains(name) {
            unique.push(name.clone());
        }
    }
    Ok(unique)
}

fn apply_update(article: &mut Article, req: &UpdateArticle, prepared: &PreparedUpdate) {
    if let Some(title) = &req.title {
        article.title = title.clone();
    }
    if let Some(summary) = &req.summary {
        article.summary = summary.clone();
    }
    if let Some(content) = &req.content {
        if !req.is_draft {
            article.content = content.clone();
        }
        article.draft_content = content.clone();
        article.last_edit_time = Utc::now();
    }
    if let Some(publish_time) = prepared.publish_time {
        article.publish_time = publish_time;
    }
    if let Some(image) = prepared.featured_image {
        article.featured_image_id = image;
    }
    if let Some(v) = req.is_visible {
        article.is_visible = v;
    }
    if let Some(v) = req.show_publish_time {
        article.show_publish_time = v;
    }
    if let Some(v) = req.view_type {
        article.view_type = v;
    }
    if let Some(v) = req.can_comment {
        article.can_comment = v;
    }
    if let Some(v) = req.show_authors {
        article.show_authors = v;
    }
    if let Some(v) = req.category_sorting_index {
        article.category_sorting_index = v;
    }
}

/// Look up each tag by exact name, creating the missing ones.
async fn ensure_tags(tx: &mut dyn ContentTx, names: &[String]) -> AppResult<Vec<TagId>> {
    let names = dedup_names(names)?;
    let mut ids = Vec::with_capacity(names.len());
    for name in &names {
        let tag = match tx.tag_by_name(name).await? {
            Some(tag) => tag,
            None => tx.insert_tag(name).await?,
        };
        ids.push(tag.id);
    }
    Ok(ids)
}

async fn load_view(
    tx: &mut dyn ContentTx,
    category: Category,
    article: Article,
) -> AppResult<ArticleView> {
    let category_path = full_path(tx, &category).await?;
    let path = article_path(&category_path, &article);
    let authors = tx.article_authors(article.id).await?;
    let tags = tx.article_tags(article.id).await?;
    Ok(ArticleView {
        article,
        category,
        category_path,
        path,
        authors,
        tags,
    })
}
