//! Committed state of the in-memory store and the operations on it.

use std::collections::HashMap;

use chrono::Utc;

use inkpress_core::error::AppError;
use inkpress_core::result::AppResult;
use inkpress_core::types::id::{ArticleId, CategoryId, TagId, UserId};
use inkpress_core::types::join_path;
use inkpress_entity::article::{Article, NewArticle, Tag};
use inkpress_entity::category::{Category, NewCategory};
use inkpress_entity::namespace::Slot;
use inkpress_entity::user::Author;

/// The whole content namespace. Cloned at the start of a write transaction
/// and swapped in on commit.
#[derive(Debug, Clone, Default)]
pub(crate) struct MemoryState {
    categories: HashMap<CategoryId, Category>,
    by_url: HashMap<String, CategoryId>,
    articles: HashMap<ArticleId, Article>,
    slots: HashMap<(CategoryId, String), Slot>,
    authors: HashMap<UserId, Author>,
    article_authors: HashMap<ArticleId, Vec<UserId>>,
    tags: HashMap<TagId, Tag>,
    article_tags: HashMap<ArticleId, Vec<TagId>>,
    next_seq: i64,
}

impl MemoryState {
    // ── reads ───────────────────────────────────────────────────────

    pub(crate) fn root(&self) -> Option<Category> {
        self.categories.values().find(|c| c.is_root()).cloned()
    }

    pub(crate) fn category(&self, id: CategoryId) -> Option<Category> {
        self.categories.get(&id).cloned()
    }

    pub(crate) fn category_by_url(&self, url: &str) -> Option<Category> {
        self.by_url.get(url).and_then(|id| self.category(*id))
    }

    pub(crate) fn children(&self, parent: CategoryId) -> Vec<Category> {
        let mut children: Vec<Category> = self
            .categories
            .values()
            .filter(|c| c.parent_id == Some(parent))
            .cloned()
            .collect();
        children.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        children
    }

    pub(crate) fn all_categories(&self) -> Vec<Category> {
        let mut all: Vec<Category> = self.categories.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        all
    }

    pub(crate) fn slot(&self, parent: CategoryId, token: &str) -> Option<Slot> {
        self.slots.get(&(parent, token.to_string())).copied()
    }

    pub(crate) fn article(&self, id: ArticleId) -> Option<Article> {
        self.articles.get(&id).cloned()
    }

    pub(crate) fn articles_in(&self, category: CategoryId) -> Vec<Article> {
        let mut articles: Vec<Article> = self
            .articles
            .values()
            .filter(|a| a.category_id == category)
            .cloned()
            .collect();
        articles.sort_by_key(|a| a.seq);
        articles
    }

    pub(crate) fn count_articles_in(&self, category: CategoryId) -> u64 {
        self.articles
            .values()
            .filter(|a| a.category_id == category)
            .count() as u64
    }

    pub(crate) fn authors_by_usernames(&self, usernames: &[String]) -> Vec<Author> {
        self.authors
            .values()
            .filter(|a| usernames.contains(&a.username))
            .cloned()
            .collect()
    }

    pub(crate) fn article_authors(&self, article: ArticleId) -> Vec<Author> {
        self.article_authors
            .get(&article)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.authors.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub(crate) fn tag_by_name(&self, name: &str) -> Option<Tag> {
        self.tags.values().find(|t| t.name == name).cloned()
    }

    pub(crate) fn article_tags(&self, article: ArticleId) -> Vec<Tag> {
        let mut tags: Vec<Tag> = self
            .article_tags
            .get(&article)
            .map(|ids| ids.iter().filter_map(|id| self.tags.get(id).cloned()).collect())
            .unwrap_or_default();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        tags
    }

    pub(crate) fn all_tags(&self) -> Vec<Tag> {
        let mut tags: Vec<Tag> = self.tags.values().cloned().collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        tags
    }

    // ── writes ──────────────────────────────────────────────────────

    pub(crate) fn insert_category(&mut self, new: &NewCategory) -> AppResult<Category> {
        let id = CategoryId::new();
        match new.parent_id {
            Some(parent) => {
                self.require_category(parent)?;
                self.claim(parent, &new.directory_name, Slot::Category(id))?;
            }
            None if self.root().is_some() => {
                return Err(AppError::conflict("A root category already exists"));
            }
            None => {}
        }

        let now = Utc::now();
        let category = Category {
            id,
            parent_id: new.parent_id,
            name: new.name.clone(),
            directory_name: new.directory_name.clone(),
            description: new.description.clone(),
            view_type: new.view_type,
            sorting_type: new.sorting_type,
            cached_url: new.cached_url.clone(),
            created_at: now,
            updated_at: now,
        };
        if let Some(url) = &category.cached_url {
            self.by_url.insert(url.clone(), id);
        }
        self.categories.insert(id, category.clone());
        Ok(category)
    }

    pub(crate) fn update_category(&mut self, record: &Category) -> AppResult<()> {
        let category = self.category_mut(record.id)?;
        category.name.clone_from(&record.name);
        category.description.clone_from(&record.description);
        category.view_type = record.view_type;
        category.sorting_type = record.sorting_type;
        category.updated_at = Utc::now();
        Ok(())
    }

    pub(crate) fn relocate_category(
        &mut self,
        id: CategoryId,
        parent: CategoryId,
        directory_name: &str,
    ) -> AppResult<()> {
        self.require_category(parent)?;
        let current = self.require_category(id)?;
        let Some(old_parent) = current.parent_id else {
            return Err(AppError::validation("The root category cannot be moved"));
        };

        self.move_slot(
            Slot::Category(id),
            (old_parent, current.directory_name.clone()),
            (parent, directory_name.to_string()),
        )?;

        let category = self.category_mut(id)?;
        category.parent_id = Some(parent);
        category.directory_name = directory_name.to_string();
        category.updated_at = Utc::now();
        Ok(())
    }

    pub(crate) fn set_cached_url(&mut self, id: CategoryId, url: &str) -> AppResult<()> {
        let category = self.category_mut(id)?;
        let previous = category.cached_url.replace(url.to_string());
        if let Some(previous) = previous {
            if self.by_url.get(&previous) == Some(&id) {
                self.by_url.remove(&previous);
            }
        }
        self.by_url.insert(url.to_string(), id);
        Ok(())
    }

    pub(crate) fn delete_category(&mut self, id: CategoryId) -> AppResult<()> {
        let category = self.require_category(id)?;
        if self.slots.keys().any(|(parent, _)| *parent == id) {
            return Err(AppError::conflict("Category still has children or articles"));
        }
        if let Some(parent) = category.parent_id {
            self.slots.remove(&(parent, category.directory_name.clone()));
        }
        if let Some(url) = &category.cached_url {
            if self.by_url.get(url) == Some(&id) {
                self.by_url.remove(url);
            }
        }
        self.categories.remove(&id);
        Ok(())
    }

    pub(crate) fn insert_article(&mut self, new: &NewArticle) -> AppResult<Article> {
        self.require_category(new.category_id)?;
        let id = ArticleId::new();
        self.claim(new.category_id, &new.filename, Slot::Article(id))?;

        self.next_seq += 1;
        let now = Utc::now();
        let article = Article {
            id,
            category_id: new.category_id,
            filename: new.filename.clone(),
            title: new.title.clone(),
            summary: new.summary.clone(),
            content: new.content.clone(),
            draft_content: new.content.clone(),
            creation_time: now,
            last_edit_time: now,
            publish_time: new.publish_time,
            show_publish_time: true,
            is_visible: new.is_visible,
            view_type: new.view_type,
            can_comment: new.can_comment,
            show_authors: new.show_authors,
            category_sorting_index: new.category_sorting_index,
            featured_image_id: new.featured_image_id,
            seq: self.next_seq,
        };
        self.articles.insert(id, article.clone());
        Ok(article)
    }

    pub(crate) fn update_article(&mut self, record: &Article) -> AppResult<()> {
        let article = self
            .articles
            .get_mut(&record.id)
            .ok_or_else(|| AppError::not_found(format!("Article {} not found", record.id)))?;
        let (category_id, filename, seq, creation_time) = (
            article.category_id,
            article.filename.clone(),
            article.seq,
            article.creation_time,
        );
        *article = Article {
            category_id,
            filename,
            seq,
            creation_time,
            ..record.clone()
        };
        Ok(())
    }

    pub(crate) fn relocate_article(
        &mut self,
        id: ArticleId,
        category: CategoryId,
        filename: &str,
    ) -> AppResult<()> {
        self.require_category(category)?;
        let current = self
            .article(id)
            .ok_or_else(|| AppError::not_found(format!("Article {id} not found")))?;

        self.move_slot(
            Slot::Article(id),
            (current.category_id, current.filename.clone()),
            (category, filename.to_string()),
        )?;

        if let Some(article) = self.articles.get_mut(&id) {
            article.category_id = category;
            article.filename = filename.to_string();
        }
        Ok(())
    }

    pub(crate) fn delete_article(&mut self, id: ArticleId) -> AppResult<()> {
        let article = self
            .articles
            .remove(&id)
            .ok_or_else(|| AppError::not_found(format!("Article {id} not found")))?;
        self.slots.remove(&(article.category_id, article.filename));
        self.article_authors.remove(&id);
        self.article_tags.remove(&id);
        Ok(())
    }

    pub(crate) fn upsert_author(&mut self, author: &Author) {
        self.authors.insert(author.id, author.clone());
    }

    pub(crate) fn set_article_authors(&mut self, article: ArticleId, authors: &[UserId]) -> AppResult<()> {
        if let Some(missing) = authors.iter().find(|id| !self.authors.contains_key(id)) {
            return Err(AppError::not_found(format!("Author {missing} not found")));
        }
        self.article_authors.insert(article, authors.to_vec());
        Ok(())
    }

    pub(crate) fn insert_tag(&mut self, name: &str) -> AppResult<Tag> {
        if self.tag_by_name(name).is_some() {
            return Err(AppError::conflict(format!("Tag '{name}' already exists")));
        }
        let tag = Tag {
            id: TagId::new(),
            name: name.to_string(),
        };
        self.tags.insert(tag.id, tag.clone());
        Ok(tag)
    }

    pub(crate) fn set_article_tags(&mut self, article: ArticleId, tags: &[TagId]) -> AppResult<()> {
        let mut unique: Vec<TagId> = Vec::with_capacity(tags.len());
        for tag in tags {
            if !self.tags.contains_key(tag) {
                return Err(AppError::not_found(format!("Tag {tag} not found")));
            }
            if !unique.contains(tag) {
                unique.push(*tag);
            }
        }
        self.article_tags.insert(article, unique);
        Ok(())
    }

    // ── helpers ─────────────────────────────────────────────────────

    fn require_category(&self, id: CategoryId) -> AppResult<Category> {
        self.category(id)
            .ok_or_else(|| AppError::not_found(format!("Category {id} not found")))
    }

    fn category_mut(&mut self, id: CategoryId) -> AppResult<&mut Category> {
        self.categories
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Category {id} not found")))
    }

    fn claim(&mut self, parent: CategoryId, token: &str, occupant: Slot) -> AppResult<()> {
        let key = (parent, token.to_string());
        if let Some(existing) = self.slots.get(&key) {
            return Err(self.occupied(parent, token, *existing));
        }
        self.slots.insert(key, occupant);
        Ok(())
    }

    fn move_slot(
        &mut self,
        occupant: Slot,
        from: (CategoryId, String),
        to: (CategoryId, String),
    ) -> AppResult<()> {
        match self.slots.get(&to) {
            Some(existing) if *existing == occupant => return Ok(()),
            Some(existing) => return Err(self.occupied(to.0, &to.1, *existing)),
            None => {}
        }
        self.slots.remove(&from);
        self.slots.insert(to, occupant);
        Ok(())
    }

    fn occupied(&self, parent: CategoryId, token: &str, existing: Slot) -> AppError {
        let path = self
            .categories
            .get(&parent)
            .and_then(|c| c.cached_url.as_deref())
            .map(|url| join_path(url, token))
            .unwrap_or_else(|| token.to_string());
        AppError::name_conflict(existing.kind(), &path)
    }
}
