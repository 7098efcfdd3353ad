//! Shared fixtures for the engine's unit tests.

use chrono::{DateTime, Utc};

use inkpress_core::types::id::{ArticleId, CategoryId};
use inkpress_core::types::{ContentPath, join_path};
use inkpress_database::{ContentStore, MemoryContentStore, TxMode};
use inkpress_entity::article::{Article, ArticleViewType, NewArticle};
use inkpress_entity::category::{Category, CategoryViewType, NewCategory, SortingType};

use super::resolver::resolve_category;

pub(crate) struct Fixture {
    pub store: MemoryContentStore,
    pub root: Category,
}

impl Fixture {
    pub async fn new() -> Self {
        let store = MemoryContentStore::new();
        let mut tx = store.begin(TxMode::ReadWrite).await.expect("begin");
        let root = tx.insert_category(&NewCategory::root()).await.expect("root");
        tx.commit().await.expect("commit");
        Self { store, root }
    }

    /// Create categories by path, parents first.
    pub async fn categories(&self, paths: &[&str]) -> Vec<Category> {
        let mut created = Vec::new();
        let mut tx = self.store.begin(TxMode::ReadWrite).await.expect("begin");
        for raw in paths {
            let path = ContentPath::parse(raw).expect("valid path");
            let (prefix, token) = path.split_last().expect("not root");
            let parent = resolve_category(tx.as_mut(), &prefix).await.expect("parent");
            let category = tx
                .insert_category(&NewCategory {
                    parent_id: Some(parent.id),
                    name: token.to_string(),
                    directory_name: token.to_string(),
                    description: String::new(),
                    view_type: CategoryViewType::Vertical,
                    sorting_type: SortingType::Chronological,
                    cached_url: Some(join_path(&prefix.to_string(), token)),
                })
                .await
                .expect("insert");
            created.push(category);
        }
        tx.commit().await.expect("commit");
        created
    }

    pub async fn article(&self, category: &Category, filename: &str, sorting_index: i32) -> Article {
        self.article_published(category, filename, sorting_index, None).await
    }

    pub async fn article_published(
        &self,
        category: &Category,
        filename: &str,
        sorting_index: i32,
        publish_time: Option<DateTime<Utc>>,
    ) -> Article {
        let mut tx = self.store.begin(TxMode::ReadWrite).await.expect("begin");
        let article = tx
            .insert_article(&NewArticle {
                category_id: category.id,
                filename: filename.to_string(),
                title: filename.to_string(),
                summary: String::new(),
                content: String::new(),
                publish_time,
                is_visible: true,
                view_type: ArticleViewType::SinglePage,
                can_comment: false,
                show_authors: true,
                category_sorting_index: sorting_index,
                featured_image_id: None,
            })
            .await
            .expect("insert article");
        tx.commit().await.expect("commit");
        article
    }
}

/// An article that is not stored anywhere.
pub(crate) fn bare_article(filename: &str) -> Article {
    let now = Utc::now();
    Article {
        id: ArticleId::new(),
        category_id: CategoryId::new(),
        filename: filename.to_string(),
        title: filename.to_string(),
        summary: String::new(),
        content: String::new(),
        draft_content: String::new(),
        creation_time: now,
        last_edit_time: now,
        publish_time: None,
        show_publish_time: true,
        is_visible: true,
        view_type: ArticleViewType::SinglePage,
        can_comment: false,
        show_authors: true,
        category_sorting_index: 0,
        featured_image_id: None,
        seq: 0,
    }
}
