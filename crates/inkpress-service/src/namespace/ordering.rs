//! Ordering of the articles and subcategories shown under a category.
//!
//! Ordering happens at listing time only; resolution never depends on it.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use inkpress_core::result::AppResult;
use inkpress_core::types::{PageRequest, PageResponse, SortDirection};
use inkpress_database::ContentTx;
use inkpress_entity::article::Article;
use inkpress_entity::category::{Category, SortingType};

/// How to list the articles of a category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleListing {
    /// Direction of the chronological order. Manual order is always
    /// ascending.
    #[serde(default)]
    pub direction: SortDirection,
    /// Window applied after sorting.
    #[serde(default)]
    pub page: PageRequest,
}

/// Filter and sort articles for display.
///
/// - `Chronological`: by `publish_time`, then `creation_time`, then insert
///   order, all in `direction`. Unpublished articles are only kept for
///   privileged callers and always come after the published ones.
/// - `Manual`: by `category_sorting_index` ascending, ties in insert order.
///
/// Hidden articles (`is_visible == false`) are dropped for public callers
/// in both modes.
pub fn order_articles(
    articles: Vec<Article>,
    sorting: SortingType,
    direction: SortDirection,
    privileged: bool,
) -> Vec<Article> {
    let mut visible: Vec<Article> = articles
        .into_iter()
        .filter(|a| privileged || a.is_visible)
        .filter(|a| privileged || sorting == SortingType::Manual || a.is_published())
        .collect();

    match sorting {
        SortingType::Chronological => {
            visible.sort_by(|a, b| {
                a.publish_time
                    .is_none()
                    .cmp(&b.publish_time.is_none())
                    .then_with(|| direction.apply(chronological(a, b)))
            });
        }
        SortingType::Manual => {
            visible.sort_by(|a, b| {
                a.category_sorting_index
                    .cmp(&b.category_sorting_index)
                    .then(a.seq.cmp(&b.seq))
            });
        }
    }
    visible
}

fn chronological(a: &Article, b: &Article) -> Ordering {
    a.publish_time
        .cmp(&b.publish_time)
        .then(a.creation_time.cmp(&b.creation_time))
        .then(a.seq.cmp(&b.seq))
}

/// Articles directly in `category`, ordered by its sorting policy and then
/// windowed.
pub async fn list_articles(
    tx: &mut dyn ContentTx,
    category: &Category,
    listing: &ArticleListing,
    privileged: bool,
) -> AppResult<PageResponse<Article>> {
    let articles = tx.articles_in(category.id).await?;
    let ordered = order_articles(articles, category.sorting_type, listing.direction, privileged);
    Ok(PageResponse::from_ordered(ordered, &listing.page))
}

/// Direct subcategories, always by name.
pub async fn list_subcategories(tx: &mut dyn ContentTx, category: &Category) -> AppResult<Vec<Category>> {
    let mut children = tx.child_categories(category.id).await?;
    children.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
    Ok(children)
}
