//! Path resolution.

use std::collections::HashSet;

use tracing::debug;

use inkpress_core::AppError;
use inkpress_core::error::ErrorKind;
use inkpress_core::result::AppResult;
use inkpress_core::types::{ContentPath, ROOT_PATH, join_path};
use inkpress_database::ContentTx;
use inkpress_entity::article::Article;
use inkpress_entity::category::Category;
use inkpress_entity::namespace::Slot;

/// Resolve a path to the category it names.
///
/// The cached path index is tried first. On a miss the path is walked
/// component by component from the root; each step is unambiguous because a
/// directory name is unique under its parent.
pub async fn resolve_category(tx: &mut dyn ContentTx, path: &ContentPath) -> AppResult<Category> {
    let url = path.to_string();
    if let Some(category) = tx.category_by_cached_url(&url).await? {
        if cache_hit_matches(&category, path) {
            return Ok(category);
        }
        debug!(path = %url, category_id = %category.id, "Stale cached path, walking");
    }

    debug!(path = %url, "Cached path miss, walking from root");
    let mut current = root(tx).await?;
    for component in path.components() {
        current = match tx.slot(current.id, component).await? {
            Some(Slot::Category(id)) => tx
                .category_by_id(id)
                .await?
                .ok_or_else(|| not_found(&url))?,
            _ => return Err(not_found(&url)),
        };
    }
    Ok(current)
}

/// Resolve a path to the article it names, with its owning category.
///
/// A prefix that does not name a category is an `InvalidPath`; a missing
/// final article is a `PathNotFound`.
pub async fn resolve_article(
    tx: &mut dyn ContentTx,
    path: &ContentPath,
) -> AppResult<(Category, Article)> {
    let Some((prefix, filename)) = path.split_last() else {
        return Err(AppError::invalid_path("The root path does not name an article"));
    };

    let category = match resolve_category(tx, &prefix).await {
        Ok(category) => category,
        Err(e) if e.kind == ErrorKind::PathNotFound => {
            return Err(AppError::invalid_path(format!(
                "No category exists at '{prefix}'"
            )));
        }
        Err(e) => return Err(e),
    };

    let article = match tx.slot(category.id, filename).await? {
        Some(Slot::Article(id)) => tx.article_by_id(id).await?,
        _ => None,
    };
    let article = article.ok_or_else(|| {
        AppError::path_not_found(format!("No article exists at '{path}'"))
    })?;
    Ok((category, article))
}

/// The live absolute path of a category, built by walking parent links to
/// the root. The cached path is not consulted.
pub async fn full_path(tx: &mut dyn ContentTx, category: &Category) -> AppResult<String> {
    let mut tokens = Vec::new();
    let mut seen = HashSet::from([category.id]);
    let mut parent = category.parent_id;
    if parent.is_some() {
        tokens.push(category.directory_name.clone());
    }

    while let Some(id) = parent {
        if !seen.insert(id) {
            return Err(AppError::internal(format!(
                "Category {} has a cyclic parent chain",
                category.id
            )));
        }
        let ancestor = tx
            .category_by_id(id)
            .await?
            .ok_or_else(|| AppError::internal(format!("Parent category {id} is missing")))?;
        if ancestor.parent_id.is_some() {
            tokens.push(ancestor.directory_name);
        }
        parent = ancestor.parent_id;
    }

    if tokens.is_empty() {
        return Ok(ROOT_PATH.to_string());
    }
    tokens.reverse();
    Ok(ContentPath::from_components(tokens).to_string())
}

/// The absolute path of an article inside a category whose path is known.
pub fn article_path(category_path: &str, article: &Article) -> String {
    join_path(category_path, &article.filename)
}

/// Load the root category, which must exist once bootstrap has run.
pub async fn root(tx: &mut dyn ContentTx) -> AppResult<Category> {
    tx.root_category()
        .await?
        .ok_or_else(|| AppError::internal("The root category does not exist"))
}

fn cache_hit_matches(category: &Category, path: &ContentPath) -> bool {
    match path.last() {
        Some(last) => category.directory_name == last,
        None => category.is_root(),
    }
}

fn not_found(path: &str) -> AppError {
    AppError::path_not_found(format!("No category exists at '{path}'"))
}
