//! Search-indexing collaborator.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;
use crate::types::id::ArticleId;

/// The document sent to the search backend after an article is written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchDocument {
    /// Article identifier, also used as the document id.
    pub article_id: ArticleId,
    /// Resolved absolute path of the article.
    pub path: String,
    /// Article title.
    pub title: String,
    /// Article summary.
    pub summary: String,
    /// Published content.
    pub content: String,
    /// Author usernames.
    pub authors: Vec<String>,
    /// Tag names.
    pub tags: Vec<String>,
    /// Optional raw transcript supplied with the update.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Receives article documents for full-text indexing.
///
/// Calls are made after the content transaction has committed; an error here
/// is logged by the caller and never undoes the write.
#[async_trait]
pub trait SearchIndexer: Send + Sync + std::fmt::Debug + 'static {
    /// Backend name for logs (e.g. "elasticsearch").
    fn name(&self) -> &str;

    /// Index or replace a document.
    async fn index(&self, document: &SearchDocument) -> AppResult<()>;
}
