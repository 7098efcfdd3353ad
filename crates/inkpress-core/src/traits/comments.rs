use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::id::ArticleId;

/// Comment collaborator, told when an article goes away so that it can drop
/// the comment tree it owns.
#[async_trait]
pub trait CommentCascade: Send + Sync + std::fmt::Debug + 'static {
    /// The article was deleted.
    async fn article_deleted(&self, article_id: ArticleId) -> AppResult<()>;
}
