//! File-storage collaborator lookup.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::id::FileId;

/// Resolves a stored file by path.
///
/// Implementations fail closed: a path that does not resolve must produce an
/// `InvalidReference` error rather than a placeholder id.
#[async_trait]
pub trait FileResolver: Send + Sync + std::fmt::Debug + 'static {
    /// Look up the file stored at `path`.
    async fn resolve(&self, path: &str) -> AppResult<FileId>;
}
