//! In-memory content store and collaborators for single-node deployments
//! and tests.
//!
//! Writers are serialized by a Tokio mutex held for the whole transaction.
//! Each write transaction works on its own copy of the state and publishes
//! it on commit; readers clone the committed `Arc` and never wait on a
//! writer. Isolation is therefore snapshot for reads and serial for writes.

mod state;
mod tx;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use inkpress_core::error::AppError;
use inkpress_core::result::AppResult;
use inkpress_core::traits::{CommentCascade, FileResolver};
use inkpress_core::types::id::{ArticleId, FileId};

use crate::store::{ContentStore, ContentTx, TxMode};

use self::state::MemoryState;
pub use self::tx::MemoryContentTx;

#[derive(Debug, Default)]
struct Shared {
    committed: RwLock<Arc<MemoryState>>,
    writer: Arc<Mutex<()>>,
}

/// Process-local [`ContentStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryContentStore {
    shared: Arc<Shared>,
}

impl MemoryContentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    fn backend(&self) -> &str {
        "memory"
    }

    async fn begin(&self, mode: TxMode) -> AppResult<Box<dyn ContentTx>> {
        let writer = match mode {
            TxMode::ReadWrite => Some(Arc::clone(&self.shared.writer).lock_owned().await),
            TxMode::ReadOnly => None,
        };
        let snapshot = Arc::clone(&*self.shared.committed.read().await);
        Ok(Box::new(MemoryContentTx::new(
            snapshot,
            mode,
            Arc::clone(&self.shared),
            writer,
        )))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

/// File resolver over an in-process path table.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileResolver {
    files: Arc<RwLock<HashMap<String, FileId>>>,
}

impl MemoryFileResolver {
    /// Create an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a file and return its id.
    pub async fn register(&self, path: impl Into<String>) -> FileId {
        let id = FileId::new();
        self.files.write().await.insert(path.into(), id);
        id
    }
}

#[async_trait]
impl FileResolver for MemoryFileResolver {
    async fn resolve(&self, path: &str) -> AppResult<FileId> {
        self.files
            .read()
            .await
            .get(path)
            .copied()
            .ok_or_else(|| AppError::invalid_reference(format!("No file is stored at '{path}'")))
    }
}

/// Comment collaborator that records which articles were deleted.
#[derive(Debug, Clone, Default)]
pub struct MemoryCommentCascade {
    deleted: Arc<Mutex<Vec<ArticleId>>>,
}

impl MemoryCommentCascade {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Articles reported as deleted so far.
    pub async fn deleted(&self) -> Vec<ArticleId> {
        self.deleted.lock().await.clone()
    }
}

#[async_trait]
impl CommentCascade for MemoryCommentCascade {
    async fn article_deleted(&self, article_id: ArticleId) -> AppResult<()> {
        debug!(article_id = %article_id, "Dropping comments of deleted article");
        self.deleted.lock().await.push(article_id);
        Ok(())
    }
}
