//! PostgreSQL-backed implementations of the file and comment collaborators.

use async_trait::async_trait;
use tracing::debug;

use inkpress_core::error::AppError;
use inkpress_core::result::AppResult;
use inkpress_core::traits::{CommentCascade, FileResolver};
use inkpress_core::types::id::{ArticleId, FileId};

use crate::connection::DatabasePool;
use crate::error::db_err;
use crate::repositories::{comment, file};

/// Resolves featured images against the `files` table.
#[derive(Debug, Clone)]
pub struct PgFileResolver {
    db: DatabasePool,
}

impl PgFileResolver {
    /// Create a resolver over a connected pool.
    pub fn new(db: DatabasePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FileResolver for PgFileResolver {
    async fn resolve(&self, path: &str) -> AppResult<FileId> {
        let mut conn = self
            .db
            .pool()
            .acquire()
            .await
            .map_err(db_err("Failed to acquire connection"))?;
        file::find_id_by_path(&mut conn, path)
            .await?
            .ok_or_else(|| AppError::invalid_reference(format!("No file is stored at '{path}'")))
    }
}

/// Drops the comments of deleted articles.
#[derive(Debug, Clone)]
pub struct PgCommentCascade {
    db: DatabasePool,
}

impl PgCommentCascade {
    /// Create a cascade over a connected pool.
    pub fn new(db: DatabasePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CommentCascade for PgCommentCascade {
    async fn article_deleted(&self, article_id: ArticleId) -> AppResult<()> {
        let mut conn = self
            .db
            .pool()
            .acquire()
            .await
            .map_err(db_err("Failed to acquire connection"))?;
        let removed = comment::delete_for_article(&mut conn, article_id).await?;
        debug!(article_id = %article_id, removed, "Comments removed with article");
        Ok(())
    }
}
