//! PostgreSQL content store.

mod collaborators;
mod tx;

pub use collaborators::{PgCommentCascade, PgFileResolver};
pub use tx::PgContentTx;

use async_trait::async_trait;
use tracing::debug;

use inkpress_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::error::db_err;
use crate::store::{ContentStore, ContentTx, TxMode};

/// Content store backed by PostgreSQL.
///
/// Write transactions run at `SERIALIZABLE`, so a check-then-insert inside
/// one transaction cannot interleave with another writer's; read
/// transactions use the server default (`READ COMMITTED`).
#[derive(Debug, Clone)]
pub struct PgContentStore {
    db: DatabasePool,
}

impl PgContentStore {
    /// Create a store over a connected pool.
    pub fn new(db: DatabasePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ContentStore for PgContentStore {
    fn backend(&self) -> &str {
        "postgres"
    }

    async fn begin(&self, mode: TxMode) -> AppResult<Box<dyn ContentTx>> {
        let mut tx = self
            .db
            .pool()
            .begin()
            .await
            .map_err(db_err("Failed to begin transaction"))?;

        let isolation = match mode {
            TxMode::ReadWrite => "SET TRANSACTION ISOLATION LEVEL SERIALIZABLE, READ WRITE",
            TxMode::ReadOnly => "SET TRANSACTION READ ONLY",
        };
        sqlx::query(isolation)
            .execute(&mut *tx)
            .await
            .map_err(db_err("Failed to set transaction mode"))?;

        debug!(?mode, "Transaction started");
        Ok(Box::new(PgContentTx::new(tx, mode)))
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(self.db.pool())
            .await
            .map(|v| v == 1)
            .map_err(db_err("Health check failed"))
    }
}
