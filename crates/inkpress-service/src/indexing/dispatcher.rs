//! Fire-and-forget dispatch of search documents.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use inkpress_core::traits::{SearchDocument, SearchIndexer};

use super::DisabledIndexer;

/// Hands documents to a [`SearchIndexer`] on background tasks.
#[derive(Debug, Clone)]
pub struct IndexDispatcher {
    indexer: Arc<dyn SearchIndexer>,
}

impl IndexDispatcher {
    /// Dispatch to `indexer`.
    pub fn new(indexer: Arc<dyn SearchIndexer>) -> Self {
        Self { indexer }
    }

    /// A dispatcher that drops every document.
    pub fn disabled() -> Self {
        Self::new(Arc::new(DisabledIndexer))
    }

    /// Name of the underlying indexer.
    pub fn backend(&self) -> &str {
        self.indexer.name()
    }

    /// Index `document` in the background. Failures are logged and
    /// otherwise ignored.
    pub fn dispatch(&self, document: SearchDocument) -> JoinHandle<()> {
        let indexer = Arc::clone(&self.indexer);
        tokio::spawn(async move {
            match indexer.index(&document).await {
                Ok(()) => debug!(
                    article_id = %document.article_id,
                    backend = indexer.name(),
                    "Article indexed"
                ),
                Err(e) => warn!(
                    article_id = %document.article_id,
                    backend = indexer.name(),
                    error = %e,
                    "Failed to index article"
                ),
            }
        })
    }
}
