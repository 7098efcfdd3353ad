//! Search-indexing collaborator wiring.
//!
//! Articles are pushed to the indexer after their transaction commits, on a
//! spawned task, so indexing never delays or undoes a write.

pub mod dispatcher;
pub mod elasticsearch;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use inkpress_core::config::SearchConfig;
use inkpress_core::result::AppResult;
use inkpress_core::traits::{SearchDocument, SearchIndexer};

pub use dispatcher::IndexDispatcher;
pub use elasticsearch::ElasticsearchIndexer;

/// Indexer used when search is turned off.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledIndexer;

#[async_trait]
impl SearchIndexer for DisabledIndexer {
    fn name(&self) -> &str {
        "disabled"
    }

    async fn index(&self, document: &SearchDocument) -> AppResult<()> {
        debug!(article_id = %document.article_id, "Search disabled, skipping index");
        Ok(())
    }
}

/// Build the indexer selected by configuration.
pub fn build_indexer(config: &SearchConfig) -> AppResult<Arc<dyn SearchIndexer>> {
    if config.enabled {
        Ok(Arc::new(ElasticsearchIndexer::from_config(config)?))
    } else {
        Ok(Arc::new(DisabledIndexer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_indexer_follows_enabled_flag() {
        let config = SearchConfig::default();
        assert_eq!(build_indexer(&config).expect("build").name(), "disabled");

        let config = SearchConfig {
            enabled: true,
            ..SearchConfig::default()
        };
        assert_eq!(build_indexer(&config).expect("build").name(), "elasticsearch");
    }
}
