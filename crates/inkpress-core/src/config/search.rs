//! Search-indexing collaborator configuration.

use serde::{Deserialize, Serialize};

/// Connection settings for the Elasticsearch-compatible indexer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Whether article documents are pushed to the search service.
    #[serde(default)]
    pub enabled: bool,
    /// Base URL including port, e.g. `http://localhost:9200`.
    #[serde(default = "default_url")]
    pub url: String,
    /// Index that receives article documents.
    #[serde(default = "default_index")]
    pub index: String,
    /// Basic-auth username.
    #[serde(default)]
    pub username: Option<String>,
    /// Basic-auth password.
    #[serde(default)]
    pub password: Option<String>,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: default_url(),
            index: default_index(),
            username: None,
            password: None,
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_url() -> String {
    "http://localhost:9200".to_string()
}

fn default_index() -> String {
    "articles".to_string()
}

fn default_timeout() -> u64 {
    5
}
