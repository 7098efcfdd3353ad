//! Elasticsearch-compatible HTTP indexer.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};

use inkpress_core::AppError;
use inkpress_core::config::SearchConfig;
use inkpress_core::error::ErrorKind;
use inkpress_core::result::AppResult;
use inkpress_core::traits::{SearchDocument, SearchIndexer};

/// Indexes article documents with `PUT {url}/{index}/_doc/{id}`.
#[derive(Debug, Clone)]
pub struct ElasticsearchIndexer {
    client: Client,
    base_url: String,
    index: String,
    credentials: Option<(String, Option<String>)>,
}

impl ElasticsearchIndexer {
    /// Build an indexer from the search configuration.
    pub fn from_config(config: &SearchConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    "Failed to build search HTTP client",
                    e,
                )
            })?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            index: config.index.clone(),
            credentials: config
                .username
                .clone()
                .map(|user| (user, config.password.clone())),
        })
    }

    /// URL of the document for `document`.
    pub fn document_url(&self, document: &SearchDocument) -> String {
        format!("{}/{}/_doc/{}", self.base_url, self.index, document.article_id)
    }
}

/// The JSON body stored for an article.
pub fn es_document(document: &SearchDocument) -> Value {
    let mut body = json!({
        "path": document.path,
        "title": document.title,
        "summary": document.summary,
        "content": document.content,
        "authors": document.authors,
        "tags": document.tags,
    });
    if let Some(text) = &document.text {
        body["text"] = Value::String(text.clone());
    }
    body
}

#[async_trait]
impl SearchIndexer for ElasticsearchIndexer {
    fn name(&self) -> &str {
        "elasticsearch"
    }

    async fn index(&self, document: &SearchDocument) -> AppResult<()> {
        let mut request = self
            .client
            .put(self.document_url(document))
            .json(&es_document(document));
        if let Some((user, password)) = &self.credentials {
            request = request.basic_auth(user, password.as_ref());
        }

        let response = request.send().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                "Search service request failed",
                e,
            )
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::external_service(format!(
                "Search service answered {status}: {body}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use inkpress_core::types::id::ArticleId;

    use super::*;

    fn document(text: Option<&str>) -> SearchDocument {
        SearchDocument {
            article_id: ArticleId::new(),
            path: "/docs/intro".into(),
            title: "Intro".into(),
            summary: "First steps".into(),
            content: "Hello".into(),
            authors: vec!["ada".into()],
            tags: vec!["rust".into()],
            text: text.map(str::to_string),
        }
    }

    #[test]
    fn test_document_body_and_url() {
        let indexer = ElasticsearchIndexer::from_config(&SearchConfig {
            enabled: true,
            url: "http://search:9200/".into(),
            ..SearchConfig::default()
        })
        .expect("indexer");

        let doc = document(None);
        assert_eq!(
            indexer.document_url(&doc),
            format!("http://search:9200/articles/_doc/{}", doc.article_id)
        );

        let body = es_document(&doc);
        assert_eq!(body["path"], "/docs/intro");
        assert_eq!(body["authors"][0], "ada");
        assert!(body.get("text").is_none());

        let body = es_document(&document(Some("transcript")));
        assert_eq!(body["text"], "transcript");
    }
}
