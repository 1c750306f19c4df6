//! `reqwest`-backed implementation of [`CollectionReader`].

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::models::config::AdminConfig;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{CollectionReader, PageRequest};

/// Longest plain-text body echoed back as an error message.
const MAX_TEXT_MESSAGE_LEN: usize = 200;

#[derive(Clone, Debug)]
pub struct HttpCollectionReader {
    client: reqwest::Client,
    base_url: String,
    api_token: Option<String>,
}

impl HttpCollectionReader {
    pub fn new(config: &AdminConfig) -> RepositoryResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> RepositoryResult<Value> {
        let url = self.url(path);
        log::debug!("GET {url} {query:?}");

        let mut request = self.client.get(&url).query(query);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|err| {
            log::warn!("Request to {url} failed: {err}");
            RepositoryError::from(err)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<Value>().await?);
        }

        let body = response.text().await.unwrap_or_default();
        log::warn!("Request to {url} returned {status}");
        Err(RepositoryError::Server {
            status: status.as_u16(),
            message: error_message_from_body(&body),
        })
    }
}

#[async_trait]
impl CollectionReader for HttpCollectionReader {
    async fn fetch_page(&self, path: &str, request: &PageRequest) -> RepositoryResult<Value> {
        self.get(path, &request.query_pairs()).await
    }

    async fn fetch_all(&self, path: &str) -> RepositoryResult<Value> {
        self.get(path, &[]).await
    }
}

/// Pulls a human-readable message out of an error response body.
///
/// JSON bodies are searched for the usual `message`/`error`/`detail` keys;
/// short plain-text bodies are used verbatim; anything else yields `None`.
pub fn error_message_from_body(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    if let Ok(json) = serde_json::from_str::<Value>(body) {
        return ["message", "error", "detail"]
            .iter()
            .filter_map(|key| json.get(key).and_then(Value::as_str))
            .map(str::trim)
            .find(|msg| !msg.is_empty())
            .map(str::to_string);
    }

    if body.len() <= MAX_TEXT_MESSAGE_LEN && !body.starts_with('<') {
        Some(body.to_string())
    } else {
        None
    }
}
