//! HTTP client for the VenueDesk REST backend

use crate::backend::EntityBackend;
use crate::dto::{BulkDeleteRequest, BulkDeleteResponse, EntityPage};
use crate::pagination::Pagination;
use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};
use venuedesk_core::config::BackendConfig;
use venuedesk_core::{BulkResult, EntityId, EntityKind, Error, Result};

/// REST client with an optional bearer token
#[derive(Debug, Clone)]
pub struct RestClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl RestClient {
    /// Create a client with reqwest's default settings
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: normalize_base(base_url.into()),
            token: None,
        }
    }

    /// Create a client from backend configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Configuration {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: normalize_base(config.base_url.clone()),
            token: config.token.clone(),
        })
    }

    /// Set the bearer token sent with every request
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Base URL endpoints are appended to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET` an endpoint
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    pub async fn get(&self, endpoint: &str) -> Result<Value> {
        self.request(Method::GET, endpoint, None).await
    }

    /// `POST` a JSON body
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    pub async fn post(&self, endpoint: &str, body: Option<&Value>) -> Result<Value> {
        self.request(Method::POST, endpoint, body).await
    }

    /// `PUT` a JSON body
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    pub async fn put(&self, endpoint: &str, body: Option<&Value>) -> Result<Value> {
        self.request(Method::PUT, endpoint, body).await
    }

    /// `PATCH` a JSON body
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    pub async fn patch(&self, endpoint: &str, body: Option<&Value>) -> Result<Value> {
        self.request(Method::PATCH, endpoint, body).await
    }

    /// `DELETE` an endpoint
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    pub async fn delete(&self, endpoint: &str) -> Result<Value> {
        self.request(Method::DELETE, endpoint, None).await
    }

    fn url(&self, endpoint: &str) -> String {
        if endpoint.starts_with('/') {
            format!("{}{endpoint}", self.base_url)
        } else {
            format!("{}/{endpoint}", self.base_url)
        }
    }

    async fn request(&self, method: Method, endpoint: &str, body: Option<&Value>) -> Result<Value> {
        let url = self.url(endpoint);
        debug!(%method, %url, "backend request");

        let mut request = self.client.request(method.clone(), &url);
        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| Error::Transport {
            message: format!("{method} {endpoint} failed: {e}"),
        })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| Error::Transport {
            message: format!("failed to read response from {endpoint}: {e}"),
        })?;

        if !status.is_success() {
            let message = error_message(status, &bytes);
            warn!(%method, endpoint, status = status.as_u16(), %message, "backend rejected request");
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::Authentication(message),
                _ => Error::Api {
                    status: status.as_u16(),
                    message,
                },
            });
        }

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&bytes).map_err(|e| Error::UnexpectedResponse {
            endpoint: endpoint.to_string(),
            message: format!("body is not JSON: {e}"),
        })
    }
}

fn normalize_base(base_url: String) -> String {
    match base_url.strip_suffix('/') {
        Some(trimmed) => trimmed.to_string(),
        None => base_url,
    }
}

/// Prefer the body's `message`, then `error`, then the raw text
fn error_message(status: StatusCode, body: &[u8]) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_slice::<Value>(body) {
        for field in ["message", "error"] {
            if let Some(Value::String(text)) = map.get(field)
                && !text.is_empty()
            {
                return text.clone();
            }
        }
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        text.to_string()
    }
}

#[async_trait]
impl EntityBackend for RestClient {
    async fn list(&self, kind: EntityKind, pagination: &Pagination) -> Result<EntityPage> {
        let endpoint = format!("/{}?{}", kind.as_path(), pagination.to_query());
        let body = self.get(&endpoint).await?;
        EntityPage::from_response(&endpoint, body)
    }

    async fn delete_batch(&self, kind: EntityKind, ids: &[EntityId]) -> Result<BulkResult> {
        let endpoint = format!("/{}/bulk-delete", kind.as_path());
        let request = serde_json::to_value(BulkDeleteRequest { ids: ids.to_vec() })?;
        let body = self.post(&endpoint, Some(&request)).await?;
        Ok(BulkDeleteResponse::from_response(&endpoint, body)?.into_result(ids.len()))
    }

    async fn delete_one(&self, kind: EntityKind, id: &str) -> Result<()> {
        let endpoint = format!("/{}/{}", kind.as_path(), urlencoding::encode(id));
        self.delete(&endpoint).await.map(drop)
    }
}
