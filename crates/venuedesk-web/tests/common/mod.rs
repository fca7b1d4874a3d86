//! Shared helpers for dashboard integration tests

#![allow(dead_code, clippy::unwrap_used)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use std::sync::{Arc, Once};
use tower::ServiceExt;
use venuedesk_core::{BulkMode, Config};
use venuedesk_i18n::{Language, LanguageContext, MemoryStore, TranslationDictionary};
use venuedesk_web::{AppState, RestClient, build_router};
use wiremock::MockServer;

static INIT_LOGGER: Once = Once::new();

/// Initialize test logging once per test binary
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .try_init();
    });
}

/// English context with nothing persisted
pub fn english_context() -> Arc<LanguageContext> {
    Arc::new(LanguageContext::new(
        Arc::new(TranslationDictionary::builtin().unwrap()),
        Arc::new(MemoryStore::new()),
        Language::En,
    ))
}

/// Dashboard router talking to `backend`
pub fn dashboard(backend: &MockServer, mode: BulkMode) -> Router {
    dashboard_at(&backend.uri(), mode)
}

/// Dashboard router talking to whatever listens at `base_url`
pub fn dashboard_at(base_url: &str, mode: BulkMode) -> Router {
    init_test_logging();
    let mut config = Config::default();
    config.backend.base_url = base_url.to_string();
    config.backend.bulk_mode = mode;

    let client = RestClient::new(base_url).with_token("test-token");
    build_router(AppState::with_parts(
        config,
        Arc::new(client),
        english_context(),
    ))
}

/// `{ "data": [{ "id": n }, ...], "total": len }` for the given ids
pub fn list_body(ids: impl IntoIterator<Item = u32>) -> Value {
    let data: Vec<Value> = ids
        .into_iter()
        .map(|id| json!({"id": id, "name": format!("Club {id}")}))
        .collect();
    let total = data.len();
    json!({"data": data, "total": total})
}

/// Send one request and decode the JSON answer (`Value::Null` if not JSON)
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, body)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
