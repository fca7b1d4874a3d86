//! Liveness endpoint

/// Health check endpoint
#[allow(clippy::unused_async)]
pub async fn health_check() -> &'static str {
    "OK"
}
