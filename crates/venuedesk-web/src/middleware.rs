//! Request logging middleware

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{Instrument, info, warn};

/// Log every request with its status and duration inside a request span
pub async fn request_logging(request: Request, next: Next) -> Response {
    let start_time = Instant::now();
    let span = tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
    );

    async move {
        let response = next.run(request).await;
        let elapsed = start_time.elapsed();
        let status = response.status();

        if status.is_client_error() || status.is_server_error() {
            warn!(status = %status, elapsed = ?elapsed, "request completed with error");
        } else {
            info!(status = %status, elapsed = ?elapsed, "request completed");
        }
        response
    }
    .instrument(span)
    .await
}
