//! Route definitions for the dashboard API

use crate::{
    handlers::{entities, health, i18n},
    state::AppState,
};
use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;

/// Build the complete dashboard router
pub fn build_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Translation
        .route("/api/i18n", get(i18n::current_language))
        .route("/api/i18n/language", put(i18n::set_language))
        .route("/api/i18n/translate", get(i18n::translate))
        .route("/api/i18n/:lang/bundle", get(i18n::bundle))
        // Portal collections
        .route("/api/portals/:portal", get(entities::portal_overview))
        .route("/api/portals/:portal/:kind", get(entities::list_entities))
        .route(
            "/api/portals/:portal/:kind/bulk-delete",
            post(entities::bulk_delete),
        )
        // Health check
        .route("/health", get(health::health_check))
}
