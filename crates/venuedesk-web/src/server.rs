//! Web server setup and configuration

use crate::{middleware::request_logging, routes::build_routes, state::AppState};
use axum::Router;
use std::sync::Arc;
use venuedesk_core::{Config, Result};

/// Build the complete web application with all routes and state
///
/// # Errors
///
/// Returns an error if the application state cannot be created.
pub fn build_app(config: Config) -> Result<Router> {
    Ok(build_router(AppState::new(config)?))
}

/// Build the application around existing state
pub fn build_router(state: AppState) -> Router {
    build_routes()
        .layer(axum::middleware::from_fn(request_logging))
        .with_state(Arc::new(state))
}
