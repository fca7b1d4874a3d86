//! Application state management

use crate::api_client::RestClient;
use crate::backend::EntityBackend;
use crate::bulk::BulkGate;
use std::sync::Arc;
use tracing::info;
use venuedesk_core::{Config, Result};
use venuedesk_i18n::LanguageContext;

/// Application state holding configuration, the backend and the active
/// language
pub struct AppState {
    /// Application configuration
    pub config: Config,
    /// Backend entity operations go to
    pub backend: Arc<dyn EntityBackend>,
    /// Active language shared by every handler
    pub language: Arc<LanguageContext>,
    /// Collections with a bulk action running
    pub bulk_gate: BulkGate,
}

impl AppState {
    /// Create application state from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the
    /// dictionaries fail to load.
    pub fn new(config: Config) -> Result<Self> {
        let backend = RestClient::from_config(&config.backend)?;
        let language = LanguageContext::from_config(&config.i18n)?;
        info!(
            backend = backend.base_url(),
            language = %language.language(),
            bulk_mode = ?config.backend.bulk_mode,
            "application state ready"
        );
        Ok(Self::with_parts(config, Arc::new(backend), Arc::new(language)))
    }

    /// Assemble state from already-built parts
    pub fn with_parts(
        config: Config,
        backend: Arc<dyn EntityBackend>,
        language: Arc<LanguageContext>,
    ) -> Self {
        Self {
            config,
            backend,
            language,
            bulk_gate: BulkGate::new(),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("language", &self.language)
            .field("bulk_gate", &self.bulk_gate)
            .finish_non_exhaustive()
    }
}
