//! Web server for the VenueDesk dashboard
#![forbid(unsafe_code)]

use std::net::{IpAddr, SocketAddr};
use tracing::{info, warn};
use venuedesk_core::Config;
use venuedesk_web::build_app;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (config, load_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    venuedesk_core::init_logging(&config.logging)?;
    if let Some(e) = load_error {
        warn!("Failed to load config: {e}, using defaults");
    }

    let app = build_app(config.clone())?;

    let host: IpAddr = config
        .server
        .host
        .parse()
        .map_err(|e| format!("Invalid server host '{}': {e}", config.server.host))?;
    let addr = SocketAddr::new(host, config.server.port);

    info!(%addr, backend = %config.backend.base_url, "Starting VenueDesk dashboard server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
