//! SOS Dispatch - Main entry point
//!
//! Loads configuration, verifies channel credentials and serves the
//! `/send-sos` endpoint.

use anyhow::Result;
use sos_dispatch::server::run_server;
use sos_dispatch::{
    create_router, AdapterRegistry, AppState, Config, DispatchSettings, Dispatcher, Metrics,
    RequestValidator,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration before logging so LOG_LEVEL can seed the filter
    let config = Config::from_env();

    let fallback = config
        .as_ref()
        .map(|c| c.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let metrics = Metrics::new();

    // Missing credentials for an enabled channel are fatal here
    let registry = match AdapterRegistry::build(&config, &metrics) {
        Ok(registry) => registry,
        Err(e) => {
            error!("Refusing to start: {}", e);
            return Err(e.into());
        }
    };

    let settings = DispatchSettings {
        cycle_timeout: config.dispatch_timeout(),
        max_concurrent_sends: config.max_concurrent_sends,
    };

    info!(
        channels = ?registry.enabled_kinds(),
        dispatch_timeout_secs = config.dispatch_timeout,
        max_concurrent_sends = config.max_concurrent_sends,
        "SOS dispatcher initialized"
    );

    let dispatcher = Dispatcher::new(registry, settings, metrics.clone());
    let validator = RequestValidator::new(config.validate_coordinate_range);
    let router = create_router(AppState::new(dispatcher, validator, metrics));

    run_server(router, config.port).await?;

    info!("SOS dispatcher shutdown complete");
    Ok(())
}
