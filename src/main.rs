//! Tally API Server
//!
//! Run with: cargo run --bin tally
//!
//! # Configuration
//!
//! Loaded from the first of `$XDG_CONFIG_HOME/tally/config.toml`,
//! `/etc/tally/config.toml`, or `./config.toml`, then overridden by
//! environment variables:
//!
//! - `TALLY_DATA_DIR`: Data directory
//! - `TALLY_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `TALLY_API_PORT`: Port to listen on (default: 8090)
//! - `TALLY_LIST_LIMIT`: Default row cap for listings (default: 50)
//! - `TALLY_DEFAULT_LABEL`: Label used when requests name none
//! - `TALLY_UTC_OFFSET`: Calendar offset like "+09:00" (default: +00:00)
//! - `TALLY_LOG_LEVEL` / `RUST_LOG`: Log level (default: info)
//! - `TALLY_LOG_FORMAT`: "pretty" or "json"

use anyhow::Context;
use std::path::Path;
use std::sync::Arc;
use tally::api::{serve, ApiConfig, AppState};
use tally::config::Config;
use tally::store::EventStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default();

    init_tracing(&config);

    tracing::info!("Starting Tally API server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Data directory: {}", config.store.data_dir);

    let calendar = config
        .chart
        .calendar()
        .context("Invalid utc_offset in configuration")?;

    let store = Arc::new(
        EventStore::open(Path::new(&config.store.data_dir))
            .context("Failed to open event store")?,
    );

    let api_config = ApiConfig {
        host: config.api.host.clone(),
        port: config.api.port,
        list_limit: config.api.list_limit,
        default_label: config.chart.default_label.clone(),
        calendar,
    };

    tracing::info!("Calendar offset: {}", config.chart.utc_offset);
    tracing::info!("Default label: {}", api_config.default_label);

    let state = AppState::new(store, api_config.clone());

    serve(state, &api_config).await?;

    tracing::info!("Tally API server stopped");
    Ok(())
}

/// Initialize the tracing subscriber from the logging config
fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "tally={},tower_http=info",
            config.logging.level
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);

    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
