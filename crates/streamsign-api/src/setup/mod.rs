//! Application setup and initialization

pub mod routes;
pub mod server;
pub mod storage;

use crate::state::AppState;
use anyhow::{Context, Result};
use std::sync::Arc;
use streamsign_core::Config;
use streamsign_services::{HttpManifestFetcher, StreamingService, StreamingSettings};

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    config
        .validate()
        .context("Configuration validation failed")?;

    crate::telemetry::init_telemetry();

    tracing::info!(
        environment = %config.environment(),
        video_namespace = %config.video_namespace(),
        "Configuration loaded and validated successfully"
    );

    let storage = storage::setup_storage(&config).await?;

    let fetcher = HttpManifestFetcher::new(config.manifest_fetch_timeout())
        .context("Failed to create manifest fetcher")?;

    let streaming = StreamingService::new(
        storage,
        Arc::new(fetcher),
        StreamingSettings::from_config(&config),
    );

    let state = Arc::new(AppState { streaming });

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
