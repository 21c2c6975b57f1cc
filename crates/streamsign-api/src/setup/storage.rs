//! Storage setup and initialization

use anyhow::{Context, Result};
use std::sync::Arc;
use streamsign_core::Config;
use streamsign_storage::{create_storage, Storage};

/// Build the process-wide storage client. Missing credentials fail here, before the
/// server accepts any request.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!("Initializing storage abstraction...");
    let storage = create_storage(config)
        .await
        .context("Failed to initialize storage backend")?;
    tracing::info!(
        backend = %storage.backend_type(),
        bucket = config.s3_bucket().unwrap_or("-"),
        endpoint = config.s3_endpoint().unwrap_or("-"),
        "Storage abstraction initialized successfully"
    );
    Ok(storage)
}
