use async_trait::async_trait;
use std::time::Duration;
use streamsign_core::{AppError, SignedUrl};

/// Retrieves the raw manifest body through its signed URL.
#[async_trait]
pub trait ManifestFetcher: Send + Sync {
    async fn fetch(&self, manifest: &SignedUrl) -> Result<Vec<u8>, AppError>;
}

/// Plain HTTP GET against the signed URL, bounded by the client timeout.
#[derive(Clone)]
pub struct HttpManifestFetcher {
    client: reqwest::Client,
}

impl HttpManifestFetcher {
    pub fn new(timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ManifestFetcher for HttpManifestFetcher {
    async fn fetch(&self, manifest: &SignedUrl) -> Result<Vec<u8>, AppError> {
        let fetch_failed = |reason: String| AppError::ManifestFetchFailed {
            key: manifest.key.clone(),
            reason,
        };
        let start = std::time::Instant::now();

        // reqwest errors embed the request URL; strip it so the signature is never logged.
        let response = self
            .client
            .get(&manifest.url)
            .send()
            .await
            .map_err(|e| fetch_failed(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_failed(format!("storage returned status {}", status)));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| fetch_failed(format!("failed to read body: {}", e.without_url())))?;

        tracing::debug!(
            key = %manifest.key,
            size_bytes = body.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Fetched manifest"
        );

        Ok(body.to_vec())
    }
}
