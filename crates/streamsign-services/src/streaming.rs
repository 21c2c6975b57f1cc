//! Playlist resolution: Lister → Signer → fetch → rewrite.

use crate::manifest::{ManifestFetcher, ManifestRewriter};
use std::sync::Arc;
use std::time::Duration;
use streamsign_core::{AppError, Config, RewrittenManifest, SignedUrl, VideoName};
use streamsign_storage::{Storage, UrlSigner, VideoLister};

/// Values the pipeline takes from configuration.
#[derive(Debug, Clone)]
pub struct StreamingSettings {
    pub video_namespace: String,
    pub segment_url_expiry: Duration,
    pub player_url_expiry: Duration,
    pub storage_timeout: Duration,
}

impl StreamingSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            video_namespace: config.video_namespace().to_string(),
            segment_url_expiry: config.segment_url_expiry(),
            player_url_expiry: config.player_url_expiry(),
            storage_timeout: config.storage_timeout(),
        }
    }
}

/// Stateless per-request pipeline. Clones share the storage handle and HTTP client only.
#[derive(Clone)]
pub struct StreamingService {
    lister: VideoLister,
    signer: UrlSigner,
    fetcher: Arc<dyn ManifestFetcher>,
    settings: StreamingSettings,
}

impl StreamingService {
    pub fn new(
        storage: Arc<dyn Storage>,
        fetcher: Arc<dyn ManifestFetcher>,
        settings: StreamingSettings,
    ) -> Self {
        Self {
            lister: VideoLister::new(storage.clone(), settings.storage_timeout),
            signer: UrlSigner::new(storage, settings.storage_timeout),
            fetcher,
            settings,
        }
    }

    pub fn settings(&self) -> &StreamingSettings {
        &self.settings
    }

    /// Produce the manifest for `name` with every segment reference replaced by a signed URL.
    ///
    /// Nothing is returned until the whole manifest has been rewritten.
    #[tracing::instrument(skip(self, name), fields(video_name = %name))]
    pub async fn resolve_playlist(&self, name: &VideoName) -> Result<RewrittenManifest, AppError> {
        let start = std::time::Instant::now();
        let prefix = name.prefix(&self.settings.video_namespace);
        let objects = self.lister.list(&prefix).await?;

        let expiry = self.settings.segment_url_expiry;
        let (manifest_url, segment_urls) = tokio::try_join!(
            self.signer.sign(&objects.manifest_key, expiry),
            self.signer.sign_all(&objects.segment_keys, expiry),
        )?;

        let body = self.fetcher.fetch(&manifest_url).await?;
        let rewriter = ManifestRewriter::new(&segment_urls)?;
        let rewritten = rewriter.rewrite(&body);

        tracing::info!(
            prefix = %prefix,
            manifest_key = %objects.manifest_key,
            segment_count = segment_urls.len(),
            manifest_bytes = rewritten.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Playlist rewritten"
        );

        Ok(rewritten)
    }

    /// Long-lived signed URL of the video's manifest, for handing to a player page.
    #[tracing::instrument(skip(self, name), fields(video_name = %name))]
    pub async fn player_url(&self, name: &VideoName) -> Result<SignedUrl, AppError> {
        let prefix = name.prefix(&self.settings.video_namespace);
        let objects = self.lister.list(&prefix).await?;
        self.signer
            .sign(&objects.manifest_key, self.settings.player_url_expiry)
            .await
    }
}
