use crate::keys::validate_key;
use crate::traits::{ObjectEntry, Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use futures::StreamExt;
use http::Method;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::signer::Signer;
use object_store::{ObjectMeta, ObjectStore, Result as ObjectResult};
use std::time::Duration;
use streamsign_core::S3Credentials;

/// S3 storage implementation
#[derive(Clone)]
pub struct S3Storage {
    store: AmazonS3,
    bucket: String,
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// # Arguments
    /// * `bucket` - S3 bucket name
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO, "https://us-east-1.linodeobjects.com" for Linode)
    /// * `credentials` - Static credentials; when `None` the builder falls back to the
    ///   standard AWS environment variables
    pub fn new(
        bucket: String,
        region: String,
        endpoint_url: Option<String>,
        credentials: Option<&S3Credentials>,
    ) -> StorageResult<Self> {
        let mut builder = AmazonS3Builder::from_env()
            .with_region(region)
            .with_bucket_name(bucket.clone());

        if let Some(creds) = credentials {
            builder = builder
                .with_access_key_id(creds.access_key_id.clone())
                .with_secret_access_key(creds.secret_access_key.clone());
        }

        if let Some(endpoint) = endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder.with_endpoint(endpoint).with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(S3Storage { store, bucket })
    }
}

/// object_store parses `videos/demo/` as `videos/demo`, so folder markers lose their
/// trailing slash. Recognise them as the prefix itself, or as an empty object whose name
/// has no extension.
fn is_folder_marker(prefix: &Path, meta: &ObjectMeta) -> bool {
    meta.location == *prefix || (meta.size == 0 && meta.location.extension().is_none())
}

#[async_trait]
impl Storage for S3Storage {
    async fn list(&self, prefix: &str) -> StorageResult<Vec<ObjectEntry>> {
        let start = std::time::Instant::now();
        let location = Path::from(prefix);

        // The stream issues follow-up ListObjectsV2 calls with the continuation token.
        let mut stream = self.store.list(Some(&location));
        let mut entries = Vec::new();
        while let Some(item) = stream.next().await {
            let meta = item.map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    prefix = %prefix,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 list failed"
                );
                StorageError::ListFailed(e.to_string())
            })?;
            if is_folder_marker(&location, &meta) {
                continue;
            }
            entries.push(ObjectEntry {
                key: meta.location.to_string(),
                size: meta.size,
            });
        }

        tracing::debug!(
            bucket = %self.bucket,
            prefix = %prefix,
            object_count = entries.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 list successful"
        );

        Ok(entries)
    }

    async fn get_presigned_url(
        &self,
        storage_key: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        validate_key(storage_key)?;
        let location = Path::from(storage_key);
        let url_result: ObjectResult<_> = self
            .store
            .signed_url(Method::GET, &location, expires_in)
            .await;

        let url = url_result
            .map_err(|e| StorageError::PresignFailed(e.to_string()))?
            .to_string();

        Ok(url)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}
