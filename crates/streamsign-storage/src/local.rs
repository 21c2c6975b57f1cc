use crate::keys::validate_key;
use crate::traits::{ObjectEntry, Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use tokio::fs;

/// Local filesystem storage implementation
///
/// Objects are files under `base_path`; their URLs point at a static file server rooted at
/// the same directory (`base_url`). Local URLs are plain, unsigned URLs: expiry is ignored.
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory holding the video prefixes (e.g., "video_parts")
    /// * `base_url` - Base URL the directory is served from (e.g., "http://localhost:8080")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            base_url,
        })
    }

    /// Generate public URL for file, percent-encoding each key segment
    fn generate_url(&self, key: &str) -> String {
        let encoded: Vec<String> = key
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();
        format!("{}/{}", self.base_url.trim_end_matches('/'), encoded.join("/"))
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn list(&self, prefix: &str) -> StorageResult<Vec<ObjectEntry>> {
        validate_key(prefix)?;

        // Start the walk at the deepest directory the prefix fully names.
        let (start_key, start_dir) = match prefix.rfind('/') {
            Some(idx) => (
                prefix[..idx + 1].to_string(),
                self.base_path.join(&prefix[..idx]),
            ),
            None => (String::new(), self.base_path.clone()),
        };

        if !fs::try_exists(&start_dir).await.unwrap_or(false) {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        let mut pending = vec![(start_dir, start_key)];
        while let Some((dir, dir_key)) = pending.pop() {
            let mut read_dir = fs::read_dir(&dir).await.map_err(|e| {
                StorageError::ListFailed(format!("Failed to read {}: {}", dir.display(), e))
            })?;

            while let Some(entry) = read_dir.next_entry().await? {
                let name = entry.file_name().to_string_lossy().into_owned();
                let key = format!("{}{}", dir_key, name);
                let file_type = entry.file_type().await?;

                if file_type.is_dir() {
                    pending.push((entry.path(), format!("{}/", key)));
                } else if key.starts_with(prefix) {
                    let size = entry.metadata().await?.len();
                    entries.push(ObjectEntry { key, size });
                }
            }
        }

        // Match S3's lexicographic listing order.
        entries.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(entries)
    }

    async fn get_presigned_url(
        &self,
        storage_key: &str,
        _expires_in: Duration,
    ) -> StorageResult<String> {
        validate_key(storage_key)?;
        Ok(self.generate_url(storage_key))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
