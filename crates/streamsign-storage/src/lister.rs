//! Video object enumeration and classification.

use crate::keys::is_directory_marker;
use crate::{Storage, StorageError};
use std::sync::Arc;
use std::time::Duration;
use streamsign_core::{AppError, ObjectRole, VideoObjects};

/// Lists a video prefix and separates the manifest from the segments.
#[derive(Clone)]
pub struct VideoLister {
    storage: Arc<dyn Storage>,
    timeout: Duration,
}

impl VideoLister {
    pub fn new(storage: Arc<dyn Storage>, timeout: Duration) -> Self {
        Self { storage, timeout }
    }

    /// Enumerate every object under `prefix`.
    ///
    /// Segment keys keep the provider's order. When several `.m3u8` objects exist the last
    /// one listed is the manifest and the others are reported as shadowed; none of them is
    /// ever returned as a segment.
    pub async fn list(&self, prefix: &str) -> Result<VideoObjects, AppError> {
        if prefix.is_empty() {
            return Err(AppError::ListingFailed {
                prefix: String::new(),
                reason: "prefix must not be empty".to_string(),
            });
        }

        let start = std::time::Instant::now();
        let entries = match tokio::time::timeout(self.timeout, self.storage.list(prefix)).await {
            Ok(result) => result,
            Err(_) => Err(StorageError::Timeout(self.timeout)),
        }
        .map_err(|e| AppError::ListingFailed {
            prefix: prefix.to_string(),
            reason: e.to_string(),
        })?;

        // A marker for the prefix itself may come back without its trailing slash.
        let prefix_marker = prefix.trim_end_matches('/');
        let mut manifest_key: Option<String> = None;
        let mut shadowed_manifests = Vec::new();
        let mut segment_keys = Vec::with_capacity(entries.len());
        let mut total_bytes: u64 = 0;

        for entry in entries {
            if is_directory_marker(&entry.key) || entry.key == prefix_marker {
                continue;
            }
            total_bytes += entry.size;
            match ObjectRole::of(&entry.key) {
                ObjectRole::Manifest => {
                    if let Some(previous) = manifest_key.replace(entry.key) {
                        shadowed_manifests.push(previous);
                    }
                }
                ObjectRole::Segment => segment_keys.push(entry.key),
            }
        }

        let manifest_key = manifest_key.ok_or_else(|| AppError::ManifestNotFound {
            prefix: prefix.to_string(),
        })?;

        if !shadowed_manifests.is_empty() {
            tracing::warn!(
                prefix = %prefix,
                manifest_key = %manifest_key,
                shadowed = ?shadowed_manifests,
                "Multiple manifests under prefix, using the last one listed"
            );
        }

        tracing::debug!(
            prefix = %prefix,
            manifest_key = %manifest_key,
            segment_count = segment_keys.len(),
            total_bytes,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Listed video objects"
        );

        Ok(VideoObjects {
            prefix: prefix.to_string(),
            manifest_key,
            segment_keys,
            shadowed_manifests,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStorage;

    fn lister(storage: MemoryStorage) -> (Arc<MemoryStorage>, VideoLister) {
        let storage = Arc::new(storage);
        let lister = VideoLister::new(storage.clone(), Duration::from_secs(5));
        (storage, lister)
    }

    #[tokio::test]
    async fn test_classifies_manifest_and_segments() {
        let (_, lister) = lister(MemoryStorage::new(
            "https://bucket.example.com",
            &[
                "videos/demo/000.ts",
                "videos/demo/001.ts",
                "videos/demo/index.m3u8",
            ],
        ));

        let objects = lister.list("videos/demo/").await.unwrap();
        assert_eq!(objects.manifest_key, "videos/demo/index.m3u8");
        assert_eq!(
            objects.segment_keys,
            vec!["videos/demo/000.ts", "videos/demo/001.ts"]
        );
        assert!(objects.shadowed_manifests.is_empty());
    }

    #[tokio::test]
    async fn test_manifest_is_never_listed_as_segment() {
        // Manifest in the middle of the listing must appear once, as the manifest only.
        let (_, lister) = lister(MemoryStorage::new(
            "https://bucket.example.com",
            &[
                "videos/demo/000.ts",
                "videos/demo/index.m3u8",
                "videos/demo/zz.ts",
            ],
        ));

        let objects = lister.list("videos/demo/").await.unwrap();
        assert_eq!(objects.segment_keys, vec!["videos/demo/000.ts", "videos/demo/zz.ts"]);
        assert!(!objects
            .segment_keys
            .iter()
            .any(|k| k == &objects.manifest_key));
    }

    #[tokio::test]
    async fn test_preserves_provider_order() {
        let (_, lister) = lister(MemoryStorage::new(
            "https://bucket.example.com",
            &[
                "videos/demo/index.m3u8",
                "videos/demo/002.ts",
                "videos/demo/000.ts",
                "videos/demo/001.ts",
            ],
        ));

        let objects = lister.list("videos/demo/").await.unwrap();
        assert_eq!(
            objects.segment_keys,
            vec!["videos/demo/002.ts", "videos/demo/000.ts", "videos/demo/001.ts"]
        );
    }

    #[tokio::test]
    async fn test_last_manifest_wins() {
        let (_, lister) = lister(MemoryStorage::new(
            "https://bucket.example.com",
            &[
                "videos/demo/720p.m3u8",
                "videos/demo/000.ts",
                "videos/demo/index.m3u8",
            ],
        ));

        let objects = lister.list("videos/demo/").await.unwrap();
        assert_eq!(objects.manifest_key, "videos/demo/index.m3u8");
        assert_eq!(objects.shadowed_manifests, vec!["videos/demo/720p.m3u8"]);
        assert_eq!(objects.segment_keys, vec!["videos/demo/000.ts"]);
    }

    #[tokio::test]
    async fn test_no_manifest_fails() {
        let (storage, lister) = lister(MemoryStorage::new(
            "https://bucket.example.com",
            &["videos/demo/000.ts", "videos/demo/001.ts"],
        ));

        let err = lister.list("videos/demo/").await.unwrap_err();
        assert!(matches!(err, AppError::ManifestNotFound { ref prefix } if prefix == "videos/demo/"));
        assert_eq!(storage.list_calls(), 1);
        assert_eq!(storage.sign_calls(), 0);
    }

    #[tokio::test]
    async fn test_directory_markers_are_skipped() {
        let (_, lister) = lister(MemoryStorage::new(
            "https://bucket.example.com",
            // The marker is listed back as `videos/demo`.
            &["videos/demo/", "videos/demo/000.ts", "videos/demo/index.m3u8"],
        ));

        let objects = lister.list("videos/demo/").await.unwrap();
        assert_eq!(objects.segment_keys, vec!["videos/demo/000.ts"]);
    }

    #[tokio::test]
    async fn test_empty_prefix_is_rejected_without_listing() {
        let (storage, lister) = lister(MemoryStorage::new("https://bucket.example.com", &[]));
        let err = lister.list("").await.unwrap_err();
        assert!(matches!(err, AppError::ListingFailed { .. }));
        assert_eq!(storage.list_calls(), 0);
    }

    #[tokio::test]
    async fn test_backend_failure_becomes_listing_failed() {
        let (_, lister) = lister(
            MemoryStorage::new("https://bucket.example.com", &[]).with_list_failure("access denied"),
        );
        let err = lister.list("videos/demo/").await.unwrap_err();
        match err {
            AppError::ListingFailed { prefix, reason } => {
                assert_eq!(prefix, "videos/demo/");
                assert!(reason.contains("access denied"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_slow_listing_times_out() {
        let storage = Arc::new(
            MemoryStorage::new("https://bucket.example.com", &["videos/demo/index.m3u8"])
                .with_list_delay(Duration::from_millis(200)),
        );
        let lister = VideoLister::new(storage, Duration::from_millis(20));

        let err = lister.list("videos/demo/").await.unwrap_err();
        match err {
            AppError::ListingFailed { reason, .. } => assert!(reason.contains("timed out")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
