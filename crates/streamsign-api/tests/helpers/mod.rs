//! Test helpers: build AppState and router for integration tests.
//!
//! Storage is the in-memory backend and the manifest fetcher serves fixed bodies, so no
//! network or bucket is needed.

#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use streamsign_api::setup::routes;
use streamsign_api::AppState;
use streamsign_core::{AppError, Config, SignedUrl, StreamConfig};
use streamsign_services::{ManifestFetcher, StreamingService, StreamingSettings};
use streamsign_storage::memory::MemoryStorage;

pub const BUCKET_URL: &str = "https://bucket.example.com";

pub const DEMO_MANIFEST: &str = "#EXTM3U\n\
#EXT-X-VERSION:3\n\
#EXT-X-TARGETDURATION:10\n\
#EXTINF:10.000000,\n\
000.ts\n\
#EXTINF:8.341000,\n\
001.ts\n\
#EXT-X-ENDLIST\n";

/// Serves manifest bodies keyed by object key.
#[derive(Default)]
pub struct StaticFetcher {
    bodies: HashMap<String, Vec<u8>>,
    calls: AtomicUsize,
}

impl StaticFetcher {
    pub fn with_body(key: &str, body: impl AsRef<[u8]>) -> Self {
        let mut fetcher = Self::default();
        fetcher
            .bodies
            .insert(key.to_string(), body.as_ref().to_vec());
        fetcher
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ManifestFetcher for StaticFetcher {
    async fn fetch(&self, manifest: &SignedUrl) -> Result<Vec<u8>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.bodies
            .get(&manifest.key)
            .cloned()
            .ok_or_else(|| AppError::ManifestFetchFailed {
                key: manifest.key.clone(),
                reason: "storage returned status 404 Not Found".to_string(),
            })
    }
}

/// Test application: server plus handles on the fakes behind it.
pub struct TestApp {
    pub server: TestServer,
    pub storage: Arc<MemoryStorage>,
    pub fetcher: Arc<StaticFetcher>,
}

pub fn test_config(static_dir: &str) -> Config {
    let vars: HashMap<&str, &str> = [
        ("STORAGE_BACKEND", "local"),
        ("LOCAL_STORAGE_PATH", "/tmp/streamsign-test"),
        ("LOCAL_STORAGE_BASE_URL", BUCKET_URL),
        ("STATIC_DIR", static_dir),
    ]
    .into_iter()
    .collect();
    let config = StreamConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()))
        .expect("test config must be valid");
    Config(Box::new(config))
}

pub fn setup_test_app_with(
    storage: MemoryStorage,
    fetcher: StaticFetcher,
    static_dir: &str,
) -> TestApp {
    let config = test_config(static_dir);
    let storage = Arc::new(storage);
    let fetcher = Arc::new(fetcher);

    let streaming = StreamingService::new(
        storage.clone(),
        fetcher.clone(),
        StreamingSettings::from_config(&config),
    );
    let state = Arc::new(AppState { streaming });

    let router = routes::setup_routes(&config, state).expect("routes");
    let server = TestServer::new(router).expect("test server");

    TestApp {
        server,
        storage,
        fetcher,
    }
}

/// Bucket holding the `demo` video: two segments and a manifest.
pub fn setup_demo_app() -> TestApp {
    let storage = MemoryStorage::new(
        BUCKET_URL,
        &[
            "videos/demo/000.ts",
            "videos/demo/001.ts",
            "videos/demo/index.m3u8",
        ],
    );
    setup_test_app_with(
        storage,
        StaticFetcher::with_body("videos/demo/index.m3u8", DEMO_MANIFEST),
        "video_parts",
    )
}
