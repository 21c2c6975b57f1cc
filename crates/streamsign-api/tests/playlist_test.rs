mod helpers;

use axum::http::StatusCode;
use helpers::{setup_demo_app, setup_test_app_with, StaticFetcher, BUCKET_URL};
use streamsign_storage::memory::MemoryStorage;

#[tokio::test]
async fn test_playlist_rewrites_demo_manifest() {
    let app = setup_demo_app();

    let response = app
        .server
        .get("/playlist")
        .add_query_param("name", "demo")
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.header("content-type"),
        "application/vnd.apple.mpegurl"
    );
    assert_eq!(response.header("cache-control"), "no-store");

    let body = response.text();
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines.len(), 8);
    assert_eq!(lines[0], "#EXTM3U");
    assert_eq!(lines[1], "#EXT-X-VERSION:3");
    assert_eq!(lines[2], "#EXT-X-TARGETDURATION:10");
    assert_eq!(lines[3], "#EXTINF:10.000000,");
    assert!(lines[4].starts_with(&format!("{}/videos/demo/000.ts?", BUCKET_URL)));
    assert_eq!(lines[5], "#EXTINF:8.341000,");
    assert!(lines[6].starts_with(&format!("{}/videos/demo/001.ts?", BUCKET_URL)));
    assert_eq!(lines[7], "#EXT-X-ENDLIST");
    assert!(!body.contains("\n000.ts\n"));
    assert!(!body.contains("\n001.ts\n"));
}

#[tokio::test]
async fn test_missing_name_is_bad_request_without_storage_calls() {
    let app = setup_demo_app();

    let response = app.server.get("/playlist").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.text().contains("name"));

    let response = app
        .server
        .get("/playlist")
        .add_query_param("name", "")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    assert_eq!(app.storage.list_calls(), 0);
    assert_eq!(app.storage.sign_calls(), 0);
    assert_eq!(app.fetcher.calls(), 0);
}

#[tokio::test]
async fn test_unknown_video_is_server_error_without_fetch() {
    let app = setup_demo_app();

    let response = app
        .server
        .get("/playlist")
        .add_query_param("name", "missing")
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response
        .header("content-type")
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
    assert!(response.text().contains("videos/missing/"));
    assert_eq!(app.fetcher.calls(), 0);
}

#[tokio::test]
async fn test_signing_failure_is_server_error_naming_the_key() {
    let storage = MemoryStorage::new(
        BUCKET_URL,
        &[
            "videos/demo/000.ts",
            "videos/demo/001.ts",
            "videos/demo/index.m3u8",
        ],
    )
    .with_sign_failure("videos/demo/001.ts");
    let app = setup_test_app_with(
        storage,
        StaticFetcher::with_body("videos/demo/index.m3u8", helpers::DEMO_MANIFEST),
        "video_parts",
    );

    let response = app
        .server
        .get("/playlist")
        .add_query_param("name", "demo")
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.text();
    assert!(body.contains("videos/demo/001.ts"));
    assert!(!body.contains("#EXTM3U"));
    assert_eq!(app.fetcher.calls(), 0);
}

#[tokio::test]
async fn test_listing_failure_is_server_error() {
    let storage = MemoryStorage::new(BUCKET_URL, &[]).with_list_failure("access denied");
    let app = setup_test_app_with(storage, StaticFetcher::default(), "video_parts");

    let response = app
        .server
        .get("/playlist")
        .add_query_param("name", "demo")
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.text().contains("access denied"));
}

#[tokio::test]
async fn test_playlist_preserves_non_utf8_bytes() {
    let mut manifest = b"#EXTM3U\n#EXT-X-SESSION-DATA:DATA-ID=\"t\",VALUE=\"caf".to_vec();
    manifest.push(0xE9);
    manifest.extend_from_slice(b"\"\n#EXTINF:10,\n000.ts\n");

    let storage = MemoryStorage::new(
        BUCKET_URL,
        &["videos/demo/000.ts", "videos/demo/index.m3u8"],
    );
    let app = setup_test_app_with(
        storage,
        StaticFetcher::with_body("videos/demo/index.m3u8", &manifest),
        "video_parts",
    );

    let response = app
        .server
        .get("/playlist")
        .add_query_param("name", "demo")
        .await;

    response.assert_status_ok();
    let body = response.as_bytes();
    let marker = b"VALUE=\"caf\xE9\"\n";
    assert!(body.windows(marker.len()).any(|w| w == marker));
    assert!(!body.windows(3).any(|w| w == [0xEF, 0xBF, 0xBD]));
    let signed_prefix = format!("\n{}/videos/demo/000.ts?", BUCKET_URL);
    assert!(body
        .windows(signed_prefix.len())
        .any(|w| w == signed_prefix.as_bytes()));
}
