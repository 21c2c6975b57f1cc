//! Streamsign Services Layer
//!
//! This crate hosts the playlist pipeline: list a video's objects, sign them, fetch the
//! manifest and rewrite its segment references. The API crate depends on this facade and
//! keeps HTTP handling thin.

pub mod manifest;
pub mod streaming;

pub use manifest::{HttpManifestFetcher, ManifestFetcher, ManifestRewriter};
pub use streaming::{StreamingService, StreamingSettings};
pub use streamsign_storage::{
    create_storage, Storage, StorageBackend, StorageError, StorageResult, UrlSigner, VideoLister,
};
