//! Streamsign Storage Library
//!
//! This crate provides the storage abstraction and the two components built on it:
//!
//! - [`VideoLister`] enumerates the objects under a video prefix and picks out the manifest.
//! - [`UrlSigner`] turns an object key into a time-limited GET URL.
//!
//! # Storage key format
//!
//! Every video lives under `{namespace}/{video_name}/`: one `.m3u8` manifest plus its
//! segments. Keys must not contain `..` components or a leading `/`.

pub mod factory;
pub mod keys;
pub mod lister;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(any(test, feature = "test-util"))]
pub mod memory;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod signer;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use lister::VideoLister;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use signer::UrlSigner;
pub use streamsign_core::StorageBackend;
pub use traits::{ObjectEntry, Storage, StorageError, StorageResult};
