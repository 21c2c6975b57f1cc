//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("List failed: {0}")]
    ListFailed(String),

    #[error("Presign failed: {0}")]
    PresignFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Invalid expiry: {0}")]
    InvalidExpiry(String),

    #[error("Storage operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// One object returned by a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectEntry {
    pub key: String,
    pub size: u64,
}

/// Storage abstraction trait
///
/// Implementations are constructed once at startup and shared read-only between
/// concurrent requests, hence `Send + Sync`.
#[async_trait]
pub trait Storage: Send + Sync {
    /// List every object whose key starts with `prefix`, in provider order.
    ///
    /// Backends that page their results must follow continuation tokens until the
    /// listing is complete; callers never see a partial page.
    async fn list(&self, prefix: &str) -> StorageResult<Vec<ObjectEntry>>;

    /// Generate a presigned/temporary URL for direct access (GET)
    ///
    /// The URL can be fetched with a plain HTTP GET, without further authentication,
    /// until `expires_in` has elapsed.
    async fn get_presigned_url(
        &self,
        storage_key: &str,
        expires_in: Duration,
    ) -> StorageResult<String>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
