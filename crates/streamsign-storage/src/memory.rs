//! In-memory storage for tests.
//!
//! Keys are listed in insertion order, standing in for the provider's enumeration order.
//! Like object_store, listings drop the trailing `/` of folder-marker keys.
//! Every call is counted so tests can assert which stages touched storage.

use crate::traits::{ObjectEntry, Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub struct MemoryStorage {
    base_url: String,
    keys: Vec<String>,
    list_failure: Option<String>,
    sign_failure_key: Option<String>,
    list_delay: Option<Duration>,
    list_calls: AtomicUsize,
    sign_calls: AtomicUsize,
}

impl MemoryStorage {
    pub fn new(base_url: impl Into<String>, keys: &[&str]) -> Self {
        Self {
            base_url: base_url.into(),
            keys: keys.iter().map(|k| k.to_string()).collect(),
            list_failure: None,
            sign_failure_key: None,
            list_delay: None,
            list_calls: AtomicUsize::new(0),
            sign_calls: AtomicUsize::new(0),
        }
    }

    /// Make every `list` call fail with `message`.
    pub fn with_list_failure(mut self, message: impl Into<String>) -> Self {
        self.list_failure = Some(message.into());
        self
    }

    /// Make signing `key` fail.
    pub fn with_sign_failure(mut self, key: impl Into<String>) -> Self {
        self.sign_failure_key = Some(key.into());
        self
    }

    /// Delay every `list` call.
    pub fn with_list_delay(mut self, delay: Duration) -> Self {
        self.list_delay = Some(delay);
        self
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn sign_calls(&self) -> usize {
        self.sign_calls.load(Ordering::SeqCst)
    }

    /// URL this storage hands out for `key` on its `nth` signing call (1-based).
    pub fn signed_url_for(&self, key: &str, expires_in: Duration, nth: usize) -> String {
        format!(
            "{}/{}?expires={}&sig={}",
            self.base_url.trim_end_matches('/'),
            key,
            expires_in.as_secs(),
            nth
        )
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn list(&self, prefix: &str) -> StorageResult<Vec<ObjectEntry>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.list_delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(ref message) = self.list_failure {
            return Err(StorageError::ListFailed(message.clone()));
        }

        Ok(self
            .keys
            .iter()
            .filter(|key| key.starts_with(prefix))
            .map(|key| ObjectEntry {
                key: key.trim_end_matches('/').to_string(),
                size: 0,
            })
            .collect())
    }

    async fn get_presigned_url(
        &self,
        storage_key: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        let nth = self.sign_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.sign_failure_key.as_deref() == Some(storage_key) {
            return Err(StorageError::PresignFailed(format!(
                "credentials rejected for {}",
                storage_key
            )));
        }
        Ok(self.signed_url_for(storage_key, expires_in, nth))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
