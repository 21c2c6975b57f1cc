//! Signed URL issuance.

use crate::{Storage, StorageError};
use futures::future::try_join_all;
use std::sync::Arc;
use std::time::Duration;
use streamsign_core::constants::MAX_PRESIGN_EXPIRY;
use streamsign_core::{AppError, SignedUrl};

/// Issues time-limited GET URLs. Nothing is cached: every call signs afresh.
#[derive(Clone)]
pub struct UrlSigner {
    storage: Arc<dyn Storage>,
    timeout: Duration,
}

impl UrlSigner {
    pub fn new(storage: Arc<dyn Storage>, timeout: Duration) -> Self {
        Self { storage, timeout }
    }

    /// Sign one key for `expires_in`, which must be positive and within the presign horizon.
    pub async fn sign(&self, key: &str, expires_in: Duration) -> Result<SignedUrl, AppError> {
        let signing_failed = |e: StorageError| AppError::SigningFailed {
            key: key.to_string(),
            reason: e.to_string(),
        };

        validate_expiry(expires_in).map_err(signing_failed)?;

        let url = match tokio::time::timeout(
            self.timeout,
            self.storage.get_presigned_url(key, expires_in),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(StorageError::Timeout(self.timeout)),
        }
        .map_err(signing_failed)?;

        Ok(SignedUrl::new(key, url, expires_in))
    }

    /// Sign a batch of keys concurrently. Output order matches `keys`; the first failure
    /// aborts the batch.
    pub async fn sign_all(
        &self,
        keys: &[String],
        expires_in: Duration,
    ) -> Result<Vec<SignedUrl>, AppError> {
        try_join_all(keys.iter().map(|key| self.sign(key, expires_in))).await
    }
}

fn validate_expiry(expires_in: Duration) -> Result<(), StorageError> {
    if expires_in.is_zero() {
        Err(StorageError::InvalidExpiry(
            "Expiry duration must be greater than zero".to_string(),
        ))
    } else if expires_in > MAX_PRESIGN_EXPIRY {
        Err(StorageError::InvalidExpiry(format!(
            "Expiry duration {:?} exceeds maximum allowed {:?}",
            expires_in, MAX_PRESIGN_EXPIRY
        )))
    } else {
        Ok(())
    }
}
