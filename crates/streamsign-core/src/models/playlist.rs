use std::fmt::{Formatter, Result as FmtResult};
use std::time::Duration;

use super::video::object_file_name;

/// A time-limited GET URL bound to exactly one object key.
///
/// The URL is a bearer credential. `Debug` prints the key and expiry only.
#[derive(Clone, PartialEq, Eq)]
pub struct SignedUrl {
    pub key: String,
    pub url: String,
    pub expires_in: Duration,
}

impl SignedUrl {
    pub fn new(key: impl Into<String>, url: impl Into<String>, expires_in: Duration) -> Self {
        Self {
            key: key.into(),
            url: url.into(),
            expires_in,
        }
    }

    /// Bare filename of the signed object.
    pub fn file_name(&self) -> &str {
        object_file_name(&self.key)
    }
}

impl std::fmt::Debug for SignedUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("SignedUrl")
            .field("key", &self.key)
            .field("expires_in", &self.expires_in)
            .finish_non_exhaustive()
    }
}

/// Manifest bytes with every known segment filename replaced by its signed URL.
///
/// Bytes, not text: anything outside a replaced filename is passed through exactly as
/// storage returned it, whatever its encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewrittenManifest(Vec<u8>);

impl RewrittenManifest {
    pub fn new(body: Vec<u8>) -> Self {
        RewrittenManifest(body)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_url_file_name() {
        let signed = SignedUrl::new(
            "videos/demo/001.ts",
            "https://bucket.example.com/videos/demo/001.ts?X-Amz-Signature=abc",
            Duration::from_secs(60),
        );
        assert_eq!(signed.file_name(), "001.ts");
    }

    #[test]
    fn test_signed_url_debug_hides_url() {
        let signed = SignedUrl::new(
            "videos/demo/001.ts",
            "https://bucket.example.com/videos/demo/001.ts?X-Amz-Signature=abc",
            Duration::from_secs(60),
        );
        let debug = format!("{:?}", signed);
        assert!(debug.contains("videos/demo/001.ts"));
        assert!(!debug.contains("X-Amz-Signature"));
    }
}
