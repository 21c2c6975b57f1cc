//! Shared key checks for storage backends.

use crate::{StorageError, StorageResult};

/// Reject keys that could escape the bucket root or the storage directory.
pub fn validate_key(storage_key: &str) -> StorageResult<()> {
    if storage_key.is_empty() {
        return Err(StorageError::InvalidKey("Storage key is empty".to_string()));
    }
    if storage_key.starts_with('/') || storage_key.split('/').any(|part| part == "..") {
        return Err(StorageError::InvalidKey(format!(
            "Storage key contains invalid path components: {}",
            storage_key
        )));
    }
    Ok(())
}

/// Keys ending in `/` are directory markers some tools create; they hold no data.
pub fn is_directory_marker(storage_key: &str) -> bool {
    storage_key.ends_with('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("videos/demo/000.ts").is_ok());
        assert!(validate_key("videos/demo..v2/000.ts").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("/videos/demo/000.ts").is_err());
        assert!(validate_key("videos/../secrets/key").is_err());
    }

    #[test]
    fn test_directory_marker() {
        assert!(is_directory_marker("videos/demo/"));
        assert!(!is_directory_marker("videos/demo/000.ts"));
    }
}
