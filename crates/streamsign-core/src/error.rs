//! Error types module
//!
//! Every failure a playlist request can hit is an `AppError` variant. Variants name the
//! pipeline stage that failed (listing, signing, fetching, writing) and carry the prefix or
//! object key involved, never a signed URL: those are bearer credentials and must stay out
//! of logs and response bodies.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like a missing query parameter
    Debug,
    /// Warning level - for conditions caused by the bucket contents
    Warn,
    /// Error level - for storage and network failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "SIGNING_FAILED")
    fn error_code(&self) -> &'static str;

    /// Whether the request may succeed if repeated as-is
    fn is_recoverable(&self) -> bool;

    /// Pipeline stage the error was raised in
    fn stage(&self) -> &'static str;

    /// Client-facing message
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("No manifest (.m3u8) object found under prefix {prefix}")]
    ManifestNotFound { prefix: String },

    #[error("Failed to list objects under prefix {prefix}: {reason}")]
    ListingFailed { prefix: String, reason: String },

    #[error("Failed to sign URL for {key}: {reason}")]
    SigningFailed { key: String, reason: String },

    #[error("Failed to fetch manifest {key}: {reason}")]
    ManifestFetchFailed { key: String, reason: String },

    #[error("Failed to write response: {0}")]
    WriteFailed(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Static metadata for each variant: (http_status, error_code, stage, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, &'static str, LogLevel) {
    match err {
        AppError::MissingParameter(_) => (400, "MISSING_PARAMETER", "request", LogLevel::Debug),
        AppError::ManifestNotFound { .. } => (500, "MANIFEST_NOT_FOUND", "list", LogLevel::Warn),
        AppError::ListingFailed { .. } => (500, "LISTING_FAILED", "list", LogLevel::Error),
        AppError::SigningFailed { .. } => (500, "SIGNING_FAILED", "sign", LogLevel::Error),
        AppError::ManifestFetchFailed { .. } => {
            (500, "MANIFEST_FETCH_FAILED", "fetch", LogLevel::Error)
        }
        AppError::WriteFailed(_) => (500, "WRITE_FAILED", "write", LogLevel::Error),
        AppError::Internal(_) => (500, "INTERNAL_ERROR", "internal", LogLevel::Error),
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    // Retries belong to the client or player.
    fn is_recoverable(&self) -> bool {
        false
    }

    fn stage(&self) -> &'static str {
        app_error_static_metadata(self).2
    }

    fn client_message(&self) -> String {
        self.to_string()
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).3
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_parameter_is_client_error() {
        let err = AppError::MissingParameter("name".to_string());
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.error_code(), "MISSING_PARAMETER");
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_stage_failures_are_server_errors() {
        let errors = [
            AppError::ManifestNotFound {
                prefix: "videos/demo/".to_string(),
            },
            AppError::ListingFailed {
                prefix: "videos/demo/".to_string(),
                reason: "timeout".to_string(),
            },
            AppError::SigningFailed {
                key: "videos/demo/000.ts".to_string(),
                reason: "no credentials".to_string(),
            },
            AppError::ManifestFetchFailed {
                key: "videos/demo/index.m3u8".to_string(),
                reason: "status 403".to_string(),
            },
            AppError::WriteFailed("broken pipe".to_string()),
        ];

        for err in &errors {
            assert_eq!(err.http_status_code(), 500, "{}", err);
            assert!(!err.is_recoverable());
        }
    }

    #[test]
    fn test_messages_name_stage_inputs() {
        let err = AppError::SigningFailed {
            key: "videos/demo/001.ts".to_string(),
            reason: "expired credentials".to_string(),
        };
        assert_eq!(err.stage(), "sign");
        let msg = err.client_message();
        assert!(msg.contains("videos/demo/001.ts"));
        assert!(msg.contains("expired credentials"));

        let err = AppError::ManifestNotFound {
            prefix: "videos/demo/".to_string(),
        };
        assert!(err.client_message().contains("videos/demo/"));
    }
}
