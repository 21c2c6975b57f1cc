//! Streamsign Core Library
//!
//! This crate provides the domain models, error types and configuration shared by
//! the storage, services and API crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::{BaseConfig, Config, S3Credentials, StreamConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{ObjectRole, RewrittenManifest, SignedUrl, VideoName, VideoObjects};
pub use storage_types::StorageBackend;
