//! Configuration module
//!
//! Configuration is read from the environment exactly once at startup and never mutated
//! afterwards. Components receive the values they need by reference or by copy.

use std::env;
use std::fmt;
use std::time::Duration;

use crate::constants::MAX_PRESIGN_EXPIRY;
use crate::storage_types::StorageBackend;

// Common constants
const SERVER_PORT: u16 = 8080;
const VIDEO_NAMESPACE: &str = "videos";
const SEGMENT_URL_EXPIRY_SECS: u64 = 60 * 60;
const PLAYER_URL_EXPIRY_SECS: u64 = 15 * 60 * 60;
const STORAGE_TIMEOUT_SECS: u64 = 10;
const MANIFEST_FETCH_TIMEOUT_SECS: u64 = 15;
const STATIC_DIR: &str = "video_parts";

/// Base configuration for the HTTP server
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
}

/// Static S3 credentials. The secret is redacted from `Debug` output.
#[derive(Clone)]
pub struct S3Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl fmt::Debug for S3Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("S3Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .finish()
    }
}

/// Streaming service configuration
#[derive(Clone, Debug)]
pub struct StreamConfig {
    pub base: BaseConfig,
    // Storage configuration
    pub storage_backend: StorageBackend,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (Linode, MinIO, etc.)
    pub aws_region: Option<String>,
    pub s3_credentials: Option<S3Credentials>,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    // Playlist resolution
    pub video_namespace: String,
    pub segment_url_expiry: Duration,
    pub player_url_expiry: Duration,
    pub storage_timeout: Duration,
    pub manifest_fetch_timeout: Duration,
    pub static_dir: String,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<StreamConfig>);

impl Config {
    fn as_stream(&self) -> &StreamConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_env(&self.as_stream().base.environment)
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        let config = StreamConfig::from_lookup(|key| env::var(key).ok())?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_stream().validate()
    }

    // Convenience getters for common fields
    pub fn server_port(&self) -> u16 {
        self.as_stream().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.as_stream().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.as_stream().base.environment
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.as_stream().storage_backend
    }

    pub fn s3_bucket(&self) -> Option<&str> {
        self.as_stream().s3_bucket.as_deref()
    }

    pub fn s3_region(&self) -> Option<&str> {
        self.as_stream().s3_region.as_deref()
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.as_stream().s3_endpoint.as_deref()
    }

    pub fn aws_region(&self) -> Option<&str> {
        self.as_stream().aws_region.as_deref()
    }

    pub fn s3_credentials(&self) -> Option<&S3Credentials> {
        self.as_stream().s3_credentials.as_ref()
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.as_stream().local_storage_path.as_deref()
    }

    pub fn local_storage_base_url(&self) -> Option<&str> {
        self.as_stream().local_storage_base_url.as_deref()
    }

    pub fn video_namespace(&self) -> &str {
        &self.as_stream().video_namespace
    }

    pub fn segment_url_expiry(&self) -> Duration {
        self.as_stream().segment_url_expiry
    }

    pub fn player_url_expiry(&self) -> Duration {
        self.as_stream().player_url_expiry
    }

    pub fn storage_timeout(&self) -> Duration {
        self.as_stream().storage_timeout
    }

    pub fn manifest_fetch_timeout(&self) -> Duration {
        self.as_stream().manifest_fetch_timeout
    }

    pub fn static_dir(&self) -> &str {
        &self.as_stream().static_dir
    }
}

fn is_production_env(environment: &str) -> bool {
    let env = environment.to_lowercase();
    env == "production" || env == "prod"
}

fn secs_or(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> Duration {
    Duration::from_secs(
        lookup(key)
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(default),
    )
}

impl StreamConfig {
    /// Build the configuration from a key lookup (the process environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins_str = lookup("CORS_ORIGINS").unwrap_or_else(|| "*".to_string());
        if is_production_env(&environment) && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let base = BaseConfig {
            server_port: match lookup("PORT") {
                Some(port) => port
                    .trim()
                    .parse()
                    .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
                None => SERVER_PORT,
            },
            cors_origins,
            environment,
        };

        let storage_backend = match lookup("STORAGE_BACKEND") {
            Some(s) => s.parse::<StorageBackend>()?,
            None => StorageBackend::S3,
        };

        let s3_credentials = match (
            lookup("AWS_ACCESS_KEY_ID").filter(|s| !s.is_empty()),
            lookup("AWS_SECRET_ACCESS_KEY").filter(|s| !s.is_empty()),
        ) {
            (Some(access_key_id), Some(secret_access_key)) => Some(S3Credentials {
                access_key_id,
                secret_access_key,
            }),
            _ => None,
        };

        let config = StreamConfig {
            base,
            storage_backend,
            s3_bucket: lookup("S3_BUCKET").filter(|s| !s.is_empty()),
            s3_region: lookup("S3_REGION").filter(|s| !s.is_empty()),
            s3_endpoint: lookup("S3_ENDPOINT").filter(|s| !s.is_empty()),
            aws_region: lookup("AWS_REGION").filter(|s| !s.is_empty()),
            s3_credentials,
            local_storage_path: lookup("LOCAL_STORAGE_PATH").filter(|s| !s.is_empty()),
            local_storage_base_url: lookup("LOCAL_STORAGE_BASE_URL").filter(|s| !s.is_empty()),
            video_namespace: lookup("VIDEO_NAMESPACE")
                .map(|s| s.trim().trim_matches('/').to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| VIDEO_NAMESPACE.to_string()),
            segment_url_expiry: secs_or(&lookup, "SEGMENT_URL_EXPIRY_SECS", SEGMENT_URL_EXPIRY_SECS),
            player_url_expiry: secs_or(&lookup, "PLAYER_URL_EXPIRY_SECS", PLAYER_URL_EXPIRY_SECS),
            storage_timeout: secs_or(&lookup, "STORAGE_TIMEOUT_SECS", STORAGE_TIMEOUT_SECS),
            manifest_fetch_timeout: secs_or(
                &lookup,
                "MANIFEST_FETCH_TIMEOUT_SECS",
                MANIFEST_FETCH_TIMEOUT_SECS,
            ),
            static_dir: lookup("STATIC_DIR").unwrap_or_else(|| STATIC_DIR.to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        for (name, expiry) in [
            ("SEGMENT_URL_EXPIRY_SECS", self.segment_url_expiry),
            ("PLAYER_URL_EXPIRY_SECS", self.player_url_expiry),
        ] {
            if expiry.is_zero() || expiry > MAX_PRESIGN_EXPIRY {
                return Err(anyhow::anyhow!(
                    "{} must be between 1 and {} seconds",
                    name,
                    MAX_PRESIGN_EXPIRY.as_secs()
                ));
            }
        }

        if self.storage_timeout.is_zero() {
            return Err(anyhow::anyhow!("STORAGE_TIMEOUT_SECS must be greater than zero"));
        }
        if self.manifest_fetch_timeout.is_zero() {
            return Err(anyhow::anyhow!(
                "MANIFEST_FETCH_TIMEOUT_SECS must be greater than zero"
            ));
        }

        // Validate storage backend configuration
        match self.storage_backend {
            StorageBackend::S3 => {
                if self.s3_bucket.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_BUCKET must be set when using S3 storage backend"
                    ));
                }
                if self.s3_region.is_none() && self.aws_region.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_REGION or AWS_REGION must be set when using S3 storage backend"
                    ));
                }
                if self.s3_credentials.is_none() {
                    return Err(anyhow::anyhow!(
                        "AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY must be set when using S3 storage backend"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set when using local storage backend"
                    ));
                }
                if self.local_storage_base_url.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_BASE_URL must be set when using local storage backend"
                    ));
                }
            }
        }

        Ok(())
    }
}
