//! Shared constants

use std::time::Duration;

/// Suffix that marks an object as the video's manifest (playlist).
pub const MANIFEST_SUFFIX: &str = ".m3u8";

/// Content type for HLS media playlists.
pub const HLS_CONTENT_TYPE: &str = "application/vnd.apple.mpegurl";

/// Longest expiry S3 SigV4 presigning accepts (7 days).
pub const MAX_PRESIGN_EXPIRY: Duration = Duration::from_secs(7 * 24 * 60 * 60);
