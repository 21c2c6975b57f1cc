use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::constants::MANIFEST_SUFFIX;
use crate::error::AppError;

/// Client-supplied video identifier.
///
/// Opaque: the only check is that it is present and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoName(String);

impl VideoName {
    /// Accept a raw query value, rejecting absent or empty names.
    pub fn parse(raw: Option<&str>) -> Result<Self, AppError> {
        match raw {
            Some(name) if !name.is_empty() => Ok(VideoName(name.to_string())),
            _ => Err(AppError::MissingParameter("name".to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Storage prefix holding this video's objects: `<namespace>/<name>/`.
    pub fn prefix(&self, namespace: &str) -> String {
        format!("{}/{}/", namespace, self.0)
    }
}

impl Display for VideoName {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

/// Role of an object under a video prefix, decided by key suffix alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectRole {
    Manifest,
    Segment,
}

impl ObjectRole {
    pub fn of(key: &str) -> Self {
        if key.ends_with(MANIFEST_SUFFIX) {
            ObjectRole::Manifest
        } else {
            ObjectRole::Segment
        }
    }
}

/// Last path component of an object key, as it appears in the manifest.
pub fn object_file_name(key: &str) -> &str {
    match key.rfind('/') {
        Some(idx) => &key[idx + 1..],
        None => key,
    }
}

/// The classified objects behind one video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoObjects {
    pub prefix: String,
    /// The authoritative manifest; never repeated in `segment_keys`.
    pub manifest_key: String,
    /// Segment keys in provider enumeration order.
    pub segment_keys: Vec<String>,
    /// Earlier `.m3u8` keys overridden by `manifest_key`.
    pub shadowed_manifests: Vec<String>,
}
