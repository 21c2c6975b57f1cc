use regex::bytes::{Captures, Regex, RegexBuilder};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use streamsign_core::{AppError, RewrittenManifest, SignedUrl};

// Thousands of segment names compile past regex's default 10 MiB limit.
const MATCHER_SIZE_LIMIT: usize = 256 * 1024 * 1024;

/// Replaces bare segment filenames in a manifest with their signed URLs.
///
/// The filename to URL map is fixed before any text is touched, and the manifest is
/// scanned once, left to right. Where two filenames could match at the same position the
/// longer one wins. Replacement output is never scanned again, so a filename that happens
/// to occur inside another segment's signed URL cannot corrupt it. Every byte outside a
/// matched filename is copied through unchanged.
#[derive(Debug)]
pub struct ManifestRewriter {
    matcher: Option<Regex>,
    replacements: HashMap<Vec<u8>, Vec<u8>>,
}

impl ManifestRewriter {
    /// Build the rewriter for a set of signed segments.
    ///
    /// When two segment keys share a filename the first one keeps it. Keys with an empty
    /// filename are skipped.
    pub fn new(segments: &[SignedUrl]) -> Result<Self, AppError> {
        let mut replacements: HashMap<Vec<u8>, Vec<u8>> = HashMap::with_capacity(segments.len());
        for segment in segments {
            let file_name = segment.file_name();
            if file_name.is_empty() {
                continue;
            }
            match replacements.entry(file_name.as_bytes().to_vec()) {
                Entry::Vacant(slot) => {
                    slot.insert(segment.url.as_bytes().to_vec());
                }
                Entry::Occupied(_) => {
                    tracing::warn!(
                        key = %segment.key,
                        file_name = %file_name,
                        "Duplicate segment filename, keeping the first key listed"
                    );
                }
            }
        }

        if replacements.is_empty() {
            return Ok(Self {
                matcher: None,
                replacements,
            });
        }

        // Keys came from `&str` file names, so they are valid UTF-8.
        let mut names: Vec<&str> = replacements
            .keys()
            .filter_map(|name| std::str::from_utf8(name).ok())
            .collect();
        names.sort_unstable_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        let pattern = names
            .iter()
            .map(|name| regex::escape(name))
            .collect::<Vec<_>>()
            .join("|");

        let matcher = RegexBuilder::new(&pattern)
            .size_limit(MATCHER_SIZE_LIMIT)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build segment matcher: {}", e)))?;

        Ok(Self {
            matcher: Some(matcher),
            replacements,
        })
    }

    /// Number of distinct filenames this rewriter substitutes.
    pub fn len(&self) -> usize {
        self.replacements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replacements.is_empty()
    }

    /// Rewrite raw manifest bytes. Bytes that are not a known filename, including any
    /// that are not valid UTF-8, are copied through unchanged.
    pub fn rewrite(&self, manifest: &[u8]) -> RewrittenManifest {
        let Some(matcher) = &self.matcher else {
            return RewrittenManifest::new(manifest.to_vec());
        };

        let rewritten = matcher.replace_all(manifest, |caps: &Captures| {
            let matched = &caps[0];
            self.replacements
                .get(matched)
                .cloned()
                .unwrap_or_else(|| matched.to_vec())
        });

        RewrittenManifest::new(rewritten.into_owned())
    }
}
