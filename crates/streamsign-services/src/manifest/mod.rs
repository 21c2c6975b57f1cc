//! HLS manifest retrieval and rewriting.

mod fetcher;
mod rewriter;

pub use fetcher::{HttpManifestFetcher, ManifestFetcher};
pub use rewriter::ManifestRewriter;
